use super::{generate_code, generate_token, AppState, LobbyEntry};
use crate::error::{GameError, GameResult};
use crate::types::*;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

impl AppState {
    /// Creates a lobby in `waiting` under a fresh unique code.
    pub async fn create_lobby(&self, game_mode: GameMode, difficulty: Difficulty) -> Lobby {
        let now = chrono::Utc::now().to_rfc3339();
        let mut lobbies = self.lobbies.write().await;
        let code = {
            let mut rng = self.lock_rng().await;
            generate_code(&mut rng, &lobbies)
        };

        let lobby = Lobby {
            code: code.clone(),
            status: LobbyStatus::Waiting,
            game_mode,
            difficulty,
            current_round: 0,
            current_image: None,
            revealed_words: Vec::new(),
            word_owners: HashMap::new(),
            completion_bonus_awarded: false,
            active_team: None,
            shared_score: 0,
            team_captains: None,
            created_at: now.clone(),
            started_at: None,
            last_activity: now,
        };
        lobbies.insert(
            code.clone(),
            Arc::new(RwLock::new(LobbyEntry {
                lobby: lobby.clone(),
                participants: Vec::new(),
            })),
        );
        tracing::info!("Lobby {} created ({:?}, {:?})", code, game_mode, difficulty);
        lobby
    }

    /// Admits a player into a waiting lobby, issuing their session token
    /// and, in modes that use them, a palette color.
    pub async fn join_lobby(&self, code: &str, player_name: &str) -> GameResult<JoinOutcome> {
        let name = player_name.trim();

        let entry = self.lobby_entry(code).await?;
        let mut entry = entry.write().await;
        if entry.lobby.status != LobbyStatus::Waiting {
            return Err(GameError::InvalidState(
                "lobby is no longer accepting players".into(),
            ));
        }
        if name.is_empty() {
            return Err(GameError::Validation("player name is required".into()));
        }
        if entry.participant_idx(name).is_some() {
            return Err(GameError::Validation(format!(
                "name \"{name}\" is already taken in this lobby"
            )));
        }

        // First unused palette color in palette order; wrap by participant
        // count once all ten are handed out.
        let player_color = if entry.lobby.game_mode.uses_colors() {
            let taken: Vec<String> = entry
                .participants
                .iter()
                .filter_map(|p| p.player_color.clone())
                .collect();
            Some(
                PLAYER_COLORS
                    .iter()
                    .map(|c| c.to_string())
                    .find(|c| !taken.contains(c))
                    .unwrap_or_else(|| {
                        PLAYER_COLORS[entry.participants.len() % PLAYER_COLORS.len()].to_string()
                    }),
            )
        } else {
            None
        };

        let token = {
            let mut rng = self.lock_rng().await;
            generate_token(&mut rng)
        };

        let participant = Participant {
            lobby_code: entry.lobby.code.clone(),
            name: name.to_string(),
            token: token.clone(),
            score: 0,
            guessed_words: Vec::new(),
            player_color,
            team: None,
            is_captain: false,
            joined_at: chrono::Utc::now().to_rfc3339(),
        };
        entry.participants.push(participant.clone());
        entry.touch();
        tracing::info!("Player {} joined lobby {}", name, code);

        Ok(JoinOutcome {
            participant,
            player_token: token,
        })
    }

    /// Starts the game. Competitive lobbies get two random captains (red
    /// then blue) with everyone else alternating teams in join order.
    pub async fn start_game(&self, code: &str) -> GameResult<Lobby> {
        let entry = self.lobby_entry(code).await?;
        let mut entry = entry.write().await;
        if entry.lobby.status != LobbyStatus::Waiting {
            return Err(GameError::InvalidState("game has already started".into()));
        }
        if entry.participants.is_empty() {
            return Err(GameError::Validation(
                "need at least one participant to start".into(),
            ));
        }
        if entry.lobby.game_mode == GameMode::Competitive {
            if entry.participants.len() < 2 {
                return Err(GameError::Validation(
                    "need at least 2 participants for competitive mode".into(),
                ));
            }

            let mut order: Vec<usize> = (0..entry.participants.len()).collect();
            {
                let mut rng = self.lock_rng().await;
                order.shuffle(&mut *rng);
            }
            let (red_idx, blue_idx) = (order[0], order[1]);
            entry.participants[red_idx].is_captain = true;
            entry.participants[red_idx].team = Some(Team::Red);
            entry.participants[blue_idx].is_captain = true;
            entry.participants[blue_idx].team = Some(Team::Blue);

            // Remaining players alternate red/blue in join order, red first.
            let mut next = Team::Red;
            for p in entry.participants.iter_mut().filter(|p| !p.is_captain) {
                p.team = Some(next);
                next = next.opposite();
            }

            entry.lobby.team_captains = Some([
                entry.participants[red_idx].name.clone(),
                entry.participants[blue_idx].name.clone(),
            ]);
            entry.lobby.active_team = Some(Team::Red);
        }

        entry.lobby.status = LobbyStatus::Active;
        entry.lobby.started_at = Some(chrono::Utc::now().to_rfc3339());
        entry.lobby.current_round = 0;
        entry.lobby.shared_score = 0;
        entry.lobby.current_image = None;
        for p in &mut entry.participants {
            p.score = 0;
        }
        entry.reset_round_state();
        entry.touch();
        tracing::info!("Game started in lobby {}", code);

        Ok(entry.lobby.clone())
    }
}
