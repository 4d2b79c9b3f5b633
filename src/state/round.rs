use super::{score, AppState};
use crate::error::{GameError, GameResult};
use crate::types::*;
use crate::words;

impl AppState {
    /// Loads the image for the current round index and opens it for
    /// guessing. Clears every trace of the previous round first.
    pub async fn load_round(&self, code: &str, mut image: RoundImage) -> GameResult<Lobby> {
        let entry = self.lobby_entry(code).await?;
        let mut entry = entry.write().await;
        if entry.lobby.status != LobbyStatus::Active {
            return Err(GameError::InvalidState("game is not active".into()));
        }

        if image.title_words.is_empty() {
            image.title_words = words::extract_words(&image.title);
        }

        entry.reset_round_state();
        entry.lobby.current_image = Some(image);
        entry.touch();
        tracing::info!(
            "Round {} live in lobby {}",
            entry.lobby.current_round,
            code
        );
        Ok(entry.lobby.clone())
    }

    /// Moves the lobby past the current round. Rounds 0 through 3 roll
    /// forward into the next round's idle phase; advancing past round 4
    /// finishes the game and returns the final standings.
    pub async fn advance_round(&self, code: &str) -> GameResult<AdvanceOutcome> {
        let entry = self.lobby_entry(code).await?;
        let mut entry = entry.write().await;
        match entry.lobby.status {
            LobbyStatus::Waiting => {
                return Err(GameError::InvalidState("game has not started".into()))
            }
            LobbyStatus::Finished => {
                return Err(GameError::InvalidState("game is already finished".into()))
            }
            LobbyStatus::Active => {}
        }

        if entry.lobby.current_round >= FINAL_ROUND {
            entry.lobby.status = LobbyStatus::Finished;
            entry.lobby.current_image = None;
            entry.touch();
            let standings = score::final_standings(&entry);
            tracing::info!("Game finished in lobby {}", code);
            return Ok(AdvanceOutcome::GameFinished { standings });
        }

        entry.lobby.current_round += 1;
        entry.lobby.current_image = None;
        entry.reset_round_state();

        if entry.lobby.game_mode == GameMode::Competitive {
            entry.lobby.active_team = if entry.lobby.current_round < FINAL_ROUND {
                // red and blue alternate turns until the all-play round
                Some(entry.lobby.active_team.map_or(Team::Red, Team::opposite))
            } else {
                None
            };
        }
        entry.touch();
        tracing::info!(
            "Lobby {} advanced to round {}",
            code,
            entry.lobby.current_round
        );

        Ok(AdvanceOutcome::NextRound {
            current_round: entry.lobby.current_round,
            active_team: entry.lobby.active_team,
            all_play: entry.lobby.game_mode == GameMode::Competitive
                && entry.lobby.current_round == FINAL_ROUND,
        })
    }
}
