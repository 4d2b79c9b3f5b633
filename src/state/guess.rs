use super::{score, AppState};
use crate::error::{GameError, GameResult};
use crate::types::*;
use crate::words;
use std::collections::HashMap;

impl AppState {
    /// Processes one word guess. Every validation step runs before any
    /// mutation, so a rejected guess leaves the round exactly as it was.
    pub async fn submit_guess(
        &self,
        code: &str,
        player_name: &str,
        raw_word: &str,
    ) -> GameResult<GuessOutcome> {
        let entry = self.lobby_entry(code).await?;
        let mut entry = entry.write().await;

        if entry.lobby.status != LobbyStatus::Active {
            return Err(GameError::InvalidState("game is not active".into()));
        }
        let title_words = match entry.lobby.current_image.as_ref() {
            Some(image) => image.title_words.clone(),
            None => {
                return Err(GameError::InvalidState(
                    "no image loaded for this round".into(),
                ))
            }
        };

        let word = words::normalize_word(raw_word);
        if word.chars().count() < words::MIN_WORD_LEN {
            return Err(GameError::Validation(format!(
                "word must be at least {} characters",
                words::MIN_WORD_LEN
            )));
        }

        let idx = entry
            .participant_idx(player_name)
            .ok_or_else(|| GameError::participant_not_found(player_name))?;

        if entry.lobby.game_mode == GameMode::Competitive {
            let participant = &entry.participants[idx];
            if !participant.is_captain {
                return Err(GameError::Forbidden(
                    "only team captains can submit words".into(),
                ));
            }
            // Team turns apply until the all-play round lifts the gate.
            if entry.lobby.current_round < FINAL_ROUND
                && participant.team != entry.lobby.active_team
            {
                return Err(GameError::Forbidden("it is not your team's turn".into()));
            }
        }

        if entry.participants[idx].guessed_words.contains(&word) {
            return Err(GameError::AlreadyGuessed(word));
        }

        let occurrences = title_words.iter().filter(|w| *w == &word).count() as u32;
        let is_correct = occurrences > 0;
        let points = occurrences * score::POINTS_PER_OCCURRENCE;

        // Validation done; commit. The attempt is recorded whether or not
        // the word matches.
        entry.participants[idx].guessed_words.push(word.clone());

        if is_correct {
            if !entry.lobby.revealed_words.contains(&word) {
                entry.lobby.revealed_words.push(word.clone());
            }
            let claims_owner = match entry.lobby.game_mode {
                GameMode::FreeForAll => true,
                GameMode::Competitive => entry.lobby.current_round >= FINAL_ROUND,
                GameMode::Cooperative => false,
            };
            if claims_owner && !entry.lobby.word_owners.contains_key(&word) {
                let finder = entry.participants[idx].name.clone();
                entry.lobby.word_owners.insert(word.clone(), finder);
            }
            score::apply_points(&mut entry, idx, points);
        }
        entry.touch();
        tracing::debug!(
            "Guess {:?} by {} in lobby {}: correct={}",
            word,
            player_name,
            code,
            is_correct
        );

        let lobby = &entry.lobby;
        let participant = &entry.participants[idx];
        Ok(GuessOutcome {
            is_correct,
            points: if is_correct { points } else { 0 },
            revealed_words: lobby.revealed_words.clone(),
            word_owners: if lobby.game_mode == GameMode::FreeForAll {
                lobby.word_owners.clone()
            } else {
                HashMap::new()
            },
            score: if lobby.game_mode == GameMode::Cooperative {
                lobby.shared_score
            } else {
                participant.score
            },
            player_color: if lobby.game_mode == GameMode::FreeForAll {
                participant.player_color.clone()
            } else {
                None
            },
        })
    }
}
