use super::{AppState, LobbyEntry};
use crate::error::GameResult;
use crate::types::*;

pub(crate) const POINTS_PER_OCCURRENCE: u32 = 10;
pub(crate) const COMPLETION_BONUS: u32 = 100;

/// Applies base points for a correct guess, then pays the completion bonus
/// at most once per round. Cooperative points land on the shared score,
/// everything else on the guessing participant.
///
/// Callers only invoke this for correct guesses, so the round image and a
/// non-empty word list are already known to exist.
pub(crate) fn apply_points(entry: &mut LobbyEntry, participant_idx: usize, points: u32) {
    match entry.lobby.game_mode {
        GameMode::Cooperative => entry.lobby.shared_score += points,
        _ => entry.participants[participant_idx].score += points,
    }

    let title_len = entry
        .lobby
        .current_image
        .as_ref()
        .map(|img| img.title_words.len())
        .unwrap_or(0);
    if entry.lobby.revealed_words.len() == title_len && !entry.lobby.completion_bonus_awarded {
        entry.lobby.completion_bonus_awarded = true;
        match entry.lobby.game_mode {
            GameMode::Cooperative => entry.lobby.shared_score += COMPLETION_BONUS,
            _ => entry.participants[participant_idx].score += COMPLETION_BONUS,
        }
    }
}

/// Participants ranked by score descending; the stable sort keeps join
/// order for ties.
pub(crate) fn standings_entries(entry: &LobbyEntry) -> Vec<StandingEntry> {
    let mut entries: Vec<StandingEntry> =
        entry.participants.iter().map(StandingEntry::from).collect();
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}

pub(crate) fn final_standings(entry: &LobbyEntry) -> FinalStandings {
    match entry.lobby.game_mode {
        GameMode::Cooperative => FinalStandings::Shared {
            shared_score: entry.lobby.shared_score,
        },
        _ => FinalStandings::Individual {
            entries: standings_entries(entry),
        },
    }
}

impl AppState {
    /// Current leaderboard for a lobby. Read-only.
    pub async fn get_leaderboard(&self, code: &str) -> GameResult<Leaderboard> {
        let entry = self.lobby_entry(code).await?;
        let entry = entry.read().await;
        Ok(Leaderboard {
            code: entry.lobby.code.clone(),
            game_mode: entry.lobby.game_mode,
            entries: standings_entries(&entry),
            shared_score: (entry.lobby.game_mode == GameMode::Cooperative)
                .then_some(entry.lobby.shared_score),
        })
    }
}
