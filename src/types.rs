use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque ID types for type safety
pub type LobbyCode = String;
pub type PlayerName = String;

/// Every mode plays the same number of rounds, indexed 0..=4.
pub const MAX_ROUNDS: u32 = 5;
pub const FINAL_ROUND: u32 = MAX_ROUNDS - 1;

/// Fixed color palette, handed out in order at join time. Once all ten are
/// taken, assignment wraps by participant count modulo palette size.
pub const PLAYER_COLORS: &[&str] = &[
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F7DC6F", "#BB8FCE", "#85C1E2",
    "#F8B739", "#52BE80",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LobbyStatus {
    Waiting,
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    FreeForAll,
    Competitive,
    Cooperative,
}

impl GameMode {
    /// Colors exist for individual highlighting; cooperative play has none.
    pub fn uses_colors(self) -> bool {
        matches!(self, GameMode::FreeForAll | GameMode::Competitive)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Hard,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub fn opposite(self) -> Self {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

/// Image payload a round is played against. Produced by the provider layer
/// and handed to `load_round` already resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundImage {
    pub id: String,
    pub url: String,
    pub title: String,
    /// Guessable words extracted from the title; derived from `title` on
    /// load when the caller leaves it empty.
    #[serde(default)]
    pub title_words: Vec<String>,
    /// Pre-revealed hint words for easy difficulty. Presentation only, never
    /// consulted by the round rules.
    #[serde(default)]
    pub easy_mode_hidden_words: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Lobby {
    pub code: LobbyCode,
    pub status: LobbyStatus,
    pub game_mode: GameMode,
    pub difficulty: Difficulty,
    pub current_round: u32,
    pub current_image: Option<RoundImage>,
    /// Words guessed correctly this round, in reveal order.
    pub revealed_words: Vec<String>,
    /// Word -> first finder. Free-for-all always; competitive only during
    /// the all-play round. First claim wins, never overwritten.
    pub word_owners: HashMap<String, PlayerName>,
    /// Set when the +100 completion bonus has been paid this round.
    pub completion_bonus_awarded: bool,
    /// Whose turn it is in competitive mode; None during the all-play round
    /// and in every other mode.
    pub active_team: Option<Team>,
    pub shared_score: u32,
    /// (red captain, blue captain), fixed at game start.
    pub team_captains: Option<[PlayerName; 2]>,
    pub created_at: String,
    pub started_at: Option<String>,
    /// ISO timestamp of the last successful mutation (for TTL-based cleanup)
    pub last_activity: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Participant {
    pub lobby_code: LobbyCode,
    pub name: PlayerName,
    /// Session token, returned once in the join response. Never serialized
    /// into status payloads other players poll.
    #[serde(skip_serializing)]
    pub token: String,
    pub score: u32,
    /// Words this participant tried this round, correct or not.
    pub guessed_words: Vec<String>,
    pub player_color: Option<String>,
    pub team: Option<Team>,
    pub is_captain: bool,
    pub joined_at: String,
}

// ========== Operation payloads ==========

/// Join response; the token rides alongside the participant because the
/// participant itself never serializes it.
#[derive(Debug, Clone, Serialize)]
pub struct JoinOutcome {
    pub participant: Participant,
    pub player_token: String,
}

/// Poll target for host and player screens.
#[derive(Debug, Clone, Serialize)]
pub struct LobbySnapshot {
    pub lobby: Lobby,
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GuessOutcome {
    pub is_correct: bool,
    pub points: u32,
    pub revealed_words: Vec<String>,
    /// Populated for free-for-all lobbies, empty otherwise.
    pub word_owners: HashMap<String, PlayerName>,
    /// Shared score in cooperative mode, the guesser's score otherwise.
    pub score: u32,
    /// The guesser's color, free-for-all only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_color: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    NextRound {
        current_round: u32,
        /// Present in competitive mode while team turns still apply.
        #[serde(skip_serializing_if = "Option::is_none")]
        active_team: Option<Team>,
        /// True exactly when the new round is the competitive all-play round.
        all_play: bool,
    },
    GameFinished { standings: FinalStandings },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum FinalStandings {
    Individual { entries: Vec<StandingEntry> },
    Shared { shared_score: u32 },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StandingEntry {
    pub name: PlayerName,
    pub score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    pub code: LobbyCode,
    pub game_mode: GameMode,
    /// Sorted by score descending; ties keep join order.
    pub entries: Vec<StandingEntry>,
    /// Authoritative total for cooperative lobbies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_score: Option<u32>,
}

impl From<&Participant> for StandingEntry {
    fn from(p: &Participant) -> Self {
        Self {
            name: p.name.clone(),
            score: p.score,
            team: p.team,
            player_color: p.player_color.clone(),
        }
    }
}
