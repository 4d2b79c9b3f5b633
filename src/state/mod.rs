mod guess;
mod lobby;
mod round;
mod score;

use crate::error::{GameError, GameResult};
use crate::images::ImageProvider;
use crate::types::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Characters used for lobby codes
const CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_LENGTH: usize = 6;

/// A lobby together with its participants, guarded as one unit so every
/// mutating operation runs as a single critical section per lobby.
#[derive(Debug)]
pub struct LobbyEntry {
    pub lobby: Lobby,
    pub participants: Vec<Participant>,
}

impl LobbyEntry {
    pub(crate) fn participant_idx(&self, name: &str) -> Option<usize> {
        self.participants.iter().position(|p| p.name == name)
    }

    pub(crate) fn touch(&mut self) {
        self.lobby.last_activity = chrono::Utc::now().to_rfc3339();
    }

    /// Clears everything scoped to a single round: reveal state, owner
    /// claims, the bonus flag, and every participant's guesses.
    pub(crate) fn reset_round_state(&mut self) {
        self.lobby.revealed_words.clear();
        self.lobby.word_owners.clear();
        self.lobby.completion_bonus_awarded = false;
        for p in &mut self.participants {
            p.guessed_words.clear();
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Outer map handles lookup and creation; each entry carries its own
    /// lock so lobby mutations serialize per code, not globally.
    pub lobbies: Arc<RwLock<HashMap<LobbyCode, Arc<RwLock<LobbyEntry>>>>>,
    /// Randomness for codes, tokens, and captain draws. Seedable so tests
    /// can pin down assignment; always acquired after any lobby lock.
    rng: Arc<Mutex<StdRng>>,
    /// Stock photo provider, None when no access token is configured.
    pub image_provider: Option<Arc<dyn ImageProvider>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Production state carrying the configured image provider.
    pub fn new_with_images(image_provider: Option<Arc<dyn ImageProvider>>) -> Self {
        Self {
            image_provider,
            ..Self::new()
        }
    }

    /// Deterministic state for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            lobbies: Arc::new(RwLock::new(HashMap::new())),
            rng: Arc::new(Mutex::new(rng)),
            image_provider: None,
        }
    }

    pub(crate) async fn lock_rng(&self) -> tokio::sync::MutexGuard<'_, StdRng> {
        self.rng.lock().await
    }

    pub(crate) async fn lobby_entry(&self, code: &str) -> GameResult<Arc<RwLock<LobbyEntry>>> {
        let lobbies = self.lobbies.read().await;
        lobbies
            .get(code)
            .cloned()
            .ok_or_else(|| GameError::lobby_not_found(code))
    }

    /// Read-only snapshot for status polling; never blocks writers longer
    /// than the clone takes.
    pub async fn get_lobby(&self, code: &str) -> GameResult<LobbySnapshot> {
        let entry = self.lobby_entry(code).await?;
        let entry = entry.read().await;
        Ok(LobbySnapshot {
            lobby: entry.lobby.clone(),
            participants: entry.participants.clone(),
        })
    }

    pub async fn lobby_count(&self) -> usize {
        self.lobbies.read().await.len()
    }

    /// Drops lobbies whose last activity is older than `ttl`. Returns the
    /// number removed. Unparseable timestamps count as stale.
    pub async fn remove_idle_lobbies(&self, ttl: chrono::Duration) -> usize {
        let now = chrono::Utc::now();
        let mut lobbies = self.lobbies.write().await;
        let mut stale = Vec::new();
        for (code, entry) in lobbies.iter() {
            let entry = entry.read().await;
            let idle = chrono::DateTime::parse_from_rfc3339(&entry.lobby.last_activity)
                .map(|t| now.signed_duration_since(t.with_timezone(&chrono::Utc)) > ttl)
                .unwrap_or(true);
            if idle {
                stale.push(code.clone());
            }
        }
        for code in &stale {
            lobbies.remove(code);
        }
        stale.len()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws candidate codes until one misses the store. Runs under the outer
/// write lock so the uniqueness check and the insert are atomic.
pub(crate) fn generate_code(
    rng: &mut StdRng,
    taken: &HashMap<LobbyCode, Arc<RwLock<LobbyEntry>>>,
) -> String {
    loop {
        let candidate: String = (0..CODE_LENGTH)
            .map(|_| CODE_CHARS[rng.random_range(0..CODE_CHARS.len())] as char)
            .collect();
        if !taken.contains_key(&candidate) {
            return candidate;
        }
    }
}

/// 16 hex chars from 8 random bytes.
pub(crate) fn generate_token(rng: &mut StdRng) -> String {
    format!("{:016x}", rng.random::<u64>())
}
