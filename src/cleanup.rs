use crate::state::AppState;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the idle lobby reaper
#[derive(Debug, Clone)]
pub struct ReaperConfig {
    /// How long a lobby may sit without activity before removal
    pub ttl: chrono::Duration,
    /// Pause between sweeps
    pub interval: Duration,
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            ttl: chrono::Duration::minutes(120),
            interval: Duration::from_secs(300),
        }
    }
}

impl ReaperConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let ttl_minutes = std::env::var("LOBBY_TTL_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(120);
        let interval_secs = std::env::var("LOBBY_REAP_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(300);

        Self {
            ttl: chrono::Duration::minutes(ttl_minutes),
            interval: Duration::from_secs(interval_secs),
        }
    }
}

/// Spawn a background task that sweeps out lobbies idle beyond the TTL.
/// Abandoned games otherwise accumulate forever in the in-memory store.
pub fn spawn_lobby_reaper(state: Arc<AppState>, config: ReaperConfig) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(config.interval).await;

            let removed = state.remove_idle_lobbies(config.ttl).await;
            if removed > 0 {
                tracing::info!("Reaped {} idle lobbies", removed);
            }
        }
    });
}
