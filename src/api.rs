//! HTTP API endpoints for the lobby and round lifecycle.
//!
//! Thin axum handlers over the state engine; every game rule lives in
//! `state`, this layer only shapes requests and responses.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::GameError;
use crate::images;
use crate::state::AppState;
use crate::types::*;
use crate::words;

/// All HTTP routes, ready to be layered and served
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/lobbies", post(create_lobby))
        .route("/api/lobbies/{code}", get(lobby_status))
        .route("/api/lobbies/{code}/join", post(join_lobby))
        .route("/api/lobbies/{code}/start", post(start_game))
        .route("/api/lobbies/{code}/round", post(load_round))
        .route("/api/lobbies/{code}/guess", post(submit_guess))
        .route("/api/lobbies/{code}/advance", post(advance_round))
        .route("/api/lobbies/{code}/leaderboard", get(leaderboard))
        .route("/api/images/random", get(random_image))
}

/// Request body for creating a lobby
#[derive(Debug, Deserialize)]
pub struct CreateLobbyRequest {
    pub game_mode: GameMode,
    pub difficulty: Difficulty,
}

/// Request body for joining a lobby
#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub player_name: String,
}

/// Request body for submitting a word guess
#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    pub player_name: String,
    pub word: String,
}

/// Query parameters for the random image endpoint
#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    pub difficulty: Option<Difficulty>,
}

/// Wire form of a game error
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let status = match self {
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            GameError::Validation(_) => StatusCode::BAD_REQUEST,
            GameError::InvalidState(_) | GameError::AlreadyGuessed(_) => StatusCode::CONFLICT,
            GameError::Forbidden(_) => StatusCode::FORBIDDEN,
            GameError::Dependency(_) => StatusCode::BAD_GATEWAY,
        };
        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
        };
        (status, Json(body)).into_response()
    }
}

/// Liveness probe.
///
/// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Create a new lobby.
///
/// POST /api/lobbies
async fn create_lobby(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateLobbyRequest>,
) -> (StatusCode, Json<Lobby>) {
    let lobby = state.create_lobby(req.game_mode, req.difficulty).await;
    (StatusCode::CREATED, Json(lobby))
}

/// Join a waiting lobby. The returned `player_token` is shown exactly
/// once; status payloads never repeat it.
///
/// POST /api/lobbies/{code}/join
async fn join_lobby(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Json(req): Json<JoinRequest>,
) -> Result<Json<JoinOutcome>, GameError> {
    let outcome = state.join_lobby(&code, &req.player_name).await?;
    Ok(Json(outcome))
}

/// Start the game, freezing teams and captains.
///
/// POST /api/lobbies/{code}/start
async fn start_game(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Lobby>, GameError> {
    let lobby = state.start_game(&code).await?;
    Ok(Json(lobby))
}

/// Lobby snapshot for status polling.
///
/// GET /api/lobbies/{code}
async fn lobby_status(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<LobbySnapshot>, GameError> {
    let snapshot = state.get_lobby(&code).await?;
    Ok(Json(snapshot))
}

/// Load an image into the current round.
///
/// POST /api/lobbies/{code}/round
async fn load_round(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Json(image): Json<RoundImage>,
) -> Result<Json<Lobby>, GameError> {
    let lobby = state.load_round(&code, image).await?;
    Ok(Json(lobby))
}

/// Submit one word guess.
///
/// POST /api/lobbies/{code}/guess
async fn submit_guess(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Json(req): Json<GuessRequest>,
) -> Result<Json<GuessOutcome>, GameError> {
    let outcome = state.submit_guess(&code, &req.player_name, &req.word).await?;
    Ok(Json(outcome))
}

/// Advance to the next round, or finish the game after the last one.
///
/// POST /api/lobbies/{code}/advance
async fn advance_round(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<AdvanceOutcome>, GameError> {
    let outcome = state.advance_round(&code).await?;
    Ok(Json(outcome))
}

/// Scores ordered for display.
///
/// GET /api/lobbies/{code}/leaderboard
async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Leaderboard>, GameError> {
    let board = state.get_leaderboard(&code).await?;
    Ok(Json(board))
}

/// Fetch a random stock photo and prepare it for a round: word
/// extraction, plus the pre-hidden sample in easy mode.
///
/// GET /api/images/random?difficulty=easy|hard
async fn random_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImageQuery>,
) -> Response {
    let Some(provider) = state.image_provider.clone() else {
        let body = ErrorBody {
            error: "no image provider configured".to_string(),
            kind: "unavailable",
        };
        return (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response();
    };

    // Draw the search term before the network call so the RNG lock is
    // never held across an await.
    let search_term = {
        let mut rng = state.lock_rng().await;
        images::random_search_term(&mut *rng)
    };

    let photo = match provider.fetch_random(search_term).await {
        Ok(photo) => photo,
        Err(e) => {
            tracing::warn!("Image fetch via {} failed: {}", provider.name(), e);
            return GameError::Dependency(e.to_string()).into_response();
        }
    };

    let title_words = words::extract_words(&photo.title);
    let easy_mode_hidden_words = if query.difficulty == Some(Difficulty::Easy) {
        let mut rng = state.lock_rng().await;
        images::sample_hidden_words(&mut *rng, &title_words)
    } else {
        Vec::new()
    };

    Json(RoundImage {
        id: photo.id,
        url: photo.url,
        title: photo.title,
        title_words,
        easy_mode_hidden_words,
        contributor: photo.contributor,
    })
    .into_response()
}
