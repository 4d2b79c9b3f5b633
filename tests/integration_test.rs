use photoparty::error::GameError;
use photoparty::state::AppState;
use photoparty::types::{
    AdvanceOutcome, Difficulty, FinalStandings, GameMode, LobbyStatus, RoundImage, Team,
    PLAYER_COLORS,
};
use std::collections::HashSet;
use std::sync::Arc;

fn round_image(words: &[&str]) -> RoundImage {
    RoundImage {
        id: "img1".into(),
        url: "https://example.com/photo.jpg".into(),
        title: words.join(" "),
        title_words: words.iter().map(|w| w.to_string()).collect(),
        easy_mode_hidden_words: vec![],
        contributor: Some("Test Photographer".into()),
    }
}

/// End-to-end integration test for a complete free-for-all game
#[tokio::test]
async fn test_full_free_for_all_flow() {
    let state = Arc::new(AppState::new());

    // 1. Setup: create the lobby
    let lobby = state
        .create_lobby(GameMode::FreeForAll, Difficulty::Hard)
        .await;
    assert_eq!(lobby.status, LobbyStatus::Waiting);
    assert_eq!(lobby.current_round, 0);
    assert_eq!(lobby.code.len(), 6, "Lobby codes are 6 characters");
    let code = lobby.code.clone();

    // 2. Two players join and get palette colors in order
    let alice = state
        .join_lobby(&code, "alice")
        .await
        .expect("alice should join");
    assert_eq!(alice.participant.player_color.as_deref(), Some(PLAYER_COLORS[0]));
    assert_eq!(alice.player_token.len(), 16);

    let bob = state
        .join_lobby(&code, "bob")
        .await
        .expect("bob should join");
    assert_eq!(bob.participant.player_color.as_deref(), Some(PLAYER_COLORS[1]));
    assert_ne!(alice.player_token, bob.player_token);

    let snapshot = state.get_lobby(&code).await.expect("Lobby should exist");
    assert_eq!(snapshot.participants.len(), 2);

    // 3. Start the game
    let lobby = state.start_game(&code).await.expect("game should start");
    assert_eq!(lobby.status, LobbyStatus::Active);
    assert!(lobby.started_at.is_some());
    assert_eq!(lobby.current_round, 0);
    assert_eq!(lobby.active_team, None);
    assert!(lobby.team_captains.is_none());

    // 4. Round 0: load an image and race for its words
    state
        .load_round(&code, round_image(&["mountain", "sunset"]))
        .await
        .expect("round 0 should load");

    // Normalization lowercases and trims, so the cased guess still lands
    let outcome = state
        .submit_guess(&code, "alice", "  Sunset ")
        .await
        .expect("guess should be accepted");
    assert!(outcome.is_correct);
    assert_eq!(outcome.points, 10);
    assert_eq!(outcome.score, 10);
    assert_eq!(outcome.revealed_words, vec!["sunset"]);
    assert_eq!(outcome.word_owners.get("sunset"), Some(&"alice".to_string()));
    assert_eq!(outcome.player_color.as_deref(), Some(PLAYER_COLORS[0]));

    // bob reveals the last word and collects the completion bonus on top
    let outcome = state
        .submit_guess(&code, "bob", "mountain")
        .await
        .expect("guess should be accepted");
    assert_eq!(outcome.points, 10);
    assert_eq!(outcome.score, 110, "10 for the word plus the 100 bonus");
    assert_eq!(outcome.revealed_words.len(), 2);
    assert_eq!(outcome.word_owners.get("mountain"), Some(&"bob".to_string()));

    // A word someone else already found still pays bob, but keeps its owner
    let outcome = state
        .submit_guess(&code, "bob", "sunset")
        .await
        .expect("guess should be accepted");
    assert_eq!(outcome.points, 10);
    assert_eq!(outcome.score, 120, "No second completion bonus");
    assert_eq!(outcome.word_owners.get("sunset"), Some(&"alice".to_string()));

    // 5. Repeats and misses
    let err = state.submit_guess(&code, "bob", "mountain").await.unwrap_err();
    assert_eq!(err, GameError::AlreadyGuessed("mountain".into()));

    let outcome = state
        .submit_guess(&code, "alice", "ocean")
        .await
        .expect("wrong guesses are recorded, not rejected");
    assert!(!outcome.is_correct);
    assert_eq!(outcome.points, 0);
    assert_eq!(outcome.score, 10);

    // 6. Advance into round 1
    let outcome = state.advance_round(&code).await.expect("advance should succeed");
    assert_eq!(
        outcome,
        AdvanceOutcome::NextRound {
            current_round: 1,
            active_team: None,
            all_play: false,
        }
    );

    // 7. Round 1: words derived from a raw title (stopwords drop out)
    let mut image = round_image(&[]);
    image.title = "Pine Forest In The Morning Fog".into();
    image.title_words = vec![];
    let lobby = state.load_round(&code, image).await.expect("round 1 should load");
    assert_eq!(
        lobby.current_image.expect("image should be set").title_words,
        vec!["pine", "forest", "morning", "fog"]
    );

    let outcome = state
        .submit_guess(&code, "alice", "morning")
        .await
        .expect("guess should be accepted");
    assert_eq!(outcome.score, 20);
    assert_eq!(outcome.revealed_words, vec!["morning"], "Round state was reset");
    assert_eq!(outcome.word_owners.len(), 1);

    // 8. Advance through the idle middle rounds
    for expected_round in 2..=4 {
        let outcome = state.advance_round(&code).await.expect("advance should succeed");
        assert_eq!(
            outcome,
            AdvanceOutcome::NextRound {
                current_round: expected_round,
                active_team: None,
                all_play: false,
            }
        );
    }

    // 9. Round 4: a duplicated title word pays per occurrence
    state
        .load_round(&code, round_image(&["palm", "palm"]))
        .await
        .expect("round 4 should load");
    let outcome = state
        .submit_guess(&code, "bob", "palm")
        .await
        .expect("guess should be accepted");
    assert_eq!(outcome.points, 20, "Two occurrences at 10 each");
    assert_eq!(outcome.score, 140);

    let outcome = state
        .submit_guess(&code, "alice", "coconut")
        .await
        .expect("guess should be accepted");
    assert!(!outcome.is_correct);

    // 10. Advancing past the final round finishes the game
    let outcome = state.advance_round(&code).await.expect("advance should succeed");
    match outcome {
        AdvanceOutcome::GameFinished {
            standings: FinalStandings::Individual { entries },
        } => {
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].name, "bob");
            assert_eq!(entries[0].score, 140);
            assert_eq!(entries[0].player_color.as_deref(), Some(PLAYER_COLORS[1]));
            assert_eq!(entries[1].name, "alice");
            assert_eq!(entries[1].score, 20);
        }
        other => panic!("Expected individual standings, got {other:?}"),
    }

    // 11. The finished lobby stays readable but rejects play
    let snapshot = state.get_lobby(&code).await.expect("Lobby should exist");
    assert_eq!(snapshot.lobby.status, LobbyStatus::Finished);
    assert!(snapshot.lobby.current_image.is_none());

    let err = state.submit_guess(&code, "alice", "palm").await.unwrap_err();
    assert!(matches!(err, GameError::InvalidState(_)));

    let board = state.get_leaderboard(&code).await.expect("Leaderboard should exist");
    assert_eq!(board.entries[0].name, "bob");
    assert_eq!(board.shared_score, None);

    println!("✅ Full free-for-all flow integration test passed!");
}

/// End-to-end integration test for a competitive team game
#[tokio::test]
async fn test_full_competitive_flow() {
    let state = Arc::new(AppState::with_seed(11));

    // 1. Setup: four players, two teams
    let lobby = state
        .create_lobby(GameMode::Competitive, Difficulty::Hard)
        .await;
    let code = lobby.code.clone();
    for name in ["p1", "p2", "p3", "p4"] {
        state.join_lobby(&code, name).await.expect("player should join");
    }

    let lobby = state.start_game(&code).await.expect("game should start");
    assert_eq!(lobby.active_team, Some(Team::Red), "Red opens round 0");
    let captains = lobby.team_captains.expect("competitive lobby has captains");
    let red_captain = captains[0].clone();
    let blue_captain = captains[1].clone();

    let snapshot = state.get_lobby(&code).await.expect("Lobby should exist");
    assert!(snapshot.participants.iter().all(|p| p.team.is_some()));
    assert_eq!(
        snapshot.participants.iter().filter(|p| p.is_captain).count(),
        2
    );
    let captain_team = |name: &str| {
        snapshot
            .participants
            .iter()
            .find(|p| p.name == *name)
            .and_then(|p| p.team)
    };
    assert_eq!(captain_team(&red_captain), Some(Team::Red));
    assert_eq!(captain_team(&blue_captain), Some(Team::Blue));

    // Non-captains, still in join order
    let non_captains: Vec<String> = snapshot
        .participants
        .iter()
        .filter(|p| !p.is_captain)
        .map(|p| p.name.clone())
        .collect();
    assert_eq!(non_captains.len(), 2);

    // 2. Round 0 belongs to red
    state
        .load_round(&code, round_image(&["mountain", "sunset"]))
        .await
        .expect("round 0 should load");

    let err = state
        .submit_guess(&code, &blue_captain, "mountain")
        .await
        .unwrap_err();
    assert_eq!(err, GameError::Forbidden("it is not your team's turn".into()));

    let err = state
        .submit_guess(&code, &non_captains[0], "mountain")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GameError::Forbidden("only team captains can submit words".into())
    );

    let outcome = state
        .submit_guess(&code, &red_captain, "mountain")
        .await
        .expect("red captain may guess");
    assert!(outcome.is_correct);
    assert_eq!(outcome.score, 10);
    assert!(outcome.word_owners.is_empty(), "No claims outside all-play");
    assert_eq!(outcome.player_color, None);

    // 3. Round 1 flips the turn to blue
    let outcome = state.advance_round(&code).await.expect("advance should succeed");
    assert_eq!(
        outcome,
        AdvanceOutcome::NextRound {
            current_round: 1,
            active_team: Some(Team::Blue),
            all_play: false,
        }
    );

    state
        .load_round(&code, round_image(&["harbor", "boat"]))
        .await
        .expect("round 1 should load");
    let err = state
        .submit_guess(&code, &red_captain, "boat")
        .await
        .unwrap_err();
    assert!(matches!(err, GameError::Forbidden(_)));

    let outcome = state
        .submit_guess(&code, &blue_captain, "boat")
        .await
        .expect("blue captain may guess");
    assert_eq!(outcome.score, 10);

    // 4. Turns keep alternating until round 4 opens to both teams
    let outcome = state.advance_round(&code).await.expect("advance should succeed");
    assert_eq!(
        outcome,
        AdvanceOutcome::NextRound {
            current_round: 2,
            active_team: Some(Team::Red),
            all_play: false,
        }
    );
    let outcome = state.advance_round(&code).await.expect("advance should succeed");
    assert_eq!(
        outcome,
        AdvanceOutcome::NextRound {
            current_round: 3,
            active_team: Some(Team::Blue),
            all_play: false,
        }
    );
    let outcome = state.advance_round(&code).await.expect("advance should succeed");
    assert_eq!(
        outcome,
        AdvanceOutcome::NextRound {
            current_round: 4,
            active_team: None,
            all_play: true,
        }
    );

    // 5. All-play round: both captains race, first finder claims the word
    state
        .load_round(&code, round_image(&["beach", "beach", "palm"]))
        .await
        .expect("round 4 should load");

    let outcome = state
        .submit_guess(&code, &blue_captain, "beach")
        .await
        .expect("blue captain may guess in all-play");
    assert_eq!(outcome.points, 20);
    assert_eq!(outcome.score, 30);

    let outcome = state
        .submit_guess(&code, &red_captain, "palm")
        .await
        .expect("red captain may guess in all-play");
    assert_eq!(outcome.score, 20);

    // The captain gate still holds even though the team gate is lifted
    let err = state
        .submit_guess(&code, &non_captains[0], "palm")
        .await
        .unwrap_err();
    assert!(matches!(err, GameError::Forbidden(_)));

    let snapshot = state.get_lobby(&code).await.expect("Lobby should exist");
    assert_eq!(
        snapshot.lobby.word_owners.get("beach"),
        Some(&blue_captain),
        "All-play claims are recorded on the lobby"
    );
    assert_eq!(snapshot.lobby.word_owners.get("palm"), Some(&red_captain));

    // 6. Finish: captains ranked by score, tied non-captains keep join order
    let outcome = state.advance_round(&code).await.expect("advance should succeed");
    match outcome {
        AdvanceOutcome::GameFinished {
            standings: FinalStandings::Individual { entries },
        } => {
            assert_eq!(entries.len(), 4);
            assert_eq!(entries[0].name, blue_captain);
            assert_eq!(entries[0].score, 30);
            assert_eq!(entries[0].team, Some(Team::Blue));
            assert_eq!(entries[1].name, red_captain);
            assert_eq!(entries[1].score, 20);
            assert_eq!(entries[2].name, non_captains[0]);
            assert_eq!(entries[3].name, non_captains[1]);
            assert_eq!(entries[2].score, 0);
            assert_eq!(entries[3].score, 0);
        }
        other => panic!("Expected individual standings, got {other:?}"),
    }

    let err = state
        .submit_guess(&code, &blue_captain, "beach")
        .await
        .unwrap_err();
    assert!(matches!(err, GameError::InvalidState(_)));

    println!("✅ Full competitive flow integration test passed!");
}

/// End-to-end integration test for a cooperative game
#[tokio::test]
async fn test_full_cooperative_flow() {
    let state = Arc::new(AppState::new());

    // 1. Setup: cooperative lobbies hand out no colors or teams
    let lobby = state
        .create_lobby(GameMode::Cooperative, Difficulty::Easy)
        .await;
    assert_eq!(lobby.difficulty, Difficulty::Easy);
    let code = lobby.code.clone();

    let alice = state.join_lobby(&code, "alice").await.expect("alice should join");
    assert_eq!(alice.participant.player_color, None);
    let bob = state.join_lobby(&code, "bob").await.expect("bob should join");
    assert_eq!(bob.participant.player_color, None);

    let lobby = state.start_game(&code).await.expect("game should start");
    assert_eq!(lobby.active_team, None);
    assert!(lobby.team_captains.is_none());
    assert_eq!(lobby.shared_score, 0);

    // 2. Round 0: every correct word pays into the shared score
    state
        .load_round(&code, round_image(&["alpine", "bridge", "canyon"]))
        .await
        .expect("round 0 should load");

    let outcome = state
        .submit_guess(&code, "alice", "alpine")
        .await
        .expect("guess should be accepted");
    assert_eq!(outcome.score, 10, "Shared score, not alice's own");
    assert!(outcome.word_owners.is_empty());
    assert_eq!(outcome.player_color, None);

    let outcome = state
        .submit_guess(&code, "bob", "bridge")
        .await
        .expect("guess should be accepted");
    assert_eq!(outcome.score, 20);

    let outcome = state
        .submit_guess(&code, "alice", "canyon")
        .await
        .expect("guess should be accepted");
    assert_eq!(outcome.score, 130, "Completing the title pays the shared bonus");

    let snapshot = state.get_lobby(&code).await.expect("Lobby should exist");
    assert_eq!(snapshot.lobby.shared_score, 130);
    assert!(snapshot.participants.iter().all(|p| p.score == 0));
    assert!(snapshot.lobby.word_owners.is_empty());

    // 3. Roll through the remaining rounds
    for expected_round in 1..=4 {
        let outcome = state.advance_round(&code).await.expect("advance should succeed");
        assert_eq!(
            outcome,
            AdvanceOutcome::NextRound {
                current_round: expected_round,
                active_team: None,
                all_play: false,
            }
        );
    }

    // 4. Round 4: one word, one bonus
    state
        .load_round(&code, round_image(&["sunset"]))
        .await
        .expect("round 4 should load");
    let outcome = state
        .submit_guess(&code, "bob", "sunset")
        .await
        .expect("guess should be accepted");
    assert_eq!(outcome.score, 240);

    let board = state.get_leaderboard(&code).await.expect("Leaderboard should exist");
    assert_eq!(board.shared_score, Some(240));
    assert!(board.entries.iter().all(|e| e.score == 0));

    // 5. Finish reports the shared total
    let outcome = state.advance_round(&code).await.expect("advance should succeed");
    assert_eq!(
        outcome,
        AdvanceOutcome::GameFinished {
            standings: FinalStandings::Shared { shared_score: 240 },
        }
    );

    println!("✅ Full cooperative flow integration test passed!");
}

#[tokio::test]
async fn test_lobby_isolation() {
    let state = Arc::new(AppState::new());
    let first = state.create_lobby(GameMode::FreeForAll, Difficulty::Hard).await;
    let second = state.create_lobby(GameMode::FreeForAll, Difficulty::Hard).await;
    assert_ne!(first.code, second.code);

    // The same display name can exist in both lobbies independently
    state.join_lobby(&first.code, "alice").await.unwrap();
    state.join_lobby(&second.code, "alice").await.unwrap();
    state.start_game(&first.code).await.unwrap();
    state.start_game(&second.code).await.unwrap();

    state
        .load_round(&first.code, round_image(&["mountain"]))
        .await
        .unwrap();
    state.submit_guess(&first.code, "alice", "mountain").await.unwrap();

    // The second lobby has no image yet and none of the first lobby's progress
    let err = state
        .submit_guess(&second.code, "alice", "mountain")
        .await
        .unwrap_err();
    assert!(matches!(err, GameError::InvalidState(_)));

    state
        .load_round(&second.code, round_image(&["sunset"]))
        .await
        .unwrap();
    let outcome = state
        .submit_guess(&second.code, "alice", "mountain")
        .await
        .unwrap();
    assert!(!outcome.is_correct);

    let first_snap = state.get_lobby(&first.code).await.unwrap();
    let second_snap = state.get_lobby(&second.code).await.unwrap();
    assert_eq!(first_snap.lobby.revealed_words, vec!["mountain"]);
    assert!(second_snap.lobby.revealed_words.is_empty());
    assert_eq!(first_snap.participants[0].score, 10);
    assert_eq!(second_snap.participants[0].score, 0);
    assert_eq!(state.lobby_count().await, 2);
}

#[tokio::test]
async fn test_guess_preconditions() {
    let state = Arc::new(AppState::new());
    let lobby = state.create_lobby(GameMode::FreeForAll, Difficulty::Hard).await;
    let code = lobby.code.clone();
    state.join_lobby(&code, "alice").await.unwrap();

    // Before the game starts
    let err = state.submit_guess(&code, "alice", "mountain").await.unwrap_err();
    assert!(matches!(err, GameError::InvalidState(_)));

    state.start_game(&code).await.unwrap();

    // Active, but no image loaded yet
    let err = state.submit_guess(&code, "alice", "mountain").await.unwrap_err();
    assert!(matches!(err, GameError::InvalidState(_)));

    state
        .load_round(&code, round_image(&["mountain"]))
        .await
        .unwrap();

    // Too short once trimmed
    let err = state.submit_guess(&code, "alice", " at ").await.unwrap_err();
    assert!(matches!(err, GameError::Validation(_)));

    // Unknown participant
    let err = state
        .submit_guess(&code, "mallory", "mountain")
        .await
        .unwrap_err();
    assert_eq!(err, GameError::participant_not_found("mallory"));

    // Repeats of the same word by the same player
    state.submit_guess(&code, "alice", "mountain").await.unwrap();
    let err = state.submit_guess(&code, "alice", "mountain").await.unwrap_err();
    assert_eq!(err.to_string(), "you already guessed \"mountain\"");
}

#[tokio::test]
async fn test_unknown_lobby_errors() {
    let state = Arc::new(AppState::new());
    let missing = GameError::lobby_not_found("ZZZZZZ");

    assert_eq!(state.get_lobby("ZZZZZZ").await.unwrap_err(), missing);
    assert_eq!(state.join_lobby("ZZZZZZ", "alice").await.unwrap_err(), missing);
    assert_eq!(state.start_game("ZZZZZZ").await.unwrap_err(), missing);
    assert_eq!(state.advance_round("ZZZZZZ").await.unwrap_err(), missing);
    assert_eq!(state.get_leaderboard("ZZZZZZ").await.unwrap_err(), missing);
    assert_eq!(
        state.submit_guess("ZZZZZZ", "alice", "mountain").await.unwrap_err(),
        missing
    );
    assert_eq!(
        state
            .load_round("ZZZZZZ", round_image(&["mountain"]))
            .await
            .unwrap_err(),
        missing
    );
}

#[tokio::test]
async fn test_lobby_codes_are_unique() {
    let state = Arc::new(AppState::new());
    let mut codes = HashSet::new();
    for _ in 0..15 {
        let lobby = state.create_lobby(GameMode::FreeForAll, Difficulty::Hard).await;
        assert_eq!(lobby.code.len(), 6);
        assert!(lobby
            .code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        codes.insert(lobby.code);
    }
    assert_eq!(codes.len(), 15);
}
