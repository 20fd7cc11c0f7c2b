//! End-to-end workflows through `SessionContext`, driven the way a
//! tool-dispatch layer drives it: resume from the stored history before
//! each player attempt, then apply the move.

use rust_tactics::engine::Outcome;
use rust_tactics::error::EngineError;
use rust_tactics::puzzle::PuzzleData;
use rust_tactics::store::SearchCriteria;
use rust_tactics::SessionContext;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn puzzle(id: &str, fen: &str, moves: &[&str]) -> PuzzleData {
    PuzzleData {
        puzzle_id: id.to_string(),
        fen: fen.to_string(),
        moves: moves.iter().map(|m| m.to_string()).collect(),
        rating: 1500,
        rating_deviation: 0,
        popularity: 0,
        nb_plays: 0,
        themes: Vec::new(),
        game_url: String::new(),
        opening_tags: Vec::new(),
    }
}

#[test]
fn test_full_solve_with_resume_between_attempts() {
    let mut ctx = SessionContext::new();
    ctx.load_puzzle(puzzle("p1", START_FEN, &["e2e4", "e7e5", "g1f3"]))
        .unwrap();

    let (outcome, message) = ctx.play_move("e2e4");
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(message, "e4");

    // Opponent ply is applied unchecked.
    let (outcome, _) = ctx.play_move("e7e5");
    assert_eq!(outcome, Outcome::Success);

    // Re-sync from the stored history, as the dispatch layer does before
    // every attempt, then close out the line.
    let history: Vec<String> = ctx.current_state().unwrap().move_history.iter().cloned().collect();
    ctx.resume_at(history, None).unwrap();

    let (outcome, message) = ctx.play_move("g1f3");
    assert_eq!(outcome, Outcome::PuzzleSolved);
    assert_eq!(message, "Puzzle solved with Nf3!");
    assert_eq!(ctx.current_state().unwrap().move_count(), 3);
}

#[test]
fn test_play_sequence_with_auto_reply() {
    let mut ctx = SessionContext::new();
    ctx.load_puzzle(puzzle("p1", START_FEN, &["e2e4", "e7e5"]))
        .unwrap();

    let (outcome, messages) = ctx.play_sequence(["e2e4"]);

    assert_eq!(outcome, Outcome::Success);
    assert_eq!(
        messages,
        vec!["e4".to_string(), "Opponent: e5".to_string()]
    );
    // Initial empty state plus one per applied ply.
    assert_eq!(ctx.store().len(), 3);
    assert_eq!(ctx.current_state().unwrap().move_count(), 2);
}

#[test]
fn test_difficulty_tracks_outcomes() {
    let mut ctx = SessionContext::new();
    ctx.load_puzzle(PuzzleData::fallback()).unwrap();
    assert_eq!(ctx.difficulty(), 1200);

    let (outcome, _) = ctx.play_move("a2a3");
    assert_eq!(outcome, Outcome::WrongMove);
    assert_eq!(ctx.difficulty(), 1175);

    let (outcome, message) = ctx.play_move("h5f7");
    assert_eq!(outcome, Outcome::PuzzleSolved);
    assert_eq!(message, "Puzzle solved with Qxf7#!");
    assert_eq!(ctx.difficulty(), 1225);
}

#[test]
fn test_resume_at_creates_missing_state() {
    let mut ctx = SessionContext::new();
    ctx.load_puzzle(puzzle("p1", START_FEN, &["e2e4", "e7e5", "g1f3"]))
        .unwrap();

    // This history was never played through the engine.
    let state = ctx.resume_at(["e2e4", "e7e5"], Some(7)).unwrap();
    assert_eq!(state.move_count(), 2);
    assert_eq!(state.message_ref, Some(7));
    assert_eq!(ctx.current_state().unwrap(), state);

    // Resuming the same history again finds the stored state; the
    // original ref wins.
    let again = ctx.resume_at(["e2e4", "e7e5"], Some(9)).unwrap();
    assert_eq!(again.message_ref, Some(7));
    assert_eq!(ctx.store().len(), 2);
}

#[test]
fn test_resume_at_rejects_corrupt_history() {
    let mut ctx = SessionContext::new();
    ctx.load_puzzle(puzzle("p1", START_FEN, &["e2e4"])).unwrap();

    let err = ctx.resume_at(["e2e4", "e2e4"], None).unwrap_err();
    assert!(matches!(err, EngineError::CorruptHistory { ply: 1, .. }));
}

#[test]
fn test_annotate_state_first_ref_wins() {
    let mut ctx = SessionContext::new();
    ctx.load_puzzle(puzzle("p1", START_FEN, &["e2e4"])).unwrap();

    let first = ctx.annotate_state(["e2e4"], 100).unwrap();
    assert_eq!(first.message_ref, Some(100));

    let second = ctx.annotate_state(["e2e4"], 200).unwrap();
    assert_eq!(second.message_ref, Some(100));
    assert_eq!(first, second);

    let found = ctx.search(&SearchCriteria::new().with_message_ref(100));
    assert_eq!(found.len(), 1);
}

#[test]
fn test_board_for_replays_stored_state() {
    let mut ctx = SessionContext::new();
    ctx.load_puzzle(puzzle("p1", START_FEN, &["e2e4", "e7e5"]))
        .unwrap();
    ctx.play_move("e2e4");

    let state = ctx.current_state().unwrap();
    let board = ctx.board_for(&state).unwrap();
    assert_eq!(board.ply(), 1);
    assert!(board.fen().contains(" b "));
}

#[test]
fn test_loading_a_new_puzzle_keeps_old_states() {
    let mut ctx = SessionContext::new();
    ctx.load_puzzle(puzzle("p1", START_FEN, &["e2e4"])).unwrap();
    ctx.play_move("e2e4");

    ctx.load_puzzle(puzzle("p2", START_FEN, &["d2d4"])).unwrap();

    // Fresh session, but the first puzzle's states are still searchable.
    let current = ctx.current_state().unwrap();
    assert_eq!(current.puzzle_id, "p2");
    assert_eq!(current.move_count(), 0);
    assert_eq!(
        ctx.search(&SearchCriteria::new().with_puzzle_id("p1")).len(),
        2
    );
    assert!(ctx.current_position().is_player_turn);
}

#[test]
fn test_evict_puzzle_scoped_removal() {
    let mut ctx = SessionContext::new();
    ctx.load_puzzle(puzzle("p1", START_FEN, &["e2e4"])).unwrap();
    ctx.play_move("e2e4");
    ctx.load_puzzle(puzzle("p2", START_FEN, &["d2d4"])).unwrap();

    let removed = ctx.evict_puzzle("p1");
    assert_eq!(removed, 2);
    assert!(ctx.search(&SearchCriteria::new().with_puzzle_id("p1")).is_empty());
    // p2's current state is unaffected.
    assert_eq!(ctx.current_state().unwrap().puzzle_id, "p2");
}

#[test]
fn test_hint_through_context() {
    let mut ctx = SessionContext::new();
    assert_eq!(ctx.hint(), "No hint available");

    ctx.load_puzzle(PuzzleData::fallback()).unwrap();
    assert_eq!(ctx.hint(), "Try: Qxf7#");
}
