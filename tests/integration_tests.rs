//! Integration tests for the game lifecycle and frame loop

use blockfall::core::{GameLoop, GameSnapshot, GameState, Piece, Renderer};
use blockfall::types::{GameAction, GameConfig, GamePhase, PieceKind};

const NO_INPUT: [GameAction; 0] = [];

fn started(seed: u32) -> GameState {
    let mut state = GameState::new(GameConfig::with_seed(seed));
    state.apply_action(GameAction::Start);
    state
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(GameConfig::with_seed(12345));
    assert_eq!(state.phase(), GamePhase::Idle);

    state.apply_action(GameAction::Start);
    assert_eq!(state.phase(), GamePhase::Running);
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.lines(), 0);
    assert!(state.hold_piece().is_none());
}

#[test]
fn test_hard_drops_until_game_over() {
    let mut state = started(12345);

    let mut drops = 0;
    while state.is_running() {
        state.apply_action(GameAction::HardDrop);
        drops += 1;
        assert!(drops < 200, "stack never topped out");
    }
    assert_eq!(state.phase(), GamePhase::GameOver);
    assert!(state.pieces_locked() > 0);
    assert!(state.take_last_event().map_or(false, |e| e.game_over));

    // Everything except Start is ignored now.
    let board = state.board().clone();
    let active = *state.active();
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::Hold,
    ] {
        assert!(!state.apply_action(action));
    }
    assert!(!state.tick(10_000));
    assert_eq!(state.board(), &board);
    assert_eq!(*state.active(), active);

    state.apply_action(GameAction::Start);
    assert!(state.is_running());
    assert_eq!(state.score(), 0);
    assert_eq!(state.pieces_locked(), 0);
    assert!(state.board().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameAction::MoveLeft,
        GameAction::RotateCw,
        GameAction::HardDrop,
        GameAction::Hold,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::RotateCcw,
        GameAction::SoftDrop,
        GameAction::HardDrop,
    ];

    let mut a = started(2024);
    let mut b = started(2024);
    for _ in 0..5 {
        for action in script {
            a.apply_action(action);
            b.apply_action(action);
            a.tick(16);
            b.tick(16);
        }
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_every_piece_has_four_cells_on_board() {
    // Locks on an empty board place four cells each until lines clear.
    let mut state = started(7);
    for _ in 0..PieceKind::ALL.len() {
        let board_before = state.board().cells().iter().filter(|c| c.is_some()).count();
        assert_eq!(*state.active(), Piece::spawn(state.active().kind));
        state.apply_action(GameAction::HardDrop);
        if state.take_last_event().map_or(0, |e| e.lines_cleared) == 0 {
            let after = state.board().cells().iter().filter(|c| c.is_some()).count();
            assert_eq!(after, board_before + 4);
        }
    }
}

#[test]
fn test_gravity_moves_piece_over_time() {
    let mut state = started(1);
    let y0 = state.active().y;

    for _ in 0..62 {
        state.advance(16, NO_INPUT);
    }
    assert_eq!(state.active().y, y0);

    state.advance(16, NO_INPUT);
    assert_eq!(state.active().y, y0 + 1);
    assert_eq!(state.drop_counter_ms(), 0);
}

struct CountingRenderer {
    frames: usize,
    last: Option<GameSnapshot>,
}

impl Renderer for CountingRenderer {
    type Error = std::convert::Infallible;

    fn present(&mut self, snapshot: &GameSnapshot) -> Result<(), Self::Error> {
        self.frames += 1;
        self.last = Some(*snapshot);
        Ok(())
    }
}

#[test]
fn test_game_loop_drives_state_and_presenter() {
    let mut game = GameLoop::new(GameConfig::with_seed(5));
    let mut out = CountingRenderer {
        frames: 0,
        last: None,
    };

    game.frame(16, &mut out).unwrap();
    assert_eq!(out.last.unwrap().phase, GamePhase::Idle);

    game.push(GameAction::Start);
    game.push(GameAction::HardDrop);
    let report = game.frame(16, &mut out).unwrap();
    assert_eq!(report.actions, 2);
    assert_eq!(out.frames, 2);

    let snap = out.last.unwrap();
    assert_eq!(snap.phase, GamePhase::Running);
    assert_eq!(snap.pieces_locked, 1);
    assert_eq!(snap.board.iter().flatten().filter(|c| c.is_some()).count(), 4);
}
