//! Frame driver that sits between an input source and a presenter.
//!
//! Input is queued as it arrives and applied at the start of the next frame,
//! in arrival order, before the fall timer is checked. Each frame ends with
//! exactly one `present` call, so an idle or finished game still redraws its
//! overlay.

use arrayvec::ArrayVec;

use crate::game_state::GameState;
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, GameConfig};

/// Actions buffered between two frames. Extra input beyond this is dropped.
pub const MAX_PENDING_ACTIONS: usize = 32;

/// Something that can draw a snapshot.
pub trait Renderer {
    type Error;

    fn present(&mut self, snapshot: &GameSnapshot) -> Result<(), Self::Error>;
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Queued actions applied this frame.
    pub actions: usize,
    /// Gravity moved or locked the piece.
    pub gravity: bool,
}

#[derive(Debug)]
pub struct GameLoop {
    state: GameState,
    pending: ArrayVec<GameAction, MAX_PENDING_ACTIONS>,
    snapshot: GameSnapshot,
}

impl GameLoop {
    pub fn new(config: GameConfig) -> Self {
        let state = GameState::new(config);
        let snapshot = state.snapshot();
        Self {
            state,
            pending: ArrayVec::new(),
            snapshot,
        }
    }

    /// Queue an action for the next frame. Returns false if the queue is full.
    pub fn push(&mut self, action: GameAction) -> bool {
        self.pending.try_push(action).is_ok()
    }

    pub fn pending(&self) -> &[GameAction] {
        &self.pending
    }

    /// Run one frame of `elapsed_ms` and hand the result to `renderer`.
    pub fn frame<R: Renderer>(
        &mut self,
        elapsed_ms: u32,
        renderer: &mut R,
    ) -> Result<FrameReport, R::Error> {
        let actions = self.pending.len();
        let gravity = self.state.advance(elapsed_ms, self.pending.drain(..));
        self.state.snapshot_into(&mut self.snapshot);
        renderer.present(&self.snapshot)?;
        Ok(FrameReport { actions, gravity })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Snapshot presented by the most recent frame.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GamePhase;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<GameSnapshot>,
        fail: bool,
    }

    impl Renderer for Recorder {
        type Error = &'static str;

        fn present(&mut self, snapshot: &GameSnapshot) -> Result<(), Self::Error> {
            if self.fail {
                return Err("closed");
            }
            self.frames.push(*snapshot);
            Ok(())
        }
    }

    #[test]
    fn idle_frames_still_present() {
        let mut game = GameLoop::new(GameConfig::with_seed(1));
        let mut out = Recorder::default();

        let report = game.frame(5000, &mut out).unwrap();
        assert_eq!(report, FrameReport::default());
        assert_eq!(out.frames.len(), 1);
        assert_eq!(out.frames[0].phase, GamePhase::Idle);
    }

    #[test]
    fn queued_actions_apply_in_order() {
        let mut game = GameLoop::new(GameConfig::with_seed(1));
        let mut out = Recorder::default();
        assert!(game.push(GameAction::Start));
        assert!(game.push(GameAction::MoveLeft));

        let report = game.frame(16, &mut out).unwrap();
        assert_eq!(report.actions, 2);
        assert!(!report.gravity);
        assert!(game.pending().is_empty());

        let snap = out.frames[0];
        assert_eq!(snap.phase, GamePhase::Running);
        let active = snap.active.unwrap();
        let spawn = crate::pieces::Piece::spawn(active.kind);
        assert_eq!(active.x, spawn.x - 1);
    }

    #[test]
    fn gravity_reported_once_interval_elapses() {
        let mut game = GameLoop::new(GameConfig::with_seed(1));
        let mut out = Recorder::default();
        game.push(GameAction::Start);
        game.frame(0, &mut out).unwrap();

        let mut gravity = 0;
        for _ in 0..63 {
            if game.frame(16, &mut out).unwrap().gravity {
                gravity += 1;
            }
        }
        // 63 * 16 = 1008ms.
        assert_eq!(gravity, 1);
        assert_eq!(game.snapshot().active.unwrap().y, 0);
    }

    #[test]
    fn queue_is_bounded() {
        let mut game = GameLoop::new(GameConfig::default());
        for _ in 0..MAX_PENDING_ACTIONS {
            assert!(game.push(GameAction::MoveRight));
        }
        assert!(!game.push(GameAction::MoveRight));
    }

    #[test]
    fn renderer_errors_propagate() {
        let mut game = GameLoop::new(GameConfig::default());
        let mut out = Recorder {
            fail: true,
            ..Recorder::default()
        };
        assert_eq!(game.frame(16, &mut out), Err("closed"));
    }
}
