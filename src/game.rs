//! Run controller
//!
//! Owns the current [`GameState`] and decides whether another frame should be
//! scheduled. A restart rebuilds the state from scratch with a new seed.

use crate::input::InputSource;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, Viewport, tick};
use crate::tuning::{Tuning, TuningError};

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule the next frame
    Continue,
    /// The run ended; don't schedule another frame of this run
    GameOver { score: u32 },
}

pub struct Game {
    state: GameState,
    tuning: Tuning,
    obstacle_kinds: usize,
}

impl Game {
    /// Start the first run. Fails if `tuning` doesn't validate.
    pub fn new(
        seed: u64,
        tuning: Tuning,
        viewport: Viewport,
        obstacle_kinds: usize,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        log::info!("New run with seed {} in {}x{}", seed, viewport.width, viewport.height);
        Ok(Self {
            state: GameState::new(seed, tuning.clone(), viewport, obstacle_kinds),
            tuning,
            obstacle_kinds,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.run.obstacles_passed
    }

    /// Run one simulation step, draining the jump intent first
    pub fn frame<I: InputSource + ?Sized>(&mut self, input: &mut I) -> (FrameOutcome, Vec<GameEvent>) {
        let input = TickInput {
            jump: input.take_jump(),
        };
        let events = tick(&mut self.state, &input);
        let outcome = match self.state.phase {
            GamePhase::Running => FrameOutcome::Continue,
            GamePhase::GameOver => FrameOutcome::GameOver {
                score: self.state.run.obstacles_passed,
            },
        };
        (outcome, events)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.state.resize(viewport);
    }

    /// Throw the run away and start a fresh one in the same viewport
    pub fn restart(&mut self, seed: u64) {
        let viewport = self.state.viewport;
        self.state = GameState::new(seed, self.tuning.clone(), viewport, self.obstacle_kinds);
        log::info!("Game restarted with seed: {}", seed);
    }

    /// Step until the run ends or `max_frames` pass. Returns the final score
    /// if the run ended.
    pub fn run_headless<I: InputSource + ?Sized>(&mut self, input: &mut I, max_frames: u64) -> Option<u32> {
        for _ in 0..max_frames {
            if let (FrameOutcome::GameOver { score }, _) = self.frame(input) {
                return Some(score);
            }
        }
        None
    }
}

/// Jump whenever an obstacle is about to reach the character
pub fn autopilot(state: &GameState) -> bool {
    let c = &state.character;
    let reach = c.pos.x + c.size.x;
    state.obstacles.iter().any(|o| {
        let gap = o.pos.x - reach;
        !o.passed && gap > 0.0 && gap < o.speed * 8.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::JumpLatch;

    fn game(seed: u64) -> Game {
        Game::new(seed, Tuning::default(), Viewport::new(800.0, 600.0), 3).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_tuning() {
        let viewport = Viewport::new(800.0, 600.0);
        let zero_cadence = Tuning {
            speed_up_every: 0,
            ..Tuning::default()
        };
        assert!(matches!(
            Game::new(1, zero_cadence, viewport, 3),
            Err(TuningError::NotPositive {
                name: "speed_up_every",
                ..
            })
        ));

        let backwards = Tuning {
            speed_step: -1.0,
            scroll_speed: -3.0,
            ..Tuning::default()
        };
        assert!(Game::new(1, backwards, viewport, 3).is_err());
    }

    #[test]
    fn test_idle_run_ends_in_collision() {
        let mut g = game(1);
        let mut never = || false;
        let score = g.run_headless(&mut never, 5_000);
        // Standing still, the first obstacle always hits
        assert_eq!(score, Some(0));
        assert_eq!(g.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_no_frames_after_game_over() {
        let mut g = game(2);
        let mut never = || false;
        g.run_headless(&mut never, 5_000);
        let frames = g.state().run.frame_count;
        let (outcome, events) = g.frame(&mut never);
        assert_eq!(outcome, FrameOutcome::GameOver { score: 0 });
        assert!(events.is_empty());
        assert_eq!(g.state().run.frame_count, frames);
    }

    #[test]
    fn test_latch_feeds_jump() {
        let mut g = game(3);
        let mut latch = JumpLatch::new();
        latch.clone().request();
        let (outcome, events) = g.frame(&mut latch);
        assert_eq!(outcome, FrameOutcome::Continue);
        assert!(events.contains(&GameEvent::Jumped));
        assert!(!latch.is_pending());
    }

    #[test]
    fn test_restart_rebuilds_state() {
        let mut g = game(4);
        let mut never = || false;
        g.run_headless(&mut never, 5_000);
        g.restart(5);
        assert_eq!(g.phase(), GamePhase::Running);
        assert_eq!(g.state().run.frame_count, 0);
        assert_eq!(g.score(), 0);
        assert!(g.state().obstacles.is_empty());
        assert_eq!(g.state().seed, 5);
    }

    #[test]
    fn test_restart_keeps_viewport() {
        let mut g = game(6);
        g.resize(Viewport::new(1200.0, 900.0));
        g.restart(7);
        assert_eq!(g.state().viewport, Viewport::new(1200.0, 900.0));
    }

    #[test]
    fn test_autopilot_scores() {
        let mut g = game(8);
        let mut pending = false;
        let mut passed = 0;
        for _ in 0..3_000 {
            pending |= autopilot(g.state());
            let mut input = || std::mem::take(&mut pending);
            let (outcome, _) = g.frame(&mut input);
            passed = g.score();
            if outcome != FrameOutcome::Continue {
                break;
            }
        }
        assert!(passed > 0, "autopilot never cleared an obstacle");
    }
}
