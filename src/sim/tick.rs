//! Per-frame simulation step
//!
//! Advances the run by exactly one frame. The order below is load-bearing:
//! physics before clamping, clamping before the background scroll, spawning
//! before the obstacle pass so a new obstacle moves on the frame it appears.

use super::collision::hit_with_inset;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump requested since the previous step (key or touch)
    pub jump: bool,
}

/// Advance the run by one frame and report what happened.
///
/// A finished run is left untouched.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.run.frame_count += 1;

    if input.jump && state.character.jump(state.tuning.jump_velocity) {
        events.push(GameEvent::Jumped);
    }

    state.character.integrate();
    state
        .character
        .clamp(state.viewport, state.tuning.ceiling_clamp);

    state.background.scroll(state.tuning.scroll_speed);

    if state.run.frame_count >= state.run.next_obstacle_frame {
        let id = state.spawn_obstacle();
        state.schedule_next_spawn();
        events.push(GameEvent::ObstacleSpawned { id });
    }

    if advance_obstacles(state, &mut events) {
        let score = state.run.obstacles_passed;
        state.phase = GamePhase::GameOver;
        log::info!("Game over after {} frames, obstacles passed: {}", state.run.frame_count, score);
        events.push(GameEvent::Collision { score });
    }

    events
}

/// Move, score, retire and hit-test every obstacle in spawn order.
///
/// Off-screen obstacles are tombstoned during the pass and compacted after it,
/// so no element is skipped. Returns true on collision; obstacles after the
/// colliding one are not advanced.
fn advance_obstacles(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let character_box = state.character.hitbox();
    let character_x = state.character.pos.x;
    let inset = state.tuning.collision_inset;

    let mut retired = vec![false; state.obstacles.len()];
    let mut collided = false;

    for (i, obstacle) in state.obstacles.iter_mut().enumerate() {
        obstacle.pos.x -= obstacle.speed;

        if !obstacle.passed && obstacle.trailing_edge() < character_x {
            obstacle.passed = true;
            let bumped = state.run.record_pass(&state.tuning);
            events.push(GameEvent::ObstaclePassed {
                total: state.run.obstacles_passed,
            });
            if let Some(speed) = bumped {
                log::info!("Increased obstacle speed to: {}", speed);
                events.push(GameEvent::SpeedIncreased { speed });
            }
        }

        if obstacle.is_off_screen() {
            retired[i] = true;
            continue;
        }

        if hit_with_inset(character_box, obstacle.hitbox(), inset) {
            collided = true;
            break;
        }
    }

    let mut flags = retired.into_iter();
    state
        .obstacles
        .retain(|_| !flags.next().unwrap_or(false));

    collided
}
