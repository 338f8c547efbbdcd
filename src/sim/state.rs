//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`]; it is created once per run
//! and thrown away wholesale on restart.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::random::random_int;
use crate::tuning::{ObstacleSizing, Tuning};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Frames keep being scheduled
    Running,
    /// The character hit an obstacle; no further steps
    GameOver,
}

/// Things that happened during a step, for audio and the host
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Jumped,
    ObstacleSpawned { id: u32 },
    ObstaclePassed { total: u32 },
    SpeedIncreased { speed: f32 },
    Collision { score: u32 },
}

/// Visible drawing area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }
}

/// The player-controlled runner
#[derive(Debug, Clone)]
pub struct Character {
    /// Top-left corner; x never changes after construction
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity_y: f32,
    pub gravity: f32,
    /// Set by a jump, cleared only on landing
    pub is_jumping: bool,
}

impl Character {
    pub fn new(viewport: Viewport, tuning: &Tuning) -> Self {
        let side = viewport.height * tuning.character_height_ratio;
        Self {
            pos: Vec2::new(tuning.character_x, viewport.height - side),
            size: Vec2::splat(side),
            velocity_y: 0.0,
            gravity: tuning.gravity,
            is_jumping: false,
        }
    }

    /// Lowest allowed y (top edge resting on the ground line)
    #[inline]
    pub fn floor_y(&self, viewport: Viewport) -> f32 {
        viewport.height - self.size.y
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Start a jump if grounded. Returns true if a jump began.
    pub fn jump(&mut self, velocity: f32) -> bool {
        if self.is_jumping {
            return false;
        }
        self.is_jumping = true;
        self.velocity_y = velocity;
        true
    }

    /// Gravity then position
    pub fn integrate(&mut self) {
        self.velocity_y += self.gravity;
        self.pos.y += self.velocity_y;
    }

    /// Snap to the ground line (landing) and optionally to the top of the viewport
    pub fn clamp(&mut self, viewport: Viewport, ceiling: bool) {
        let floor = self.floor_y(viewport);
        if self.pos.y >= floor {
            self.pos.y = floor;
            self.velocity_y = 0.0;
            self.is_jumping = false;
        }
        if ceiling && self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.velocity_y = 0.0;
        }
    }

    /// Rescale to a new viewport, keeping x and staying inside the bounds
    pub fn resize(&mut self, viewport: Viewport, tuning: &Tuning) {
        let side = viewport.height * tuning.character_height_ratio;
        self.size = Vec2::splat(side);
        let floor = self.floor_y(viewport);
        if !self.is_jumping || self.pos.y >= floor {
            self.pos.y = floor;
            self.velocity_y = 0.0;
            self.is_jumping = false;
        }
        self.pos.y = self.pos.y.max(0.0);
    }
}

/// Scrolling backdrop, drawn as two side-by-side tiles
#[derive(Debug, Clone)]
pub struct Background {
    /// Offset of the first tile, always in (-width, 0]
    pub x: f32,
    pub size: Vec2,
}

impl Background {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            x: 0.0,
            size: Vec2::new(viewport.width, viewport.height),
        }
    }

    pub fn scroll(&mut self, speed: f32) {
        self.x -= speed;
        if self.x <= -self.size.x {
            self.x = 0.0;
        }
    }

    /// X positions of both tiles
    pub fn tiles(&self) -> [f32; 2] {
        [self.x, self.x + self.size.x]
    }
}

/// A ground-level obstacle scrolling toward the character
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame, fixed at spawn
    pub speed: f32,
    /// Set once when the obstacle clears the character
    pub passed: bool,
    /// Index into the obstacle sprite set
    pub sprite: usize,
}

impl Obstacle {
    pub fn hitbox(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Fully past the left edge of the viewport
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.trailing_edge() < 0.0
    }

    pub fn ground(&mut self, viewport: Viewport) {
        self.pos.y = viewport.height - self.size.y;
    }
}

/// Score and difficulty counters for the current run
#[derive(Debug, Clone)]
pub struct RunState {
    /// Steps taken this run
    pub frame_count: u64,
    /// Spawn as soon as `frame_count` reaches this
    pub next_obstacle_frame: u64,
    /// The score
    pub obstacles_passed: u32,
    /// Ratchets up every `speed_up_every` passes
    pub obstacle_base_speed: f32,
}

impl RunState {
    /// Count a pass. Returns the new base speed if this pass triggered a ratchet.
    pub fn record_pass(&mut self, tuning: &Tuning) -> Option<f32> {
        self.obstacles_passed += 1;
        // Zero cadence never validates; it means no ratchet
        if self.obstacles_passed.checked_rem(tuning.speed_up_every) == Some(0) {
            self.obstacle_base_speed += tuning.speed_step;
            Some(self.obstacle_base_speed)
        } else {
            None
        }
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub character: Character,
    pub background: Background,
    /// Spawn order; removed when off-screen
    pub obstacles: Vec<Obstacle>,
    pub run: RunState,
    /// Number of obstacle sprites to pick from (at least one)
    pub obstacle_kinds: usize,
    next_id: u32,
}

impl GameState {
    /// Create a new run from validated tuning (see [`Tuning::validate`]).
    /// `obstacle_kinds` is clamped to at least one sprite.
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport, obstacle_kinds: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let first_gap = random_int(&mut rng, tuning.spawn_gap_min, tuning.spawn_gap_max);
        Self {
            seed,
            rng,
            character: Character::new(viewport, &tuning),
            background: Background::new(viewport),
            obstacles: Vec::new(),
            run: RunState {
                frame_count: 0,
                next_obstacle_frame: first_gap.max(0) as u64,
                obstacles_passed: 0,
                obstacle_base_speed: tuning.initial_obstacle_speed,
            },
            obstacle_kinds: obstacle_kinds.max(1),
            phase: GamePhase::Running,
            viewport,
            tuning,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Side length for a new obstacle under the current sizing policy
    fn obstacle_side(&mut self) -> f32 {
        let height = self.viewport.height;
        match self.tuning.obstacle_sizing {
            ObstacleSizing::Ratio { ratio } => height * ratio,
            ObstacleSizing::Band {
                min_ratio,
                max_ratio,
            } => {
                let min = (height * min_ratio).round() as i32;
                let max = ((height * max_ratio).round() as i32).max(min);
                random_int(&mut self.rng, min, max).max(1) as f32
            }
        }
    }

    /// Append an obstacle at the right edge, sitting on the ground line
    pub fn spawn_obstacle(&mut self) -> u32 {
        let side = self.obstacle_side();
        let sprite = random_int(&mut self.rng, 0, self.obstacle_kinds as i32 - 1) as usize;
        let speed = self.run.obstacle_base_speed * (self.viewport.width / self.tuning.reference_width);
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(self.viewport.width, self.viewport.height - side),
            size: Vec2::splat(side),
            speed,
            passed: false,
            sprite,
        });
        id
    }

    /// Schedule the next spawn a random gap after the current frame
    pub fn schedule_next_spawn(&mut self) {
        let gap = random_int(
            &mut self.rng,
            self.tuning.spawn_gap_min,
            self.tuning.spawn_gap_max,
        );
        self.run.next_obstacle_frame = self.run.frame_count + gap.max(0) as u64;
    }

    /// Rescale everything to a new viewport
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.character.resize(viewport, &self.tuning);
        self.background.size = Vec2::new(viewport.width, viewport.height);
        if self.background.x <= -self.background.size.x {
            self.background.x = 0.0;
        }
        let ratio = match self.tuning.obstacle_sizing {
            ObstacleSizing::Ratio { ratio } => Some(ratio),
            ObstacleSizing::Band { .. } => None,
        };
        for obstacle in &mut self.obstacles {
            if let Some(ratio) = ratio {
                obstacle.size = Vec2::splat(viewport.height * ratio);
            }
            obstacle.ground(viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(750.0, 550.0)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_new_state_grounded() {
        let state = GameState::new(1, Tuning::default(), viewport(), 3);
        let c = &state.character;
        assert!(approx(c.size.x, 110.0) && approx(c.size.y, 110.0));
        assert_eq!(c.pos.x, 50.0);
        assert!(approx(c.pos.y, 440.0));
        assert!(!c.is_jumping);
        assert_eq!(state.phase, GamePhase::Running);
        assert!((100..=300).contains(&state.run.next_obstacle_frame));
    }

    #[test]
    fn test_jump_while_airborne_is_noop() {
        let mut c = Character::new(viewport(), &Tuning::default());
        assert!(c.jump(-20.0));
        c.integrate();
        let vy = c.velocity_y;
        assert!(!c.jump(-20.0));
        assert_eq!(c.velocity_y, vy);
        assert!(c.is_jumping);
    }

    #[test]
    fn test_landing_clears_jump() {
        let vp = viewport();
        let mut c = Character::new(vp, &Tuning::default());
        c.jump(-20.0);
        for _ in 0..200 {
            c.integrate();
            c.clamp(vp, true);
        }
        assert!(!c.is_jumping);
        assert_eq!(c.velocity_y, 0.0);
        assert_eq!(c.pos.y, c.floor_y(vp));
    }

    #[test]
    fn test_ceiling_clamp() {
        let vp = Viewport::new(400.0, 200.0);
        let mut c = Character::new(vp, &Tuning::default());
        assert!(approx(c.floor_y(vp), 160.0));
        // 160 - 200 + 0.7 puts the top edge above the viewport
        c.jump(-200.0);
        c.integrate();
        assert!(c.pos.y < 0.0);
        c.clamp(vp, true);
        assert_eq!(c.pos.y, 0.0);
        assert_eq!(c.velocity_y, 0.0);
        // Still airborne; only landing clears the flag
        assert!(c.is_jumping);
    }

    #[test]
    fn test_background_wraps_to_zero() {
        let mut bg = Background::new(Viewport::new(100.0, 50.0));
        bg.x = -99.5;
        bg.scroll(1.0);
        assert_eq!(bg.x, 0.0);
        assert_eq!(bg.tiles(), [0.0, 100.0]);
    }

    #[test]
    fn test_spawn_ratio_sizing() {
        let mut state = GameState::new(9, Tuning::default(), viewport(), 3);
        state.spawn_obstacle();
        let o = &state.obstacles[0];
        assert!(approx(o.size.x, 55.0));
        assert_eq!(o.pos.x, 750.0);
        assert!(approx(o.pos.y, 495.0));
        assert!((o.speed - 5.0 * 750.0 / 800.0).abs() < 1e-4);
        assert!(o.sprite < 3);
        assert!(!o.passed);
    }

    #[test]
    fn test_spawn_band_sizing() {
        let tuning = crate::tuning::TuningPreset::Varied.tuning();
        let mut state = GameState::new(9, tuning, viewport(), 3);
        for _ in 0..50 {
            state.spawn_obstacle();
        }
        for o in &state.obstacles {
            assert!(o.size.x >= 44.0 && o.size.x <= 88.0, "size {}", o.size.x);
            assert!(approx(o.pos.y + o.size.y, 550.0));
        }
    }

    #[test]
    fn test_obstacle_ids_unique() {
        let mut state = GameState::new(3, Tuning::default(), viewport(), 1);
        let a = state.spawn_obstacle();
        let b = state.spawn_obstacle();
        assert_ne!(a, b);
        assert!(state.obstacles.iter().all(|o| o.sprite == 0));
    }

    #[test]
    fn test_resize_rescales_and_regrounds() {
        let mut state = GameState::new(5, Tuning::default(), viewport(), 3);
        state.spawn_obstacle();
        state.resize(Viewport::new(1000.0, 1000.0));
        assert!(approx(state.character.size.y, 200.0));
        assert!(approx(state.character.pos.y, 800.0));
        assert_eq!(state.character.pos.x, 50.0);
        let o = &state.obstacles[0];
        assert!(approx(o.size.x, 100.0));
        assert!(approx(o.pos.y, 900.0));
        assert_eq!(state.background.size, Vec2::new(1000.0, 1000.0));
    }

    #[test]
    fn test_record_pass_ratchets_every_tenth() {
        let tuning = Tuning::default();
        let mut run = RunState {
            frame_count: 0,
            next_obstacle_frame: 0,
            obstacles_passed: 0,
            obstacle_base_speed: 5.0,
        };
        for n in 1..=25 {
            let bumped = run.record_pass(&tuning);
            assert_eq!(bumped.is_some(), n % 10 == 0);
        }
        assert_eq!(run.obstacle_base_speed, 7.0);
    }

    #[test]
    fn test_record_pass_zero_cadence_never_ratchets() {
        let tuning = Tuning {
            speed_up_every: 0,
            ..Tuning::default()
        };
        let mut run = RunState {
            frame_count: 0,
            next_obstacle_frame: 0,
            obstacles_passed: 0,
            obstacle_base_speed: 5.0,
        };
        for _ in 0..3 {
            assert_eq!(run.record_pass(&tuning), None);
        }
        assert_eq!(run.obstacles_passed, 3);
        assert_eq!(run.obstacle_base_speed, 5.0);
    }
}
