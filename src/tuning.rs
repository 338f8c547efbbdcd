//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Two presets cover the sizing
//! and hitbox policies the game ships with; custom values can be loaded from
//! JSON and are validated before a run is built from them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a freshly spawned obstacle gets its size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ObstacleSizing {
    /// Square side is a fixed fraction of the viewport height
    Ratio { ratio: f32 },
    /// Square side is drawn uniformly from a band of viewport-height fractions
    Band { min_ratio: f32, max_ratio: f32 },
}

/// Named tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TuningPreset {
    /// Fixed-size obstacles, tight 20px hitbox inset
    #[default]
    Classic,
    /// Randomly sized obstacles, forgiving 40px hitbox inset
    Varied,
}

impl TuningPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningPreset::Classic => "Classic",
            TuningPreset::Varied => "Varied",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(TuningPreset::Classic),
            "varied" | "random" => Some(TuningPreset::Varied),
            _ => None,
        }
    }

    pub fn tuning(&self) -> Tuning {
        match self {
            TuningPreset::Classic => Tuning::default(),
            TuningPreset::Varied => Tuning {
                obstacle_sizing: ObstacleSizing::Band {
                    min_ratio: 0.08,
                    max_ratio: 0.16,
                },
                collision_inset: 40.0,
                ..Tuning::default()
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("Failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Spawn gap range is inverted: {min} > {max}")]
    InvertedSpawnGap { min: i32, max: i32 },

    #[error("Obstacle size band is inverted: {min} > {max}")]
    InvertedSizeBand { min: f32, max: f32 },

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} must be below 1 (a fraction of the viewport height), got {value}")]
    NotAFraction { name: &'static str, value: f32 },
}

/// Gameplay constants, in pixels and frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added to vertical velocity every frame
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_velocity: f32,
    /// Background pixels scrolled per frame
    pub scroll_speed: f32,
    /// Frames between spawns, inclusive range
    pub spawn_gap_min: i32,
    pub spawn_gap_max: i32,
    /// Obstacle speed at the start of a run (at the reference width)
    pub initial_obstacle_speed: f32,
    /// Added to the base speed at every ratchet
    pub speed_step: f32,
    /// Passes between ratchets
    pub speed_up_every: u32,
    /// Viewport width at which obstacle speed equals the base speed
    pub reference_width: f32,
    /// Fixed horizontal position of the character
    pub character_x: f32,
    /// Character side as a fraction of viewport height
    pub character_height_ratio: f32,
    pub obstacle_sizing: ObstacleSizing,
    /// Pixels trimmed off the trailing edge of both hitboxes
    pub collision_inset: f32,
    /// Stop the character at the top of the viewport
    pub ceiling_clamp: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.7,
            jump_velocity: -20.0,
            scroll_speed: 1.0,
            spawn_gap_min: 100,
            spawn_gap_max: 300,
            initial_obstacle_speed: 5.0,
            speed_step: 1.0,
            speed_up_every: 10,
            reference_width: 800.0,
            character_x: 50.0,
            character_height_ratio: 0.2,
            obstacle_sizing: ObstacleSizing::Ratio { ratio: 0.1 },
            collision_inset: 20.0,
            ceiling_clamp: true,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.spawn_gap_min > self.spawn_gap_max {
            return Err(TuningError::InvertedSpawnGap {
                min: self.spawn_gap_min,
                max: self.spawn_gap_max,
            });
        }
        positive("gravity", self.gravity)?;
        positive("reference_width", self.reference_width)?;
        positive("initial_obstacle_speed", self.initial_obstacle_speed)?;
        positive("spawn_gap_min", self.spawn_gap_min as f32)?;
        fraction("character_height_ratio", self.character_height_ratio)?;
        // The ratchet only ever goes up, and the backdrop only ever scrolls left
        non_negative("speed_step", self.speed_step)?;
        non_negative("scroll_speed", self.scroll_speed)?;
        if self.speed_up_every == 0 {
            return Err(TuningError::NotPositive {
                name: "speed_up_every",
                value: 0.0,
            });
        }
        match self.obstacle_sizing {
            ObstacleSizing::Ratio { ratio } => fraction("ratio", ratio)?,
            ObstacleSizing::Band {
                min_ratio,
                max_ratio,
            } => {
                fraction("min_ratio", min_ratio)?;
                fraction("max_ratio", max_ratio)?;
                if min_ratio > max_ratio {
                    return Err(TuningError::InvertedSizeBand {
                        min: min_ratio,
                        max: max_ratio,
                    });
                }
            }
        }
        non_negative("collision_inset", self.collision_inset)
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Negative { name, value })
    }
}

/// Strictly between 0 and 1
fn fraction(name: &'static str, value: f32) -> Result<(), TuningError> {
    positive(name, value)?;
    if value < 1.0 {
        Ok(())
    } else {
        Err(TuningError::NotAFraction { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(TuningPreset::Classic.tuning().validate().is_ok());
        assert!(TuningPreset::Varied.tuning().validate().is_ok());
    }

    #[test]
    fn test_varied_preset_policy() {
        let tuning = TuningPreset::Varied.tuning();
        assert_eq!(tuning.collision_inset, 40.0);
        assert!(matches!(tuning.obstacle_sizing, ObstacleSizing::Band { .. }));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 1.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 1.0);
        assert_eq!(tuning.spawn_gap_max, 300);
    }

    #[test]
    fn test_band_json() {
        let json = r#"{ "obstacle_sizing": { "policy": "band", "min_ratio": 0.05, "max_ratio": 0.1 } }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(
            tuning.obstacle_sizing,
            ObstacleSizing::Band {
                min_ratio: 0.05,
                max_ratio: 0.1
            }
        );
    }

    #[test]
    fn test_rejects_inverted_spawn_gap() {
        let err = Tuning::from_json(r#"{ "spawn_gap_min": 300, "spawn_gap_max": 100 }"#);
        assert!(matches!(
            err,
            Err(TuningError::InvertedSpawnGap { min: 300, max: 100 })
        ));
    }

    #[test]
    fn test_rejects_negative_inset() {
        let err = Tuning::from_json(r#"{ "collision_inset": -1.0 }"#);
        assert!(matches!(
            err,
            Err(TuningError::Negative {
                name: "collision_inset",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_decreasing_ratchet() {
        let err = Tuning::from_json(r#"{ "speed_step": -1.0 }"#);
        assert!(matches!(
            err,
            Err(TuningError::Negative {
                name: "speed_step",
                ..
            })
        ));
        // A flat difficulty curve is fine
        assert!(Tuning::from_json(r#"{ "speed_step": 0.0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_reverse_scroll() {
        let err = Tuning::from_json(r#"{ "scroll_speed": -3.0 }"#);
        assert!(matches!(
            err,
            Err(TuningError::Negative {
                name: "scroll_speed",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_stationary_obstacles() {
        for json in [
            r#"{ "initial_obstacle_speed": 0.0 }"#,
            r#"{ "initial_obstacle_speed": -5.0 }"#,
        ] {
            assert!(matches!(
                Tuning::from_json(json),
                Err(TuningError::NotPositive {
                    name: "initial_obstacle_speed",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_rejects_character_taller_than_viewport() {
        for json in [
            r#"{ "character_height_ratio": 1.0 }"#,
            r#"{ "character_height_ratio": 1.5 }"#,
        ] {
            assert!(matches!(
                Tuning::from_json(json),
                Err(TuningError::NotAFraction {
                    name: "character_height_ratio",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_rejects_zero_ratchet_cadence() {
        let err = Tuning::from_json(r#"{ "speed_up_every": 0 }"#);
        assert!(matches!(
            err,
            Err(TuningError::NotPositive {
                name: "speed_up_every",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_band_past_full_height() {
        let json = r#"{ "obstacle_sizing": { "policy": "band", "min_ratio": 0.5, "max_ratio": 1.2 } }"#;
        assert!(matches!(
            Tuning::from_json(json),
            Err(TuningError::NotAFraction {
                name: "max_ratio",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(TuningPreset::parse("VARIED"), Some(TuningPreset::Varied));
        assert_eq!(TuningPreset::parse("classic"), Some(TuningPreset::Classic));
        assert_eq!(TuningPreset::parse("hard"), None);
    }
}
