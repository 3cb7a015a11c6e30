// Centralized configuration for simulation parameters

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

// ====================
// Scheduler Parameters
// ====================
/// Logical updates per second, independent of the host callback rate.
pub const TARGET_TICK_RATE: u32 = 30;

// ====================
// Physics Parameters
// ====================
pub const DEFAULT_GRAVITY: f32 = 0.25; // Downward acceleration per tick (+y is down)
pub const DEFAULT_FRICTION: f32 = 0.999; // Per-tick velocity decay
pub const DEFAULT_GROUND_FRICTION: f32 = 0.9; // Extra horizontal decay while on the floor
pub const DEFAULT_DAMPING: f32 = 0.6; // Restitution on boundary reflection
pub const DEFAULT_MAX_VELOCITY: f32 = 12.0; // Hard speed clamp, units per tick
pub const DEFAULT_INTERACTION_RADIUS: f32 = 120.0; // Pointer repulsion reach
pub const DEFAULT_FORCE_CONSTANT: f32 = 2.5; // Pointer repulsion strength

/// Speed below which a floor-contacting disc is considered still.
/// Must exceed `damping * gravity` or the terminal micro-bounce never
/// drops under it and rest detection cannot latch.
pub const DEFAULT_REST_SPEED: f32 = 0.2;
/// Consecutive still ticks required before a disc is marked resting.
pub const DEFAULT_REST_TICKS: u32 = 10;

/// Number of collision resolution passes per tick. One pass fully
/// separates each pair but can reintroduce overlap in chains of
/// touching discs; a few passes converge at this scale.
pub const COLLISION_PASSES: usize = 4;

/// Mass scale: mass = MASS_DENSITY * radius^2 (area-proportional).
pub const MASS_DENSITY: f32 = 1.0;

/// How vertical a contact normal must be (|n.y|) before stacking-mode
/// support kicks in instead of an elastic bounce.
pub const SUPPORT_NORMAL_Y: f32 = 0.7;

/// A resting disc more than this far above the floor has lost its
/// support (the world grew taller) and wakes instead of staying
/// pinned.
pub const REST_DETACH_EPSILON: f32 = 0.5;

// ====================
// Spawn Parameters
// ====================
pub const DEFAULT_DISC_COUNT: usize = 24;
pub const DEFAULT_MIN_RADIUS: f32 = 12.0;
pub const DEFAULT_MAX_RADIUS: f32 = 28.0;
/// Attempts at a non-overlapping random placement before giving up and
/// letting the first collision pass separate the newcomer.
pub const PLACEMENT_ATTEMPTS: usize = 100;

// ====================
// World Parameters
// ====================
pub const DEFAULT_WORLD_WIDTH: f32 = 960.0;
pub const DEFAULT_WORLD_HEIGHT: f32 = 540.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("disc count must be at least 1")]
    EmptySpawn,
    #[error("disc radius {0} must be positive and finite")]
    BadRadius(f32),
    #[error("radius range [{min}, {max}] is invalid")]
    BadRadiusRange { min: f32, max: f32 },
    #[error("world dimensions {width}x{height} must be positive and finite")]
    BadWorldSize { width: f32, height: f32 },
    #[error("{name} = {value} is outside its valid range")]
    BadCoefficient { name: &'static str, value: f32 },
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How particle-particle contacts are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionResponse {
    /// Momentum-conserving impulse exchange.
    Elastic,
    /// Like `Elastic`, except a disc falling onto a lower one lands on
    /// it instead of bouncing, so piles can form.
    Stacking,
}

impl Default for CollisionResponse {
    fn default() -> Self {
        CollisionResponse::Elastic
    }
}

/// The tunable constants table for one visual preset.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub friction: f32,
    pub ground_friction: f32,
    pub damping: f32,
    pub max_velocity: f32,
    pub interaction_radius: f32,
    pub force_constant: f32,
    pub response: CollisionResponse,
    pub rest_speed: f32,
    pub rest_ticks: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            friction: DEFAULT_FRICTION,
            ground_friction: DEFAULT_GROUND_FRICTION,
            damping: DEFAULT_DAMPING,
            max_velocity: DEFAULT_MAX_VELOCITY,
            interaction_radius: DEFAULT_INTERACTION_RADIUS,
            force_constant: DEFAULT_FORCE_CONSTANT,
            response: CollisionResponse::default(),
            rest_speed: DEFAULT_REST_SPEED,
            rest_ticks: DEFAULT_REST_TICKS,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = |name: &'static str, value: f32| {
            if value.is_finite() && value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(ConfigError::BadCoefficient { name, value })
            }
        };
        let non_negative = |name: &'static str, value: f32| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::BadCoefficient { name, value })
            }
        };
        non_negative("gravity", self.gravity)?;
        unit("friction", self.friction)?;
        unit("ground_friction", self.ground_friction)?;
        if !self.damping.is_finite() || !(0.0..=1.0).contains(&self.damping) {
            return Err(ConfigError::BadCoefficient {
                name: "damping",
                value: self.damping,
            });
        }
        if !self.max_velocity.is_finite() || self.max_velocity <= 0.0 {
            return Err(ConfigError::BadCoefficient {
                name: "max_velocity",
                value: self.max_velocity,
            });
        }
        non_negative("interaction_radius", self.interaction_radius)?;
        non_negative("force_constant", self.force_constant)?;
        if !self.rest_speed.is_finite() || self.rest_speed <= 0.0 {
            return Err(ConfigError::BadCoefficient {
                name: "rest_speed",
                value: self.rest_speed,
            });
        }
        if self.rest_ticks == 0 {
            return Err(ConfigError::BadCoefficient {
                name: "rest_ticks",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Starting positions/velocities policy for the seeded disc set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPolicy {
    /// Released near the top edge with a small downward drift.
    DropFromTop,
    /// Placed directly on the floor with zero velocity.
    RestOnFloor,
    /// Random in-bounds positions with small random velocities.
    Scattered,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        SpawnPolicy::Scattered
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub policy: SpawnPolicy,
    /// Opaque per-disc tokens handed through to the render adapter,
    /// assigned round-robin. Palette-derived tints fill in when empty.
    pub labels: Vec<String>,
    /// Fixed RNG seed for reproducible layouts.
    pub seed: Option<u64>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_DISC_COUNT,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
            policy: SpawnPolicy::default(),
            labels: Vec::new(),
            seed: None,
        }
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::EmptySpawn);
        }
        let valid = self.min_radius.is_finite()
            && self.max_radius.is_finite()
            && self.min_radius > 0.0
            && self.min_radius <= self.max_radius;
        if !valid {
            return Err(ConfigError::BadRadiusRange {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WORLD_WIDTH,
            height: DEFAULT_WORLD_HEIGHT,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
        {
            Ok(())
        } else {
            Err(ConfigError::BadWorldSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Top-level settings document, loaded from a TOML file per visual preset.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world: WorldConfig,
    pub spawn: SpawnConfig,
    pub physics: PhysicsConfig,
}

impl Settings {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_from_file("disc_sim.toml")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        self.spawn.validate()?;
        self.physics.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn zero_count_is_rejected() {
        let spawn = SpawnConfig {
            count: 0,
            ..Default::default()
        };
        assert!(matches!(spawn.validate(), Err(ConfigError::EmptySpawn)));
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let spawn = SpawnConfig {
            min_radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            spawn.validate(),
            Err(ConfigError::BadRadiusRange { .. })
        ));
    }

    #[test]
    fn inverted_radius_range_is_rejected() {
        let spawn = SpawnConfig {
            min_radius: 10.0,
            max_radius: 5.0,
            ..Default::default()
        };
        assert!(spawn.validate().is_err());
    }

    #[test]
    fn out_of_range_damping_is_rejected() {
        let physics = PhysicsConfig {
            damping: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            physics.validate(),
            Err(ConfigError::BadCoefficient { name: "damping", .. })
        ));
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let settings = Settings::default();
        let text = toml::to_string(&settings).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        parsed.validate().unwrap();
        assert_eq!(parsed.spawn.count, settings.spawn.count);
    }
}
