// body/types.rs
// The Disc struct and its constructors

use crate::config::{self, ConfigError};
use std::sync::atomic::{AtomicU64, Ordering};
use ultraviolet::Vec2;

/// One simulated disc. Coordinates follow the canvas convention:
/// origin at the top-left corner, +y pointing down.
#[derive(Clone, Debug)]
pub struct Disc {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub id: u64,
    /// Opaque token for the render adapter; never interpreted here.
    pub label: String,
    /// Settled on the floor: exempt from gravity and bounce until woken.
    pub resting: bool,
    /// Consecutive ticks spent under the rest-speed threshold while
    /// touching the floor.
    pub(crate) still_ticks: u32,
    pub(crate) floor_contact: bool,
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

impl Disc {
    /// Mass is derived from radius (area-proportional), so larger discs
    /// are displaced less in collisions.
    pub fn new(
        pos: Vec2,
        vel: Vec2,
        radius: f32,
        label: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::BadRadius(radius));
        }
        Ok(Self {
            pos,
            vel,
            radius,
            mass: config::MASS_DENSITY * radius * radius,
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            label: label.into(),
            resting: false,
            still_ticks: 0,
            floor_contact: false,
        })
    }

    pub fn speed(&self) -> f32 {
        self.vel.mag()
    }

    /// Clear rest state after an external kick (pointer push, impact).
    pub fn wake(&mut self) {
        self.resting = false;
        self.still_ticks = 0;
    }

    pub fn is_finite(&self) -> bool {
        self.pos.x.is_finite()
            && self.pos.y.is_finite()
            && self.vel.x.is_finite()
            && self.vel.y.is_finite()
    }
}
