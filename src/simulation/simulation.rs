// simulation/simulation.rs
// The World struct and the per-tick step

use super::{collision, forces};
use crate::body::Disc;
use crate::config::{self, ConfigError, PhysicsConfig};
use crate::renderer::DiscFrame;
use log::warn;
use ultraviolet::Vec2;

/// All simulation-wide state. Owned by the scheduler, mutated in place
/// once per tick; nothing here is global or shared.
///
/// Coordinates follow the canvas convention: origin top-left, +y down,
/// so gravity is a positive `vy` contribution and the floor is
/// `y = height`.
#[derive(Clone, Debug)]
pub struct World {
    pub width: f32,
    pub height: f32,
    /// Interaction point, or `None` when the pointer has left the view.
    pub pointer: Option<Vec2>,
    pub discs: Vec<Disc>,
    pub config: PhysicsConfig,
}

impl World {
    pub fn new(
        width: f32,
        height: f32,
        config: PhysicsConfig,
        discs: Vec<Disc>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if discs.is_empty() {
            return Err(ConfigError::EmptySpawn);
        }
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::BadWorldSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pointer: None,
            discs,
            config,
        })
    }

    /// Resize keeps disc state untouched; out-of-bounds discs are
    /// pulled back by the next boundary pass rather than teleported.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.width = width;
            self.height = height;
        }
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.pointer = Some(Vec2::new(x, y));
        }
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// One fixed-size tick: forces, velocity decay, tentative position
    /// advance, speed clamp, then collision resolution over the full
    /// set and boundary handling. Collision correction runs after the
    /// position advance so it operates on this tick's attempted
    /// motion.
    pub fn step(&mut self) {
        let cfg = self.config;
        let pointer = self.pointer;
        for disc in &mut self.discs {
            forces::apply_gravity(disc, &cfg);
            forces::apply_pointer_repulsion(disc, pointer, &cfg);
            disc.vel *= cfg.friction;
            disc.pos += disc.vel;
            clamp_speed(disc, cfg.max_velocity);
        }
        for _ in 0..config::COLLISION_PASSES {
            collision::resolve_pairs(&mut self.discs, &cfg);
        }
        collision::confine(&mut self.discs, self.width, self.height, &cfg);
        // Impulses and reflections can push a disc past the clamp
        // applied during integration, so the bound is re-enforced
        // before the tick ends.
        for disc in &mut self.discs {
            clamp_speed(disc, cfg.max_velocity);
        }
        self.sanitize();
    }

    /// Reset any disc whose state went non-finite so one bad disc
    /// cannot poison the rest of the set on subsequent ticks.
    fn sanitize(&mut self) {
        let center = Vec2::new(self.width * 0.5, self.height * 0.5);
        for disc in &mut self.discs {
            if disc.is_finite() {
                continue;
            }
            warn!(
                "disc {} had non-finite state ({:?}, {:?}); resetting",
                disc.id, disc.pos, disc.vel
            );
            disc.pos = center;
            disc.vel = Vec2::zero();
            disc.wake();
        }
    }

    /// Read-only snapshot handed to the render adapter once per
    /// accepted tick.
    pub fn frame(&self) -> Vec<DiscFrame> {
        self.discs
            .iter()
            .map(|disc| DiscFrame {
                id: disc.id,
                x: disc.pos.x,
                y: disc.pos.y,
                radius: disc.radius,
                label: disc.label.clone(),
            })
            .collect()
    }
}

fn clamp_speed(disc: &mut Disc, max_velocity: f32) {
    let speed_sq = disc.vel.mag_sq();
    if speed_sq > max_velocity * max_velocity {
        disc.vel = disc.vel / speed_sq.sqrt() * max_velocity;
    }
}
