//! Force generators: gravity and the pointer repulsion field.
//!
//! Both write velocity deltas directly; the integrator in
//! `simulation.rs` decides when they run relative to collision
//! resolution.

use crate::body::Disc;
use crate::config::PhysicsConfig;
use ultraviolet::Vec2;

/// Pull a disc downward. Resting discs are exempt, otherwise damping
/// masks a slow negative creep into the floor.
pub fn apply_gravity(disc: &mut Disc, config: &PhysicsConfig) {
    if disc.resting {
        return;
    }
    disc.vel.y += config.gravity;
}

/// Push a disc away from the pointer. The force falls off linearly
/// from full strength at contact to zero at
/// `interaction_radius + disc.radius`, and is mass-weighted so larger
/// discs are nudged less.
///
/// `pointer == None` is the "pointer absent" sentinel and applies no
/// force. A disc exactly under the pointer (distance zero) is also a
/// no-op rather than an infinite repulsion.
pub fn apply_pointer_repulsion(disc: &mut Disc, pointer: Option<Vec2>, config: &PhysicsConfig) {
    let Some(pointer) = pointer else {
        return;
    };
    let offset = disc.pos - pointer;
    let distance = offset.mag();
    let reach = config.interaction_radius + disc.radius;
    if !distance.is_finite() || distance <= 0.0 || distance >= reach {
        return;
    }
    let force = (reach - distance) / distance * config.force_constant;
    disc.vel += offset / distance * (force / disc.mass);
    if disc.resting && disc.speed() > config.rest_speed {
        disc.wake();
    }
}
