// simulation/collision.rs
// Pairwise disc-disc resolution and boundary confinement

use crate::body::Disc;
use crate::config::{self, CollisionResponse, PhysicsConfig};
use ultraviolet::Vec2;

/// Resolve every unordered pair once. O(n²), which is fine at the
/// target scale of tens of discs; spatial partitioning would be the
/// extension point for a larger set.
pub fn resolve_pairs(discs: &mut [Disc], config: &PhysicsConfig) {
    let n = discs.len();
    for i in 0..n {
        for j in (i + 1)..n {
            resolve(discs, i, j, config);
        }
    }
}

fn split_pair(discs: &mut [Disc], i: usize, j: usize) -> (&mut Disc, &mut Disc) {
    debug_assert!(i < j);
    let (head, tail) = discs.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

fn resolve(discs: &mut [Disc], i: usize, j: usize, config: &PhysicsConfig) {
    let (a, b) = split_pair(discs, i, j);
    let delta = b.pos - a.pos;
    let min_dist = a.radius + b.radius;
    let dist_sq = delta.mag_sq();
    // The finiteness guard keeps a corrupted disc from contaminating
    // its partner; sanitization resets it at the end of the tick.
    if !dist_sq.is_finite() || dist_sq >= min_dist * min_dist {
        return;
    }
    let dist = dist_sq.sqrt();
    if dist == 0.0 {
        // Coincident centers have no defined normal; skip this tick.
        return;
    }
    let normal = delta / dist;

    if config.response == CollisionResponse::Stacking && try_support(a, b, normal, min_dist, config)
    {
        return;
    }

    // Positional de-penetration, mass-weighted so the heavier disc
    // moves less.
    let inv_total = 1.0 / (a.mass + b.mass);
    let weight_a = b.mass * inv_total;
    let weight_b = a.mass * inv_total;
    let overlap = min_dist - dist;
    a.pos -= normal * (overlap * weight_a);
    b.pos += normal * (overlap * weight_b);

    // Impulse only for approaching pairs; already-separating pairs
    // would otherwise stick.
    let approach = (a.vel - b.vel).dot(normal);
    if approach <= 0.0 {
        return;
    }
    let impulse = 2.0 * approach * inv_total;
    a.vel -= normal * (impulse * b.mass);
    b.vel += normal * (impulse * a.mass);

    if a.resting && a.speed() > config.rest_speed {
        a.wake();
    }
    if b.resting && b.speed() > config.rest_speed {
        b.wake();
    }
}

/// Stacking variant: a disc falling onto a lower one lands on it
/// instead of bouncing off. Returns false when the contact is too
/// oblique or the upper disc is moving up, in which case the elastic
/// path runs instead.
fn try_support(
    a: &mut Disc,
    b: &mut Disc,
    normal: Vec2,
    min_dist: f32,
    config: &PhysicsConfig,
) -> bool {
    if normal.y.abs() < config::SUPPORT_NORMAL_Y {
        return false;
    }
    let (upper, lower) = if a.pos.y < b.pos.y { (a, b) } else { (b, a) };
    if upper.vel.y < 0.0 {
        return false;
    }
    upper.pos.y = lower.pos.y - min_dist;
    upper.vel.y = 0.0;
    upper.vel.x *= config.ground_friction;
    true
}

/// Reflect discs off the four walls, losing `damping` worth of the
/// perpendicular velocity component per bounce, and run floor rest
/// detection.
pub fn confine(discs: &mut [Disc], width: f32, height: f32, config: &PhysicsConfig) {
    for disc in discs {
        let r = disc.radius;
        if disc.pos.x < r {
            disc.pos.x = r;
            disc.vel.x = -disc.vel.x * config.damping;
        } else if disc.pos.x > width - r {
            disc.pos.x = width - r;
            disc.vel.x = -disc.vel.x * config.damping;
        }
        if disc.pos.y < r {
            disc.pos.y = r;
            disc.vel.y = -disc.vel.y * config.damping;
        }

        let floor = height - r;
        disc.floor_contact = false;
        if disc.pos.y >= floor {
            disc.pos.y = floor;
            disc.floor_contact = true;
            if !disc.resting {
                let bounce = -disc.vel.y * config.damping;
                // Snapping sub-threshold bounces to zero is what breaks
                // the infinite micro-bounce cycle of naive restitution.
                disc.vel.y = if bounce.abs() < config.rest_speed {
                    0.0
                } else {
                    bounce
                };
                disc.vel.x *= config.ground_friction;
            }
        }
        settle(disc, floor, config);
    }
}

/// Rest detection: sustained sub-threshold motion with floor contact
/// flips a disc to resting; resting pins `y` to the floor, forces
/// `vy = 0`, and bleeds `vx` off through `ground_friction` until it
/// snaps to zero.
fn settle(disc: &mut Disc, floor: f32, config: &PhysicsConfig) {
    if disc.resting {
        // A resize can move the floor out from under a settled disc;
        // it wakes and falls back under gravity rather than being
        // pinned to the new floor.
        if disc.pos.y < floor - config::REST_DETACH_EPSILON {
            disc.wake();
            return;
        }
        disc.pos.y = floor;
        disc.vel.y = 0.0;
        disc.vel.x *= config.ground_friction;
        if disc.vel.x.abs() < config.rest_speed {
            disc.vel.x = 0.0;
        }
        return;
    }
    let still = disc.floor_contact
        && disc.vel.x.abs() < config.rest_speed
        && disc.vel.y.abs() < config.rest_speed;
    if still {
        disc.still_ticks += 1;
        if disc.still_ticks >= config.rest_ticks {
            disc.resting = true;
            disc.pos.y = floor;
            disc.vel.y = 0.0;
        }
    } else {
        disc.still_ticks = 0;
    }
}
