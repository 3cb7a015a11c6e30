// scenario.rs
// Seeds the initial disc set from the spawn configuration

use crate::body::Disc;
use crate::config::{self, ConfigError, SpawnConfig, SpawnPolicy, WorldConfig};
use palette::{FromColor, Hsv, Srgb};
use ultraviolet::Vec2;

/// Build the initial disc set for a world. Deterministic when
/// `spawn.seed` is set.
pub fn seed(world: &WorldConfig, spawn: &SpawnConfig) -> Result<Vec<Disc>, ConfigError> {
    world.validate()?;
    spawn.validate()?;
    if let Some(seed) = spawn.seed {
        fastrand::seed(seed);
    }

    let mut discs: Vec<Disc> = Vec::with_capacity(spawn.count);
    for index in 0..spawn.count {
        let radius = spawn.min_radius + fastrand::f32() * (spawn.max_radius - spawn.min_radius);
        let radius = radius.min(world.width * 0.5).min(world.height * 0.5);
        let label = label_for(spawn, index);
        let (pos, vel) = match spawn.policy {
            SpawnPolicy::Scattered => (
                scatter_position(world, radius, &discs),
                Vec2::new(fastrand::f32() * 2.0 - 1.0, fastrand::f32() * 2.0 - 1.0),
            ),
            SpawnPolicy::DropFromTop => (
                Vec2::new(
                    span(radius, world.width - radius),
                    radius + fastrand::f32() * world.height * 0.1,
                ),
                Vec2::new(0.0, fastrand::f32() * 0.5),
            ),
            SpawnPolicy::RestOnFloor => (
                Vec2::new(span(radius, world.width - radius), world.height - radius),
                Vec2::zero(),
            ),
        };
        discs.push(Disc::new(pos, vel, radius, label)?);
    }
    Ok(discs)
}

fn span(lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return lo;
    }
    lo + fastrand::f32() * (hi - lo)
}

/// Random in-bounds position, retried a bounded number of times to
/// avoid overlapping an already-placed disc. After the attempt budget
/// the last candidate is accepted and the first collision pass
/// separates it.
fn scatter_position(world: &WorldConfig, radius: f32, placed: &[Disc]) -> Vec2 {
    let mut candidate = Vec2::new(
        span(radius, world.width - radius),
        span(radius, world.height - radius),
    );
    for _ in 0..config::PLACEMENT_ATTEMPTS {
        let overlaps = placed.iter().any(|disc| {
            let min_dist = disc.radius + radius;
            (disc.pos - candidate).mag_sq() < min_dist * min_dist
        });
        if !overlaps {
            break;
        }
        candidate = Vec2::new(
            span(radius, world.width - radius),
            span(radius, world.height - radius),
        );
    }
    candidate
}

/// Configured labels are assigned round-robin; with none configured,
/// each disc gets a hex tint spread evenly around the hue wheel.
fn label_for(spawn: &SpawnConfig, index: usize) -> String {
    if !spawn.labels.is_empty() {
        return spawn.labels[index % spawn.labels.len()].clone();
    }
    let hue = 360.0 * index as f32 / spawn.count as f32;
    let rgb = Srgb::from_color(Hsv::new(hue, 0.6, 0.95)).into_format::<u8>();
    let (r, g, b) = rgb.into_components();
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_spawn(count: usize) -> SpawnConfig {
        SpawnConfig {
            count,
            min_radius: 5.0,
            max_radius: 10.0,
            seed: Some(7),
            ..Default::default()
        }
    }

    #[test]
    fn seeded_discs_start_in_bounds() {
        let world = WorldConfig {
            width: 400.0,
            height: 300.0,
        };
        for policy in [
            SpawnPolicy::Scattered,
            SpawnPolicy::DropFromTop,
            SpawnPolicy::RestOnFloor,
        ] {
            let spawn = SpawnConfig {
                policy,
                ..test_spawn(16)
            };
            let discs = seed(&world, &spawn).unwrap();
            assert_eq!(discs.len(), 16);
            for disc in &discs {
                assert!(disc.pos.x >= disc.radius && disc.pos.x <= world.width - disc.radius);
                assert!(disc.pos.y >= disc.radius && disc.pos.y <= world.height - disc.radius);
            }
        }
    }

    #[test]
    fn configured_labels_are_assigned_round_robin() {
        let world = WorldConfig::default();
        let spawn = SpawnConfig {
            labels: vec!["btc".into(), "eth".into()],
            ..test_spawn(4)
        };
        let discs = seed(&world, &spawn).unwrap();
        let labels: Vec<&str> = discs.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, ["btc", "eth", "btc", "eth"]);
    }

    #[test]
    fn fallback_labels_are_distinct_tints() {
        let world = WorldConfig::default();
        let discs = seed(&world, &test_spawn(3)).unwrap();
        assert!(discs.iter().all(|d| d.label.starts_with('#')));
        assert_ne!(discs[0].label, discs[1].label);
    }

    #[test]
    fn zero_count_refuses_to_seed() {
        let world = WorldConfig::default();
        assert!(seed(&world, &test_spawn(0)).is_err());
    }
}
