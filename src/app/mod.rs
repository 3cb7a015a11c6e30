// Wires settings, scenario seeding, and the scheduler into a headless run.

use crate::config::{ConfigError, Settings};
use crate::renderer::LogSink;
use crate::scenario;
use crate::scheduler::Scheduler;
use crate::simulation::World;
use log::info;

pub fn run() -> Result<(), ConfigError> {
    let settings = load_settings(std::env::args().nth(1))?;
    settings.validate()?;
    info!(
        "seeding {} discs ({:?}) in a {}x{} world",
        settings.spawn.count, settings.spawn.policy, settings.world.width, settings.world.height
    );

    let discs = scenario::seed(&settings.world, &settings.spawn)?;
    let world = World::new(
        settings.world.width,
        settings.world.height,
        settings.physics,
        discs,
    )?;

    let mut scheduler = Scheduler::new(world);
    let mut sink = LogSink::default();
    scheduler.run_blocking(&mut sink, None);
    Ok(())
}

/// An explicit path must load; with no path, a missing default preset
/// falls back to built-in settings, but a present-and-broken one is an
/// error rather than a silent fallback.
fn load_settings(path: Option<String>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => Settings::load_from_file(path),
        None => match Settings::load_default() {
            Ok(settings) => Ok(settings),
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Settings::default())
            }
            Err(err) => Err(err),
        },
    }
}
