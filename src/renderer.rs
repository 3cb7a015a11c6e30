//! The outbound render boundary.
//!
//! The engine knows nothing about drawing; it hands a [`RenderSink`] a
//! read-only snapshot once per accepted tick and the adapter decides
//! what to do with it.

use log::debug;

/// Per-disc view for one frame: everything an adapter needs to draw,
/// nothing it could use to mutate the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscFrame {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub label: String,
}

pub trait RenderSink {
    fn present(&mut self, frame: &[DiscFrame]);
}

/// Adapter that discards frames. Useful for tests and benchmarks.
#[derive(Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn present(&mut self, _frame: &[DiscFrame]) {}
}

/// Headless adapter that periodically logs a one-line summary, so a
/// terminal run shows the simulation is alive without drowning the log.
pub struct LogSink {
    ticks: u64,
    every: u64,
}

impl LogSink {
    pub fn new(every: u64) -> Self {
        Self {
            ticks: 0,
            every: every.max(1),
        }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        // Roughly every three seconds at the 30 Hz tick rate.
        Self::new(90)
    }
}

impl RenderSink for LogSink {
    fn present(&mut self, frame: &[DiscFrame]) {
        self.ticks += 1;
        if self.ticks % self.every != 0 {
            return;
        }
        let mean_y = frame.iter().map(|d| d.y).sum::<f32>() / frame.len().max(1) as f32;
        debug!(
            "tick {}: {} discs, mean y {:.1}",
            self.ticks,
            frame.len(),
            mean_y
        );
    }
}
