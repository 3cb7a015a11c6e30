//! Frame-rate-limited tick loop, decoupled from the host callback rate.
//!
//! The host fires [`Scheduler::frame`] as often as it likes (a display
//! refresh callback, a busy loop, a test); the scheduler accepts a tick
//! only when the fixed target interval has elapsed, so the physics run
//! at a bounded cadence no matter how fast the host is. Pointer and
//! resize events are not ticks and are never throttled.

use crate::config;
use crate::renderer::RenderSink;
use crate::simulation::World;
use log::debug;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Running,
}

pub struct Scheduler {
    world: World,
    interval: Duration,
    last_tick: Option<Instant>,
    state: State,
}

impl Scheduler {
    pub fn new(world: World) -> Self {
        Self::with_tick_rate(world, config::TARGET_TICK_RATE)
    }

    pub fn with_tick_rate(world: World, ticks_per_second: u32) -> Self {
        Self {
            world,
            interval: Duration::from_secs(1) / ticks_per_second.max(1),
            last_tick: None,
            state: State::Idle,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    pub fn start(&mut self) {
        if self.state == State::Running {
            return;
        }
        debug!("scheduler started at {:?} per tick", self.interval);
        self.state = State::Running;
        self.last_tick = None;
    }

    /// Teardown. Effective immediately: any callback delivered after
    /// this returns is a silent no-op, so late host callbacks cannot
    /// mutate the world.
    pub fn stop(&mut self) {
        if self.state == State::Idle {
            return;
        }
        debug!("scheduler stopped");
        self.state = State::Idle;
        self.last_tick = None;
    }

    /// Host frame callback. Runs one full tick and presents a snapshot
    /// if the target interval has elapsed since the last accepted tick;
    /// otherwise does nothing. Returns whether a tick ran.
    pub fn frame(&mut self, now: Instant, sink: &mut dyn RenderSink) -> bool {
        if self.state != State::Running {
            return false;
        }
        if let Some(last) = self.last_tick {
            if now.duration_since(last) < self.interval {
                return false;
            }
        }
        self.last_tick = Some(now);
        self.world.step();
        sink.present(&self.world.frame());
        true
    }

    /// Pointer moved over the view. Accepted at any time while running;
    /// consumed by the next tick.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.state == State::Running {
            self.world.set_pointer(x, y);
        }
    }

    /// Pointer left the view: repulsion resolves to "infinitely far".
    pub fn pointer_left(&mut self) {
        if self.state == State::Running {
            self.world.clear_pointer();
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if self.state == State::Running {
            debug!("viewport resized to {width}x{height}");
            self.world.resize(width, height);
        }
    }

    /// Self-driven loop for headless runs: fires the frame callback at
    /// roughly twice the tick rate, sleeping the remainder of each host
    /// frame, until `max_ticks` ticks have been accepted (or forever
    /// when `None`).
    pub fn run_blocking(&mut self, sink: &mut dyn RenderSink, max_ticks: Option<u64>) {
        self.start();
        let host_interval = self.interval / 2;
        let mut accepted: u64 = 0;
        while self.is_running() {
            let frame_start = Instant::now();
            if self.frame(frame_start, sink) {
                accepted += 1;
                if max_ticks.is_some_and(|limit| accepted >= limit) {
                    self.stop();
                    break;
                }
            }
            let elapsed = frame_start.elapsed();
            if elapsed < host_interval {
                spin_sleep::sleep(host_interval - elapsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Disc;
    use crate::config::PhysicsConfig;
    use crate::renderer::{DiscFrame, NullSink};
    use ultraviolet::Vec2;

    struct CountingSink {
        frames: usize,
    }

    impl RenderSink for CountingSink {
        fn present(&mut self, frame: &[DiscFrame]) {
            assert!(!frame.is_empty());
            self.frames += 1;
        }
    }

    fn test_world() -> World {
        let discs = vec![
            Disc::new(Vec2::new(50.0, 50.0), Vec2::zero(), 5.0, "a").unwrap(),
            Disc::new(Vec2::new(150.0, 50.0), Vec2::zero(), 5.0, "b").unwrap(),
        ];
        World::new(200.0, 200.0, PhysicsConfig::default(), discs).unwrap()
    }

    #[test]
    fn frames_inside_the_interval_are_skipped() {
        let mut scheduler = Scheduler::with_tick_rate(test_world(), 30);
        let mut sink = CountingSink { frames: 0 };
        scheduler.start();
        let t0 = Instant::now();
        assert!(scheduler.frame(t0, &mut sink));
        assert!(!scheduler.frame(t0 + Duration::from_millis(10), &mut sink));
        assert!(!scheduler.frame(t0 + Duration::from_millis(20), &mut sink));
        assert!(scheduler.frame(t0 + Duration::from_millis(40), &mut sink));
        assert_eq!(sink.frames, 2);
    }

    #[test]
    fn one_snapshot_per_accepted_tick() {
        let mut scheduler = Scheduler::with_tick_rate(test_world(), 30);
        let mut sink = CountingSink { frames: 0 };
        scheduler.start();
        let t0 = Instant::now();
        for i in 0..10u64 {
            scheduler.frame(t0 + Duration::from_millis(34 * i), &mut sink);
        }
        assert_eq!(sink.frames, 10);
    }

    #[test]
    fn frame_before_start_is_a_no_op() {
        let mut scheduler = Scheduler::new(test_world());
        let before = scheduler.world().clone();
        let mut sink = NullSink;
        assert!(!scheduler.frame(Instant::now(), &mut sink));
        assert_eq!(scheduler.world().discs[0].pos, before.discs[0].pos);
    }

    #[test]
    fn teardown_race_leaves_world_untouched() {
        let mut scheduler = Scheduler::new(test_world());
        scheduler.start();
        // Teardown lands before the already-scheduled callback fires.
        scheduler.stop();
        let before = scheduler.world().clone();
        let mut sink = CountingSink { frames: 0 };
        assert!(!scheduler.frame(Instant::now(), &mut sink));
        assert_eq!(sink.frames, 0);
        for (disc, prev) in scheduler.world().discs.iter().zip(&before.discs) {
            assert_eq!(disc.pos, prev.pos);
            assert_eq!(disc.vel, prev.vel);
        }
    }

    #[test]
    fn events_after_teardown_are_ignored() {
        let mut scheduler = Scheduler::new(test_world());
        scheduler.start();
        scheduler.stop();
        scheduler.pointer_moved(10.0, 10.0);
        scheduler.resize(50.0, 50.0);
        assert!(scheduler.world().pointer.is_none());
        assert_eq!(scheduler.world().width, 200.0);
    }

    #[test]
    fn pointer_and_resize_are_never_throttled() {
        let mut scheduler = Scheduler::with_tick_rate(test_world(), 30);
        scheduler.start();
        let mut sink = NullSink;
        let t0 = Instant::now();
        scheduler.frame(t0, &mut sink);
        // Within the throttle window, events must still land.
        scheduler.pointer_moved(5.0, 5.0);
        scheduler.resize(300.0, 300.0);
        assert_eq!(scheduler.world().pointer, Some(Vec2::new(5.0, 5.0)));
        assert_eq!(scheduler.world().width, 300.0);
    }

    #[test]
    fn run_blocking_stops_after_the_tick_budget() {
        let mut scheduler = Scheduler::with_tick_rate(test_world(), 240);
        let mut sink = CountingSink { frames: 0 };
        scheduler.run_blocking(&mut sink, Some(3));
        assert_eq!(sink.frames, 3);
        assert!(!scheduler.is_running());
    }
}
