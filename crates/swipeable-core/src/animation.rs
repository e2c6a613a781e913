//! # Animation driver
//!
//! Time-based interpolation of scalar values. A run goes from one value to
//! another (or through a short list of keyframes) over an [`AnimationSpec`],
//! and is advanced by calling [`AnimationDriver::tick`] once per host frame.
//!
//! Progress is always computed from the elapsed time reported by the driver's
//! [`Clock`], never from the number of ticks, so dropped frames only lower the
//! sampling rate and never stretch the animation.
//!
//! Runs are grouped by a caller-chosen key (for a toggle: position, style,
//! text alpha). A group holds at most one run; starting a new run for the same
//! key replaces the old one without reporting its completion.
//!
//! ```rust
//! use std::rc::Rc;
//! use swipeable_core::animation::*;
//! use web_time::Duration;
//!
//! let clock = TestClock::new();
//! let mut driver = AnimationDriver::new(Rc::new(clock.clone()));
//! driver.start("x", 0.0, 10.0, AnimationSpec::tween(Duration::from_millis(100), Easing::Linear));
//!
//! clock.advance(Duration::from_millis(50));
//! let samples = driver.tick();
//! assert!((samples[0].value - 5.0).abs() < 0.01);
//! ```

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
    pub delay: Duration,
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: Duration::ZERO,
        }
    }

    /// Ease-in-out tween lasting `ms` milliseconds.
    pub fn millis(ms: u64) -> Self {
        Self::tween(Duration::from_millis(ms), Easing::EaseInOut)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for crate::Color {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        fn channel(a: u8, b: u8, t: f32) -> u8 {
            (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
        }
        crate::Color(
            channel(self.0, other.0, t),
            channel(self.1, other.1, t),
            channel(self.2, other.2, t),
            channel(self.3, other.3, t),
        )
    }
}

// Animation clock
pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A test clock you can drive deterministically.
///
/// Clones share the same instant, so a test keeps one handle and gives
/// another to the driver.
#[derive(Clone)]
pub struct TestClock {
    t: Rc<Cell<Instant>>,
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            t: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}

new_key_type! {
    /// Handle of a single run; stale once the run finishes, is stopped or replaced.
    pub struct RunId;
}

/// One value produced by [`AnimationDriver::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample<K> {
    pub key: K,
    pub run: RunId,
    pub value: f32,
    /// Set on the last sample of a run, exactly once.
    pub finished: bool,
}

struct AnimationRun<K> {
    key: K,
    keyframes: SmallVec<[f32; 3]>,
    spec: AnimationSpec,
    start: Instant,
}

impl<K> AnimationRun<K> {
    fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start);
        if elapsed < self.spec.delay {
            return 0.0;
        }
        let active = elapsed - self.spec.delay;
        if self.spec.duration.is_zero() {
            return 1.0;
        }
        (active.as_secs_f32() / self.spec.duration.as_secs_f32()).min(1.0)
    }

    fn sample(&self, t: f32) -> f32 {
        if t >= 1.0 {
            return self.keyframes.last().copied().unwrap_or_default();
        }
        keyframe_value(&self.keyframes, self.spec.easing.interpolate(t))
    }
}

/// Piecewise-linear position along evenly spaced keyframes.
fn keyframe_value(frames: &[f32], fraction: f32) -> f32 {
    match frames {
        [] => 0.0,
        [only] => *only,
        _ => {
            let segments = (frames.len() - 1) as f32;
            let pos = (fraction * segments).clamp(0.0, segments);
            let i = (pos.floor() as usize).min(frames.len() - 2);
            frames[i].interpolate(&frames[i + 1], pos - i as f32)
        }
    }
}

/// Drives keyed scalar runs against a [`Clock`].
pub struct AnimationDriver<K> {
    clock: Rc<dyn Clock>,
    runs: SlotMap<RunId, AnimationRun<K>>,
}

impl<K: Copy + Eq + Debug> AnimationDriver<K> {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            runs: SlotMap::with_key(),
        }
    }

    /// Start a run from `from` to `to`, replacing any run under `key`.
    pub fn start(&mut self, key: K, from: f32, to: f32, spec: AnimationSpec) -> RunId {
        self.start_keyframes(key, &[from, to], spec)
    }

    /// Start a run through `frames`, spaced evenly over the duration.
    pub fn start_keyframes(&mut self, key: K, frames: &[f32], spec: AnimationSpec) -> RunId {
        if let Some(at) = self.stop(key) {
            log::trace!("animation {key:?} replaced at {at}");
        }
        let run = AnimationRun {
            key,
            keyframes: frames.iter().copied().collect(),
            spec,
            start: self.clock.now(),
        };
        self.runs.insert(run)
    }

    fn find(&self, key: K) -> Option<RunId> {
        self.runs
            .iter()
            .find(|(_, run)| run.key == key)
            .map(|(id, _)| id)
    }

    /// Cancel the run under `key` without reporting completion.
    ///
    /// Returns the value the run had reached at the moment of cancellation.
    pub fn stop(&mut self, key: K) -> Option<f32> {
        let id = self.find(key)?;
        let now = self.clock.now();
        let run = self.runs.remove(id)?;
        Some(run.sample(run.progress(now)))
    }

    /// Cancel every run, returning the live value of each.
    pub fn stop_all(&mut self) -> SmallVec<[(K, f32); 4]> {
        let now = self.clock.now();
        self.runs
            .drain()
            .map(|(_, run)| (run.key, run.sample(run.progress(now))))
            .collect()
    }

    /// Live value of the run under `key`, without advancing it.
    pub fn value(&self, key: K) -> Option<f32> {
        let id = self.find(key)?;
        let run = &self.runs[id];
        Some(run.sample(run.progress(self.clock.now())))
    }

    pub fn contains(&self, run: RunId) -> bool {
        self.runs.contains_key(run)
    }

    pub fn is_idle(&self) -> bool {
        self.runs.is_empty()
    }

    /// Advance every run to the clock's current time.
    ///
    /// Finished runs report `finished: true` once and are disposed.
    pub fn tick(&mut self) -> SmallVec<[Sample<K>; 4]> {
        let now = self.clock.now();
        let mut samples = SmallVec::new();
        let mut done: SmallVec<[RunId; 4]> = SmallVec::new();

        for (id, run) in self.runs.iter() {
            let t = run.progress(now);
            let finished = t >= 1.0;
            samples.push(Sample {
                key: run.key,
                run: id,
                value: run.sample(t),
                finished,
            });
            if finished {
                done.push(id);
            }
        }
        for id in done {
            self.runs.remove(id);
        }
        samples
    }
}
