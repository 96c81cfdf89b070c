//! Walk lifecycle instrumentation.
//!
//! Observers receive notifications when a walk starts, for each step it takes,
//! and when it terminates. The termination reason is part of every event so
//! that truncated walks (step cap exhausted) can be told apart from walks that
//! actually reached the boundary.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::Write;
use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use spin::Mutex;

use crate::math::Vec2;

/// Reason a walk terminated.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TerminationReason {
    /// The largest empty disk shrank below `epsilon`: the walk is at the boundary.
    HitBoundary,
    /// The step cap was exhausted before reaching the boundary (truncated walk).
    MaxSteps,
}

impl TerminationReason {
    #[inline]
    pub fn is_truncated(self) -> bool {
        matches!(self, TerminationReason::MaxSteps)
    }
}

/// Snapshot emitted when a walk begins.
#[derive(Copy, Clone, Debug)]
pub struct WalkStart {
    /// Query point the walk starts from.
    pub position: Vec2,
    /// Index of the walk within its query.
    pub walk: u32,
}

/// Snapshot emitted for every accepted step inside a walk.
#[derive(Copy, Clone, Debug)]
pub struct WalkStep {
    /// Position before the jump.
    pub position: Vec2,
    /// Radius of the largest empty disk centred at `position`.
    pub radius: f32,
    /// Zero-based index of the step.
    pub depth: u32,
}

/// Snapshot emitted when a walk finishes.
#[derive(Copy, Clone, Debug)]
pub struct WalkTerminate {
    /// Final position, where the boundary field was sampled.
    pub position: Vec2,
    /// Why the walk stopped.
    pub reason: TerminationReason,
    /// Number of completed steps.
    pub steps: u32,
}

/// Final state of one walk.
#[derive(Copy, Clone, Debug)]
pub struct WalkOutcome {
    /// Source contributions along the walk plus the terminal boundary sample.
    pub value: f32,
    pub reason: TerminationReason,
    pub steps: u32,
    /// Position where the boundary field was evaluated.
    pub end: Vec2,
}

impl WalkOutcome {
    pub const fn new(value: f32, reason: TerminationReason, steps: u32, end: Vec2) -> Self {
        Self {
            value,
            reason,
            steps,
            end,
        }
    }
}

/// Observer interface for receiving walk events.
pub trait WalkObserver: Send + Sync {
    /// Called before the first step of a walk.
    fn on_start(&self, _event: WalkStart) {}
    /// Called for every accepted step.
    fn on_step(&self, _event: WalkStep) {}
    /// Called once when the walk terminates.
    fn on_terminate(&self, _event: WalkTerminate) {}
}

/// Observer that does nothing.
pub struct NoopObserver;

impl WalkObserver for NoopObserver {}

/// Fans out notifications to many observers.
pub(crate) struct ObserverList<'a> {
    observers: Vec<&'a dyn WalkObserver>,
}

impl<'a> ObserverList<'a> {
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = &'a dyn WalkObserver>,
    {
        Self {
            observers: iter.into_iter().collect(),
        }
    }
}

impl WalkObserver for ObserverList<'_> {
    fn on_start(&self, event: WalkStart) {
        for obs in &self.observers {
            obs.on_start(event);
        }
    }

    fn on_step(&self, event: WalkStep) {
        for obs in &self.observers {
            obs.on_step(event);
        }
    }

    fn on_terminate(&self, event: WalkTerminate) {
        for obs in &self.observers {
            obs.on_terminate(event);
        }
    }
}

/// Snapshot of aggregate walk statistics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WalkStatsSnapshot {
    /// Total number of walks observed.
    pub walks: u32,
    /// Walks that reached the `epsilon` band around the boundary.
    pub boundary_hits: u32,
    /// Walks cut off by the step cap.
    pub truncated: u32,
    /// Total number of steps across all walks.
    pub total_steps: u64,
}

impl WalkStatsSnapshot {
    /// Fraction of terminated walks that were truncated.
    pub fn truncation_rate(&self) -> f32 {
        let done = self.boundary_hits + self.truncated;
        if done == 0 {
            0.0
        } else {
            self.truncated as f32 / done as f32
        }
    }

    pub fn mean_steps(&self) -> f32 {
        if self.walks == 0 {
            0.0
        } else {
            self.total_steps as f32 / self.walks as f32
        }
    }
}

#[derive(Default)]
struct StatsInner {
    walks: AtomicU32,
    boundary_hits: AtomicU32,
    truncated: AtomicU32,
    total_steps: AtomicU64,
}

impl StatsInner {
    fn snapshot(&self) -> WalkStatsSnapshot {
        WalkStatsSnapshot {
            walks: self.walks.load(Ordering::Relaxed),
            boundary_hits: self.boundary_hits.load(Ordering::Relaxed),
            truncated: self.truncated.load(Ordering::Relaxed),
            total_steps: self.total_steps.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.walks.store(0, Ordering::Relaxed);
        self.boundary_hits.store(0, Ordering::Relaxed);
        self.truncated.store(0, Ordering::Relaxed);
        self.total_steps.store(0, Ordering::Relaxed);
    }
}

/// Thread-friendly accumulator of walk statistics.
///
/// Clones share the same counters, so one handle can be registered with a
/// solver while another is kept for reading.
#[derive(Clone, Default)]
pub struct StatsObserver {
    inner: Arc<StatsInner>,
}

impl StatsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> WalkStatsSnapshot {
        self.inner.snapshot()
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.inner.reset();
    }
}

impl WalkObserver for StatsObserver {
    fn on_start(&self, _event: WalkStart) {
        self.inner.walks.fetch_add(1, Ordering::Relaxed);
    }

    fn on_step(&self, _event: WalkStep) {
        self.inner.total_steps.fetch_add(1, Ordering::Relaxed);
    }

    fn on_terminate(&self, event: WalkTerminate) {
        let counter = match event.reason {
            TerminationReason::HitBoundary => &self.inner.boundary_hits,
            TerminationReason::MaxSteps => &self.inner.truncated,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Copy, Clone, Debug)]
enum TracePointKind {
    Start,
    Step,
    Hit,
    Truncated,
}

impl TracePointKind {
    fn color(self) -> (u8, u8, u8) {
        match self {
            TracePointKind::Start => (0, 200, 255),   // cyan
            TracePointKind::Step => (255, 255, 255),  // white
            TracePointKind::Hit => (0, 255, 0),       // green
            TracePointKind::Truncated => (255, 0, 0), // red
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct TracePoint {
    position: Vec2,
    radius: f32,
    kind: TracePointKind,
}

/// Records walk events into a coloured point cloud in the `z = 0` plane.
///
/// Each point also carries the empty-disk radius at that step (zero for start
/// and end points). Use [`PlyRecorder::to_ascii`] to obtain a `.ply` file.
#[derive(Clone, Default)]
pub struct PlyRecorder {
    points: Arc<Mutex<Vec<TracePoint>>>,
}

impl PlyRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all stored points.
    pub fn clear(&self) {
        self.points.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.points.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, position: Vec2, radius: f32, kind: TracePointKind) {
        self.points.lock().push(TracePoint {
            position,
            radius,
            kind,
        });
    }

    /// Export the recorded walks as an ASCII PLY file with per-point RGB colours.
    pub fn to_ascii(&self) -> String {
        let points = self.points.lock().clone();
        let mut out = String::new();
        let _ = writeln!(out, "ply");
        let _ = writeln!(out, "format ascii 1.0");
        let _ = writeln!(out, "element vertex {}", points.len());
        out.push_str("property float x\nproperty float y\nproperty float z\n");
        out.push_str("property float radius\n");
        out.push_str("property uchar red\nproperty uchar green\nproperty uchar blue\n");
        out.push_str("end_header\n");

        for p in points {
            let (r, g, b) = p.kind.color();
            let _ = writeln!(
                out,
                "{:.6} {:.6} 0.000000 {:.6} {} {} {}",
                p.position.x, p.position.y, p.radius, r, g, b,
            );
        }
        out
    }
}

impl WalkObserver for PlyRecorder {
    fn on_start(&self, event: WalkStart) {
        self.push(event.position, 0.0, TracePointKind::Start);
    }

    fn on_step(&self, event: WalkStep) {
        self.push(event.position, event.radius, TracePointKind::Step);
    }

    fn on_terminate(&self, event: WalkTerminate) {
        let kind = match event.reason {
            TerminationReason::HitBoundary => TracePointKind::Hit,
            TerminationReason::MaxSteps => TracePointKind::Truncated,
        };
        self.push(event.position, 0.0, kind);
    }
}
