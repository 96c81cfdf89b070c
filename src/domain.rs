//! Segment boundaries and largest-empty-disk queries.

use alloc::vec::Vec;

use crate::error::WosError;
use crate::math::{Vec2, clamp};

/// One boundary wall from `a` to `b`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    #[inline]
    pub const fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Distance from `p` to the closest point of this segment.
    #[inline]
    pub fn distance(&self, p: Vec2) -> f32 {
        distance_to_segment(p, self.a, self.b)
    }
}

/// Shortest distance from `p` to the finite segment `[a, b]`.
///
/// The projection parameter is clamped to `[0, 1]`. A degenerate segment
/// (`a == b`) falls back to the point distance `|p - a|`.
#[inline]
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let pa = p - a;
    let ba = b - a;
    let denom = ba.dot(ba);
    if denom <= 0.0 {
        return pa.length();
    }
    let t = clamp(pa.dot(ba) / denom, 0.0, 1.0);
    (pa - ba * t).length()
}

/// Radius of the largest disk centred at `x` that crosses no segment.
///
/// Linear in the number of segments. Fails with [`WosError::InvalidDomain`]
/// when `segments` is empty.
pub fn max_ball_radius(x: Vec2, segments: &[Segment]) -> Result<f32, WosError> {
    if segments.is_empty() {
        return Err(WosError::InvalidDomain);
    }
    Ok(nearest_wall_distance(x, segments))
}

#[inline]
fn nearest_wall_distance(x: Vec2, segments: &[Segment]) -> f32 {
    segments
        .iter()
        .map(|s| s.distance(x))
        .fold(f32::INFINITY, f32::min)
}

/// A planar region the estimators can walk in.
///
/// The only query a walk needs is the radius of the largest disk around `x`
/// that stays clear of the boundary. Implementations hold at least one wall,
/// so the radius is always finite for finite `x`.
pub trait Domain: Send + Sync {
    fn max_ball_radius(&self, x: Vec2) -> f32;
}

/// Non-empty borrowed wall list, for one-off queries that should not copy.
#[derive(Copy, Clone, Debug)]
pub struct SegmentSlice<'a> {
    segments: &'a [Segment],
}

impl<'a> SegmentSlice<'a> {
    pub fn new(segments: &'a [Segment]) -> Result<Self, WosError> {
        if segments.is_empty() {
            return Err(WosError::InvalidDomain);
        }
        Ok(Self { segments })
    }

    #[inline]
    pub fn segments(&self) -> &'a [Segment] {
        self.segments
    }
}

impl Domain for SegmentSlice<'_> {
    #[inline]
    fn max_ball_radius(&self, x: Vec2) -> f32 {
        nearest_wall_distance(x, self.segments)
    }
}

/// A planar domain bounded by line segments.
///
/// ### Invariants
/// - At least one segment (checked at construction).
///
/// ### Preconditions
/// The distance query is unsigned: it has no notion of inside or outside.
/// Walks started from a point are only meaningful when that point lies in the
/// simply connected region enclosed by the segments (e.g. inside a bounding
/// rectangle). Nothing here checks containment.
#[derive(Clone, Debug)]
pub struct SegmentDomain {
    segments: Vec<Segment>,
}

impl SegmentDomain {
    /// Create a domain from its walls.
    pub fn new(segments: Vec<Segment>) -> Result<Self, WosError> {
        if segments.is_empty() {
            return Err(WosError::InvalidDomain);
        }
        Ok(Self { segments })
    }

    /// Axis-aligned box `[0, width] × [0, height]`, e.g. the frame of an image.
    pub fn rectangle(width: f32, height: f32) -> Self {
        let (w, h) = (width, height);
        Self {
            segments: alloc::vec![
                Segment::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, h)),
                Segment::new(Vec2::new(w, 0.0), Vec2::new(w, h)),
                Segment::new(Vec2::new(0.0, 0.0), Vec2::new(w, 0.0)),
                Segment::new(Vec2::new(0.0, h), Vec2::new(w, h)),
            ],
        }
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Borrowed view over the walls.
    #[inline]
    pub fn as_slice(&self) -> SegmentSlice<'_> {
        SegmentSlice {
            segments: &self.segments,
        }
    }
}

impl Domain for SegmentDomain {
    /// Largest empty disk radius at `x`; infallible because the domain is non-empty.
    #[inline]
    fn max_ball_radius(&self, x: Vec2) -> f32 {
        nearest_wall_distance(x, &self.segments)
    }
}
