//! Core Monte Carlo estimators.
//!
//! A single walk ([`wos_poisson_walk`]) starts at the query point and keeps
//! jumping to a random point on the circle of the largest empty disk. At every
//! step it adds a one-sample estimate of the Green-weighted source integral
//! over that disk. When the disk gets thinner than `epsilon`, or the step cap
//! runs out, it adds the boundary value at its final position. The query
//! estimate ([`wos_poisson_dirichlet`]) is the mean over independent walks.
//!
//! Truncated walks (step cap reached) sample `g` at an interior point. That
//! bias is reported through [`TerminationReason::MaxSteps`], not corrected.

use log::{debug, trace};

use crate::domain::{Domain, Segment, SegmentSlice};
use crate::error::WosError;
use crate::field::ScalarField;
use crate::math::Vec2;
use crate::observer::{
    NoopObserver, TerminationReason, WalkObserver, WalkOutcome, WalkStart, WalkStep,
    WalkTerminate,
};
use crate::params::{PoissonParams, WalkBudget};
use crate::rng::Rng;
use crate::sampling::{disk_area, green_disk_2d, sample_disk_uniform, wos_jump};
use crate::stats::Stats;

/// Aggregated result of one query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PoissonEstimate {
    /// Mean of the per-walk values: the estimate of `u(x0)`.
    pub value: f32,
    /// Standard error of `value` (sample std-dev over `sqrt(walks)`).
    pub std_error: f32,
    pub walks: u32,
    /// Walks that ended within `epsilon` of the boundary.
    pub boundary_hits: u32,
    /// Walks cut off by the step cap.
    pub truncated: u32,
}

fn check_query(x0: Vec2) -> Result<(), WosError> {
    if !x0.is_finite() {
        return Err(WosError::InvalidParams {
            reason: "query point must be finite",
        });
    }
    Ok(())
}

/// Run one Walk-on-Spheres walk for `Δu = −f`, `u = g` on `∂Ω`.
///
/// `budget` and `x0` are checked before the walk starts; both failures are
/// [`WosError::InvalidParams`]. `walk` is only used to tag observer events.
pub fn wos_poisson_walk<D, F, G, O>(
    domain: &D,
    f: &F,
    g: &G,
    budget: WalkBudget,
    rng: &mut Rng,
    x0: Vec2,
    walk: u32,
    observer: &O,
) -> Result<WalkOutcome, WosError>
where
    D: Domain + ?Sized,
    F: ScalarField + ?Sized,
    G: ScalarField + ?Sized,
    O: WalkObserver + ?Sized,
{
    budget.validate()?;
    check_query(x0)?;

    let mut x = x0;
    let mut acc = 0.0_f32;
    let mut steps = 0u32;
    let mut reason = TerminationReason::MaxSteps;

    observer.on_start(WalkStart { position: x, walk });

    while steps < budget.max_steps {
        let radius = domain.max_ball_radius(x);
        if radius < budget.epsilon {
            reason = TerminationReason::HitBoundary;
            break;
        }

        observer.on_step(WalkStep {
            position: x,
            radius,
            depth: steps,
        });

        // Source term: |B| · f(Y) · G(R, |Y − x|), Y ~ Uniform(B(x, R))
        let (y, r) = sample_disk_uniform(rng, x, radius);
        acc += disk_area(radius) * f.value(y) * green_disk_2d(radius, r)?;

        x = wos_jump(x, radius, rng);
        steps += 1;
    }

    acc += g.value(x);

    trace!("walk {walk} from {x0:?}: {reason:?} after {steps} steps at {x:?}");
    observer.on_terminate(WalkTerminate {
        position: x,
        reason,
        steps,
    });
    Ok(WalkOutcome::new(acc, reason, steps, x))
}

/// Poisson (Dirichlet) estimate at `x0`: mean of `params.walks` independent walks.
///
/// Parameters and the query point are checked before any walk starts.
pub fn wos_poisson_dirichlet<D, F, G, O>(
    domain: &D,
    f: &F,
    g: &G,
    params: PoissonParams,
    rng: &mut Rng,
    x0: Vec2,
    observer: &O,
) -> Result<PoissonEstimate, WosError>
where
    D: Domain + ?Sized,
    F: ScalarField + ?Sized,
    G: ScalarField + ?Sized,
    O: WalkObserver + ?Sized,
{
    params.validate()?;
    check_query(x0)?;

    let mut stats = Stats::default();
    let mut boundary_hits = 0u32;
    let mut truncated = 0u32;
    for walk in 0..params.walks {
        let outcome = wos_poisson_walk(domain, f, g, params.budget, rng, x0, walk, observer)?;
        stats.push(outcome.value);
        match outcome.reason {
            TerminationReason::HitBoundary => boundary_hits += 1,
            TerminationReason::MaxSteps => truncated += 1,
        }
    }

    let estimate = PoissonEstimate {
        value: stats.mean(),
        std_error: stats.std_error(),
        walks: stats.count(),
        boundary_hits,
        truncated,
    };
    debug!(
        "u({x0:?}) ≈ {} ± {} ({} walks, {} truncated)",
        estimate.value, estimate.std_error, estimate.walks, estimate.truncated
    );
    Ok(estimate)
}

/// Estimate `u(x0)` for `Δu = −f` with `u = g` on the walls in `segments`,
/// using the default policy (`epsilon = 0.01`, 128 walks, 16 steps).
///
/// `x0` must lie inside the region enclosed by `segments`; see
/// [`SegmentDomain`](crate::domain::SegmentDomain) for why this is not
/// checked. An empty `segments` slice yields [`WosError::InvalidDomain`].
/// The walls are borrowed, nothing is copied per call.
pub fn solve_poisson<F, G>(
    x0: Vec2,
    segments: &[Segment],
    f: &F,
    g: &G,
    rng: &mut Rng,
) -> Result<f32, WosError>
where
    F: ScalarField + ?Sized,
    G: ScalarField + ?Sized,
{
    let domain = SegmentSlice::new(segments)?;
    wos_poisson_dirichlet(
        &domain,
        f,
        g,
        PoissonParams::default(),
        rng,
        x0,
        &NoopObserver,
    )
    .map(|estimate| estimate.value)
}
