#![no_std]

//! Grid-free Monte Carlo solver for the 2D Poisson equation.
//!
//! This crate provides safe, `no_std` Walk-on-Spheres estimators for
//! `Δu = −f` in a planar domain bounded by line segments, with Dirichlet data
//! `u = g` on the walls. Nothing is meshed: the only geometric query is the
//! distance from a point to the nearest wall.
//!
//! ```
//! use wos2d::{Constant, FieldFn, Rng, SegmentDomain, Vec2, solve_poisson};
//!
//! let square = SegmentDomain::rectangle(1.0, 1.0);
//! let g = FieldFn::new(|p: Vec2| p.x);
//! let mut rng = Rng::seed_from(7);
//! let u = solve_poisson(Vec2::new(0.5, 0.5), square.segments(), &Constant(0.0), &g, &mut rng)?;
//! assert!((u - 0.5).abs() < 0.1);
//! # Ok::<(), wos2d::WosError>(())
//! ```

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod domain;
pub mod error;
pub mod estimators;
pub mod field;
pub mod math;
pub mod observer;
pub mod params;
pub mod rng;
pub mod sampling;
pub mod solver;
pub mod stats;

pub use domain::{
    Domain, Segment, SegmentDomain, SegmentSlice, distance_to_segment, max_ball_radius,
};
pub use error::WosError;
pub use estimators::{PoissonEstimate, solve_poisson, wos_poisson_dirichlet, wos_poisson_walk};
pub use field::{Constant, FieldFn, ScalarField};
pub use math::{Point2, Vec2, clamp};
pub use observer::{
    NoopObserver, PlyRecorder, StatsObserver, TerminationReason, WalkObserver, WalkOutcome,
    WalkStatsSnapshot,
};
pub use params::{DEFAULT_EPSILON, DEFAULT_MAX_STEPS, DEFAULT_WALKS, PoissonParams, WalkBudget};
pub use rng::{Rng, derive_seed};
pub use sampling::{disk_area, green_disk_2d, sample_disk_uniform};
pub use solver::{Solver, SolverBuilder};
pub use stats::Stats;

#[cfg(test)]
mod tests {
    use crate::*;
    use alloc::vec::Vec;
    use core::f32::consts::TAU;

    fn unit_square() -> SegmentDomain {
        SegmentDomain::rectangle(1.0, 1.0)
    }

    /// Regular `n`-gon inscribed in the unit circle.
    fn unit_polygon(n: usize) -> SegmentDomain {
        let vertex = |i: usize| {
            let t = TAU * (i % n) as f32 / n as f32;
            Vec2::new(libm::cosf(t), libm::sinf(t))
        };
        let segments = (0..n).map(|i| Segment::new(vertex(i), vertex(i + 1))).collect();
        SegmentDomain::new(segments).unwrap()
    }

    #[test]
    fn constant_boundary_zero_source_is_exact() {
        let domain = unit_square();
        let solver = Solver::builder(&domain).build();
        let g = Constant(3.25);
        let mut rng = Rng::seed_from(1);
        for &q in &[
            Vec2::new(0.5, 0.5),
            Vec2::new(0.1, 0.8),
            Vec2::new(0.95, 0.02),
        ] {
            let est = solver.laplace_dirichlet(&g, &mut rng, q).unwrap();
            assert!((est.value - 3.25).abs() < 1e-5, "u({q:?}) = {}", est.value);
            assert!(est.std_error < 1e-5);
        }
    }

    /// Linear boundary data has a linear harmonic extension, so u(centre) = 0.5.
    #[test]
    fn unit_square_linear_boundary_centre() {
        let _ = env_logger::builder().is_test(true).try_init();
        let domain = unit_square();
        let g = FieldFn::new(|p: Vec2| p.x);
        let f = Constant(0.0);
        let centre = Vec2::new(0.5, 0.5);

        let runs = 8;
        let mut mean = 0.0;
        for seed in 0..runs {
            let mut rng = Rng::seed_from(seed);
            let u = solve_poisson(centre, domain.segments(), &f, &g, &mut rng).unwrap();
            assert!((u - 0.5).abs() < 0.1, "seed {seed}: u = {u}");
            mean += u / runs as f32;
        }
        assert!((mean - 0.5).abs() < 0.05, "mean over runs = {mean}");
    }

    #[test]
    fn empty_domain_never_returns_a_value() {
        let mut rng = Rng::seed_from(0);
        let res = solve_poisson(
            Vec2::new(0.5, 0.5),
            &[],
            &Constant(1.0),
            &Constant(1.0),
            &mut rng,
        );
        assert_eq!(res, Err(WosError::InvalidDomain));
    }

    /// Δu = −1 in the unit disk with u = 0 on the circle: u(r) = (1 − r²)/4.
    #[test]
    fn constant_source_in_disk_matches_analytic() {
        let domain = unit_polygon(128);
        let params = PoissonParams::new(4096)
            .with_epsilon(1e-3)
            .with_max_steps(1_000);
        let solver = Solver::builder(&domain).with_params(params).build();
        let mut rng = Rng::seed_from(1234);

        for &q in &[Vec2::new(0.0, 0.0), Vec2::new(0.3, -0.2)] {
            let est = solver
                .poisson_dirichlet(&Constant(1.0), &Constant(0.0), &mut rng, q)
                .unwrap();
            let exact = (1.0 - q.length_sq()) / 4.0;
            assert!(
                (est.value - exact).abs() < 0.03,
                "u({q:?}) ≈ {exact}, got {} ± {}",
                est.value,
                est.std_error
            );
            assert!(est.truncated < est.walks / 100);
        }
    }

    /// Regression: when f ≡ 0, Poisson reduces to Laplace draw for draw.
    #[test]
    fn poisson_reduces_to_laplace_when_source_zero() {
        let domain = unit_square();
        let solver = Solver::builder(&domain).build();
        let g = FieldFn::new(|p: Vec2| p.x * p.x - p.y * p.y);
        let q = Vec2::new(0.3, 0.6);

        let mut rng1 = Rng::seed_from(7);
        let mut rng2 = Rng::seed_from(7);
        let lap = solver.laplace_dirichlet(&g, &mut rng1, q).unwrap();
        let pois = solver
            .poisson_dirichlet(&FieldFn::new(|_| 0.0), &g, &mut rng2, q)
            .unwrap();
        assert_eq!(lap, pois);
    }

    #[test]
    fn step_cap_truncates_walks() {
        let domain = unit_square();
        let params = PoissonParams::new(32).with_max_steps(1);
        let stats = StatsObserver::new();
        let solver = Solver::builder(&domain)
            .with_params(params)
            .with_observer(stats.clone())
            .build();
        let mut rng = Rng::seed_from(3);
        let g = FieldFn::new(|p: Vec2| p.y);

        let walk = solver
            .walk(&Constant(0.0), &g, &mut rng, Vec2::new(0.5, 0.5))
            .unwrap();
        assert_eq!(walk.reason, TerminationReason::MaxSteps);
        assert!(walk.reason.is_truncated());
        assert_eq!(walk.steps, 1);
        // one jump of radius 0.5 from the centre
        assert!(((walk.end - Vec2::new(0.5, 0.5)).length() - 0.5).abs() < 1e-5);
        assert!((walk.value - walk.end.y).abs() < 1e-6);

        let est = solver
            .poisson_dirichlet(&Constant(0.0), &g, &mut rng, Vec2::new(0.5, 0.5))
            .unwrap();
        assert_eq!(est.truncated, 32);
        assert_eq!(est.boundary_hits, 0);
        assert_eq!(stats.snapshot().walks, 33);
        assert_eq!(stats.snapshot().truncation_rate(), 1.0);
    }

    #[test]
    fn query_on_the_wall_terminates_immediately() {
        let domain = unit_square();
        let solver = Solver::builder(&domain).build();
        let g = FieldFn::new(|p: Vec2| 10.0 * p.y);
        let mut rng = Rng::seed_from(8);
        let q = Vec2::new(0.0, 0.4);

        let walk = solver.walk(&Constant(5.0), &g, &mut rng, q).unwrap();
        assert_eq!(walk.reason, TerminationReason::HitBoundary);
        assert_eq!(walk.steps, 0);
        assert_eq!(walk.end, q);

        let est = solver.poisson_dirichlet(&Constant(5.0), &g, &mut rng, q).unwrap();
        assert_eq!(est.boundary_hits, est.walks);
        assert!((est.value - 4.0).abs() < 1e-5);
    }

    #[test]
    fn invalid_parameters_are_rejected_before_walking() {
        let domain = unit_square();
        let stats = StatsObserver::new();
        let solver = Solver::builder(&domain)
            .with_params(PoissonParams::new(0))
            .with_observer(stats.clone())
            .build();
        let mut rng = Rng::seed_from(0);
        let res = solver.laplace_dirichlet(&Constant(1.0), &mut rng, Vec2::new(0.5, 0.5));
        assert!(matches!(res, Err(WosError::InvalidParams { .. })));

        let solver = Solver::builder(&domain)
            .with_params(PoissonParams::new(8).with_epsilon(0.0))
            .build();
        let res = solver.laplace_dirichlet(&Constant(1.0), &mut rng, Vec2::new(0.5, 0.5));
        assert!(matches!(res, Err(WosError::InvalidParams { .. })));
        assert_eq!(stats.snapshot().walks, 0);
    }

    #[test]
    fn single_walk_rejects_invalid_input() {
        let domain = unit_square();
        let stats = StatsObserver::new();
        let g = FieldFn::new(|p: Vec2| p.x);
        let mut rng = Rng::seed_from(0);

        // a zero epsilon would otherwise try to sample a zero-radius disk on the wall
        let solver = Solver::builder(&domain)
            .with_params(PoissonParams::new(8).with_epsilon(0.0))
            .with_observer(stats.clone())
            .build();
        let res = solver.walk(&Constant(1.0), &g, &mut rng, Vec2::new(0.0, 0.5));
        assert!(matches!(res, Err(WosError::InvalidParams { .. })), "{res:?}");

        let solver = Solver::builder(&domain)
            .with_observer(stats.clone())
            .build();
        let res = solver.walk(&Constant(1.0), &g, &mut rng, Vec2::new(f32::NAN, 0.5));
        assert!(matches!(res, Err(WosError::InvalidParams { .. })), "{res:?}");
        let res = solver.walk(&Constant(1.0), &g, &mut rng, Vec2::new(0.5, f32::INFINITY));
        assert!(matches!(res, Err(WosError::InvalidParams { .. })), "{res:?}");

        assert_eq!(stats.snapshot().walks, 0);
    }

    #[test]
    fn solve_poisson_on_borrowed_walls_matches_solver() {
        let domain = unit_polygon(12);
        let f = Constant(2.0);
        let g = FieldFn::new(|p: Vec2| p.x - 0.5 * p.y);
        let q = Vec2::new(0.1, -0.3);

        let mut rng = Rng::seed_from(41);
        let direct = solve_poisson(q, domain.segments(), &f, &g, &mut rng).unwrap();
        let mut rng = Rng::seed_from(41);
        let est = Solver::builder(&domain)
            .build()
            .poisson_dirichlet(&f, &g, &mut rng, q)
            .unwrap();
        assert_eq!(direct, est.value);

        let mut rng = Rng::seed_from(41);
        let walls = SegmentSlice::new(domain.segments()).unwrap();
        let est = wos_poisson_dirichlet(
            &walls,
            &f,
            &g,
            PoissonParams::default(),
            &mut rng,
            q,
            &NoopObserver,
        )
        .unwrap();
        assert_eq!(direct, est.value);
    }

    #[test]
    fn standard_error_shrinks_with_more_walks() {
        let domain = unit_square();
        let g = FieldFn::new(|p: Vec2| p.x);
        let q = Vec2::new(0.4, 0.5);
        let se = |walks: u32| {
            let solver = Solver::builder(&domain)
                .with_params(PoissonParams::new(walks))
                .build();
            let mut rng = Rng::seed_from(walks as u64);
            solver
                .laplace_dirichlet(&g, &mut rng, q)
                .unwrap()
                .std_error
        };
        let coarse = se(64);
        let fine = se(1024);
        assert!(coarse > 0.0);
        // expected ratio is 1/4
        assert!(fine < coarse * 0.5, "se(64) = {coarse}, se(1024) = {fine}");
    }

    #[test]
    fn solve_many_is_seeded_per_query_and_isolates_failures() {
        let domain = unit_square();
        let solver = Solver::builder(&domain).build();
        let g = FieldFn::new(|p: Vec2| p.x + p.y);
        let f = Constant(0.0);
        let queries = [
            Vec2::new(0.25, 0.25),
            Vec2::new(f32::NAN, 0.5),
            Vec2::new(0.75, 0.5),
        ];

        let a = solver.solve_many(&f, &g, &queries, 99);
        let b = solver.solve_many(&f, &g, &queries, 99);
        assert_eq!(a.len(), 3);
        assert!(a[0].is_ok());
        assert!(matches!(a[1], Err(WosError::InvalidParams { .. })));
        assert!(a[2].is_ok());
        assert_eq!(a, b);

        let mut rng = Rng::seed_from(derive_seed(99, 2));
        let single = solver.poisson_dirichlet(&f, &g, &mut rng, queries[2]);
        assert_eq!(a[2], single);
    }

    #[test]
    fn observers_capture_walk_data() {
        let domain = unit_square();
        let stats = StatsObserver::new();
        let ply = PlyRecorder::new();
        let mut solver = Solver::builder(&domain)
            .with_params(PoissonParams::new(16))
            .with_observer(stats.clone())
            .build();
        solver.add_observer(ply.clone());

        let mut rng = Rng::seed_from(5);
        let est = solver
            .laplace_dirichlet(&Constant(0.0), &mut rng, Vec2::new(0.3, 0.6))
            .unwrap();

        let snap = stats.snapshot();
        assert_eq!(snap.walks, 16);
        assert!(snap.total_steps > 0);
        assert_eq!(snap.boundary_hits, est.boundary_hits);
        assert_eq!(snap.truncated, est.truncated);
        assert_eq!(snap.boundary_hits + snap.truncated, 16);

        // start + steps + end for every walk
        assert_eq!(ply.len() as u64, 2 * 16 + snap.total_steps);
        let text = ply.to_ascii();
        assert!(text.starts_with("ply\n"));
        assert!(text.contains("element vertex"));
        let body: Vec<&str> = text.lines().skip_while(|l| *l != "end_header").collect();
        assert_eq!(body.len() - 1, ply.len());

        stats.reset();
        assert_eq!(stats.snapshot(), WalkStatsSnapshot::default());
        ply.clear();
        assert!(ply.is_empty());
    }
}
