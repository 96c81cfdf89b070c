//! High-level solver façade built on top of the low-level estimators.
//!
//! [`Solver`] bundles a segment domain, estimator parameters, and optional walk
//! observers into a reusable handle. It is `Sync`, so one solver can serve many
//! worker threads as long as each worker brings its own [`Rng`].

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::domain::SegmentDomain;
use crate::error::WosError;
use crate::estimators::{PoissonEstimate, wos_poisson_dirichlet, wos_poisson_walk};
use crate::field::{Constant, ScalarField};
use crate::math::Vec2;
use crate::observer::{ObserverList, WalkObserver, WalkOutcome};
use crate::params::PoissonParams;
use crate::rng::{Rng, derive_seed};

/// Builder for [`Solver`].
pub struct SolverBuilder<'a> {
    domain: &'a SegmentDomain,
    params: PoissonParams,
    observers: Vec<Box<dyn WalkObserver + 'a>>,
}

impl<'a> SolverBuilder<'a> {
    /// Begin constructing a solver for `domain` with default parameters.
    pub fn new(domain: &'a SegmentDomain) -> Self {
        Self {
            domain,
            params: PoissonParams::default(),
            observers: Vec::new(),
        }
    }

    /// Override walk count, `epsilon` and step cap.
    pub fn with_params(mut self, params: PoissonParams) -> Self {
        self.params = params;
        self
    }

    /// Register an observer that will receive walk events.
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: WalkObserver + 'a,
    {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn build(self) -> Solver<'a> {
        Solver {
            domain: self.domain,
            params: self.params,
            observers: self.observers,
        }
    }
}

/// Reusable handle over a domain, its parameters and shared observers.
pub struct Solver<'a> {
    domain: &'a SegmentDomain,
    params: PoissonParams,
    observers: Vec<Box<dyn WalkObserver + 'a>>,
}

impl<'a> Solver<'a> {
    pub fn builder(domain: &'a SegmentDomain) -> SolverBuilder<'a> {
        SolverBuilder::new(domain)
    }

    #[inline]
    fn observer_list(&self) -> ObserverList<'_> {
        ObserverList::new(
            self.observers
                .iter()
                .map(|obs| obs.as_ref() as &dyn WalkObserver),
        )
    }

    /// Attach an additional observer at runtime.
    pub fn add_observer<O>(&mut self, observer: O)
    where
        O: WalkObserver + 'a,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn params(&self) -> PoissonParams {
        self.params
    }

    /// Estimate `u(query)` for `Δu = −f`, `u = g` on the boundary.
    pub fn poisson_dirichlet<F, G>(
        &self,
        f: &F,
        g: &G,
        rng: &mut Rng,
        query: Vec2,
    ) -> Result<PoissonEstimate, WosError>
    where
        F: ScalarField + ?Sized,
        G: ScalarField + ?Sized,
    {
        let observers = self.observer_list();
        wos_poisson_dirichlet(self.domain, f, g, self.params, rng, query, &observers)
    }

    /// Harmonic extension of `g`: the Poisson estimate with a zero source.
    pub fn laplace_dirichlet<G>(
        &self,
        g: &G,
        rng: &mut Rng,
        query: Vec2,
    ) -> Result<PoissonEstimate, WosError>
    where
        G: ScalarField + ?Sized,
    {
        self.poisson_dirichlet(&Constant(0.0), g, rng, query)
    }

    /// A single walk from `query`, exposing its termination reason.
    ///
    /// Rejects the same bad input as [`Solver::poisson_dirichlet`] except the
    /// walk count, which a single walk does not use.
    pub fn walk<F, G>(
        &self,
        f: &F,
        g: &G,
        rng: &mut Rng,
        query: Vec2,
    ) -> Result<WalkOutcome, WosError>
    where
        F: ScalarField + ?Sized,
        G: ScalarField + ?Sized,
    {
        let observers = self.observer_list();
        wos_poisson_walk(
            self.domain,
            f,
            g,
            self.params.budget,
            rng,
            query,
            0,
            &observers,
        )
    }

    /// Estimate every point in `queries`, one result slot per point.
    ///
    /// Query `i` draws from its own generator seeded with `derive_seed(seed, i)`,
    /// so results match a parallel evaluation that uses the same seeding. A
    /// failing query does not stop the others.
    pub fn solve_many<F, G>(
        &self,
        f: &F,
        g: &G,
        queries: &[Vec2],
        seed: u64,
    ) -> Vec<Result<PoissonEstimate, WosError>>
    where
        F: ScalarField + ?Sized,
        G: ScalarField + ?Sized,
    {
        queries
            .iter()
            .enumerate()
            .map(|(i, &query)| {
                let mut rng = Rng::seed_from(derive_seed(seed, i as u64));
                self.poisson_dirichlet(f, g, &mut rng, query)
            })
            .collect()
    }
}
