//! Scalar field abstractions used for the source term and the Dirichlet data.

use crate::math::Vec2;

/// A pure mapping `ℝ² → ℝ`.
///
/// The estimators use two instances: the source `f` of `Δu = −f` and the
/// boundary values `g`. Both are sampled many times from independent walks,
/// possibly on several threads, so `value` must be free of side effects and
/// return the same result for the same input.
pub trait ScalarField: Send + Sync {
    fn value(&self, p: Vec2) -> f32;
}

/// Simple functional wrapper implementing [`ScalarField`].
pub struct FieldFn<F>
where
    F: Fn(Vec2) -> f32 + Send + Sync,
{
    f: F,
}

impl<F> FieldFn<F>
where
    F: Fn(Vec2) -> f32 + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> ScalarField for FieldFn<F>
where
    F: Fn(Vec2) -> f32 + Send + Sync,
{
    #[inline]
    fn value(&self, p: Vec2) -> f32 {
        (self.f)(p)
    }
}

/// Field with the same value everywhere. `Constant(0.0)` turns Poisson into Laplace.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Constant(pub f32);

impl ScalarField for Constant {
    #[inline]
    fn value(&self, _p: Vec2) -> f32 {
        self.0
    }
}
