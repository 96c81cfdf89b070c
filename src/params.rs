//! Configuration types shared across estimators.

use crate::error::WosError;

/// Distance to the boundary below which a walk counts as having reached it.
pub const DEFAULT_EPSILON: f32 = 0.01;
/// Independent walks averaged per query.
pub const DEFAULT_WALKS: u32 = 128;
/// Step cap per walk. Walks still running after this many steps are truncated,
/// which biases the estimate towards the boundary value at the last position.
pub const DEFAULT_MAX_STEPS: u32 = 16;

/// Budget for a single walk.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WalkBudget {
    /// Distance to boundary below which the walk terminates.
    pub epsilon: f32,
    /// Hard cap on the number of steps.
    pub max_steps: u32,
}

impl WalkBudget {
    pub const fn new(epsilon: f32, max_steps: u32) -> Self {
        Self { epsilon, max_steps }
    }

    /// A walk can only stop at the boundary if `epsilon` is a positive finite distance.
    pub fn validate(&self) -> Result<(), WosError> {
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(WosError::InvalidParams {
                reason: "epsilon must be positive and finite",
            });
        }
        Ok(())
    }
}

impl Default for WalkBudget {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON, DEFAULT_MAX_STEPS)
    }
}

/// Per-query settings of the Poisson estimator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PoissonParams {
    /// Number of independent walks averaged into one estimate.
    pub walks: u32,
    pub budget: WalkBudget,
}

impl PoissonParams {
    pub const fn new(walks: u32) -> Self {
        Self {
            walks,
            budget: WalkBudget::new(DEFAULT_EPSILON, DEFAULT_MAX_STEPS),
        }
    }
    pub const fn with_budget(self, budget: WalkBudget) -> Self {
        Self { budget, ..self }
    }
    pub const fn with_epsilon(self, epsilon: f32) -> Self {
        Self {
            budget: WalkBudget::new(epsilon, self.budget.max_steps),
            ..self
        }
    }
    pub const fn with_max_steps(self, max_steps: u32) -> Self {
        Self {
            budget: WalkBudget::new(self.budget.epsilon, max_steps),
            ..self
        }
    }

    /// Reject settings that cannot produce a finite average.
    pub fn validate(&self) -> Result<(), WosError> {
        if self.walks == 0 {
            return Err(WosError::InvalidParams {
                reason: "walks must be at least 1",
            });
        }
        self.budget.validate()
    }
}

impl Default for PoissonParams {
    fn default() -> Self {
        Self::new(DEFAULT_WALKS)
    }
}
