//! JSON run configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use wos2d::{DEFAULT_EPSILON, DEFAULT_MAX_STEPS, DEFAULT_WALKS, PoissonParams, WalkBudget};

/// Estimator settings; every field falls back to the library default.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverConfig {
    pub walks: u32,
    pub epsilon: f32,
    pub max_steps: u32,
    /// Base seed; pixel `i` uses `derive_seed(seed, i)`.
    pub seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            walks: DEFAULT_WALKS,
            epsilon: DEFAULT_EPSILON,
            max_steps: DEFAULT_MAX_STEPS,
            seed: 0x5EED,
        }
    }
}

impl SolverConfig {
    pub fn params(&self) -> PoissonParams {
        PoissonParams::new(self.walks).with_budget(WalkBudget::new(self.epsilon, self.max_steps))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    #[serde(default)]
    pub solver: SolverConfig,
}

impl RunConfig {
    /// Configuration with default solver settings.
    pub fn from_paths(input_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            input_path,
            output_path,
            solver: SolverConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<RunConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("failed to parse config {}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<RunConfig> {
    let config: RunConfig = serde_json::from_str(contents)?;
    config.solver.params().validate()?;
    Ok(config)
}
