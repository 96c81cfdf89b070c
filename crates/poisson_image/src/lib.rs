//! Image reconstruction on top of the `wos2d` kernel.
//!
//! The source image provides both Poisson inputs: its negated discrete
//! Laplacian is the source term and its edge-clamped pixel values are the
//! Dirichlet data on the image frame. Solving at every pixel corner
//! reproduces the image up to Monte Carlo noise.

pub mod config;
pub mod fields;
pub mod reconstruct;

pub use config::{RunConfig, SolverConfig, load_config};
pub use fields::{DiscreteLaplacian, PixelLookup};
pub use reconstruct::{Reconstruction, reconstruct};
