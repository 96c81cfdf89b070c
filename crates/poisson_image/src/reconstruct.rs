//! Parallel per-pixel reconstruction.
//!
//! Every pixel `(x, y)` is an independent Walk-on-Spheres query at the point
//! `(x, y)` of the rectangle `[0, w] × [0, h]`. Rows are spread over the rayon
//! pool; each pixel seeds its own generator from its linear index, so the
//! output only depends on the base seed and not on the thread count.

use image::GrayImage;
use log::{info, warn};
use rayon::prelude::*;
use wos2d::{PoissonParams, Rng, SegmentDomain, Solver, Vec2, WosError, clamp, derive_seed};

use crate::fields::{DiscreteLaplacian, PixelLookup};

/// Output image plus walk diagnostics.
pub struct Reconstruction {
    pub image: GrayImage,
    /// Pixels whose query failed; they are written as 0.
    pub failed_pixels: usize,
    pub total_walks: u64,
    /// Walks stopped by the step cap.
    pub truncated_walks: u64,
}

#[derive(Copy, Clone, Default)]
struct RowTally {
    failed: usize,
    walks: u64,
    truncated: u64,
}

impl RowTally {
    fn merge(self, other: Self) -> Self {
        Self {
            failed: self.failed + other.failed,
            walks: self.walks + other.walks,
            truncated: self.truncated + other.truncated,
        }
    }
}

/// Rebuild `source` from its discrete Laplacian and its edge-clamped values.
///
/// `params` are checked once up front; invalid settings fail the whole call
/// instead of every pixel. An empty image yields an empty result.
pub fn reconstruct(
    source: &GrayImage,
    params: PoissonParams,
    seed: u64,
) -> Result<Reconstruction, WosError> {
    params.validate()?;

    let (width, height) = source.dimensions();
    let mut out = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return Ok(Reconstruction {
            image: out,
            failed_pixels: 0,
            total_walks: 0,
            truncated_walks: 0,
        });
    }

    let domain = SegmentDomain::rectangle(width as f32, height as f32);
    let solver = Solver::builder(&domain).with_params(params).build();
    let f = DiscreteLaplacian::new(source);
    let g = PixelLookup::new(source);
    let row_len = width as usize;

    let tally = out
        .par_chunks_mut(row_len)
        .enumerate()
        .map(|(y, row)| {
            let mut tally = RowTally::default();
            for (x, px) in row.iter_mut().enumerate() {
                let idx = (y * row_len + x) as u64;
                let mut rng = Rng::seed_from(derive_seed(seed, idx));
                let query = Vec2::new(x as f32, y as f32);
                match solver.poisson_dirichlet(&f, &g, &mut rng, query) {
                    Ok(est) => {
                        *px = clamp(est.value, 0.0, 255.0) as u8;
                        tally.walks += est.walks as u64;
                        tally.truncated += est.truncated as u64;
                    }
                    Err(err) => {
                        warn!("pixel ({x}, {y}): {err}");
                        *px = 0;
                        tally.failed += 1;
                    }
                }
            }
            tally
        })
        .reduce(RowTally::default, RowTally::merge);

    info!(
        "reconstructed {width}x{height}: {} failed pixels, {}/{} walks truncated",
        tally.failed, tally.truncated, tally.walks
    );
    Ok(Reconstruction {
        image: out,
        failed_pixels: tally.failed,
        total_walks: tally.walks,
        truncated_walks: tally.truncated,
    })
}
