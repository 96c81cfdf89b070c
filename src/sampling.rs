//! Random sampling on disks and the 2D disk Green's function.

use core::f32::consts::PI;
use libm::{cosf, logf, sinf, sqrtf};

use crate::error::WosError;
use crate::math::Vec2;
use crate::rng::Rng;

const INV_2PI: f32 = 0.159_154_94;

/// Uniform direction on the unit circle.
#[inline]
pub(crate) fn sample_unit_circle(rng: &mut Rng) -> Vec2 {
    let t = rng.angle();
    Vec2::new(cosf(t), sinf(t))
}

/// Draw `Y ∈ B(center, R)` uniformly with respect to area.
///
/// Returns the point together with its distance `r = |Y − center|`, which
/// satisfies `0 < r <= R`. The radius is `R·sqrt(u)`: the square root keeps the
/// density flat over the area instead of piling samples up near the centre.
#[inline]
pub fn sample_disk_uniform(rng: &mut Rng, center: Vec2, radius: f32) -> (Vec2, f32) {
    let u = rng.uniform_open_closed_f32();
    let r = radius * sqrtf(u);
    let dir = sample_unit_circle(rng);
    (center + dir * r, r)
}

/// Area of a disk of radius `R`.
#[inline]
pub fn disk_area(radius: f32) -> f32 {
    PI * radius * radius
}

/// Dirichlet Green's function of the Laplacian on a disk in 2D.
///
/// For a disk of radius `R` centred at `x`, evaluated at distance `r = |y − x|`:
/// `G(R, r) = (1 / 2π) · ln(R / r)`, for `0 < r <= R`.
///
/// Strictly decreasing in `r` and zero on the circle. Arguments outside that
/// range (or non-finite ones) yield [`WosError::NumericDomain`].
#[inline]
pub fn green_disk_2d(radius: f32, r: f32) -> Result<f32, WosError> {
    if !(r > 0.0 && r <= radius && radius.is_finite()) {
        return Err(WosError::NumericDomain { radius, r });
    }
    Ok(INV_2PI * logf(radius / r))
}

/// Walk-on-Spheres step: jump to a uniformly random point on the circle `S(x, R)`.
#[inline]
pub(crate) fn wos_jump(x: Vec2, radius: f32, rng: &mut Rng) -> Vec2 {
    x + sample_unit_circle(rng) * radius
}
