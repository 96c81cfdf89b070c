//! Scalar fields backed by an 8-bit grayscale image.
//!
//! Pixel `(u, v)` is addressed by truncating the query coordinates; indices
//! outside the image are clamped to the nearest edge pixel.

use image::GrayImage;
use wos2d::{ScalarField, Vec2, clamp};

#[inline]
fn texel(image: &GrayImage, u: i64, v: i64) -> f32 {
    let w = image.width() as i64;
    let h = image.height() as i64;
    let u = clamp(u, 0, w - 1) as u32;
    let v = clamp(v, 0, h - 1) as u32;
    image.get_pixel(u, v).0[0] as f32
}

#[inline]
fn pixel_of(p: Vec2) -> (i64, i64) {
    (p.x as i64, p.y as i64)
}

/// Boundary field: the intensity of the (edge-clamped) pixel containing `p`.
#[derive(Copy, Clone)]
pub struct PixelLookup<'a> {
    image: &'a GrayImage,
}

impl<'a> PixelLookup<'a> {
    /// `image` must not be empty.
    pub fn new(image: &'a GrayImage) -> Self {
        Self { image }
    }
}

impl ScalarField for PixelLookup<'_> {
    fn value(&self, p: Vec2) -> f32 {
        let (u, v) = pixel_of(p);
        texel(self.image, u, v)
    }
}

/// Source field: the negated 5-point Laplacian of the image,
/// `4·I(u,v) − I(u−1,v) − I(u+1,v) − I(u,v−1) − I(u,v+1)`.
///
/// With this sign, `Δu = −f` is solved by the image itself.
#[derive(Copy, Clone)]
pub struct DiscreteLaplacian<'a> {
    image: &'a GrayImage,
}

impl<'a> DiscreteLaplacian<'a> {
    /// `image` must not be empty.
    pub fn new(image: &'a GrayImage) -> Self {
        Self { image }
    }
}

impl ScalarField for DiscreteLaplacian<'_> {
    fn value(&self, p: Vec2) -> f32 {
        let (u, v) = pixel_of(p);
        let img = self.image;
        4.0 * texel(img, u, v)
            - texel(img, u - 1, v)
            - texel(img, u + 1, v)
            - texel(img, u, v - 1)
            - texel(img, u, v + 1)
    }
}
