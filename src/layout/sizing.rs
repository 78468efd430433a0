//! Cell sizing.
//!
//! Computes each image's target render size (and crop window, when the
//! policy calls for one) under the configured [`SizingPolicy`]. Only the
//! dimension math lives here; the pixel work of cropping and scaling is
//! performed by the compositor.

use image::RgbaImage;

use crate::config::SizingPolicy;

/// Crop window in source-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A loaded image plus its planned render size.
///
/// Owns its raster exclusively; the compositor consumes it when producing
/// the scaled copy that lands on the canvas.
pub struct SizedImage {
    pub image: RgbaImage,
    pub render_width: u32,
    pub render_height: u32,
    pub crop: Option<CropRect>,
}

impl std::fmt::Debug for SizedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SizedImage")
            .field("source", &(self.image.width(), self.image.height()))
            .field("render", &(self.render_width, self.render_height))
            .field("crop", &self.crop)
            .finish()
    }
}

/// The largest centered square that fits the source image.
pub fn square_crop_plan(width: u32, height: u32) -> CropRect {
    let side = width.min(height);
    CropRect {
        x: (width - side) / 2,
        y: (height - side) / 2,
        width: side,
        height: side,
    }
}

/// Scale so the longer edge approaches `target` while keeping both output
/// dimensions within `[min_dim, max_dim]`.
///
/// The longer edge is clamped into bounds first and the shorter edge
/// derived from the aspect ratio; if an extreme aspect ratio pushes the
/// shorter edge under the floor, both are re-derived from the floor and
/// re-clamped against the ceiling. Idempotent: feeding an output pair back
/// through produces the same pair.
pub fn fit_dimensions(
    width: u32,
    height: u32,
    target: u32,
    min_dim: u32,
    max_dim: u32,
) -> (u32, u32) {
    assert!(width > 0 && height > 0, "source dimensions must be positive");
    assert!(min_dim > 0 && min_dim <= max_dim, "invalid dimension bounds");

    let landscape = width >= height;
    let (long_src, short_src) = if landscape {
        (width, height)
    } else {
        (height, width)
    };
    let aspect = long_src as f64 / short_src as f64;

    let mut long_edge = target.clamp(min_dim, max_dim);
    let mut short_edge = ((long_edge as f64 / aspect).round() as u32).max(1);

    if short_edge < min_dim {
        short_edge = min_dim;
        long_edge = ((short_edge as f64 * aspect).round() as u32).clamp(min_dim, max_dim);
    }

    if landscape {
        (long_edge, short_edge)
    } else {
        (short_edge, long_edge)
    }
}

/// Plan render sizes for a page's images under the given policy.
///
/// Output order and length match the input; every image is assumed valid
/// (zero-dimension sources are excluded at load time).
pub fn size_images(images: Vec<RgbaImage>, policy: &SizingPolicy) -> Vec<SizedImage> {
    images
        .into_iter()
        .map(|image| {
            let (width, height) = (image.width(), image.height());
            match policy {
                SizingPolicy::SquareCrop { size } => SizedImage {
                    image,
                    render_width: *size,
                    render_height: *size,
                    crop: Some(square_crop_plan(width, height)),
                },
                SizingPolicy::AspectFit {
                    target,
                    min_dimension,
                    max_dimension,
                } => {
                    let (render_width, render_height) =
                        fit_dimensions(width, height, *target, *min_dimension, *max_dimension);
                    SizedImage {
                        image,
                        render_width,
                        render_height,
                        crop: None,
                    }
                }
                SizingPolicy::FullBleed { width, height } => SizedImage {
                    image,
                    render_width: *width,
                    render_height: *height,
                    crop: None,
                },
            }
        })
        .collect()
}
