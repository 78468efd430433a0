//! Page compositor.
//!
//! Renders one page's canvas: fills the background, strokes each image's
//! border, then crops, scales, and pastes each image at its planned
//! position. Scaling uses fast_image_resize with a Lanczos3 filter.

use fast_image_resize::{FilterType, Image, PixelType, ResizeAlg, Resizer};
use image::{imageops, Rgba, RgbaImage};
use std::num::NonZeroU32;

use crate::constants::{BACKGROUND_COLOR, BORDER_COLOR};
use crate::error::CollageError;
use crate::layout::grid::{GridSpec, Placement, Rect};
use crate::layout::sizing::SizedImage;

/// Render a page onto a fresh canvas.
///
/// Borders are filled first and each image pasted over its border's
/// interior, leaving a ring of `border_width` pixels visible on every
/// side. Consumes the sized images; the canvas is the page's sole owner
/// of pixel data from here on.
pub fn render_page(
    spec: &GridSpec,
    images: Vec<SizedImage>,
    placements: &[Placement],
) -> Result<RgbaImage, CollageError> {
    assert_eq!(
        images.len(),
        placements.len(),
        "every image needs a placement"
    );

    let mut canvas = RgbaImage::from_pixel(
        spec.canvas_width,
        spec.canvas_height,
        Rgba(BACKGROUND_COLOR),
    );

    for (sized, placement) in images.into_iter().zip(placements) {
        fill_rect(&mut canvas, &placement.border, Rgba(BORDER_COLOR));

        let prepared = prepare_image(sized, placement.width, placement.height)?;
        imageops::replace(
            &mut canvas,
            &prepared,
            placement.x as i64,
            placement.y as i64,
        );
    }

    Ok(canvas)
}

/// Apply the planned crop, then scale to the planned render size.
fn prepare_image(
    sized: SizedImage,
    target_w: u32,
    target_h: u32,
) -> Result<RgbaImage, CollageError> {
    let source = match sized.crop {
        Some(crop) => {
            imageops::crop_imm(&sized.image, crop.x, crop.y, crop.width, crop.height).to_image()
        }
        None => sized.image,
    };

    if source.width() == target_w && source.height() == target_h {
        return Ok(source);
    }

    resize_image(&source, target_w, target_h)
}

/// Resize using fast-image-resize with a Lanczos3 filter.
fn resize_image(img: &RgbaImage, target_w: u32, target_h: u32) -> Result<RgbaImage, CollageError> {
    let compose_failed =
        |msg: String| CollageError::encode_failed("canvas", msg);

    let src_width = NonZeroU32::new(img.width())
        .ok_or_else(|| compose_failed("Source width is 0".to_string()))?;
    let src_height = NonZeroU32::new(img.height())
        .ok_or_else(|| compose_failed("Source height is 0".to_string()))?;
    let dst_width = NonZeroU32::new(target_w)
        .ok_or_else(|| compose_failed("Target width is 0".to_string()))?;
    let dst_height = NonZeroU32::new(target_h)
        .ok_or_else(|| compose_failed("Target height is 0".to_string()))?;

    let src_image = Image::from_vec_u8(
        src_width,
        src_height,
        img.as_raw().clone(),
        PixelType::U8x4,
    )
    .map_err(|e| compose_failed(format!("Failed to create source image: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);

    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));

    resizer
        .resize(&src_image.view(), &mut dst_image.view_mut())
        .map_err(|e| compose_failed(format!("Resize operation failed: {:?}", e)))?;

    let result_buf = dst_image.into_vec();
    RgbaImage::from_raw(target_w, target_h, result_buf)
        .ok_or_else(|| compose_failed("Failed to create output image buffer".to_string()))
}

/// Fill a rectangle with a solid color, clamped to the canvas bounds.
fn fill_rect(canvas: &mut RgbaImage, rect: &Rect, color: Rgba<u8>) {
    let canvas_width = canvas.width() as i64;
    let canvas_height = canvas.height() as i64;

    let x_start = rect.x.max(0);
    let y_start = rect.y.max(0);
    let x_end = rect.right().min(canvas_width);
    let y_end = rect.bottom().min(canvas_height);

    for y in y_start..y_end {
        for x in x_start..x_end {
            canvas.put_pixel(x as u32, y as u32, color);
        }
    }
}
