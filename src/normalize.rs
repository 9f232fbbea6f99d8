//! Turns an arbitrary upload into the canonical base image: decoded, flattened
//! onto an opaque white background, and sized to the configured base square.
//! Every later resize starts from this canonical image.

use image::{imageops, DynamicImage, Rgb, RgbImage};

use crate::error::Error;

const CANVAS_WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// How a source image is fitted onto a square target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Scale so the longer side fits, center on a white canvas.
    AspectPad,
    /// Resize both axes independently, ignoring aspect ratio.
    Stretch,
}

/// Decode `bytes` and produce the canonical `base`×`base` RGB image.
pub fn canonicalize(bytes: &[u8], base: u32, policy: ResizePolicy) -> Result<RgbImage, Error> {
    let decoded = image::load_from_memory(bytes).map_err(|e| Error::Decode(e.to_string()))?;
    let flat = flatten_alpha(decoded);
    if flat.dimensions() == (base, base) {
        return Ok(flat);
    }
    Ok(scale_to(&flat, base, policy))
}

/// Composite any transparency over opaque white and coerce to RGB. Fully
/// opaque images pass through unchanged apart from the channel conversion.
pub fn flatten_alpha(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
        let alpha = src[3] as u16;
        let blend = |channel: u8| ((channel as u16 * alpha + 255 * (255 - alpha)) / 255) as u8;
        *dst = Rgb([blend(src[0]), blend(src[1]), blend(src[2])]);
    }
    out
}

/// Resize `image` to a `target`×`target` square under `policy`.
///
/// AspectPad scales so the longer axis lands exactly on `target` (upscaling if
/// needed), then centers the result on white; padding on the shorter axis is
/// symmetric within one pixel of rounding.
pub fn scale_to(image: &RgbImage, target: u32, policy: ResizePolicy) -> RgbImage {
    match policy {
        ResizePolicy::Stretch => {
            imageops::resize(image, target, target, imageops::FilterType::Lanczos3)
        }
        ResizePolicy::AspectPad => {
            let (width, height) = image.dimensions();
            let (fit_w, fit_h) = if width >= height {
                let h = scaled_side(height, target, width);
                (target, h)
            } else {
                let w = scaled_side(width, target, height);
                (w, target)
            };

            let scaled = imageops::resize(image, fit_w, fit_h, imageops::FilterType::Lanczos3);
            let mut canvas = RgbImage::from_pixel(target, target, CANVAS_WHITE);
            let x = (target - fit_w) / 2;
            let y = (target - fit_h) / 2;
            imageops::overlay(&mut canvas, &scaled, i64::from(x), i64::from(y));
            canvas
        }
    }
}

fn scaled_side(side: u32, target: u32, longer: u32) -> u32 {
    let scaled = (side as u64 * target as u64 + longer as u64 / 2) / longer as u64;
    (scaled as u32).clamp(1, target)
}
