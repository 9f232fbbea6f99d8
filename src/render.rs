//! Renders the canonical base image into every catalog entry. Each entry is
//! resized, encoded (PNG or single-size ICO), and written into the working
//! directory; outcomes are collected per entry so the caller chooses the
//! aggregate policy instead of the loop swallowing failures.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use color_quant::NeuQuant;
use image::{DynamicImage, ImageFormat, RgbImage};

use crate::catalog::{self, CatalogEntry, IconFormat};
use crate::error::Error;
use crate::normalize::{self, ResizePolicy};

/// Entries at this side length get the palette-quantized indexed encode.
const QUANTIZE_FROM: u32 = 1024;

/// NeuQuant sampling factor: 1 is exhaustive, 30 is fastest.
const QUANTIZE_SAMPLE_FAC: i32 = 10;

#[derive(Debug)]
pub struct RenderReport {
    pub name: String,
    pub outcome: Result<PathBuf, Error>,
}

impl RenderReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub fn render_catalog(
    base: &RgbImage,
    entries: &[CatalogEntry],
    policy: ResizePolicy,
    out_dir: &Path,
) -> Vec<RenderReport> {
    entries
        .iter()
        .map(|entry| {
            let outcome = render_entry(base, entry.name, entry.size, entry.format, policy, out_dir);
            if let Err(err) = &outcome {
                tracing::warn!(name = entry.name, %err, "icon render failed");
            }
            RenderReport {
                name: entry.name.to_string(),
                outcome,
            }
        })
        .collect()
}

/// The plain-named Apple variants under `icons/`, e.g. `icons/180x180.png`.
pub fn render_apple_folder(
    base: &RgbImage,
    policy: ResizePolicy,
    out_dir: &Path,
) -> Vec<RenderReport> {
    let dir = out_dir.join(catalog::APPLE_FOLDER_DIR);
    if let Err(err) = fs::create_dir_all(&dir) {
        return vec![RenderReport {
            name: catalog::APPLE_FOLDER_DIR.to_string(),
            outcome: Err(err.into()),
        }];
    }

    catalog::APPLE_FOLDER_SIZES
        .iter()
        .map(|&size| {
            let name = format!("{size}x{size}.png");
            let outcome = render_entry(base, &name, size, IconFormat::Png, policy, &dir);
            if let Err(err) = &outcome {
                tracing::warn!(name = %name, %err, "apple icon render failed");
            }
            RenderReport {
                name: format!("{}/{name}", catalog::APPLE_FOLDER_DIR),
                outcome,
            }
        })
        .collect()
}

fn render_entry(
    base: &RgbImage,
    name: &str,
    size: u32,
    format: IconFormat,
    policy: ResizePolicy,
    dir: &Path,
) -> Result<PathBuf, Error> {
    let resized = normalize::scale_to(base, size, policy);
    let path = dir.join(name);
    match format {
        IconFormat::Ico => encode_ico(&resized, &path, name)?,
        IconFormat::Png if size >= QUANTIZE_FROM => encode_png_indexed(&resized, &path, name)?,
        IconFormat::Png => encode_png(&resized, &path, name)?,
    }
    Ok(path)
}

fn encode_png(image: &RgbImage, path: &Path, name: &str) -> Result<(), Error> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| Error::encode(name, e))
}

/// Single-size ICO container at the entry's dimension.
fn encode_ico(image: &RgbImage, path: &Path, name: &str) -> Result<(), Error> {
    let rgba = DynamicImage::ImageRgb8(image.clone()).to_rgba8();
    rgba.save_with_format(path, ImageFormat::Ico)
        .map_err(|e| Error::encode(name, e))
}

/// 256-color indexed PNG at the maximum deflate level, for the largest
/// catalog size where a truecolor encode is disproportionately heavy.
fn encode_png_indexed(image: &RgbImage, path: &Path, name: &str) -> Result<(), Error> {
    let (width, height) = image.dimensions();
    let rgba: Vec<u8> = image
        .pixels()
        .flat_map(|p| [p[0], p[1], p[2], 255])
        .collect();

    let quantizer = NeuQuant::new(QUANTIZE_SAMPLE_FAC, 256, &rgba);
    let indices: Vec<u8> = rgba
        .chunks_exact(4)
        .map(|px| quantizer.index_of(px) as u8)
        .collect();
    let palette = quantizer.color_map_rgb();

    let file = File::create(path).map_err(|e| Error::encode(name, e))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(palette);
    encoder.set_compression(png::Compression::High);

    let mut writer = encoder
        .write_header()
        .map_err(|e| Error::encode(name, e))?;
    writer
        .write_image_data(&indices)
        .map_err(|e| Error::encode(name, e))?;
    writer.finish().map_err(|e| Error::encode(name, e))?;
    Ok(())
}
