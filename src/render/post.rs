// PaintMyPoem Post-Processor
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Ages a finished canvas: smoothing, warm sepia tone, vignette and film
// grain. Pixel passes run row-parallel with rayon.

use crate::config::PostProcessConfig;
use anyhow::{Context, Result};
use image::{DynamicImage, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::path::Path;
use tracing::info;

/// Centre-weighted 3×3 smoothing kernel.
const SMOOTH_KERNEL: [f32; 9] = [
    1.0 / 13.0,
    1.0 / 13.0,
    1.0 / 13.0,
    1.0 / 13.0,
    5.0 / 13.0,
    1.0 / 13.0,
    1.0 / 13.0,
    1.0 / 13.0,
    1.0 / 13.0,
];

fn sepia(r: f32, g: f32, b: f32) -> [f32; 3] {
    [
        0.393 * r + 0.769 * g + 0.189 * b,
        0.349 * r + 0.686 * g + 0.168 * b,
        0.272 * r + 0.534 * g + 0.131 * b,
    ]
}

/// `filter3x3` leaves the outermost ring unwritten, so edge pixels are
/// carried over from the previous pass.
pub fn smooth(image: RgbaImage, passes: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    if width < 3 || height < 3 {
        return image;
    }
    let mut current = image;
    for _ in 0..passes {
        let mut filtered = DynamicImage::ImageRgba8(current.clone())
            .filter3x3(&SMOOTH_KERNEL)
            .to_rgba8();
        for x in 0..width {
            for y in [0, height - 1] {
                filtered.put_pixel(x, y, *current.get_pixel(x, y));
            }
        }
        for y in 0..height {
            for x in [0, width - 1] {
                filtered.put_pixel(x, y, *current.get_pixel(x, y));
            }
        }
        current = filtered;
    }
    current
}

/// Tone, vignette and grain in one pass. Grain is seeded per row from `rng`
/// so a seeded run is reproducible regardless of thread scheduling.
pub fn tone<R: Rng + ?Sized>(mut image: RgbaImage, config: &PostProcessConfig, rng: &mut R) -> RgbaImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image;
    }
    let row_seeds: Vec<u64> = (0..height).map(|_| rng.gen()).collect();
    let cx = (width as f32 - 1.0) / 2.0;
    let cy = (height as f32 - 1.0) / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt().max(1.0);
    let sepia_mix = config.sepia_strength.clamp(0.0, 1.0);
    let vignette = config.vignette_strength.clamp(0.0, 1.0);
    let grain = config.grain_amount as i32;

    let stride = width as usize * 4;
    let buffer: &mut [u8] = &mut image;
    buffer
        .par_chunks_mut(stride)
        .zip(row_seeds.par_iter())
        .enumerate()
        .for_each(|(y, (row, seed))| {
            let mut noise = StdRng::seed_from_u64(*seed);
            let dy = y as f32 - cy;
            for (x, px) in row.chunks_mut(4).enumerate() {
                let (r, g, b) = (px[0] as f32, px[1] as f32, px[2] as f32);
                let toned = sepia(r, g, b);

                let dx = x as f32 - cx;
                let d = (dx * dx + dy * dy).sqrt() / max_dist;
                let shade = 1.0 - vignette * d * d;

                let offset = if grain > 0 {
                    noise.gen_range(-grain..=grain) as f32
                } else {
                    0.0
                };

                for (c, orig) in [r, g, b].into_iter().enumerate() {
                    let mixed = orig + (toned[c] - orig) * sepia_mix;
                    px[c] = (mixed * shade + offset).clamp(0.0, 255.0) as u8;
                }
            }
        });
    image
}

/// Full aging chain; returns the input untouched when disabled.
pub fn age_image<R: Rng + ?Sized>(image: RgbaImage, config: &PostProcessConfig, rng: &mut R) -> RgbaImage {
    if !config.enabled {
        return image;
    }
    let smoothed = smooth(image, config.smooth_passes);
    let aged = tone(smoothed, config, rng);
    info!(
        "[FINISH] 🖼️ Aged canvas (smooth x{}, sepia {:.2}, vignette {:.2}, grain {})",
        config.smooth_passes, config.sepia_strength, config.vignette_strength, config.grain_amount
    );
    aged
}

pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))
}
