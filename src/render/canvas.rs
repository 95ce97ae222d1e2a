// PaintMyPoem Canvas Renderer
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Draws a VisualPlan: gradient backdrop (plain pixels), optional photo
// layer, then a foreground SVG scene (shapes, fog, particles, captions)
// rasterized with resvg.

use crate::visual::palette::{self, Rgb};
use crate::visual::plan::{Element, ShapeKind, VisualPlan, CANVAS_HEIGHT, CANVAS_WIDTH};
use anyhow::{Context, Result};
use image::imageops;
use image::{Rgba, RgbaImage};
use rand::seq::SliceRandom;
use rand::Rng;
use resvg::usvg;
use std::f64::consts::PI;
use std::fmt::Write as _;
use tracing::{debug, info};

/// Bottom stop shared by every gradient.
pub const GRADIENT_FLOOR: Rgb = Rgb(20, 20, 20);

const FOG_PUFFS: usize = 80;
const CAPTION_FONT: &str = "Georgia";
const CAPTION_SIZE: u32 = 24;
const CAPTIONS_PER_ROW: usize = 5;
const STAR_INNER_RATIO: f64 = 0.45;
const OUTLINE: Rgb = Rgb(20, 20, 20);

/// Gradient stops for a plan: two or three colours, top to bottom.
pub fn gradient_stops(plan: &VisualPlan) -> Vec<Rgb> {
    if plan.gradient_complexity >= 3 {
        vec![
            plan.background_color,
            palette::gradient_mid(plan.emotion),
            GRADIENT_FLOOR,
        ]
    } else {
        vec![plan.background_color, GRADIENT_FLOOR]
    }
}

/// Opaque canvas filled with the plan's vertical gradient.
pub fn gradient_layer(plan: &VisualPlan, width: u32, height: u32) -> RgbaImage {
    let stops = gradient_stops(plan);
    let rows: Vec<Rgb> = (0..height).map(|y| gradient_row(&stops, y, height)).collect();
    RgbaImage::from_fn(width, height, |_, y| {
        let c = rows[y as usize];
        Rgba([c.0, c.1, c.2, 255])
    })
}

/// `top + (bottom - top) * y / h` per segment, floored like the integer
/// gradient the artwork has always used.
fn gradient_row(stops: &[Rgb], y: u32, height: u32) -> Rgb {
    let segments = (stops.len() - 1).max(1) as i64;
    let span = (height as i64 / segments).max(1);
    let seg = ((y as i64) / span).min(segments - 1);
    let local = y as i64 - seg * span;
    let seg_len = if seg == segments - 1 {
        height as i64 - seg * span
    } else {
        span
    };
    let top = stops[seg as usize];
    let bottom = stops[(seg as usize + 1).min(stops.len() - 1)];
    let mix = |a: u8, b: u8| {
        let a = a as i64;
        (a + ((b as i64 - a) * local).div_euclid(seg_len)).clamp(0, 255) as u8
    };
    Rgb(mix(top.0, bottom.0), mix(top.1, bottom.1), mix(top.2, bottom.2))
}

fn fill_attrs(color: Rgb, opacity: f64) -> String {
    format!("fill=\"{}\" fill-opacity=\"{:.3}\"", color.to_hex(), opacity)
}

fn polygon_points(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn regular_points(cx: f64, cy: f64, radii: &[f64], count: usize, start: f64) -> Vec<(f64, f64)> {
    (0..count)
        .map(|i| {
            let angle = start + i as f64 * 2.0 * PI / count as f64;
            let r = radii[i % radii.len()];
            (cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect()
}

/// SVG markup for one shape at the given half-extent.
pub fn shape_svg(shape: ShapeKind, cx: f64, cy: f64, size: f64, attrs: &str) -> String {
    match shape {
        ShapeKind::Circle => format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" {}/>",
            cx, cy, size, attrs
        ),
        ShapeKind::Square => format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {}/>",
            cx - size,
            cy - size,
            size * 2.0,
            size * 2.0,
            attrs
        ),
        ShapeKind::Triangle => format!(
            "<polygon points=\"{}\" {}/>",
            polygon_points(&[(cx, cy - size), (cx - size, cy + size), (cx + size, cy + size)]),
            attrs
        ),
        ShapeKind::Hexagon => format!(
            "<polygon points=\"{}\" {}/>",
            polygon_points(&regular_points(cx, cy, &[size], 6, -PI / 2.0)),
            attrs
        ),
        ShapeKind::Star => format!(
            "<polygon points=\"{}\" {}/>",
            polygon_points(&regular_points(
                cx,
                cy,
                &[size, size * STAR_INNER_RATIO],
                10,
                -PI / 2.0
            )),
            attrs
        ),
    }
}

fn element_svg(element: &Element, style: Option<&str>) -> String {
    let (x, y) = (element.position.0 as f64, element.position.1 as f64);
    let size = element.size as f64;
    let opacity = element.alpha as f64 / 255.0;
    let mut out = String::new();

    match style {
        Some("ethereal") | Some("organic") => {
            // soft halo under the shape
            let halo = fill_attrs(element.color, opacity * 0.2);
            out.push_str(&shape_svg(ShapeKind::Circle, x, y, size * 1.4, &halo));
            out.push_str(&shape_svg(element.shape, x, y, size, &fill_attrs(element.color, opacity)));
        }
        Some("bold") => {
            let attrs = format!(
                "{} stroke=\"{}\" stroke-width=\"3\" stroke-linejoin=\"round\"",
                fill_attrs(element.color, opacity),
                OUTLINE.to_hex()
            );
            out.push_str(&shape_svg(element.shape, x, y, size, &attrs));
        }
        _ => out.push_str(&shape_svg(element.shape, x, y, size, &fill_attrs(element.color, opacity))),
    }
    out
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Top-left anchor of the i-th caption in the band under the shapes.
pub fn caption_anchor(index: usize) -> (i32, i32) {
    let col = (index % CAPTIONS_PER_ROW) as i32;
    let row = (index / CAPTIONS_PER_ROW) as i32;
    (30 + col * 150, 720 + row * 30)
}

/// Transparent foreground scene for a plan.
pub fn scene_svg<R: Rng + ?Sized>(plan: &VisualPlan, width: u32, height: u32, rng: &mut R) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = width,
        h = height
    );

    let style = plan.style_name.as_deref();
    for element in &plan.elements {
        svg.push_str(&element_svg(element, style));
    }

    if plan.fog {
        for _ in 0..FOG_PUFFS {
            let x = rng.gen_range(0..=width) as f64;
            let y = rng.gen_range(0..=height) as f64;
            let r = rng.gen_range(20..=60) as f64;
            let alpha = rng.gen_range(20..=50) as f64 / 255.0;
            svg.push_str(&shape_svg(ShapeKind::Circle, x, y, r, &fill_attrs(Rgb(255, 255, 255), alpha)));
        }
    }

    for _ in 0..plan.particle_count {
        let x = rng.gen_range(0..=width) as f64;
        let y = rng.gen_range(0..=height) as f64;
        let r = rng.gen_range(2..=6) as f64;
        let alpha = rng.gen_range(0.3..0.7);
        svg.push_str(&shape_svg(ShapeKind::Circle, x, y, r, &fill_attrs(Rgb(255, 255, 255), alpha)));
    }

    for (i, word) in plan.text.iter().enumerate() {
        let (x, y) = caption_anchor(i);
        let color = plan.palette.choose(rng).copied().unwrap_or(Rgb(255, 255, 255));
        let _ = write!(
            svg,
            "<text x=\"{}\" y=\"{}\" font-family=\"{}, serif\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
            x,
            y + CAPTION_SIZE as i32,
            CAPTION_FONT,
            CAPTION_SIZE,
            color.to_hex(),
            escape_xml(word)
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Rasterize an SVG document into a straight-alpha RGBA image.
pub fn rasterize_svg(svg: &str) -> Result<RgbaImage> {
    let mut opt = usvg::Options::default();
    opt.font_family = CAPTION_FONT.to_string();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt).context("Failed to parse scene SVG")?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap_mut);

    let mut out = RgbaImage::new(size.width(), size.height());
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(out)
}

/// Draw a plan onto an 800×800 canvas, blending in an optional backdrop
/// layer (already sized and made translucent by the background provider).
pub fn render<R: Rng + ?Sized>(
    plan: &VisualPlan,
    backdrop: Option<&RgbaImage>,
    rng: &mut R,
) -> Result<RgbaImage> {
    let mut canvas = gradient_layer(plan, CANVAS_WIDTH, CANVAS_HEIGHT);

    if let Some(layer) = backdrop {
        debug!("[CANVAS] Blending photographic backdrop");
        imageops::overlay(&mut canvas, layer, 0, 0);
    }

    let svg = scene_svg(plan, CANVAS_WIDTH, CANVAS_HEIGHT, rng);
    let foreground = rasterize_svg(&svg)?;
    imageops::overlay(&mut canvas, &foreground, 0, 0);

    info!(
        "[CANVAS] 🖌️ Rendered {} elements ({} style, fog {}, {} particles)",
        plan.elements.len(),
        plan.style_name.as_deref().unwrap_or("plain"),
        if plan.fog { "on" } else { "off" },
        plan.particle_count
    );
    Ok(canvas)
}
