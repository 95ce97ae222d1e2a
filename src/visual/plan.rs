// PaintMyPoem Visual Plan Builder
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Turns (emotion, keywords) into a renderer-ready VisualPlan. All randomness
// comes from the caller's RNG so seeded runs are reproducible.

use crate::error::PoemError;
use crate::poem::Emotion;
use crate::visual::palette::{self, Rgb};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use tracing::info;

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 800;

/// Element anchors stay inside these bounds; the band below y=600 is kept
/// free for captions.
pub const X_RANGE: RangeInclusive<i32> = 80..=720;
pub const Y_RANGE: RangeInclusive<i32> = 80..=600;

const SIZE_RANGE: RangeInclusive<u32> = 25..=120;
const ALPHA_RANGE: RangeInclusive<u8> = 200..=255;
const MIN_ELEMENTS: usize = 8;
const PALETTE_PROBABILITY: f64 = 0.7;

pub const DEFAULT_PARTICLE_COUNT: u32 = 30;
pub const DEFAULT_GRADIENT_COMPLEXITY: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Hexagon,
    Star,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Hexagon,
        ShapeKind::Star,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Star => "star",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = PoemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|shape| shape.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| PoemError::UnknownShape(s.to_string()))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One drawable primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub shape: ShapeKind,
    pub position: (i32, i32),
    /// Half-extent / radius in pixels.
    pub size: u32,
    pub color: Rgb,
    pub label: String,
    pub alpha: u8,
}

/// Complete description of one artwork instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualPlan {
    pub background_color: Rgb,
    pub palette: Vec<Rgb>,
    pub accent_colors: Vec<Rgb>,
    pub elements: Vec<Element>,
    pub text: Vec<String>,
    pub fog: bool,
    pub particle_count: u32,
    /// 2 = two-colour gradient, 3 = three-colour two-segment gradient.
    pub gradient_complexity: u8,
    pub style_name: Option<String>,
    pub emotion: Emotion,
}

impl VisualPlan {
    /// Number of elements a plan for `keyword_count` keywords carries.
    pub fn element_count_for(keyword_count: usize) -> usize {
        (keyword_count * 2).max(MIN_ELEMENTS)
    }
}

/// Draw a uniformly random anchor inside the drawable area.
pub fn random_position<R: Rng + ?Sized>(rng: &mut R) -> (i32, i32) {
    (rng.gen_range(X_RANGE), rng.gen_range(Y_RANGE))
}

/// Build a fresh plan for an emotion label and keyword list.
///
/// Never fails: unknown labels use the neutral tables and an empty keyword
/// list still yields eight `element_<i>` placeholders.
pub fn build_plan<R: Rng + ?Sized>(emotion: &str, keywords: &[String], rng: &mut R) -> VisualPlan {
    build_plan_for(Emotion::from_label(emotion), keywords, rng)
}

pub fn build_plan_for<R: Rng + ?Sized>(
    emotion: Emotion,
    keywords: &[String],
    rng: &mut R,
) -> VisualPlan {
    let palette = palette::palette(emotion);
    let accents = palette::accent_colors(emotion);
    let background_color = palette::background(emotion);

    let count = VisualPlan::element_count_for(keywords.len());
    let elements: Vec<Element> = (0..count)
        .map(|i| {
            let label = keywords
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("element_{}", i));
            let shape = ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())];
            let position = random_position(rng);
            let size = rng.gen_range(SIZE_RANGE);
            let pool = if rng.gen::<f64>() < PALETTE_PROBABILITY {
                palette
            } else {
                accents
            };
            let color = *pool.choose(rng).unwrap_or(&background_color);
            let alpha = rng.gen_range(ALPHA_RANGE);
            Element {
                shape,
                position,
                size,
                color,
                label,
                alpha,
            }
        })
        .collect();

    info!(
        "[PLAN] 🎨 {} plan: {} elements from {} keywords",
        emotion,
        elements.len(),
        keywords.len()
    );

    VisualPlan {
        background_color,
        palette: palette.to_vec(),
        accent_colors: accents.to_vec(),
        elements,
        text: keywords.to_vec(),
        fog: false,
        particle_count: DEFAULT_PARTICLE_COUNT,
        gradient_complexity: DEFAULT_GRADIENT_COMPLEXITY,
        style_name: None,
        emotion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn labels_use_keywords_then_placeholders() {
        let mut rng = StdRng::seed_from_u64(7);
        let plan = build_plan("joy", &words(&["sun", "bloom"]), &mut rng);
        let labels: Vec<&str> = plan.elements.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["sun", "bloom", "element_2", "element_3", "element_4", "element_5", "element_6", "element_7"]
        );
    }

    #[test]
    fn colors_come_from_palette_or_accents() {
        let mut rng = StdRng::seed_from_u64(11);
        let plan = build_plan("fear", &words(&["night"]), &mut rng);
        for element in &plan.elements {
            assert!(
                plan.palette.contains(&element.color) || plan.accent_colors.contains(&element.color),
                "{:?} not in tables",
                element.color
            );
        }
    }

    #[test]
    fn defaults_are_unstyled() {
        let mut rng = StdRng::seed_from_u64(1);
        let plan = build_plan("love", &[], &mut rng);
        assert!(!plan.fog);
        assert_eq!(plan.particle_count, 30);
        assert_eq!(plan.gradient_complexity, 3);
        assert!(plan.style_name.is_none());
        assert_eq!(plan.emotion, Emotion::Love);
    }

    #[test]
    fn same_seed_same_plan() {
        let kw = words(&["moon", "tide", "salt"]);
        let a = build_plan("sadness", &kw, &mut StdRng::seed_from_u64(42));
        let b = build_plan("sadness", &kw, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn shape_names_parse_strictly() {
        assert_eq!("Hexagon".parse::<ShapeKind>(), Ok(ShapeKind::Hexagon));
        assert_eq!(
            "blob".parse::<ShapeKind>(),
            Err(PoemError::UnknownShape("blob".to_string()))
        );
    }
}
