// PaintMyPoem Style Presets
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Named configuration bundles that re-skin a VisualPlan: palette remap,
// element count rescale, shape substitution and effect toggles.

use crate::error::PoemError;
use crate::poem::Emotion;
use crate::visual::palette::Rgb;
use crate::visual::plan::{random_position, ShapeKind, VisualPlan};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTag {
    Vibrant,
    Minimalist,
    Ethereal,
    Bold,
    Organic,
}

/// Fixed parameters of one style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StylePreset {
    pub display_name: &'static str,
    pub description: &'static str,
    pub color_intensity: f64,
    /// -100..=100; positive pushes channels apart, non-positive blends to gray.
    pub saturation_boost: i32,
    pub element_count_multiplier: f64,
    pub shape_preferences: &'static [ShapeKind],
    pub size_range: (u32, u32),
    pub alpha_range: (u8, u8),
    pub particle_count: u32,
    pub fog_enabled: bool,
    pub gradient_complexity: u8,
}

const VIBRANT: StylePreset = StylePreset {
    display_name: "Vibrant",
    description: "Bold colors, high contrast, energetic feel",
    color_intensity: 1.2,
    saturation_boost: 50,
    element_count_multiplier: 1.5,
    shape_preferences: &[ShapeKind::Circle, ShapeKind::Star, ShapeKind::Hexagon],
    size_range: (40, 140),
    alpha_range: (220, 255),
    particle_count: 40,
    fog_enabled: false,
    gradient_complexity: 3,
};

const MINIMALIST: StylePreset = StylePreset {
    display_name: "Minimalist",
    description: "Clean, simple shapes with limited color palette",
    color_intensity: 0.8,
    saturation_boost: -30,
    element_count_multiplier: 0.6,
    shape_preferences: &[ShapeKind::Circle, ShapeKind::Square],
    size_range: (60, 100),
    alpha_range: (200, 240),
    particle_count: 8,
    fog_enabled: false,
    gradient_complexity: 2,
};

const ETHEREAL: StylePreset = StylePreset {
    display_name: "Ethereal",
    description: "Soft, dreamy with transparent layers and flowing shapes",
    color_intensity: 0.9,
    saturation_boost: 20,
    element_count_multiplier: 1.0,
    shape_preferences: &[ShapeKind::Circle, ShapeKind::Triangle],
    size_range: (30, 120),
    alpha_range: (120, 200),
    particle_count: 60,
    fog_enabled: true,
    gradient_complexity: 3,
};

const BOLD: StylePreset = StylePreset {
    display_name: "Bold",
    description: "High contrast, geometric shapes, strong visual impact",
    color_intensity: 1.1,
    saturation_boost: 40,
    element_count_multiplier: 1.2,
    shape_preferences: &[ShapeKind::Square, ShapeKind::Triangle, ShapeKind::Hexagon],
    size_range: (50, 130),
    alpha_range: (240, 255),
    particle_count: 20,
    fog_enabled: false,
    gradient_complexity: 2,
};

const ORGANIC: StylePreset = StylePreset {
    display_name: "Organic",
    description: "Natural, flowing shapes with earth-inspired colors",
    color_intensity: 0.95,
    saturation_boost: 10,
    element_count_multiplier: 1.1,
    shape_preferences: &[ShapeKind::Circle, ShapeKind::Star],
    size_range: (35, 110),
    alpha_range: (180, 230),
    particle_count: 35,
    fog_enabled: true,
    gradient_complexity: 3,
};

impl StyleTag {
    pub const ALL: [StyleTag; 5] = [
        StyleTag::Vibrant,
        StyleTag::Minimalist,
        StyleTag::Ethereal,
        StyleTag::Bold,
        StyleTag::Organic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StyleTag::Vibrant => "vibrant",
            StyleTag::Minimalist => "minimalist",
            StyleTag::Ethereal => "ethereal",
            StyleTag::Bold => "bold",
            StyleTag::Organic => "organic",
        }
    }

    pub fn preset(self) -> &'static StylePreset {
        match self {
            StyleTag::Vibrant => &VIBRANT,
            StyleTag::Minimalist => &MINIMALIST,
            StyleTag::Ethereal => &ETHEREAL,
            StyleTag::Bold => &BOLD,
            StyleTag::Organic => &ORGANIC,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        StyleTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == name.trim().to_lowercase())
    }
}

impl FromStr for StyleTag {
    type Err = PoemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleTag::from_name(s).ok_or_else(|| PoemError::UnknownStyle(s.to_string()))
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(id, display name, description)` for every preset, in menu order.
pub fn available_styles() -> Vec<(&'static str, &'static str, &'static str)> {
    StyleTag::ALL
        .iter()
        .map(|tag| {
            let preset = tag.preset();
            (tag.as_str(), preset.display_name, preset.description)
        })
        .collect()
}

/// Preset lookup by name; unknown names get the vibrant preset.
pub fn style_config(name: &str) -> &'static StylePreset {
    StyleTag::from_name(name)
        .unwrap_or(StyleTag::Vibrant)
        .preset()
}

/// Re-tone one colour: intensity scaling, then the saturation heuristic.
///
/// Negative boosts blend toward the channel average, not an HSV
/// desaturation; existing artwork depends on this exact output.
pub fn remap_color(color: Rgb, preset: &StylePreset) -> Rgb {
    let scale = |c: u8| (c as f64 * preset.color_intensity).min(255.0) as i32;
    let (mut r, mut g, mut b) = (scale(color.0), scale(color.1), scale(color.2));

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    if max != min {
        let factor = 1.0 + preset.saturation_boost as f64 / 100.0;
        if preset.saturation_boost > 0 {
            let push = |c: i32| (min as f64 + (c - min) as f64 * factor).min(255.0) as i32;
            r = push(r);
            g = push(g);
            b = push(b);
        } else {
            let avg = ((r + g + b) / 3) as f64;
            let blend = |c: i32| (c as f64 * factor + avg * (1.0 - factor)) as i32;
            r = blend(r);
            g = blend(g);
            b = blend(b);
        }
    }

    let clamp = |c: i32| c.clamp(0, 255) as u8;
    Rgb(clamp(r), clamp(g), clamp(b))
}

pub fn remap_palette(colors: &[Rgb], preset: &StylePreset) -> Vec<Rgb> {
    colors.iter().map(|c| remap_color(*c, preset)).collect()
}

/// Apply a preset, returning a new plan. The input plan is left untouched.
///
/// The element count becomes `trunc(len * multiplier)`, so applying the same
/// style twice compounds. Element colours go through the same remap as the
/// palette, so every drawn colour belongs to the styled palette or accents.
pub fn apply_style<R: Rng + ?Sized>(plan: &VisualPlan, tag: StyleTag, rng: &mut R) -> VisualPlan {
    let preset = tag.preset();
    let mut styled = plan.clone();

    styled.palette = remap_palette(&plan.palette, preset);
    styled.accent_colors = remap_palette(&plan.accent_colors, preset);

    let current = plan.elements.len();
    let target = (current as f64 * preset.element_count_multiplier) as usize;
    let (size_min, size_max) = preset.size_range;
    let (alpha_min, alpha_max) = preset.alpha_range;

    if target < current {
        styled.elements.truncate(target);
    } else if target > current {
        for _ in current..target {
            let Some(base) = plan.elements.choose(rng) else {
                break;
            };
            let mut extra = base.clone();
            extra.position = random_position(rng);
            extra.size = rng.gen_range(size_min..=size_max);
            extra.alpha = rng.gen_range(alpha_min..=alpha_max);
            styled.elements.push(extra);
        }
    }

    for element in &mut styled.elements {
        if !preset.shape_preferences.contains(&element.shape) {
            if let Some(shape) = preset.shape_preferences.choose(rng) {
                element.shape = *shape;
            }
        }
        element.color = remap_color(element.color, preset);
        element.size = element.size.clamp(size_min, size_max);
        element.alpha = rng.gen_range(alpha_min..=alpha_max);
    }

    styled.fog = preset.fog_enabled;
    styled.particle_count = preset.particle_count;
    styled.gradient_complexity = preset.gradient_complexity;
    styled.style_name = Some(tag.as_str().to_string());

    info!(
        "[STYLE] ✨ {} applied: {} -> {} elements",
        preset.display_name,
        current,
        styled.elements.len()
    );
    styled
}

/// Apply a style by name. Unknown names are a pass-through.
pub fn apply_style_by_name<R: Rng + ?Sized>(
    plan: &VisualPlan,
    name: &str,
    rng: &mut R,
) -> VisualPlan {
    match StyleTag::from_name(name) {
        Some(tag) => apply_style(plan, tag, rng),
        None => {
            debug!("[STYLE] Unknown style '{}', plan left as-is", name);
            plan.clone()
        }
    }
}

const NATURE_WORDS: &[&str] = &[
    "tree", "flower", "forest", "ocean", "mountain", "river", "sky", "earth",
];

/// Pick a style from the poem's emotion, with a nature-word override for
/// calm or melancholy poems.
pub fn auto_select_style(emotion: Emotion, keywords: &[String]) -> StyleTag {
    let joined = keywords.join(" ").to_lowercase();
    let has_nature = NATURE_WORDS.iter().any(|w| joined.contains(w));

    if has_nature
        && matches!(
            emotion,
            Emotion::Neutral | Emotion::Love | Emotion::Sadness
        )
    {
        return StyleTag::Organic;
    }

    match emotion {
        Emotion::Joy => StyleTag::Vibrant,
        Emotion::Love => StyleTag::Ethereal,
        Emotion::Sadness => StyleTag::Minimalist,
        Emotion::Anger => StyleTag::Bold,
        Emotion::Fear | Emotion::Neutral => StyleTag::Organic,
    }
}

/// Label-based variant; unknown labels behave like neutral.
pub fn auto_select_style_for(emotion: &str, keywords: &[String]) -> StyleTag {
    auto_select_style(Emotion::from_label(emotion), keywords)
}
