// PaintMyPoem Visual Planning
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Emotion + keywords -> VisualPlan -> styled VisualPlan. Pure data
// transforms; drawing lives in `render`.

pub mod palette;
pub mod plan;
pub mod styles;

pub use palette::Rgb;
pub use plan::{build_plan, build_plan_for, Element, ShapeKind, VisualPlan};
pub use styles::{apply_style, apply_style_by_name, auto_select_style, StylePreset, StyleTag};
