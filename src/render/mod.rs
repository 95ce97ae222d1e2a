// PaintMyPoem Rendering
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod background;
pub mod canvas;
pub mod post;

pub use background::{Backdrop, BackgroundCategory, BackgroundManager, HttpFetcher, ImageFetcher};
pub use canvas::render;
pub use post::age_image;
