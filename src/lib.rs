// PaintMyPoem Library Root
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod config;
pub mod error;
pub mod pipeline;
pub mod poem;
pub mod render;
pub mod visual;

pub use config::ArtConfig;
pub use error::PoemError;
pub use pipeline::{ArtGenerator, Artwork, BackgroundChoice, GenerateOptions, StyleChoice};
