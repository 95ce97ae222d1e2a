// PaintMyPoem Errors
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use thiserror::Error;

/// Input-contract violations. Runtime failures (network, decoding, disk)
/// travel as `anyhow::Error` and are usually replaced by a local fallback.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoemError {
    #[error("poem text is empty")]
    EmptyPoem,
    #[error("unknown shape '{0}' (expected circle, square, triangle, hexagon or star)")]
    UnknownShape(String),
    #[error("unknown style '{0}'")]
    UnknownStyle(String),
    #[error("unknown background category '{0}'")]
    UnknownBackground(String),
}
