// PaintMyPoem Configuration
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// JSON file first (`paintmypoem.json` in the working directory), then
// environment overrides (`.env` is loaded by the binary via dotenv).

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "paintmypoem.json";

/// Aging filters applied to the finished canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostProcessConfig {
    pub enabled: bool,
    pub smooth_passes: u32,
    /// 0.0 keeps colours, 1.0 is full sepia.
    pub sepia_strength: f32,
    /// Corner darkening, 0.0 to 1.0.
    pub vignette_strength: f32,
    /// Max per-pixel noise offset.
    pub grain_amount: u8,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            smooth_passes: 1,
            sepia_strength: 0.15,
            vignette_strength: 0.35,
            grain_amount: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtConfig {
    pub output_dir: PathBuf,
    pub background_dir: PathBuf,
    pub background_opacity: f32,
    pub background_brightness: f32,
    pub download_attempts: u32,
    pub retry_backoff_ms: u64,
    pub request_timeout_secs: u64,
    pub cache_keep_recent: usize,
    pub post: PostProcessConfig,
}

impl Default for ArtConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            background_dir: default_background_dir(),
            background_opacity: 0.6,
            background_brightness: 0.7,
            download_attempts: 3,
            retry_backoff_ms: 1000,
            request_timeout_secs: 10,
            cache_keep_recent: 5,
            post: PostProcessConfig::default(),
        }
    }
}

fn default_background_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("paintmypoem").join("backgrounds"))
        .unwrap_or_else(|| PathBuf::from("backgrounds"))
}

impl ArtConfig {
    /// Load `paintmypoem.json` from the working directory (defaults when
    /// missing or malformed), then apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::from_file(Path::new(CONFIG_FILE));
        config.apply_env();
        config
    }

    pub fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!("[CONFIG] Loaded {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("[CONFIG] Ignoring malformed {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn apply_env(&mut self) {
        if let Ok(dir) = env::var("PAINTMYPOEM_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("PAINTMYPOEM_BACKGROUND_DIR") {
            self.background_dir = PathBuf::from(dir);
        }
        if let Some(opacity) = parse_env::<f32>("PAINTMYPOEM_BACKGROUND_OPACITY") {
            self.background_opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(keep) = parse_env::<usize>("PAINTMYPOEM_CACHE_KEEP") {
            self.cache_keep_recent = keep;
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("[CONFIG] Ignoring unparseable {}={}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "cache_keep_recent": 2, "post": { "grain_amount": 0 } }"#).unwrap();

        let config = ArtConfig::from_file(&path);
        assert_eq!(config.cache_keep_recent, 2);
        assert_eq!(config.post.grain_amount, 0);
        assert_eq!(config.post.smooth_passes, 1);
        assert_eq!(config.download_attempts, 3);
        assert_eq!(config.retry_backoff_ms, 1000);
    }

    #[test]
    fn malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "not json").unwrap();
        assert_eq!(ArtConfig::from_file(&path), ArtConfig::default());
    }

    #[test]
    fn missing_file_is_default() {
        let config = ArtConfig::from_file(Path::new("__no_such_config.json"));
        assert_eq!(config.background_opacity, 0.6);
    }
}
