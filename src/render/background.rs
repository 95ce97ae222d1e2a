// PaintMyPoem Background Provider
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Photographic backdrops per category with a local file cache. Network
// failures are retried, then replaced by a locally generated gradient; the
// generated fallback is pure computation and cannot fail.

use crate::config::ArtConfig;
use crate::error::PoemError;
use crate::poem::Emotion;
use crate::visual::palette::Rgb;
use crate::visual::plan::{CANVAS_HEIGHT, CANVAS_WIDTH};
use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use rand::seq::SliceRandom;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};
use url::Url;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Shown when a backdrop file exists but cannot be decoded.
const UNREADABLE_FILL: Rgb = Rgb(100, 100, 150);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackgroundCategory {
    Sky,
    Forest,
    Ocean,
    Mountains,
    Sunset,
}

impl BackgroundCategory {
    pub const ALL: [BackgroundCategory; 5] = [
        BackgroundCategory::Sky,
        BackgroundCategory::Forest,
        BackgroundCategory::Ocean,
        BackgroundCategory::Mountains,
        BackgroundCategory::Sunset,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BackgroundCategory::Sky => "sky",
            BackgroundCategory::Forest => "forest",
            BackgroundCategory::Ocean => "ocean",
            BackgroundCategory::Mountains => "mountains",
            BackgroundCategory::Sunset => "sunset",
        }
    }

    pub fn urls(self) -> &'static [&'static str] {
        match self {
            BackgroundCategory::Sky => &[
                "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1419242902214-272b3f66ee7a?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1517685352821-92cf88aee5a5?w=800&h=800&fit=crop",
            ],
            BackgroundCategory::Forest => &[
                "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1518837695005-2083093ee35b?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1574263867128-a3d5c1b1deaa?w=800&h=800&fit=crop",
            ],
            BackgroundCategory::Ocean => &[
                "https://images.unsplash.com/photo-1439066615861-d1af74d74000?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1483683804023-6ccdb62f86ef?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1505142468610-359e7d316be0?w=800&h=800&fit=crop",
            ],
            BackgroundCategory::Mountains => &[
                "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1464822759844-d150ba4ba2b8?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1506197603052-3cc9c3a201bd?w=800&h=800&fit=crop",
            ],
            BackgroundCategory::Sunset => &[
                "https://images.unsplash.com/photo-1495616811223-4d98c6e9c869?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1519904981063-b0cf448d479e?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=800&fit=crop",
            ],
        }
    }

    pub fn fallback_color(self) -> Rgb {
        match self {
            BackgroundCategory::Sky => Rgb(135, 206, 235),
            BackgroundCategory::Forest => Rgb(34, 139, 34),
            BackgroundCategory::Ocean => Rgb(0, 119, 190),
            BackgroundCategory::Mountains => Rgb(139, 137, 137),
            BackgroundCategory::Sunset => Rgb(255, 94, 77),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        BackgroundCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
    }
}

impl FromStr for BackgroundCategory {
    type Err = PoemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BackgroundCategory::from_name(s).ok_or_else(|| PoemError::UnknownBackground(s.to_string()))
    }
}

impl fmt::Display for BackgroundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggest a backdrop category for an emotion label.
pub fn recommended_background<R: Rng + ?Sized>(emotion: &str, rng: &mut R) -> BackgroundCategory {
    use BackgroundCategory::*;
    let candidates: &[BackgroundCategory] = match emotion {
        "joy" | "happy" => &[Sunset, Sky, Mountains],
        "sadness" | "sad" => &[Ocean, Forest, Mountains],
        "anger" => &[Mountains, Sunset, Forest],
        "fear" => &[Forest, Mountains, Ocean],
        "love" => &[Sunset, Sky, Ocean],
        "neutral" => &[Sky, Forest, Ocean, Mountains],
        _ => &[Sky, Forest, Ocean],
    };
    *candidates.choose(rng).unwrap_or(&Sky)
}

pub fn recommended_for_emotion<R: Rng + ?Sized>(emotion: Emotion, rng: &mut R) -> BackgroundCategory {
    recommended_background(emotion.as_str(), rng)
}

/// Where a backdrop came from.
#[derive(Debug, Clone)]
pub enum Backdrop {
    Cached(PathBuf),
    Downloaded(PathBuf),
    Generated {
        category: BackgroundCategory,
        image: RgbImage,
        /// Set when the generated image was also written to the cache dir.
        path: Option<PathBuf>,
    },
}

impl Backdrop {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Backdrop::Cached(p) | Backdrop::Downloaded(p) => Some(p),
            Backdrop::Generated { path, .. } => path.as_deref(),
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Backdrop::Generated { .. })
    }
}

/// Byte source for backdrop downloads.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {}", status);
        }
        Ok(response.bytes().await?.to_vec())
    }
}

pub struct BackgroundManager<F = HttpFetcher> {
    dir: PathBuf,
    fetcher: F,
    attempts: u32,
    backoff: Duration,
}

impl BackgroundManager<HttpFetcher> {
    pub fn new(config: &ArtConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(Duration::from_secs(config.request_timeout_secs))?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: ImageFetcher> BackgroundManager<F> {
    pub fn with_fetcher(config: &ArtConfig, fetcher: F) -> Result<Self> {
        fs::create_dir_all(&config.background_dir).with_context(|| {
            format!(
                "Failed to create background dir {}",
                config.background_dir.display()
            )
        })?;
        Ok(Self {
            dir: config.background_dir.clone(),
            fetcher,
            attempts: config.download_attempts.max(1),
            backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cached file for the category if allowed, else a fresh download, else
    /// a generated gradient.
    pub async fn get_background<R: Rng + ?Sized>(
        &self,
        category: BackgroundCategory,
        use_cache: bool,
        rng: &mut R,
    ) -> Backdrop {
        if use_cache {
            let cached = self.cached_files(category);
            if let Some(path) = cached.choose(rng) {
                info!("[BACKDROP] 📁 Using cached {} background: {:?}", category, path);
                return Backdrop::Cached(path.clone());
            }
        }

        if let Some(path) = self.download(category, rng).await {
            return Backdrop::Downloaded(path);
        }

        self.create_fallback(category)
    }

    /// Try each attempt with a fixed backoff; `None` once attempts run out.
    pub async fn download<R: Rng + ?Sized>(
        &self,
        category: BackgroundCategory,
        rng: &mut R,
    ) -> Option<PathBuf> {
        let url = *category.urls().choose(rng)?;
        match Url::parse(url) {
            Ok(parsed) if parsed.scheme() == "https" => {}
            _ => {
                warn!("[BACKDROP] Refusing non-https source: {}", url);
                return None;
            }
        }

        for attempt in 1..=self.attempts {
            info!(
                "[BACKDROP] 🌅 Downloading {} background (attempt {}/{})",
                category, attempt, self.attempts
            );
            match self.fetcher.fetch(url).await {
                Ok(bytes) => match self.store(category, &bytes) {
                    Ok(path) => {
                        info!("[BACKDROP] ✅ Saved {:?}", path);
                        return Some(path);
                    }
                    Err(e) => warn!("[BACKDROP] Discarding download: {:#}", e),
                },
                Err(e) => warn!("[BACKDROP] Download failed: {:#}", e),
            }
            if attempt < self.attempts && !self.backoff.is_zero() {
                tokio::time::sleep(self.backoff).await;
            }
        }

        warn!(
            "[BACKDROP] Giving up on {} after {} attempts",
            category, self.attempts
        );
        None
    }

    fn store(&self, category: BackgroundCategory, bytes: &[u8]) -> Result<PathBuf> {
        let format = image::guess_format(bytes).context("Payload is not an image")?;
        image::load_from_memory_with_format(bytes, format).context("Image failed to decode")?;

        let digest = Sha256::digest(bytes);
        let hash: String = digest.iter().take(6).map(|b| format!("{:02x}", b)).collect();
        let ext = match format {
            ImageFormat::Png => "png",
            ImageFormat::WebP => "webp",
            _ => "jpg",
        };
        let path = self.dir.join(format!("{}_{}.{}", category, hash, ext));
        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Generate a gradient backdrop. Saving it is best-effort.
    pub fn create_fallback(&self, category: BackgroundCategory) -> Backdrop {
        let image = fallback_image(category, CANVAS_WIDTH, CANVAS_HEIGHT);
        let target = self.dir.join(format!("fallback_{}.png", category));
        let path = match image.save(&target) {
            Ok(()) => Some(target),
            Err(e) => {
                warn!("[BACKDROP] Could not cache fallback: {}", e);
                None
            }
        };
        info!("[BACKDROP] 🎨 Created fallback {} background", category);
        Backdrop::Generated {
            category,
            image,
            path,
        }
    }

    fn cached_files(&self, category: BackgroundCategory) -> Vec<PathBuf> {
        image_files(&self.dir)
            .into_iter()
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(category.as_str()))
            })
            .collect()
    }

    /// Keep the `keep_recent` newest files of each category; returns how
    /// many files were deleted. Failures are logged, never raised.
    pub fn cleanup(&self, keep_recent: usize) -> usize {
        let mut groups: HashMap<String, Vec<(PathBuf, SystemTime)>> = HashMap::new();
        for path in image_files(&self.dir) {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let group = cache_group(name);
            let created = fs::metadata(&path)
                .and_then(|m| m.created().or_else(|_| m.modified()))
                .unwrap_or(SystemTime::UNIX_EPOCH);
            groups.entry(group).or_default().push((path, created));
        }

        let mut removed = 0;
        for files in groups.values_mut() {
            files.sort_by(|a, b| b.1.cmp(&a.1));
            for (path, _) in files.iter().skip(keep_recent) {
                match fs::remove_file(path) {
                    Ok(()) => {
                        removed += 1;
                        debug!("[BACKDROP] 🗑️ Cleaned up {:?}", path.file_name().unwrap_or_default());
                    }
                    Err(e) => warn!("[BACKDROP] Cleanup failed for {:?}: {}", path, e),
                }
            }
        }
        if removed > 0 {
            info!("[BACKDROP] Evicted {} old backgrounds", removed);
        }
        removed
    }
}

/// Eviction group of a cached file: `sky_3f2a.jpg` -> `sky`,
/// `fallback_sky.png` -> `fallback_sky`.
fn cache_group(file_name: &str) -> String {
    let stem = file_name.split('.').next().unwrap_or(file_name);
    match stem.strip_prefix("fallback_") {
        Some(rest) => format!("fallback_{}", rest.split('_').next().unwrap_or(rest)),
        None => stem.split('_').next().unwrap_or(stem).to_string(),
    }
}

fn image_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("[BACKDROP] Cannot list {:?}: {}", dir, e);
            return Vec::new();
        }
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        })
        .collect()
}

/// Vertical gradient darkening the category colour by up to 30%.
pub fn fallback_image(category: BackgroundCategory, width: u32, height: u32) -> RgbImage {
    let base = category.fallback_color().channels();
    RgbImage::from_fn(width, height, |_, y| {
        let ratio = y as f64 / height as f64;
        let shade = |c: u8| (c as f64 * (1.0 - ratio * 0.3)).clamp(0.0, 255.0) as u8;
        image::Rgb([shade(base[0]), shade(base[1]), shade(base[2])])
    })
}

/// Canvas-sized RGBA layer for a backdrop: resized, darkened by
/// `brightness` and made translucent by `opacity`. Unreadable files turn
/// into a flat fill rather than an error.
pub fn prepare_surface(backdrop: &Backdrop, opacity: f32, brightness: f32) -> RgbaImage {
    let source = match backdrop {
        Backdrop::Generated { image, .. } => DynamicImage::ImageRgb8(image.clone()),
        Backdrop::Cached(path) | Backdrop::Downloaded(path) => match image::open(path) {
            Ok(img) => img,
            Err(e) => {
                warn!("[BACKDROP] ❌ Cannot read {:?}: {}", path, e);
                return solid_surface(UNREADABLE_FILL);
            }
        },
    };

    let mut surface = source
        .resize_exact(CANVAS_WIDTH, CANVAS_HEIGHT, FilterType::Lanczos3)
        .to_rgba8();
    let alpha = (255.0 * opacity.clamp(0.0, 1.0)).round() as u8;
    for pixel in surface.pixels_mut() {
        for c in 0..3 {
            pixel[c] = (pixel[c] as f32 * brightness).clamp(0.0, 255.0) as u8;
        }
        pixel[3] = alpha;
    }
    surface
}

fn solid_surface(color: Rgb) -> RgbaImage {
    RgbaImage::from_pixel(
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        image::Rgba([color.0, color.1, color.2, 255]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fallback_gradient_darkens_downward() {
        let img = fallback_image(BackgroundCategory::Sunset, 10, 100);
        assert_eq!(img.get_pixel(0, 0).0, [255, 94, 77]);
        let bottom = img.get_pixel(0, 99).0;
        assert!(bottom[0] < 255 && bottom[0] >= 178);
    }

    #[test]
    fn unknown_emotions_get_generic_recommendations() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let pick = recommended_background("bewildered", &mut rng);
            assert!(matches!(
                pick,
                BackgroundCategory::Sky | BackgroundCategory::Forest | BackgroundCategory::Ocean
            ));
        }
    }

    #[test]
    fn unreadable_file_becomes_flat_fill() {
        let surface = prepare_surface(&Backdrop::Cached(PathBuf::from("__missing.jpg")), 0.6, 0.7);
        assert_eq!(surface.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert_eq!(surface.get_pixel(5, 5).0, [100, 100, 150, 255]);
    }

    #[test]
    fn surface_applies_opacity_and_brightness() {
        let backdrop = Backdrop::Generated {
            category: BackgroundCategory::Forest,
            image: RgbImage::from_pixel(4, 4, image::Rgb([100, 200, 50])),
            path: None,
        };
        let surface = prepare_surface(&backdrop, 0.5, 0.5);
        let px = surface.get_pixel(400, 400).0;
        for (got, want) in px.iter().zip([50u8, 100, 25]) {
            assert!(got.abs_diff(want) <= 1, "{:?}", px);
        }
        assert_eq!(px[3], 128);
    }

    #[test]
    fn cache_groups_split_fallbacks_by_category() {
        assert_eq!(cache_group("sky_3f2a9c.jpg"), "sky");
        assert_eq!(cache_group("mountains_00aa11.webp"), "mountains");
        assert_eq!(cache_group("fallback_sky.png"), "fallback_sky");
        assert_eq!(cache_group("fallback_ocean.png"), "fallback_ocean");
        assert_ne!(cache_group("fallback_sky.png"), cache_group("fallback_ocean.png"));
    }

    #[test]
    fn recommendations_use_exact_labels() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..20 {
            let pick = recommended_background("JOY", &mut rng);
            assert!(matches!(
                pick,
                BackgroundCategory::Sky | BackgroundCategory::Forest | BackgroundCategory::Ocean
            ));
        }
    }

    #[test]
    fn category_names_parse() {
        assert_eq!("Ocean".parse::<BackgroundCategory>(), Ok(BackgroundCategory::Ocean));
        assert!("desert".parse::<BackgroundCategory>().is_err());
    }
}
