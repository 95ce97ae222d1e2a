use anyhow::Result;
use image::{DynamicImage, ImageFormat, RgbImage};
use paintmypoem::config::ArtConfig;
use paintmypoem::render::background::{Backdrop, BackgroundCategory, BackgroundManager, ImageFetcher};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default, Clone)]
struct FailingFetcher {
    calls: Arc<AtomicUsize>,
}

impl ImageFetcher for FailingFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        anyhow::bail!("offline")
    }
}

struct PngFetcher;

impl ImageFetcher for PngFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
        Ok(png_bytes())
    }
}

fn png_bytes() -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, image::Rgb([10, 120, 200])));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

fn config(dir: &Path) -> ArtConfig {
    ArtConfig {
        background_dir: dir.to_path_buf(),
        output_dir: dir.to_path_buf(),
        retry_backoff_ms: 0,
        download_attempts: 3,
        ..Default::default()
    }
}

#[tokio::test]
async fn failed_downloads_fall_back_to_generated_gradient() {
    let dir = tempfile::tempdir().unwrap();
    let manager = BackgroundManager::with_fetcher(&config(dir.path()), FailingFetcher::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let backdrop = manager
        .get_background(BackgroundCategory::Forest, true, &mut rng)
        .await;

    assert!(backdrop.is_generated());
    assert_eq!(
        backdrop.path(),
        Some(dir.path().join("fallback_forest.png").as_path())
    );
    assert!(dir.path().join("fallback_forest.png").exists());
}

#[tokio::test]
async fn retries_exactly_the_configured_attempts() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = FailingFetcher::default();
    let manager = BackgroundManager::with_fetcher(&config(dir.path()), fetcher.clone()).unwrap();
    let mut rng = StdRng::seed_from_u64(2);

    let result = manager.download(BackgroundCategory::Sky, &mut rng).await;
    assert!(result.is_none());
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn successful_download_is_stored_by_hash() {
    let dir = tempfile::tempdir().unwrap();
    let manager = BackgroundManager::with_fetcher(&config(dir.path()), PngFetcher).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    let backdrop = manager
        .get_background(BackgroundCategory::Sky, false, &mut rng)
        .await;
    let Backdrop::Downloaded(path) = backdrop else {
        panic!("expected a download, got {:?}", backdrop);
    };
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("sky_"));
    assert!(name.ends_with(".png"));
    assert_eq!(fs::read(&path).unwrap(), png_bytes());
}

#[tokio::test]
async fn cached_files_skip_the_network() {
    let dir = tempfile::tempdir().unwrap();
    let cached = dir.path().join("ocean_abcdef123456.png");
    fs::write(&cached, png_bytes()).unwrap();

    let manager = BackgroundManager::with_fetcher(&config(dir.path()), FailingFetcher::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(4);
    let backdrop = manager
        .get_background(BackgroundCategory::Ocean, true, &mut rng)
        .await;

    assert!(matches!(backdrop, Backdrop::Cached(ref p) if *p == cached));
}

#[test]
fn cleanup_keeps_newest_per_category() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..4 {
        fs::write(dir.path().join(format!("sky_{}.jpg", i)), b"x").unwrap();
    }
    for i in 0..2 {
        fs::write(dir.path().join(format!("ocean_{}.jpg", i)), b"x").unwrap();
    }
    fs::write(dir.path().join("notes.txt"), b"keep me").unwrap();

    let manager = BackgroundManager::with_fetcher(&config(dir.path()), PngFetcher).unwrap();
    assert_eq!(manager.cleanup(2), 2);

    let count = |prefix: &str| {
        fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(prefix))
            .count()
    };
    assert_eq!(count("sky_"), 2);
    assert_eq!(count("ocean_"), 2);
    assert!(dir.path().join("notes.txt").exists());
}

#[test]
fn cleanup_keeps_one_fallback_per_category() {
    let dir = tempfile::tempdir().unwrap();
    for category in ["sky", "ocean", "forest"] {
        fs::write(dir.path().join(format!("fallback_{}.png", category)), b"x").unwrap();
    }

    let manager = BackgroundManager::with_fetcher(&config(dir.path()), PngFetcher).unwrap();
    assert_eq!(manager.cleanup(1), 0);
    for category in ["sky", "ocean", "forest"] {
        assert!(dir.path().join(format!("fallback_{}.png", category)).exists());
    }
}
