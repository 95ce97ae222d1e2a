// PaintMyPoem Art Generator
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// End-to-end run: poem -> mood + keywords -> plan -> style -> backdrop ->
// canvas -> aged image on disk.

use crate::config::ArtConfig;
use crate::poem::{extract_keywords, EmotionDetector, LexiconAnalyzer, MoodAnalysis, SentimentAnalyzer};
use crate::render::background::{self, prepare_surface};
use crate::render::{canvas, post, BackgroundCategory, BackgroundManager, HttpFetcher, ImageFetcher};
use crate::visual::{self, styles, StyleTag, VisualPlan};
use anyhow::{Context, Result};
use rand::Rng;
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub const RAW_FILE: &str = "poem_art.png";
pub const FINAL_FILE: &str = "poem_art_final.png";
pub const PLAN_FILE: &str = "poem_art_plan.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleChoice {
    /// Pick from emotion and keywords.
    Auto,
    /// Explicit preset name; unknown names leave the plan unstyled.
    Named(String),
}

impl StyleChoice {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("auto") {
            StyleChoice::Auto
        } else {
            StyleChoice::Named(value.trim().to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundChoice {
    None,
    Auto,
    Category(BackgroundCategory),
}

impl BackgroundChoice {
    pub fn parse(value: &str) -> Result<Self, crate::error::PoemError> {
        match value.trim().to_lowercase().as_str() {
            "none" | "off" => Ok(BackgroundChoice::None),
            "auto" => Ok(BackgroundChoice::Auto),
            other => other.parse().map(BackgroundChoice::Category),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub style: StyleChoice,
    pub background: BackgroundChoice,
    pub use_cache: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            style: StyleChoice::Auto,
            background: BackgroundChoice::None,
            use_cache: true,
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct Artwork {
    pub mood: MoodAnalysis,
    pub keywords: Vec<String>,
    pub plan: VisualPlan,
    pub backdrop: Option<PathBuf>,
    pub raw_path: PathBuf,
    pub final_path: PathBuf,
    pub plan_path: PathBuf,
}

pub struct ArtGenerator<F = HttpFetcher, A = LexiconAnalyzer> {
    config: ArtConfig,
    detector: EmotionDetector<A>,
    backgrounds: BackgroundManager<F>,
}

impl ArtGenerator<HttpFetcher, LexiconAnalyzer> {
    pub fn new(config: ArtConfig) -> Result<Self> {
        let backgrounds = BackgroundManager::new(&config)?;
        Ok(Self::with_parts(config, EmotionDetector::new(), backgrounds))
    }
}

impl<F: ImageFetcher, A: SentimentAnalyzer> ArtGenerator<F, A> {
    pub fn with_parts(
        config: ArtConfig,
        detector: EmotionDetector<A>,
        backgrounds: BackgroundManager<F>,
    ) -> Self {
        Self {
            config,
            detector,
            backgrounds,
        }
    }

    pub fn config(&self) -> &ArtConfig {
        &self.config
    }

    pub fn backgrounds(&self) -> &BackgroundManager<F> {
        &self.backgrounds
    }

    /// Plan and style a poem without touching the disk.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        poem: &str,
        style: &StyleChoice,
        rng: &mut R,
    ) -> Result<(MoodAnalysis, Vec<String>, VisualPlan)> {
        let mood = self.detector.analyze(poem)?;
        let keywords = extract_keywords(poem);
        info!("[POEM] Keywords: {:?}", keywords);

        let plan = visual::build_plan_for(mood.emotion, &keywords, rng);
        let styled = match style {
            StyleChoice::Auto => {
                let tag: StyleTag = styles::auto_select_style(mood.emotion, &keywords);
                info!("[STYLE] Auto-selected {}", tag);
                styles::apply_style(&plan, tag, rng)
            }
            StyleChoice::Named(name) => styles::apply_style_by_name(&plan, name, rng),
        };
        Ok((mood, keywords, styled))
    }

    pub async fn generate<R: Rng + ?Sized>(
        &self,
        poem: &str,
        options: &GenerateOptions,
        rng: &mut R,
    ) -> Result<Artwork> {
        let (mood, keywords, plan) = self.plan(poem, &options.style, rng)?;

        let category = match options.background {
            BackgroundChoice::None => None,
            BackgroundChoice::Auto => Some(background::recommended_for_emotion(mood.emotion, rng)),
            BackgroundChoice::Category(c) => Some(c),
        };

        let mut backdrop_path = None;
        let surface = match category {
            Some(category) => {
                let backdrop = self
                    .backgrounds
                    .get_background(category, options.use_cache, rng)
                    .await;
                let surface = prepare_surface(
                    &backdrop,
                    self.config.background_opacity,
                    self.config.background_brightness,
                );
                backdrop_path = backdrop.path().map(|p| p.to_path_buf());
                self.backgrounds.cleanup(self.config.cache_keep_recent);
                Some(surface)
            }
            None => None,
        };

        let canvas = canvas::render(&plan, surface.as_ref(), rng)?;

        let out_dir = &self.config.output_dir;
        let raw_path = out_dir.join(RAW_FILE);
        let final_path = out_dir.join(FINAL_FILE);
        let plan_path = out_dir.join(PLAN_FILE);

        post::save_png(&canvas, &raw_path)?;
        let aged = post::age_image(canvas, &self.config.post, rng);
        post::save_png(&aged, &final_path)?;

        let json = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
        fs::write(&plan_path, json)
            .with_context(|| format!("Failed to write {}", plan_path.display()))?;

        info!("[FINISH] ✅ Visual poem saved as {:?}", final_path);
        Ok(Artwork {
            mood,
            keywords,
            plan,
            backdrop: backdrop_path,
            raw_path,
            final_path,
            plan_path,
        })
    }
}
