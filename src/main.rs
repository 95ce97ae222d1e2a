// PaintMyPoem Main Entry Point
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use paintmypoem::config::ArtConfig;
use paintmypoem::pipeline::{ArtGenerator, BackgroundChoice, GenerateOptions, StyleChoice};
use paintmypoem::poem::{extract_keywords, EmotionDetector};
use paintmypoem::render::background::recommended_for_emotion;
use paintmypoem::render::BackgroundManager;
use paintmypoem::visual::styles;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "paintmypoem")]
#[command(about = "Turn a poem into an abstract painting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Paint a poem
    Paint {
        /// Poem text (reads stdin until an empty line when omitted)
        #[arg(short, long)]
        poem: Option<String>,

        /// Read the poem from a file
        #[arg(short, long, conflicts_with = "poem")]
        file: Option<PathBuf>,

        /// Style preset name, or "auto"
        #[arg(short, long, default_value = "auto")]
        style: String,

        /// Backdrop category (sky, forest, ocean, mountains, sunset), "auto" or "none"
        #[arg(short, long, default_value = "none")]
        background: String,

        /// Always download a fresh backdrop
        #[arg(long)]
        no_cache: bool,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print mood and keywords without painting
    Analyze {
        #[arg(short, long)]
        poem: Option<String>,

        #[arg(short, long, conflicts_with = "poem")]
        file: Option<PathBuf>,
    },

    /// List style presets
    Styles,

    /// Prune the backdrop cache
    Clean {
        /// Files to keep per category
        #[arg(short, long)]
        keep: Option<usize>,
    },
}

fn read_poem(poem: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = poem {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    println!("Enter your poem (finish with an empty line):");
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,reqwest=warn,hyper=warn");
    }
    tracing_subscriber::fmt::init();

    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("🚨 [PAINTMYPOEM PANIC] at {}: {}", location, message);
    }));

    let args = Cli::parse();
    let mut config = ArtConfig::load();

    match args.command {
        Commands::Paint {
            poem,
            file,
            style,
            background,
            no_cache,
            seed,
            output,
        } => {
            let text = read_poem(poem, file)?;
            if text.trim().is_empty() {
                bail!("Please enter a poem.");
            }
            if let Some(dir) = output {
                config.output_dir = dir;
            }
            let options = GenerateOptions {
                style: StyleChoice::parse(&style),
                background: BackgroundChoice::parse(&background)?,
                use_cache: !no_cache,
            };
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            info!("--- PAINTMYPOEM ---");
            let generator = ArtGenerator::new(config)?;
            match generator.generate(&text, &options, &mut rng).await {
                Ok(art) => {
                    println!("Emotion: {} (intensity {:.2})", art.mood.emotion, art.mood.intensity);
                    println!("Keywords: {}", art.keywords.join(", "));
                    println!(
                        "Style: {}",
                        art.plan.style_name.as_deref().unwrap_or("none")
                    );
                    if let Some(path) = &art.backdrop {
                        println!("Backdrop: {}", path.display());
                    }
                    println!("Saved: {}", art.raw_path.display());
                    println!("Saved: {}", art.final_path.display());
                    println!("Plan: {}", art.plan_path.display());
                }
                Err(e) => {
                    error!("[FINISH] ❌ Painting failed: {:#}", e);
                    return Err(e);
                }
            }
        }
        Commands::Analyze { poem, file } => {
            let text = read_poem(poem, file)?;
            let mood = EmotionDetector::new().analyze(&text)?;
            let keywords = extract_keywords(&text);
            println!("Emotion: {}", mood.emotion);
            println!("Intensity: {:.3}", mood.intensity);
            println!("Mood words: {}", mood.mood_keywords.join(", "));
            println!("Keywords: {}", keywords.join(", "));
            println!(
                "Suggested style: {}",
                styles::auto_select_style(mood.emotion, &keywords)
            );
            println!(
                "Suggested backdrop: {}",
                recommended_for_emotion(mood.emotion, &mut rand::thread_rng())
            );
        }
        Commands::Styles => {
            for (name, display, description) in styles::available_styles() {
                println!("{:<12} {:<12} {}", name, display, description);
            }
        }
        Commands::Clean { keep } => {
            let keep = keep.unwrap_or(config.cache_keep_recent);
            let manager = BackgroundManager::new(&config)?;
            let removed = manager.cleanup(keep);
            println!(
                "Removed {} cached backdrop(s) from {}",
                removed,
                manager.dir().display()
            );
        }
    }

    Ok(())
}
