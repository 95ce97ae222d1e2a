// PaintMyPoem Poem Analysis
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Text-side oracles: emotion classification and keyword extraction.

pub mod emotion;
pub mod keywords;

pub use emotion::{
    Emotion, EmotionDetector, LexiconAnalyzer, MoodAnalysis, PolarityScores, SentimentAnalyzer,
};
pub use keywords::extract_keywords;
