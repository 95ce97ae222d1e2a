// PaintMyPoem Emotion Detector
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Sentiment scoring is a pluggable oracle (`SentimentAnalyzer`). The default
// `LexiconAnalyzer` is a small valence lexicon with negation, boosters and
// exclamation emphasis, normalized into a compound score in [-1, 1].

use crate::error::PoemError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

/// The six canonical emotion labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Love,
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Love,
        Emotion::Neutral,
    ];

    /// Exact lookup of a lowercase label. `happy`/`sad` collapse to
    /// joy/sadness; anything else, including other casings, is `Neutral`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "joy" | "happy" => Emotion::Joy,
            "sadness" | "sad" => Emotion::Sadness,
            "anger" => Emotion::Anger,
            "fear" => Emotion::Fear,
            "love" => Emotion::Love,
            _ => Emotion::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Love => "love",
            Emotion::Neutral => "neutral",
        }
    }

    /// Words that, when present in a poem, reinforce this mood.
    pub fn mood_words(self) -> &'static [&'static str] {
        match self {
            Emotion::Joy => &["happy", "bright", "sun", "smile", "laugh", "dance", "celebration"],
            Emotion::Love => &["love", "heart", "dear", "beloved", "kiss", "embrace", "romance"],
            Emotion::Sadness => &["sad", "cry", "tear", "lonely", "dark", "rain", "sorrow"],
            Emotion::Anger => &["angry", "rage", "mad", "fury", "storm", "fire", "hate"],
            Emotion::Fear => &["fear", "scared", "afraid", "dark", "shadow", "nightmare", "worry"],
            Emotion::Neutral => &[],
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a sentiment oracle. `pos + neg + neu` is 1 for non-empty input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScores {
    pub compound: f64,
    pub pos: f64,
    pub neg: f64,
    pub neu: f64,
}

pub trait SentimentAnalyzer {
    fn polarity_scores(&self, text: &str) -> PolarityScores;
}

const NORMALIZATION_ALPHA: f64 = 15.0;
const BOOSTER_INCREMENT: f64 = 0.293;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_INCREMENT: f64 = 0.292;

const LEXICON: &[(&str, f64)] = &[
    ("love", 3.2),
    ("loved", 2.9),
    ("loves", 2.7),
    ("lovely", 2.8),
    ("beloved", 2.3),
    ("dear", 1.6),
    ("sweet", 2.0),
    ("kiss", 1.8),
    ("embrace", 1.3),
    ("romance", 2.0),
    ("adore", 2.6),
    ("happy", 2.7),
    ("happiness", 2.6),
    ("joy", 2.8),
    ("joyful", 2.9),
    ("glad", 2.0),
    ("smile", 1.5),
    ("smiles", 1.5),
    ("laugh", 2.6),
    ("laughter", 2.2),
    ("bright", 1.9),
    ("warm", 0.9),
    ("hope", 1.9),
    ("peace", 2.5),
    ("calm", 1.3),
    ("beautiful", 2.9),
    ("beauty", 2.8),
    ("wonderful", 2.7),
    ("delight", 2.9),
    ("bliss", 2.7),
    ("free", 2.3),
    ("dance", 1.6),
    ("celebration", 2.3),
    ("gentle", 1.8),
    ("good", 1.9),
    ("great", 3.1),
    ("golden", 1.3),
    ("bloom", 1.4),
    ("shine", 1.6),
    ("sad", -2.1),
    ("sadness", -1.9),
    ("sorrow", -2.4),
    ("grief", -2.2),
    ("cry", -2.1),
    ("tears", -1.8),
    ("tear", -1.5),
    ("weep", -2.1),
    ("lonely", -1.5),
    ("alone", -1.0),
    ("lost", -1.3),
    ("pain", -2.3),
    ("hurt", -2.4),
    ("broken", -2.1),
    ("empty", -0.8),
    ("cold", -0.6),
    ("dead", -3.3),
    ("death", -2.9),
    ("die", -2.9),
    ("gloom", -2.6),
    ("despair", -3.0),
    ("miss", -0.6),
    ("angry", -2.3),
    ("anger", -2.7),
    ("rage", -2.6),
    ("mad", -2.2),
    ("fury", -2.7),
    ("hate", -2.7),
    ("hatred", -3.2),
    ("furious", -2.7),
    ("burn", -0.8),
    ("war", -2.9),
    ("kill", -3.7),
    ("fear", -2.2),
    ("afraid", -2.0),
    ("scared", -2.2),
    ("terror", -3.0),
    ("horror", -2.7),
    ("nightmare", -1.9),
    ("dread", -2.7),
    ("panic", -2.3),
    ("worry", -1.9),
    ("shadow", -0.4),
    ("bad", -2.5),
];

const BOOSTERS: &[&str] = &[
    "very", "so", "extremely", "deeply", "truly", "utterly", "completely", "really", "incredibly",
    "too", "most",
];

const DAMPENERS: &[&str] = &["barely", "hardly", "slightly", "somewhat", "little", "kinda"];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "nor", "none", "neither", "cannot", "without", "nobody",
    "nowhere",
];

/// Valence-lexicon analyzer.
pub struct LexiconAnalyzer {
    lexicon: HashMap<&'static str, f64>,
}

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
        }
    }

    fn is_negation(token: &str) -> bool {
        NEGATIONS.contains(&token) || token.ends_with("n't")
    }

    fn valence(&self, tokens: &[String], i: usize) -> f64 {
        let Some(&base) = self.lexicon.get(tokens[i].as_str()) else {
            return 0.0;
        };
        let mut valence = base;

        if i > 0 {
            let prev = tokens[i - 1].as_str();
            let scalar = if BOOSTERS.contains(&prev) {
                BOOSTER_INCREMENT
            } else if DAMPENERS.contains(&prev) {
                -BOOSTER_INCREMENT
            } else {
                0.0
            };
            valence += scalar * base.signum();
        }

        // negation within the three preceding tokens
        let window = i.saturating_sub(3)..i;
        if tokens[window].iter().any(|t| Self::is_negation(t)) {
            valence *= NEGATION_SCALAR;
        }
        valence
    }
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer for LexiconAnalyzer {
    fn polarity_scores(&self, text: &str) -> PolarityScores {
        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| c.is_ascii_punctuation() && c != '\'')
                    .to_lowercase()
            })
            .filter(|w| !w.is_empty())
            .collect();

        if tokens.is_empty() {
            return PolarityScores::default();
        }

        let sentiments: Vec<f64> = (0..tokens.len()).map(|i| self.valence(&tokens, i)).collect();
        let mut sum: f64 = sentiments.iter().sum();

        let emphasis = text.matches('!').count().min(4) as f64 * EXCLAMATION_INCREMENT;
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }

        let compound = (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for s in &sentiments {
            if *s > 0.0 {
                pos_sum += s + 1.0;
            } else if *s < 0.0 {
                neg_sum += s - 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        PolarityScores {
            compound,
            pos: (pos_sum / total).abs(),
            neg: (neg_sum / total).abs(),
            neu: (neu_count / total).abs(),
        }
    }
}

/// Full mood readout for a poem.
#[derive(Debug, Clone, Serialize)]
pub struct MoodAnalysis {
    pub emotion: Emotion,
    pub intensity: f64,
    pub mood_keywords: Vec<String>,
    pub raw_scores: PolarityScores,
}

/// Emotion classifier on top of a sentiment oracle.
pub struct EmotionDetector<A = LexiconAnalyzer> {
    analyzer: A,
}

impl EmotionDetector<LexiconAnalyzer> {
    pub fn new() -> Self {
        Self {
            analyzer: LexiconAnalyzer::new(),
        }
    }
}

impl Default for EmotionDetector<LexiconAnalyzer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: SentimentAnalyzer> EmotionDetector<A> {
    pub fn with_analyzer(analyzer: A) -> Self {
        Self { analyzer }
    }

    fn scores(&self, text: &str) -> Result<PolarityScores, PoemError> {
        if text.trim().is_empty() {
            return Err(PoemError::EmptyPoem);
        }
        Ok(self.analyzer.polarity_scores(text))
    }

    pub fn detect(&self, text: &str) -> Result<Emotion, PoemError> {
        let scores = self.scores(text)?;
        let emotion = classify(text, scores.compound);
        debug!(
            "[POEM] compound={:.3} pos={:.3} neg={:.3} -> {}",
            scores.compound, scores.pos, scores.neg, emotion
        );
        Ok(emotion)
    }

    /// Strength of the detected emotion, 0.0 to 1.0.
    pub fn intensity(&self, text: &str) -> Result<f64, PoemError> {
        Ok(self.scores(text)?.compound.abs())
    }

    pub fn analyze(&self, text: &str) -> Result<MoodAnalysis, PoemError> {
        let scores = self.scores(text)?;
        let emotion = classify(text, scores.compound);
        let lower = text.to_lowercase();
        let mood_keywords = emotion
            .mood_words()
            .iter()
            .filter(|w| lower.contains(*w))
            .map(|w| w.to_string())
            .collect();

        info!(
            "[POEM] Mood: {} (intensity {:.2})",
            emotion,
            scores.compound.abs()
        );
        Ok(MoodAnalysis {
            emotion,
            intensity: scores.compound.abs(),
            mood_keywords,
            raw_scores: scores,
        })
    }
}

fn classify(text: &str, compound: f64) -> Emotion {
    let lower = text.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if compound >= 0.6 {
        if mentions(&["love", "heart", "dear"]) {
            Emotion::Love
        } else {
            Emotion::Joy
        }
    } else if compound >= 0.2 {
        Emotion::Joy
    } else if compound <= -0.6 {
        if mentions(&["angry", "rage", "mad"]) {
            Emotion::Anger
        } else if mentions(&["scared", "afraid", "fear"]) {
            Emotion::Fear
        } else {
            Emotion::Sadness
        }
    } else if compound <= -0.2 {
        Emotion::Sadness
    } else {
        Emotion::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedScore(f64);

    impl SentimentAnalyzer for FixedScore {
        fn polarity_scores(&self, _text: &str) -> PolarityScores {
            PolarityScores {
                compound: self.0,
                ..Default::default()
            }
        }
    }

    #[test]
    fn thresholds_follow_compound_score() {
        let cases = [
            (0.8, "a bright morning", Emotion::Joy),
            (0.8, "my dear heart", Emotion::Love),
            (0.3, "my dear heart", Emotion::Joy),
            (0.0, "anything", Emotion::Neutral),
            (-0.3, "the rage", Emotion::Sadness),
            (-0.7, "the rage", Emotion::Anger),
            (-0.7, "I am afraid", Emotion::Fear),
            (-0.7, "grey streets", Emotion::Sadness),
        ];
        for (compound, text, expected) in cases {
            let detector = EmotionDetector::with_analyzer(FixedScore(compound));
            assert_eq!(detector.detect(text).unwrap(), expected, "{text} @ {compound}");
        }
    }

    #[test]
    fn empty_poem_is_rejected() {
        let detector = EmotionDetector::new();
        assert_eq!(detector.detect("   \n"), Err(PoemError::EmptyPoem));
        assert_eq!(detector.intensity(""), Err(PoemError::EmptyPoem));
    }

    #[test]
    fn negation_flips_valence() {
        let analyzer = LexiconAnalyzer::new();
        let plain = analyzer.polarity_scores("I am happy");
        let negated = analyzer.polarity_scores("I am not happy");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
    }

    #[test]
    fn fractions_sum_to_one() {
        let scores = LexiconAnalyzer::new().polarity_scores("the lonely rain and a bright smile");
        assert!((scores.pos + scores.neg + scores.neu - 1.0).abs() < 1e-9);
    }

    #[test]
    fn labels_round_trip() {
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_label(emotion.as_str()), emotion);
        }
        assert_eq!(Emotion::from_label("happy"), Emotion::Joy);
        assert_eq!(Emotion::from_label(" Happy "), Emotion::Neutral);
        assert_eq!(Emotion::from_label("JOY"), Emotion::Neutral);
        assert_eq!(Emotion::from_label("sad"), Emotion::Sadness);
        assert_eq!(Emotion::from_label("unknown_value"), Emotion::Neutral);
    }
}
