use paintmypoem::poem::{
    extract_keywords, Emotion, EmotionDetector, PolarityScores, SentimentAnalyzer,
};
use paintmypoem::PoemError;

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
fn thresholds_map_compound_to_emotion() {
    let cases = [
        (0.8, "bright morning", Emotion::Joy),
        (0.8, "my dear heart", Emotion::Love),
        (0.3, "my dear heart", Emotion::Joy),
        (0.1, "plain words", Emotion::Neutral),
        (-0.1, "plain words", Emotion::Neutral),
        (-0.3, "angry rain", Emotion::Sadness),
        (-0.7, "rage and ruin", Emotion::Anger),
        (-0.7, "I am afraid", Emotion::Fear),
        (-0.7, "grey ashes", Emotion::Sadness),
    ];
    for (compound, text, expected) in cases {
        let detector = EmotionDetector::with_analyzer(FixedScore(compound));
        assert_eq!(detector.detect(text), Ok(expected), "{} / {}", compound, text);
    }
}

#[test]
fn intensity_is_absolute_compound() {
    let detector = EmotionDetector::with_analyzer(FixedScore(-0.45));
    let intensity = detector.intensity("anything").unwrap();
    assert!((intensity - 0.45).abs() < 1e-9);
}

#[test]
fn empty_poem_is_rejected() {
    let detector = EmotionDetector::new();
    assert_eq!(detector.detect("   \n "), Err(PoemError::EmptyPoem));
    assert!(detector.analyze("").is_err());
}

#[test]
fn lexicon_reads_obvious_moods() {
    let detector = EmotionDetector::new();
    assert_eq!(
        detector.detect("I love you my dear, happy and joyful"),
        Ok(Emotion::Love)
    );
    assert_eq!(
        detector.detect("tears and sorrow and grief and pain"),
        Ok(Emotion::Sadness)
    );
}

#[test]
fn analysis_collects_mood_words() {
    let detector = EmotionDetector::with_analyzer(FixedScore(0.9));
    let mood = detector.analyze("Bright sun, we dance and smile").unwrap();
    assert_eq!(mood.emotion, Emotion::Joy);
    for word in &mood.mood_keywords {
        assert!(Emotion::Joy.mood_words().contains(&word.as_str()));
    }
}

#[test]
fn keywords_follow_reading_order() {
    let poem = "The sun and the bloom,\nA golden field, we run!";
    assert_eq!(extract_keywords(poem), vec!["sun", "bloom", "golden", "field", "run"]);
}
