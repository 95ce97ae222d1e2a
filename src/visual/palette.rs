// PaintMyPoem Palette Tables
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Static colour data per emotion. Lookups by free-form label never fail:
// anything outside the canonical set resolves to the neutral entries.

use crate::poem::Emotion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque 8-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    pub fn channels(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }

    /// Linear interpolation, `t` in [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0, self.1, self.2)
    }
}

const JOY: [Rgb; 8] = [
    Rgb(255, 215, 0),   // gold
    Rgb(255, 165, 0),   // orange
    Rgb(255, 69, 0),    // red-orange
    Rgb(255, 20, 147),  // deep pink
    Rgb(255, 105, 180), // hot pink
    Rgb(255, 255, 0),   // yellow
    Rgb(255, 140, 0),   // dark orange
    Rgb(255, 192, 203), // pink
];

const SADNESS: [Rgb; 8] = [
    Rgb(65, 105, 225),
    Rgb(30, 144, 255),
    Rgb(0, 191, 255),
    Rgb(135, 206, 250),
    Rgb(70, 130, 180),
    Rgb(100, 149, 237),
    Rgb(0, 206, 209),
    Rgb(72, 209, 204),
];

const ANGER: [Rgb; 8] = [
    Rgb(255, 0, 0),
    Rgb(220, 20, 60),
    Rgb(255, 69, 0),
    Rgb(255, 140, 0),
    Rgb(255, 165, 0),
    Rgb(178, 34, 34),
    Rgb(139, 0, 0),
    Rgb(255, 99, 71),
];

const FEAR: [Rgb; 8] = [
    Rgb(138, 43, 226),
    Rgb(147, 112, 219),
    Rgb(186, 85, 211),
    Rgb(221, 160, 221),
    Rgb(218, 112, 214),
    Rgb(199, 21, 133),
    Rgb(148, 0, 211),
    Rgb(139, 69, 19),
];

const LOVE: [Rgb; 8] = [
    Rgb(255, 20, 147),
    Rgb(255, 105, 180),
    Rgb(255, 182, 193),
    Rgb(255, 69, 0),
    Rgb(255, 99, 71),
    Rgb(255, 160, 122),
    Rgb(255, 192, 203),
    Rgb(220, 20, 60),
];

// Saturated on purpose: neutral poems should not render grey.
const NEUTRAL: [Rgb; 8] = [
    Rgb(138, 43, 226),
    Rgb(30, 144, 255),
    Rgb(255, 165, 0),
    Rgb(50, 205, 50),
    Rgb(255, 215, 0),
    Rgb(255, 20, 147),
    Rgb(0, 255, 127),
    Rgb(255, 69, 0),
];

/// Primary 8-colour palette for an emotion.
pub fn palette(emotion: Emotion) -> &'static [Rgb] {
    match emotion {
        Emotion::Joy => &JOY,
        Emotion::Sadness => &SADNESS,
        Emotion::Anger => &ANGER,
        Emotion::Fear => &FEAR,
        Emotion::Love => &LOVE,
        Emotion::Neutral => &NEUTRAL,
    }
}

/// Three accent colours used as the secondary sampling pool.
pub fn accent_colors(emotion: Emotion) -> &'static [Rgb] {
    const ACCENTS: [[Rgb; 3]; 6] = [
        [Rgb(255, 215, 0), Rgb(255, 140, 0), Rgb(255, 69, 0)],
        [Rgb(0, 191, 255), Rgb(65, 105, 225), Rgb(30, 144, 255)],
        [Rgb(255, 0, 0), Rgb(255, 69, 0), Rgb(220, 20, 60)],
        [Rgb(138, 43, 226), Rgb(147, 112, 219), Rgb(186, 85, 211)],
        [Rgb(255, 20, 147), Rgb(255, 105, 180), Rgb(220, 20, 60)],
        [Rgb(138, 43, 226), Rgb(255, 165, 0), Rgb(50, 205, 50)],
    ];
    &ACCENTS[table_index(emotion)]
}

/// Canvas background colour.
pub fn background(emotion: Emotion) -> Rgb {
    match emotion {
        Emotion::Joy => Rgb(255, 248, 220),     // cornsilk
        Emotion::Sadness => Rgb(25, 25, 112),   // midnight blue
        Emotion::Anger => Rgb(139, 0, 0),       // dark red
        Emotion::Fear => Rgb(72, 61, 139),      // dark slate blue
        Emotion::Love => Rgb(255, 240, 245),    // lavender blush
        Emotion::Neutral => Rgb(47, 79, 79),    // dark slate gray
    }
}

/// Middle stop of the three-colour background gradient.
pub fn gradient_mid(emotion: Emotion) -> Rgb {
    match emotion {
        Emotion::Joy => Rgb(255, 183, 77),
        Emotion::Sadness => Rgb(44, 62, 120),
        Emotion::Anger => Rgb(90, 10, 10),
        Emotion::Fear => Rgb(48, 25, 72),
        Emotion::Love => Rgb(219, 112, 147),
        Emotion::Neutral => Rgb(40, 60, 70),
    }
}

/// Label-based lookups. Unknown labels degrade to the neutral tables.
pub fn palette_for(label: &str) -> &'static [Rgb] {
    palette(Emotion::from_label(label))
}

pub fn accent_colors_for(label: &str) -> &'static [Rgb] {
    accent_colors(Emotion::from_label(label))
}

pub fn background_for(label: &str) -> Rgb {
    background(Emotion::from_label(label))
}

fn table_index(emotion: Emotion) -> usize {
    match emotion {
        Emotion::Joy => 0,
        Emotion::Sadness => 1,
        Emotion::Anger => 2,
        Emotion::Fear => 3,
        Emotion::Love => 4,
        Emotion::Neutral => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_emotion_has_full_tables() {
        for emotion in Emotion::ALL {
            assert_eq!(palette(emotion).len(), 8);
            assert_eq!(accent_colors(emotion).len(), 3);
        }
    }

    #[test]
    fn unknown_labels_resolve_to_neutral() {
        for label in ["unknown_value", "", "melancholy", "JOYFUL", "JOY", "Joy", " love "] {
            assert_eq!(palette_for(label), palette(Emotion::Neutral));
            assert_eq!(accent_colors_for(label), accent_colors(Emotion::Neutral));
            assert_eq!(background_for(label), Rgb(47, 79, 79));
        }
    }

    #[test]
    fn synonyms_share_tables() {
        assert_eq!(palette_for("happy"), palette_for("joy"));
        assert_eq!(background_for("sad"), background_for("sadness"));
    }

    #[test]
    fn hex_and_lerp() {
        assert_eq!(Rgb(255, 0, 16).to_hex(), "#ff0010");
        assert_eq!(Rgb(0, 0, 0).lerp(Rgb(200, 100, 50), 0.5), Rgb(100, 50, 25));
    }
}
