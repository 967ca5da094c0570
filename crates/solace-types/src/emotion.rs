//! The fixed emotion vocabulary and its presentational styling.
//!
//! Bot replies carry a list of emotion labels drawn from a 28-term
//! vocabulary. Labels have no identity of their own: they are tags on bot
//! messages with an icon/color pair for display. Unknown labels are accepted
//! loosely and fall back to the neutral style.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// One of the 28 emotions the assistant is prompted to detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Admiration,
    Amusement,
    Anger,
    Annoyance,
    Approval,
    Caring,
    Confusion,
    Curiosity,
    Desire,
    Disappointment,
    Disapproval,
    Disgust,
    Embarrassment,
    Excitement,
    Fear,
    Gratitude,
    Grief,
    Joy,
    Love,
    Nervousness,
    Optimism,
    Pride,
    Realization,
    Relief,
    Remorse,
    Sadness,
    Surprise,
    Neutral,
}

impl Emotion {
    /// The full vocabulary, in the order it appears in the system prompt.
    pub const ALL: [Emotion; 28] = [
        Emotion::Admiration,
        Emotion::Amusement,
        Emotion::Anger,
        Emotion::Annoyance,
        Emotion::Approval,
        Emotion::Caring,
        Emotion::Confusion,
        Emotion::Curiosity,
        Emotion::Desire,
        Emotion::Disappointment,
        Emotion::Disapproval,
        Emotion::Disgust,
        Emotion::Embarrassment,
        Emotion::Excitement,
        Emotion::Fear,
        Emotion::Gratitude,
        Emotion::Grief,
        Emotion::Joy,
        Emotion::Love,
        Emotion::Nervousness,
        Emotion::Optimism,
        Emotion::Pride,
        Emotion::Realization,
        Emotion::Relief,
        Emotion::Remorse,
        Emotion::Sadness,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    /// Lowercase label as used on the wire and in storage.
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Admiration => "admiration",
            Emotion::Amusement => "amusement",
            Emotion::Anger => "anger",
            Emotion::Annoyance => "annoyance",
            Emotion::Approval => "approval",
            Emotion::Caring => "caring",
            Emotion::Confusion => "confusion",
            Emotion::Curiosity => "curiosity",
            Emotion::Desire => "desire",
            Emotion::Disappointment => "disappointment",
            Emotion::Disapproval => "disapproval",
            Emotion::Disgust => "disgust",
            Emotion::Embarrassment => "embarrassment",
            Emotion::Excitement => "excitement",
            Emotion::Fear => "fear",
            Emotion::Gratitude => "gratitude",
            Emotion::Grief => "grief",
            Emotion::Joy => "joy",
            Emotion::Love => "love",
            Emotion::Nervousness => "nervousness",
            Emotion::Optimism => "optimism",
            Emotion::Pride => "pride",
            Emotion::Realization => "realization",
            Emotion::Relief => "relief",
            Emotion::Remorse => "remorse",
            Emotion::Sadness => "sadness",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }

    /// Presentational icon/color pair for this emotion.
    pub fn style(&self) -> EmotionStyle {
        match self {
            Emotion::Joy => EmotionStyle::new("😊", "yellow"),
            Emotion::Excitement => EmotionStyle::new("🤩", "orange"),
            Emotion::Gratitude => EmotionStyle::new("🙏", "green"),
            Emotion::Love => EmotionStyle::new("💖", "pink"),
            Emotion::Pride => EmotionStyle::new("😌", "purple"),
            Emotion::Optimism => EmotionStyle::new("😇", "blue"),
            Emotion::Sadness => EmotionStyle::new("😢", "blue"),
            Emotion::Grief => EmotionStyle::new("😔", "gray"),
            Emotion::Disappointment => EmotionStyle::new("😞", "gray"),
            Emotion::Remorse => EmotionStyle::new("😣", "gray"),
            Emotion::Fear => EmotionStyle::new("😨", "red"),
            Emotion::Nervousness => EmotionStyle::new("😬", "indigo"),
            Emotion::Anger => EmotionStyle::new("😠", "red"),
            Emotion::Annoyance => EmotionStyle::new("😤", "orange"),
            Emotion::Confusion => EmotionStyle::new("😕", "gray"),
            Emotion::Curiosity => EmotionStyle::new("🤔", "purple"),
            Emotion::Surprise => EmotionStyle::new("😲", "yellow"),
            Emotion::Caring => EmotionStyle::new("🤗", "green"),
            Emotion::Admiration => EmotionStyle::new("😍", "purple"),
            Emotion::Amusement => EmotionStyle::new("😄", "yellow"),
            Emotion::Approval => EmotionStyle::new("👍", "green"),
            Emotion::Desire => EmotionStyle::new("💭", "pink"),
            Emotion::Disapproval => EmotionStyle::new("👎", "red"),
            Emotion::Disgust => EmotionStyle::new("🤢", "green"),
            Emotion::Embarrassment => EmotionStyle::new("😳", "pink"),
            Emotion::Relief => EmotionStyle::new("😌", "blue"),
            Emotion::Realization => EmotionStyle::new("💡", "yellow"),
            Emotion::Neutral => EmotionStyle::new("😐", "gray"),
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Emotion::ALL
            .iter()
            .find(|e| e.label() == lower)
            .copied()
            .ok_or_else(|| format!("unknown emotion label: '{s}'"))
    }
}

/// Icon/color pair attached to an emotion for display purposes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmotionStyle {
    pub icon: &'static str,
    pub color: &'static str,
}

impl EmotionStyle {
    const fn new(icon: &'static str, color: &'static str) -> Self {
        Self { icon, color }
    }
}

/// Style for an arbitrary label, falling back to the neutral style for
/// labels outside the vocabulary.
pub fn style_for_label(label: &str) -> EmotionStyle {
    label
        .parse::<Emotion>()
        .unwrap_or(Emotion::Neutral)
        .style()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_has_28_terms() {
        assert_eq!(Emotion::ALL.len(), 28);
    }

    #[test]
    fn test_label_roundtrip() {
        for emotion in Emotion::ALL {
            let parsed: Emotion = emotion.label().parse().unwrap();
            assert_eq!(parsed, emotion);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let parsed: Emotion = "JOY".parse().unwrap();
        assert_eq!(parsed, Emotion::Joy);
    }

    #[test]
    fn test_unknown_label_falls_back_to_neutral_style() {
        assert_eq!(style_for_label("melancholy"), Emotion::Neutral.style());
    }

    #[test]
    fn test_known_label_style() {
        let style = style_for_label("joy");
        assert_eq!(style.icon, "😊");
        assert_eq!(style.color, "yellow");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Emotion::Disappointment).unwrap();
        assert_eq!(json, "\"disappointment\"");
    }
}
