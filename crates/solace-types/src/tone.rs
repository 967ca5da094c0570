//! Conversational tone selection.
//!
//! The tone picks which system instruction is sent to the completion
//! provider. Three fixed options; `therapist` is the default.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// One of three fixed conversational styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Therapist,
    Cheerful,
    Supportive,
}

impl Default for Tone {
    fn default() -> Self {
        Tone::Therapist
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tone::Therapist => write!(f, "therapist"),
            Tone::Cheerful => write!(f, "cheerful"),
            Tone::Supportive => write!(f, "supportive"),
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "therapist" => Ok(Tone::Therapist),
            "cheerful" => Ok(Tone::Cheerful),
            "supportive" => Ok(Tone::Supportive),
            other => Err(format!("invalid tone: '{other}'")),
        }
    }
}
