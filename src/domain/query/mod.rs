//! Query classification - situation and mood detection

mod classifier;

pub use classifier::classify;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Social situations a quote can be recommended for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Situation {
    Comeback,
    Goodbye,
    Greeting,
    Rejection,
    Awkward,
    Confident,
    Romantic,
    Work,
    Party,
    Argument,
}

impl Situation {
    pub const ALL: [Situation; 10] = [
        Situation::Comeback,
        Situation::Goodbye,
        Situation::Greeting,
        Situation::Rejection,
        Situation::Awkward,
        Situation::Confident,
        Situation::Romantic,
        Situation::Work,
        Situation::Party,
        Situation::Argument,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Situation::Comeback => "comeback",
            Situation::Goodbye => "goodbye",
            Situation::Greeting => "greeting",
            Situation::Rejection => "rejection",
            Situation::Awkward => "awkward",
            Situation::Confident => "confident",
            Situation::Romantic => "romantic",
            Situation::Work => "work",
            Situation::Party => "party",
            Situation::Argument => "argument",
        }
    }
}

impl fmt::Display for Situation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mood that determines quote style. Exactly one is resolved per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Default: most conversational quotes are humorous
    #[default]
    Funny,
    Cool,
    Dramatic,
    Sassy,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Funny => "funny",
            Mood::Cool => "cool",
            Mood::Dramatic => "dramatic",
            Mood::Sassy => "sassy",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "funny" => Ok(Mood::Funny),
            "cool" => Ok(Mood::Cool),
            "dramatic" => Ok(Mood::Dramatic),
            "sassy" => Ok(Mood::Sassy),
            _ => Err(()),
        }
    }
}

/// Context derived from a free-text query, consumed by the scorer and
/// the prompt builder.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryContext {
    pub original_query: String,
    pub situations: Vec<Situation>,
    pub mood: Mood,
}

impl QueryContext {
    pub fn situation_labels(&self) -> Vec<&'static str> {
        self.situations.iter().map(|s| s.as_str()).collect()
    }
}
