//! Keyword classification of free-text queries.
//!
//! Matching is case-insensitive word-boundary matching against fixed word
//! lists. Mood detection is first-match-wins in declaration order; the
//! ordering is part of the behavioral contract.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Mood, QueryContext, Situation};

static SITUATION_PATTERNS: Lazy<Vec<(Situation, Regex)>> = Lazy::new(|| {
    [
        (
            Situation::Comeback,
            r"\b(comeback|witty response|roast|burn|insult|clever reply)\b",
        ),
        (
            Situation::Goodbye,
            r"\b(leaving|goodbye|farewell|see you later|departing|exit)\b",
        ),
        (
            Situation::Greeting,
            r"\b(hello|hi|meeting|introduction|first time|new person)\b",
        ),
        (
            Situation::Rejection,
            r"\b(reject|turn down|not interested|no thanks|decline)\b",
        ),
        (
            Situation::Awkward,
            r"\b(awkward|uncomfortable|weird|strange|embarrassing|cringe)\b",
        ),
        (
            Situation::Confident,
            r"\b(confident|boss|badass|cool|swagger|attitude)\b",
        ),
        (
            Situation::Romantic,
            r"\b(flirting|date|romantic|love|asking out|valentine)\b",
        ),
        (
            Situation::Work,
            r"\b(work|office|boss|meeting|colleague|professional)\b",
        ),
        (
            Situation::Party,
            r"\b(party|celebration|drinks|social|friends|gathering)\b",
        ),
        (
            Situation::Argument,
            r"\b(argument|fight|disagreement|debate|confrontation)\b",
        ),
    ]
    .into_iter()
    .map(|(situation, pattern)| {
        let regex = Regex::new(&format!("(?i){pattern}")).expect("invalid situation pattern");
        (situation, regex)
    })
    .collect()
});

// Ordering is significant: the first matching mood wins.
static MOOD_PATTERNS: Lazy<Vec<(Mood, Regex)>> = Lazy::new(|| {
    [
        (Mood::Funny, r"\b(funny|hilarious|joke|laugh|comedy|humor)\b"),
        (Mood::Cool, r"\b(cool|badass|smooth|suave|confident)\b"),
        (Mood::Dramatic, r"\b(dramatic|serious|intense|powerful|epic)\b"),
        (Mood::Sassy, r"\b(sassy|sarcastic|witty|clever|smart)\b"),
    ]
    .into_iter()
    .map(|(mood, pattern)| {
        let regex = Regex::new(&format!("(?i){pattern}")).expect("invalid mood pattern");
        (mood, regex)
    })
    .collect()
});

fn detect_situations(query: &str) -> Vec<Situation> {
    SITUATION_PATTERNS
        .iter()
        .filter(|(_, regex)| regex.is_match(query))
        .map(|(situation, _)| *situation)
        .collect()
}

fn detect_mood(query: &str) -> Mood {
    MOOD_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(query))
        .map(|(mood, _)| *mood)
        .unwrap_or_default()
}

/// Classify a query into situation tags and a mood.
///
/// An explicit `mood` overrides detection; otherwise the mood is detected
/// from the query text, defaulting to [`Mood::Funny`]. Always produces a
/// result (the situation set may be empty).
pub fn classify(query: &str, mood: Option<Mood>) -> QueryContext {
    let cleaned = query.trim();

    QueryContext {
        original_query: cleaned.to_string(),
        situations: detect_situations(cleaned),
        mood: mood.unwrap_or_else(|| detect_mood(cleaned)),
    }
}
