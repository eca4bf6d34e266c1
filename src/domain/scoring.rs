//! Heuristic relevance re-ranking of retrieved quotes.
//!
//! The base similarity score from the vector search is boosted by small
//! fixed increments for keyword matches in the candidate text, then
//! clamped to [0, 1]. The increment constants, the 0.3 score floor and
//! the top-8 truncation are behavioral contract.

use crate::domain::query::{Mood, QueryContext, Situation};
use crate::domain::quote::{QuoteRecord, ScoredQuote};

const MOOD_BOOST: f32 = 0.05;
const SITUATION_BOOST: f32 = 0.03;
const SCORE_FLOOR: f32 = 0.3;
const MAX_RANKED: usize = 8;

fn mood_keywords(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Funny => &["funny", "laugh", "joke", "hilarious", "ridiculous", "silly"],
        Mood::Cool => &["cool", "smooth", "badass", "boss", "trouble"],
        Mood::Dramatic => &["never", "forever", "destiny", "power", "die"],
        Mood::Sassy => &["honey", "darling", "frankly", "please", "whatever"],
    }
}

fn situation_keywords(situation: Situation) -> &'static [&'static str] {
    match situation {
        Situation::Comeback => &["stupid", "idiot", "loser", "wrong", "failure"],
        Situation::Goodbye => &["goodbye", "farewell", "leaving", "later", "adios"],
        Situation::Greeting => &["hello", "friend", "welcome", "name"],
        Situation::Rejection => &["no", "never", "sorry", "interested"],
        Situation::Awkward => &["awkward", "weird", "strange", "uncomfortable"],
        Situation::Confident => &["best", "great", "win", "unstoppable"],
        Situation::Romantic => &["love", "heart", "kiss", "beautiful"],
        Situation::Work => &["work", "money", "business", "deal"],
        Situation::Party => &["party", "drink", "dance", "celebrate"],
        Situation::Argument => &["fight", "truth", "listen", "liar"],
    }
}

fn count_matches(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| text.contains(*kw)).count()
}

/// Adjust a base similarity score with keyword boosts from the query
/// context. The result is always in [0, 1].
pub fn adjust_score(base: f32, quote_text: &str, ctx: &QueryContext) -> f32 {
    let text = quote_text.to_lowercase();

    let mut score = base;
    score += count_matches(&text, mood_keywords(ctx.mood)) as f32 * MOOD_BOOST;

    for situation in &ctx.situations {
        score += count_matches(&text, situation_keywords(*situation)) as f32 * SITUATION_BOOST;
    }

    score.clamp(0.0, 1.0)
}

/// Score, filter and rank candidate quotes: adjusted score must exceed
/// the floor, results are ordered descending and truncated to the top 8.
pub fn rank_quotes(candidates: Vec<(QuoteRecord, f32)>, ctx: &QueryContext) -> Vec<ScoredQuote> {
    let mut scored: Vec<ScoredQuote> = candidates
        .into_iter()
        .map(|(quote, base)| {
            let score = adjust_score(base, &quote.text, ctx);
            ScoredQuote { quote, score }
        })
        .filter(|sq| sq.score > SCORE_FLOOR)
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(MAX_RANKED);
    scored
}
