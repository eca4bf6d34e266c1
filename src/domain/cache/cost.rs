//! Token-count cost estimation.
//!
//! Token counts are approximated as `len / 4` and multiplied by fixed
//! per-model per-token prices. This is a reporting heuristic for the
//! cache-savings figures, not billing-grade accounting.

/// (model, prompt price per token, completion price per token) in USD
const CHAT_PRICES: &[(&str, f64, f64)] = &[
    ("gpt-4o", 2.5e-6, 10.0e-6),
    ("gpt-4o-mini", 0.15e-6, 0.6e-6),
];

/// (model, price per token) in USD
const EMBEDDING_PRICES: &[(&str, f64)] = &[
    ("text-embedding-3-small", 0.02e-6),
    ("text-embedding-3-large", 0.13e-6),
];

const DEFAULT_CHAT_PRICES: (f64, f64) = (2.5e-6, 10.0e-6);
const DEFAULT_EMBEDDING_PRICE: f64 = 0.02e-6;

/// Approximate token count for a text
pub fn estimate_tokens(text: &str) -> u64 {
    (text.len() / 4) as u64
}

fn chat_prices(model: &str) -> (f64, f64) {
    CHAT_PRICES
        .iter()
        .find(|(name, _, _)| *name == model)
        .map(|(_, prompt, completion)| (*prompt, *completion))
        .unwrap_or(DEFAULT_CHAT_PRICES)
}

fn embedding_price(model: &str) -> f64 {
    EMBEDDING_PRICES
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, price)| *price)
        .unwrap_or(DEFAULT_EMBEDDING_PRICE)
}

/// Estimate the cost of a chat completion from its prompt and completion
/// texts.
pub fn estimate_chat_cost(model: &str, prompt: &str, completion: &str) -> f64 {
    let (prompt_price, completion_price) = chat_prices(model);

    estimate_tokens(prompt) as f64 * prompt_price
        + estimate_tokens(completion) as f64 * completion_price
}

/// Estimate the cost of embedding a text.
pub fn estimate_embedding_cost(model: &str, text: &str) -> f64 {
    estimate_tokens(text) as f64 * embedding_price(model)
}
