//! Turns raw completion text into the A/B pair.
//!
//! Single-call generators ask the model for both variants in one answer and
//! rely on a numbered marker convention ("1. Version A:", "2. Version B:").
//! This is a best-effort parser: when the model ignores the convention the
//! whole text becomes variant A and variant B gets a fixed placeholder.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::request::GenerationResult;

/// Placeholder for B when the single-call answer has no B marker
pub const VERSION_B_MISSING: &str = "Version B not generated";

static VERSION_A_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)1\.\s*Version A:").expect("version A marker regex")
});
static VERSION_B_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)2\.\s*Version B:").expect("version B marker regex")
});

/// Split one completion holding both variants.
pub fn split_single(raw: &str) -> GenerationResult {
    // A repeated B marker ends variant B; anything after it is discarded
    let mut parts = VERSION_B_MARKER.split(raw);
    let candidate_a = parts.next().unwrap_or_default();
    let candidate_b = parts.next();

    let output_a = VERSION_A_MARKER.replace(candidate_a, "").trim().to_string();
    let output_b = candidate_b.unwrap_or(VERSION_B_MISSING).trim().to_string();

    GenerationResult { output_a, output_b }
}

/// Pair two independent completions, substituting placeholders for empty ones.
pub fn pair_dual(
    raw_a: Option<String>,
    raw_b: Option<String>,
    fallback_a: &str,
    fallback_b: &str,
) -> GenerationResult {
    GenerationResult {
        output_a: non_empty_or(raw_a, fallback_a),
        output_b: non_empty_or(raw_b, fallback_b),
    }
}

pub(crate) fn non_empty_or(raw: Option<String>, fallback: &str) -> String {
    raw.filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
