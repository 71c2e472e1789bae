//! Prompt construction for each generator.
//!
//! Every builder is a pure function over an already-validated request. The
//! output always names the target language so the model answers in it, and
//! carries exactly one template-style rule block.

use sha1::{Digest, Sha1};

use crate::request::GenerationRequest;

pub mod coldcall;
pub mod email;
pub mod followup;
pub mod objection;
pub mod proposal;
pub mod style;

pub use style::{StyleRules, TemplateStyle};

/// Language used when the request does not name one
pub const DEFAULT_LANGUAGE: &str = "English";
/// Tone used when the request does not name one
pub const DEFAULT_TONE: &str = "Professional";

/// Prompts for one request: a single combined prompt, or one per variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSet {
    Single(String),
    Dual { a: String, b: String },
}

impl PromptSet {
    pub fn prompts(&self) -> Vec<&str> {
        match self {
            PromptSet::Single(p) => vec![p.as_str()],
            PromptSet::Dual { a, b } => vec![a.as_str(), b.as_str()],
        }
    }

    /// Stable short identifier for log correlation without logging user text
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha1::new();
        for p in self.prompts() {
            hasher.update(p.as_bytes());
        }
        let digest = format!("{:x}", hasher.finalize());
        digest[..12].to_string()
    }
}

/// Fields every builder reads the same way
pub(crate) struct Common<'a> {
    pub tone: &'a str,
    pub language: &'a str,
    pub style: TemplateStyle,
}

impl<'a> Common<'a> {
    pub fn from_request(request: &'a GenerationRequest) -> Self {
        Self {
            tone: request.get_or("tone", DEFAULT_TONE),
            language: request.get_or("language", DEFAULT_LANGUAGE),
            style: TemplateStyle::from_field(request.get("templateStyle")),
        }
    }
}

/// `"{prefix}{value}\n"` when the field is present, otherwise nothing
pub(crate) fn optional_line(request: &GenerationRequest, field: &str, prefix: &str) -> String {
    request
        .get(field)
        .map(|v| format!("{}{}\n", prefix, v))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_deterministic_and_short() {
        let a = PromptSet::Single("hello".to_string());
        let b = PromptSet::Single("hello".to_string());
        let c = PromptSet::Dual {
            a: "hello".to_string(),
            b: "world".to_string(),
        };
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 12);
    }

    #[test]
    fn common_fields_default() {
        let req = GenerationRequest::new();
        let common = Common::from_request(&req);
        assert_eq!(common.tone, DEFAULT_TONE);
        assert_eq!(common.language, DEFAULT_LANGUAGE);
        assert_eq!(common.style, TemplateStyle::Standard);
    }

    #[test]
    fn optional_line_skips_absent_fields() {
        let req = GenerationRequest::new().with("cta", "Book a call").with("pricing", "");
        assert_eq!(optional_line(&req, "cta", "- Call to Action: "), "- Call to Action: Book a call\n");
        assert_eq!(optional_line(&req, "pricing", "Pricing: "), "");
        assert_eq!(optional_line(&req, "timeline", "Timeline: "), "");
    }
}
