use super::{Common, PromptSet, StyleRules};
use crate::request::GenerationRequest;

pub const RULES: StyleRules = StyleRules {
    standard: "Formal, structured with greeting, introduction, value proposition, and CTA.",
    minimalist: "Extremely concise, uses bullet points for key lines, minimal fluff.",
    creative: "Conversational and engaging, uses storytelling or humor to build rapport.",
};

const VARIATION_INSTRUCTION: &str = "Now create TWO distinct versions:
1. Version A: Direct and professional.
2. Version B: Creative, slightly informal, more engaging.
";

/// One prompt asking for both scripts, split afterwards by marker
pub fn build(request: &GenerationRequest) -> PromptSet {
    let c = Common::from_request(request);
    let context = request
        .get("context")
        .map(|ctx| format!("\nContext for the call: {}\n", ctx))
        .unwrap_or_default();

    let base = format!(
        "You are an expert sales strategist.
Write a cold call script for the following details:

Recipient Name: {recipient}
Recipient Company: {company}
Goal of the Call: {goal}
Tone: {tone}
Language: {language}
{context}
Template Style: {style}

{rules}
### Instructions:
- Script must be written in {language}.
- Maintain a {tone_lower} tone.
- Apply the chosen Template Style strictly when structuring and wording the script.
- Include a strong opening, clear value proposition, and an effective CTA.
- Keep it conversational and easy to deliver over the phone.
",
        recipient = request.get_or("recipientName", ""),
        company = request.get_or("company", ""),
        goal = request.get_or("goal", ""),
        tone = c.tone,
        language = c.language,
        context = context,
        style = c.style,
        rules = RULES.block(c.style),
        tone_lower = c.tone.to_lowercase(),
    );

    PromptSet::Single(format!("{}\n{}", base, VARIATION_INSTRUCTION))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest::new()
            .with("recipientName", "Dana")
            .with("company", "Globex")
            .with("goal", "book a demo")
            .with("tone", "Friendly")
            .with("language", "Spanish")
    }

    fn single(set: PromptSet) -> String {
        match set {
            PromptSet::Single(p) => p,
            other => panic!("expected single prompt, got {:?}", other),
        }
    }

    #[test]
    fn interpolates_fields_and_variants() {
        let p = single(build(&request()));
        assert!(p.contains("Recipient Name: Dana"));
        assert!(p.contains("Recipient Company: Globex"));
        assert!(p.contains("Goal of the Call: book a demo"));
        assert!(p.contains("Script must be written in Spanish."));
        assert!(p.contains("Maintain a friendly tone."));
        assert!(p.contains("1. Version A: Direct and professional."));
        assert!(p.contains("2. Version B: Creative, slightly informal, more engaging."));
        assert!(!p.contains("Context for the call"));
    }

    #[test]
    fn standard_rules_by_default() {
        let p = single(build(&request()));
        assert!(p.contains("Template Style: Standard"));
        assert_eq!(p.matches(RULES.standard).count(), 1);
        assert!(!p.contains(RULES.minimalist));
        assert!(!p.contains(RULES.creative));
    }

    #[test]
    fn selected_style_appears_once() {
        let p = single(build(&request().with("templateStyle", "Minimalist")));
        assert_eq!(p.matches(RULES.minimalist).count(), 1);
        assert!(!p.contains(RULES.standard));
    }

    #[test]
    fn context_line_when_present() {
        let p = single(build(&request().with("context", "met at the expo")));
        assert!(p.contains("Context for the call: met at the expo"));
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(build(&request()), build(&request()));
    }
}
