use super::{Common, PromptSet, StyleRules, optional_line};
use crate::request::GenerationRequest;

pub const RULES: StyleRules = StyleRules {
    standard: "Traditional follow-up format, clear subject, greeting, and closing.",
    minimalist: "Extremely brief, skips fluff, straight to the point.",
    creative: "Conversational, adds warmth or unique phrasing to engage.",
};

pub fn build(request: &GenerationRequest) -> PromptSet {
    let c = Common::from_request(request);

    let base = format!(
        "You are an expert in professional email communication. Write a follow-up email that is polite, professional, and persuasive based on these details:

- Recipient Name: {recipient}
- Context: {context}
{previous}{cta}- Template Style: {style}
- Tone: {tone}
- Language: {language}

{rules}
Instructions:
- Entire email MUST be in {language}.
- Include a subject line and a greeting.
- Make it sound natural, not robotic.
- Apply the chosen Template Style strictly in tone and structure.
",
        recipient = request.get_or("recipientName", ""),
        context = request.get_or("context", ""),
        previous = optional_line(request, "previousInteraction", "- Previous Interaction: "),
        cta = optional_line(request, "cta", "- Call to Action: "),
        style = c.style,
        tone = c.tone,
        language = c.language,
        rules = RULES.block(c.style),
    );

    PromptSet::Dual {
        a: format!(
            "{}### Version A:
- Short and concise follow-up.
- Emphasize professionalism and directness.
",
            base
        ),
        b: format!(
            "{}### Version B:
- Add a more engaging or creative twist.
- Use light personalization to make it relatable.
",
            base
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_previous_interaction_and_language() {
        let req = GenerationRequest::new()
            .with("recipientName", "Sam")
            .with("context", "sent pricing last week")
            .with("previousInteraction", "demo on Tuesday")
            .with("language", "German");
        let PromptSet::Dual { a, b } = build(&req) else {
            panic!("follow-up builds two prompts");
        };
        assert!(a.contains("- Previous Interaction: demo on Tuesday"));
        assert!(a.contains("Entire email MUST be in German."));
        assert!(a.contains("Short and concise follow-up."));
        assert!(b.contains("Add a more engaging or creative twist."));
        assert_eq!(a.matches(RULES.standard).count(), 1);
    }
}
