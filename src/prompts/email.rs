use super::{Common, PromptSet, StyleRules, optional_line};
use crate::request::GenerationRequest;

pub const RULES: StyleRules = StyleRules {
    standard: "Professional tone, clear structure with subject line, greeting, body, and CTA.",
    minimalist: "Very short, bullet points where possible, no fluff, straight to value.",
    creative: "Add storytelling, engaging hooks, and persuasive tone while remaining natural.",
};

pub fn build(request: &GenerationRequest) -> PromptSet {
    let c = Common::from_request(request);

    let base = format!(
        "You are an expert cold email copywriter. Write a personalized, engaging cold email based on the details provided.
Make the email professional but attention-grabbing, optimized for high response rates.

Details:
- Recipient Name: {recipient}
- Company: {company}
- Goal: {goal}
- Tone: {tone}
- Language: {language}
{cta}{reference}- Template Style: {style}

{rules}
Instructions:
- Entire email MUST be in {language}.
- Follow proper email etiquette.
- Include subject line and appropriate greeting.
- Keep it natural, avoid spammy tone.
- Apply the chosen Template Style strictly to structure and tone.
",
        recipient = request.get_or("recipientName", ""),
        company = request.get_or("company", ""),
        goal = request.get_or("goal", ""),
        tone = c.tone,
        language = c.language,
        cta = optional_line(request, "cta", "- Call to Action: "),
        reference = optional_line(request, "referencePoint", "- Reference Point: "),
        style = c.style,
        rules = RULES.block(c.style),
    );

    PromptSet::Dual {
        a: format!(
            "{}### Version A:
- Focus on clarity and direct value proposition.
- Make it short and precise.
",
            base
        ),
        b: format!(
            "{}### Version B:
- Add a creative or persuasive twist.
- Include a subtle personalization hook.
",
            base
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dual(set: PromptSet) -> (String, String) {
        match set {
            PromptSet::Dual { a, b } => (a, b),
            other => panic!("expected dual prompts, got {:?}", other),
        }
    }

    #[test]
    fn variants_share_the_base() {
        let req = GenerationRequest::new()
            .with("recipientName", "Lee")
            .with("company", "Initech")
            .with("goal", "intro call")
            .with("referencePoint", "their Series B");
        let (a, b) = dual(build(&req));

        for p in [&a, &b] {
            assert!(p.contains("- Recipient Name: Lee"));
            assert!(p.contains("- Reference Point: their Series B"));
            assert!(p.contains("Entire email MUST be in English."));
            assert!(!p.contains("Call to Action"));
        }
        assert!(a.contains("### Version A:"));
        assert!(!a.contains("### Version B:"));
        assert!(b.contains("### Version B:"));
    }

    #[test]
    fn creative_style_only() {
        let req = GenerationRequest::new()
            .with("recipientName", "Lee")
            .with("company", "Initech")
            .with("goal", "intro call")
            .with("templateStyle", "Creative");
        let (a, _) = dual(build(&req));
        assert_eq!(a.matches(RULES.creative).count(), 1);
        assert!(!a.contains(RULES.standard));
        assert!(!a.contains(RULES.minimalist));
    }
}
