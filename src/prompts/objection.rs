use super::{Common, PromptSet, StyleRules, optional_line};
use crate::request::GenerationRequest;

pub const RULES: StyleRules = StyleRules {
    standard: "Clear, professional, well-structured response.",
    minimalist: "Short, no fluff, addresses objection directly.",
    creative: "Persuasive, adds unique phrasing and relatability.",
};

pub fn build(request: &GenerationRequest) -> PromptSet {
    let c = Common::from_request(request);

    let base = format!(
        "You are an expert sales professional skilled in objection handling.
Create TWO different, high-quality responses (A and B) to the following objection:

Objection: {objection}
Product/Service: {product}
Tone: {tone}
Language: {language}
{context}Template Style: {style}

{rules}
INSTRUCTIONS:
- Each response must be written entirely in {language}.
- Do NOT mix languages.
- Make responses empathetic, solution-oriented, and persuasive.
- Response A: Direct and professional.
- Response B: Creative or persuasive twist.
",
        objection = request.get_or("objection", ""),
        product = request.get_or("product", ""),
        tone = c.tone,
        language = c.language,
        context = optional_line(request, "context", "Additional Context: "),
        style = c.style,
        rules = RULES.block(c.style),
    );

    PromptSet::Dual {
        a: format!(
            "{}### Response A:
- Be concise, solution-focused, and confident.
",
            base
        ),
        b: format!(
            "{}### Response B:
- Use creative tone, empathetic language, and add engaging phrasing.
",
            base
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objection_and_product_are_interpolated() {
        let req = GenerationRequest::new()
            .with("objection", "too expensive")
            .with("product", "CRM suite")
            .with("templateStyle", "Minimalist");
        let PromptSet::Dual { a, b } = build(&req) else {
            panic!("objection builds two prompts");
        };
        assert!(a.contains("Objection: too expensive"));
        assert!(a.contains("Product/Service: CRM suite"));
        assert!(a.contains("written entirely in English."));
        assert!(a.contains("### Response A:"));
        assert!(b.contains("### Response B:"));
        assert_eq!(b.matches(RULES.minimalist).count(), 1);
        assert!(!b.contains("Additional Context"));
    }
}
