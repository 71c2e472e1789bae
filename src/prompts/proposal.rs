use super::{Common, PromptSet, StyleRules, optional_line};
use crate::request::GenerationRequest;

pub const RULES: StyleRules = StyleRules {
    standard: "Follow a formal, professional structure with clear headings and detailed explanations.",
    minimalist: "Keep it concise. Use bullet points, short sentences, and a clean, simple structure. Avoid long paragraphs.",
    creative: "Be engaging and persuasive. Add storytelling elements, attention-grabbing language, and use markdown headings for emphasis. Make it visually appealing.",
};

pub fn build(request: &GenerationRequest) -> PromptSet {
    let c = Common::from_request(request);

    let base = format!(
        "You are an expert business proposal writer.
Write a compelling proposal for the following project:

Client: {client}
Company: {company}
Project: {project}
Details: {details}

Tone: {tone}
Language: {language}
{deliverables}{timeline}{pricing}{goal}{cta}Proposal Type: {proposal_type}
Industry: {industry}
Template Style: {style}

IMPORTANT:
- Write ONLY in {language}.
- Apply the chosen Template Style: {rule}
- Include the following sections: Introduction, Deliverables, Timeline, Pricing, and CTA.
",
        client = request.get_or("clientName", ""),
        company = request.get_or("company", ""),
        project = request.get_or("project", ""),
        details = request.get_or("details", ""),
        tone = c.tone,
        language = c.language,
        deliverables = optional_line(request, "deliverables", "Deliverables: "),
        timeline = optional_line(request, "timeline", "Timeline: "),
        pricing = optional_line(request, "pricing", "Pricing: "),
        goal = optional_line(request, "goal", "Goal: "),
        cta = optional_line(request, "cta", "Call-to-Action: "),
        proposal_type = request.get_or("proposalType", "General"),
        industry = request.get_or("industry", "General"),
        style = c.style,
        rule = RULES.rule(c.style),
    );

    PromptSet::Dual {
        a: format!("{}\n\nGenerate Version A.", base),
        b: format!("{}\n\nGenerate Version B with noticeable variation.", base),
    }
}
