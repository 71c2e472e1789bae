//! Markdown export of a saved item.

use crate::kind::GeneratorKind;
use crate::storage::SavedItem;

/// Title, description and body of an exported document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub title: String,
    pub description: String,
    pub content: String,
    pub file_stem: String,
}

impl ExportDocument {
    pub fn for_item(kind: GeneratorKind, item: &SavedItem) -> Self {
        let (name_field, description_field, missing_description) = match kind {
            GeneratorKind::ColdCall => ("recipientName", "goal", "Cold call goal not provided"),
            GeneratorKind::Email => ("recipientName", "goal", "Email goal not provided"),
            GeneratorKind::FollowUp => ("recipientName", "context", "Follow-up details not provided"),
            GeneratorKind::Objection => ("objection", "context", "Objection handling details not provided"),
            GeneratorKind::Proposal => ("clientName", "details", "Project details not provided"),
        };

        let default_stem = match kind {
            GeneratorKind::ColdCall => "cold-call",
            GeneratorKind::Email => "cold-email",
            GeneratorKind::FollowUp => "follow-up",
            GeneratorKind::Objection => "objection-handler",
            GeneratorKind::Proposal => "proposal",
        };
        let name = item.field(name_field).unwrap_or(default_stem);

        let title = match kind {
            GeneratorKind::ColdCall => format!("Cold Call Script for {}", name),
            GeneratorKind::Email => format!("Cold Email for {}", name),
            GeneratorKind::FollowUp => format!("Follow-Up for {}", name),
            GeneratorKind::Objection => "Objection Response".to_string(),
            GeneratorKind::Proposal => format!("Proposal for {}", name),
        };

        Self {
            title,
            description: item
                .field(description_field)
                .unwrap_or(missing_description)
                .to_string(),
            content: item.output.clone(),
            file_stem: sanitize_stem(name),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.md", self.file_stem)
    }

    pub fn to_markdown(&self) -> String {
        format!(
            "# {}\n\n## Details\n\n{}\n\n## Content\n\n{}\n",
            self.title,
            self.description,
            self.content.trim_end()
        )
    }
}

/// Keep file names portable
fn sanitize_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let stem = stem.trim_matches('-').to_string();
    if stem.is_empty() {
        "export".to_string()
    } else {
        stem
    }
}
