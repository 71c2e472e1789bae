use serde::{Deserialize, Serialize};
use std::fmt;

/// Formatting preset controlling the structural instructions sent to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemplateStyle {
    #[default]
    Standard,
    Minimalist,
    Creative,
}

impl TemplateStyle {
    /// Resolve a raw field value. Absent or unrecognized values are Standard.
    pub fn from_field(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("minimalist") => TemplateStyle::Minimalist,
            Some(v) if v.eq_ignore_ascii_case("creative") => TemplateStyle::Creative,
            _ => TemplateStyle::Standard,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TemplateStyle::Standard => "Standard",
            TemplateStyle::Minimalist => "Minimalist",
            TemplateStyle::Creative => "Creative",
        }
    }
}

impl fmt::Display for TemplateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One generator's rule text for each style
#[derive(Debug, Clone, Copy)]
pub struct StyleRules {
    pub standard: &'static str,
    pub minimalist: &'static str,
    pub creative: &'static str,
}

impl StyleRules {
    pub fn rule(&self, style: TemplateStyle) -> &'static str {
        match style {
            TemplateStyle::Standard => self.standard,
            TemplateStyle::Minimalist => self.minimalist,
            TemplateStyle::Creative => self.creative,
        }
    }

    /// The `### Template Style Rules:` block for the selected style only
    pub fn block(&self, style: TemplateStyle) -> String {
        format!("### Template Style Rules:\n- {}: {}\n", style.name(), self.rule(style))
    }
}
