//! The five outreach generators and the names they are known by on the wire,
//! on disk, and in user-facing messages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    #[value(name = "coldcall")]
    ColdCall,
    #[value(name = "email")]
    Email,
    #[value(name = "followup")]
    FollowUp,
    #[value(name = "objection")]
    Objection,
    #[value(name = "proposal")]
    Proposal,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 5] = [
        GeneratorKind::ColdCall,
        GeneratorKind::Email,
        GeneratorKind::FollowUp,
        GeneratorKind::Objection,
        GeneratorKind::Proposal,
    ];

    /// Short identifier used in routes and CLI arguments
    pub fn slug(self) -> &'static str {
        match self {
            GeneratorKind::ColdCall => "coldcall",
            GeneratorKind::Email => "email",
            GeneratorKind::FollowUp => "followup",
            GeneratorKind::Objection => "objection",
            GeneratorKind::Proposal => "proposal",
        }
    }

    /// Route segment under `/api`
    pub fn endpoint(self) -> String {
        format!("generate-{}", self.slug())
    }

    /// Name of the local collection that holds saved items of this kind
    pub fn collection(self) -> &'static str {
        match self {
            GeneratorKind::ColdCall => "savedCalls",
            GeneratorKind::Email => "savedEmails",
            GeneratorKind::FollowUp => "savedFollowUps",
            GeneratorKind::Objection => "savedObjections",
            GeneratorKind::Proposal => "savedProposals",
        }
    }

    /// 400 body text. The email and follow-up endpoints always ended theirs with a period.
    pub fn missing_fields_message(self) -> &'static str {
        match self {
            GeneratorKind::Email | GeneratorKind::FollowUp => "Missing required fields.",
            _ => "Missing required fields",
        }
    }

    /// 500 body text
    pub fn failure_message(self) -> &'static str {
        match self {
            GeneratorKind::ColdCall => "Failed to generate cold call script",
            GeneratorKind::Email => "Failed to generate cold email",
            GeneratorKind::FollowUp => "Failed to generate follow-up email",
            GeneratorKind::Objection => "Failed to generate objection responses",
            GeneratorKind::Proposal => "Failed to generate proposals",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        let needle = needle.strip_prefix("generate-").unwrap_or(&needle);
        GeneratorKind::ALL
            .into_iter()
            .find(|k| k.slug() == needle)
            .ok_or_else(|| {
                format!(
                    "unknown generator '{}'; expected one of: coldcall, email, followup, objection, proposal",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slug_and_endpoint_forms() {
        assert_eq!(
            "coldcall".parse::<GeneratorKind>().unwrap(),
            GeneratorKind::ColdCall
        );
        assert_eq!(
            "generate-followup".parse::<GeneratorKind>().unwrap(),
            GeneratorKind::FollowUp
        );
        assert_eq!(
            " Proposal ".parse::<GeneratorKind>().unwrap(),
            GeneratorKind::Proposal
        );
        assert!("pitch".parse::<GeneratorKind>().is_err());
    }

    #[test]
    fn collections_are_distinct() {
        let mut names: Vec<_> = GeneratorKind::ALL.iter().map(|k| k.collection()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), GeneratorKind::ALL.len());
    }
}
