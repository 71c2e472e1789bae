//! Generic validate → build prompt → call service → shape result flow.
//!
//! Each generator is a row in [`GENERATORS`]; the pipeline itself does not know
//! anything generator-specific.

use std::sync::Arc;

use tracing::{debug, error};

use crate::clients::{CompletionClient, CompletionError, CompletionRequest};
use crate::error::{PitchcraftError, Result};
use crate::kind::GeneratorKind;
use crate::prompts::{self, PromptSet};
use crate::request::{GenerationRequest, GenerationResult};
use crate::splitter;

/// How a generator obtains its two variants
#[derive(Debug, Clone, Copy)]
pub enum CallMode {
    /// One completion holding both variants, split by marker
    SingleWithSplit {
        temperature: f32,
        /// Text split in place of an empty completion
        empty_fallback: &'static str,
    },
    /// Two independent completions, one per variant
    DualCall {
        temperature_a: f32,
        temperature_b: f32,
        fallback_a: &'static str,
        fallback_b: &'static str,
    },
}

/// Per-generator configuration
#[derive(Debug, Clone, Copy)]
pub struct GeneratorSpec {
    pub kind: GeneratorKind,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    pub persona: &'static str,
    pub build_prompt: fn(&GenerationRequest) -> PromptSet,
    pub mode: CallMode,
}

impl GeneratorSpec {
    pub fn for_kind(kind: GeneratorKind) -> &'static GeneratorSpec {
        match kind {
            GeneratorKind::ColdCall => &GENERATORS[0],
            GeneratorKind::Email => &GENERATORS[1],
            GeneratorKind::FollowUp => &GENERATORS[2],
            GeneratorKind::Objection => &GENERATORS[3],
            GeneratorKind::Proposal => &GENERATORS[4],
        }
    }

    /// Required fields followed by optional ones
    pub fn all_fields(&self) -> impl Iterator<Item = &'static str> {
        self.required.iter().chain(self.optional.iter()).copied()
    }

    pub fn call_count(&self) -> usize {
        match self.mode {
            CallMode::SingleWithSplit { .. } => 1,
            CallMode::DualCall { .. } => 2,
        }
    }
}

const VERSION_A_FAILED: &str = "Failed to generate Version A.";
const VERSION_B_FAILED: &str = "Failed to generate Version B.";

pub static GENERATORS: [GeneratorSpec; 5] = [
    GeneratorSpec {
        kind: GeneratorKind::ColdCall,
        required: &["recipientName", "company", "goal"],
        optional: &["tone", "language", "context", "templateStyle"],
        persona: "You are a highly skilled cold call script writer.",
        build_prompt: prompts::coldcall::build,
        mode: CallMode::SingleWithSplit {
            temperature: 0.8,
            empty_fallback: "Failed to generate scripts.",
        },
    },
    GeneratorSpec {
        kind: GeneratorKind::Email,
        required: &["recipientName", "company", "goal"],
        optional: &["tone", "language", "cta", "referencePoint", "templateStyle"],
        persona: "You are a skilled cold email copywriter.",
        build_prompt: prompts::email::build,
        mode: CallMode::DualCall {
            temperature_a: 0.7,
            temperature_b: 0.7,
            fallback_a: VERSION_A_FAILED,
            fallback_b: VERSION_B_FAILED,
        },
    },
    GeneratorSpec {
        kind: GeneratorKind::FollowUp,
        required: &["recipientName", "context"],
        optional: &["previousInteraction", "tone", "language", "templateStyle", "cta"],
        persona: "You are an expert email follow-up copywriter.",
        build_prompt: prompts::followup::build,
        mode: CallMode::DualCall {
            temperature_a: 0.7,
            temperature_b: 0.7,
            fallback_a: VERSION_A_FAILED,
            fallback_b: VERSION_B_FAILED,
        },
    },
    GeneratorSpec {
        kind: GeneratorKind::Objection,
        required: &["objection", "product"],
        optional: &["tone", "language", "context", "templateStyle"],
        persona: "You are a skilled objection handler.",
        build_prompt: prompts::objection::build,
        mode: CallMode::DualCall {
            temperature_a: 0.7,
            temperature_b: 0.7,
            fallback_a: "Failed to generate Response A.",
            fallback_b: "Failed to generate Response B.",
        },
    },
    GeneratorSpec {
        kind: GeneratorKind::Proposal,
        required: &["clientName", "company", "project", "details"],
        optional: &[
            "tone",
            "language",
            "deliverables",
            "timeline",
            "pricing",
            "goal",
            "cta",
            "proposalType",
            "industry",
            "templateStyle",
        ],
        persona: "You are an expert business proposal writer.",
        build_prompt: prompts::proposal::build,
        mode: CallMode::DualCall {
            temperature_a: 0.7,
            temperature_b: 0.9,
            fallback_a: VERSION_A_FAILED,
            fallback_b: VERSION_B_FAILED,
        },
    },
];

/// Runs generators against one completion client
#[derive(Clone)]
pub struct Pipeline {
    client: Arc<dyn CompletionClient>,
}

impl Pipeline {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<dyn CompletionClient> {
        &self.client
    }

    /// Reject the request when any required field is absent. No network call happens here.
    pub fn validate(&self, spec: &GeneratorSpec, request: &GenerationRequest) -> Result<()> {
        let missing = request.missing(spec.required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PitchcraftError::MissingFields {
                kind: spec.kind,
                fields: missing,
            })
        }
    }

    pub async fn generate(
        &self,
        kind: GeneratorKind,
        request: &GenerationRequest,
    ) -> Result<GenerationResult> {
        let spec = GeneratorSpec::for_kind(kind);
        self.validate(spec, request)?;

        let prompts = (spec.build_prompt)(request);
        let fingerprint = prompts.fingerprint();
        debug!(generator = %kind, prompt = %fingerprint, calls = spec.call_count(), "generating");

        let outcome = self.run(spec, prompts).await;
        if let Err(e) = &outcome {
            // Never log request fields or prompt text
            error!(generator = %kind, prompt = %fingerprint, error = %e, "generation failed");
        }
        outcome
    }

    async fn run(&self, spec: &GeneratorSpec, prompts: PromptSet) -> Result<GenerationResult> {
        let kind = spec.kind;
        let upstream = |source: CompletionError| PitchcraftError::Upstream { kind, source };

        match (spec.mode, prompts) {
            (
                CallMode::SingleWithSplit {
                    temperature,
                    empty_fallback,
                },
                PromptSet::Single(prompt),
            ) => {
                let raw = self
                    .client
                    .complete(CompletionRequest::new(spec.persona, prompt, temperature))
                    .await
                    .map_err(upstream)?;
                let text = splitter::non_empty_or(raw, empty_fallback);
                Ok(splitter::split_single(&text))
            }
            (
                CallMode::DualCall {
                    temperature_a,
                    temperature_b,
                    fallback_a,
                    fallback_b,
                },
                PromptSet::Dual { a, b },
            ) => {
                // Independent calls; ordering has no observable effect
                let (raw_a, raw_b) = tokio::try_join!(
                    self.client
                        .complete(CompletionRequest::new(spec.persona, a, temperature_a)),
                    self.client
                        .complete(CompletionRequest::new(spec.persona, b, temperature_b)),
                )
                .map_err(upstream)?;
                Ok(splitter::pair_dual(raw_a, raw_b, fallback_a, fallback_b))
            }
            _ => Err(PitchcraftError::Internal {
                message: format!("{} prompt builder does not match its call mode", kind),
            }),
        }
    }
}
