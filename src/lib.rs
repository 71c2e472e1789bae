pub mod clients;
pub mod config;
pub mod error;
pub mod export;
pub mod kind;
pub mod pipeline;
pub mod prompts;
pub mod request;
pub mod server;
pub mod splitter;
pub mod storage;

pub use error::{PitchcraftError, Result};
pub use kind::GeneratorKind;
pub use pipeline::Pipeline;
pub use request::{GenerationRequest, GenerationResult};

use std::sync::Arc;

/// Wire the production completion client into a pipeline
pub fn pipeline_from_config(config: &config::Config) -> Result<Pipeline> {
    let client = clients::OpenAiClient::new(&config.completion, config.runtime.openai_api_key.clone())
        .map_err(|e| PitchcraftError::Config {
            message: e.to_string(),
        })?;
    Ok(Pipeline::new(Arc::new(client)))
}
