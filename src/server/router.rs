use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{info, warn};

use crate::error::PitchcraftError;
use crate::kind::GeneratorKind;
use crate::pipeline::GENERATORS;
use crate::request::GenerationRequest;
use crate::server::AppState;

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    "ok"
}

/// Info endpoint
pub async fn info_handler(State(state): State<AppState>) -> impl IntoResponse {
    let generators: Vec<_> = GENERATORS
        .iter()
        .map(|spec| {
            json!({
                "endpoint": format!("/api/{}", spec.kind.endpoint()),
                "required": spec.required,
                "optional": spec.optional,
                "calls": spec.call_count(),
            })
        })
        .collect();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        json!({
            "completion": {
                "model": state.pipeline.client().model(),
                "base_url": state.config.completion.base_url,
            },
            "server": {
                "bind": state.config.server.bind.to_string(),
            },
            "generators": generators,
        })
        .to_string(),
    )
}

/// POST /api/generate-{kind}
pub async fn generate_handler(
    kind: GeneratorKind,
    State(state): State<AppState>,
    body: Bytes,
) -> Response {
    state.metrics.lock().await.record_generator(kind);

    let request: GenerationRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            warn!(generator = %kind, "rejecting malformed request body: {}", e);
            return PitchcraftError::InvalidRequest {
                message: e.to_string(),
            }
            .into_response();
        }
    };

    match state.pipeline.generate(kind, &request).await {
        Ok(result) => {
            info!(generator = %kind, "generated variants");
            Json(result).into_response()
        }
        Err(e) => {
            if let PitchcraftError::MissingFields { fields, .. } = &e {
                info!(generator = %kind, missing = ?fields, "missing required fields");
            }
            e.into_response()
        }
    }
}

