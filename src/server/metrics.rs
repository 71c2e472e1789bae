use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::{cmp::Ordering, collections::HashMap, sync::Arc, time::Instant};
use tokio::sync::Mutex;

use crate::kind::GeneratorKind;
use crate::server::AppState;

const LATENCY_WINDOW: usize = 256;

/// Metrics for HTTP server
#[derive(Debug, Clone)]
pub struct HttpMetrics {
    pub total_requests: u64,
    pub last_request_unix: u64,
    pub errors_total: u64,
    pub latencies: Vec<f64>, // ring buffer for p95
    pub generator_count: HashMap<GeneratorKind, u64>,
}

impl Default for HttpMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpMetrics {
    pub fn new() -> Self {
        Self {
            total_requests: 0,
            last_request_unix: unix_now(),
            errors_total: 0,
            latencies: Vec::with_capacity(LATENCY_WINDOW),
            generator_count: HashMap::new(),
        }
    }

    pub fn record_request(&mut self, latency_ms: f64, success: bool) {
        if latency_ms > 0.0 {
            self.latencies.push(latency_ms);
            if self.latencies.len() > LATENCY_WINDOW {
                self.latencies.remove(0);
            }
        }
        if !success {
            self.errors_total = self.errors_total.saturating_add(1);
        }
        self.total_requests = self.total_requests.saturating_add(1);
        self.last_request_unix = unix_now();
    }

    pub fn record_generator(&mut self, kind: GeneratorKind) {
        *self.generator_count.entry(kind).or_insert(0) += 1;
    }

    /// (average, p95) latency in milliseconds
    pub fn latency_stats(&self) -> (Option<f64>, Option<f64>) {
        if self.latencies.is_empty() {
            return (None, None);
        }
        let sum: f64 = self.latencies.iter().sum();
        let avg = sum / self.latencies.len() as f64;
        let mut sorted = self.latencies.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let p95_idx = ((sorted.len() as f64 * 0.95) as usize).min(sorted.len() - 1);
        (Some(avg), sorted.get(p95_idx).copied())
    }

    pub fn snapshot(&self) -> serde_json::Value {
        let (avg_latency_ms, p95_latency_ms) = self.latency_stats();
        let generators: HashMap<&str, u64> = self
            .generator_count
            .iter()
            .map(|(k, v)| (k.slug(), *v))
            .collect();
        json!({
            "metrics_version": "1",
            "total_requests": self.total_requests,
            "last_request_unix": self.last_request_unix,
            "errors_total": self.errors_total,
            "avg_latency_ms": avg_latency_ms,
            "p95_latency_ms": p95_latency_ms,
            "generators": generators,
        })
    }
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Metrics endpoint
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let metrics = state.metrics.lock().await.clone();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        metrics.snapshot().to_string(),
    )
}

/// Records latency and outcome for generator routes
pub async fn track_requests(
    State(metrics): State<Arc<Mutex<HttpMetrics>>>,
    req: Request,
    next: Next,
) -> Response {
    let tracked = req.uri().path().starts_with("/api/");
    let start = Instant::now();
    let resp = next.run(req).await;
    if tracked {
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        metrics
            .lock()
            .await
            .record_request(latency_ms, resp.status().is_success());
    }
    resp
}
