use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_BIND: &str = "127.0.0.1:8787";
/// Tracing filter used when RUST_LOG is unset or blank
pub const DEFAULT_LOG_FILTER: &str = "pitchcraft=info,tower_http=info";

/// Main configuration structure loaded from pitchcraft.toml and environment variables
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Upstream chat-completion service
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub model: String,
    pub base_url: String,
    /// 0 disables the client-side timeout
    pub request_timeout_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Where the CLI keeps saved items
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: Option<PathBuf>,
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub openai_api_key: Option<String>,
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            log_level: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            openai_api_key: lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()),
            log_level: lookup("RUST_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8787))
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses PITCHCRAFT_CONFIG environment variable or defaults to "pitchcraft.toml"
    pub fn load() -> anyhow::Result<Self> {
        // Load environment variables:
        // 1) PITCH_ENV_FILE if set
        // 2) ./.env
        // 3) ../.env when the key is still missing
        if let Ok(env_path) = std::env::var("PITCH_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
            if std::env::var("OPENAI_API_KEY").is_err() {
                let _ = dotenvy::from_path("../.env");
            }
        }

        let config_path =
            std::env::var("PITCHCRAFT_CONFIG").unwrap_or_else(|_| "pitchcraft.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_overrides(|k| std::env::var(k).ok());
        config.runtime = RuntimeConfig::load_from_env();
        config.validate()?;

        if config.runtime.openai_api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; completion calls will be rejected upstream");
        }

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply env-first overrides for the file-backed sections
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(model) = lookup("PITCH_MODEL") {
            self.completion.model = model;
            tracing::debug!("PITCH_MODEL env override applied");
        }
        if let Some(url) = lookup("PITCH_BASE_URL") {
            self.completion.base_url = url;
            tracing::debug!("PITCH_BASE_URL env override applied");
        }
        if let Some(timeout) = lookup("PITCH_TIMEOUT_MS").and_then(|v| v.parse::<u64>().ok()) {
            self.completion.request_timeout_ms = timeout;
            tracing::debug!("PITCH_TIMEOUT_MS env override applied");
        }
        if let Some(v) = lookup("PITCH_HTTP_BIND") {
            match v.parse::<SocketAddr>() {
                Ok(bind) => {
                    self.server.bind = bind;
                    tracing::debug!("PITCH_HTTP_BIND env override applied");
                }
                Err(_) => tracing::warn!("Ignoring unparseable PITCH_HTTP_BIND '{}'", v),
            }
        }
        if let Some(dir) = lookup("PITCH_STORAGE_DIR") {
            self.storage.dir = Some(PathBuf::from(dir));
            tracing::debug!("PITCH_STORAGE_DIR env override applied");
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = &self.completion.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            anyhow::bail!("completion base_url '{}' must start with http:// or https://", url);
        }
        if self.completion.model.trim().is_empty() {
            anyhow::bail!("completion model must not be empty");
        }
        Ok(())
    }

    /// Directory for the local saved-item store
    pub fn storage_dir(&self) -> PathBuf {
        self.storage.dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("pitchcraft"))
                .unwrap_or_else(|| PathBuf::from(".pitchcraft"))
        })
    }

    /// Base URL the CLI uses to reach a running server
    pub fn server_url(&self) -> String {
        format!("http://{}", self.server.bind)
    }
}
