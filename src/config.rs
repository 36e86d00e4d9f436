//! Configuration types.
//!
//! Everything comes from the environment (after `.env` is loaded by `main`).

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::llm::LlmConfig;
use crate::pipeline::DrafterConfig;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub server: ServerConfig,
    pub drafter: DrafterConfig,
    pub nlp: NlpConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
    /// Allowed CORS origins. `["*"]` allows any origin.
    pub cors_origins: Vec<String>,
    /// Upper bound on processing a single email.
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
            cors_origins: vec!["http://localhost:5173".to_string()],
            request_timeout: Duration::from_secs(60),
            max_upload_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Lemma dictionary location.
#[derive(Debug, Clone, Default)]
pub struct NlpConfig {
    pub lemma_path: Option<PathBuf>,
    pub lemma_url: Option<String>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = var("OPENAI_API_KEY")
            .or_else(|| var("OPENAPI_APIKEY"))
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let llm = LlmConfig {
            api_key: SecretString::from(api_key),
            base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: var("MAIL_TRIAGE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(parse_or(&var, "MAIL_TRIAGE_LLM_TIMEOUT_SECS", 30)?),
        };

        let defaults = ServerConfig::default();
        let server = ServerConfig {
            bind: parse_or(&var, "MAIL_TRIAGE_BIND", defaults.bind)?,
            port: parse_or(&var, "MAIL_TRIAGE_PORT", defaults.port)?,
            cors_origins: var("MAIL_TRIAGE_CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            request_timeout: Duration::from_secs(parse_or(
                &var,
                "MAIL_TRIAGE_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            max_upload_bytes: parse_or(&var, "MAIL_TRIAGE_MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        };

        let drafter = DrafterConfig {
            signature: var("MAIL_TRIAGE_SIGNATURE")
                .unwrap_or_else(|| DrafterConfig::default().signature),
            ..DrafterConfig::default()
        };

        let nlp = NlpConfig {
            lemma_path: var("MAIL_TRIAGE_LEMMA_PATH").map(PathBuf::from),
            lemma_url: var("MAIL_TRIAGE_LEMMA_URL"),
        };

        Ok(Self {
            llm,
            server,
            drafter,
            nlp,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    var: impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{raw}': {e}"),
        }),
        None => Ok(default),
    }
}
