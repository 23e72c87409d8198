//! Configuration loading.
//! Reads pgxrisk.toml from the current directory or the path in the
//! PGXRISK_CONFIG env var. The LLM API key is never stored in the file; it
//! is read from the environment at startup and a missing key is fatal.

use std::path::Path;

use pgxrisk_common::{PgxError, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3001 }
fn default_max_upload_bytes() -> usize { 5 * 1024 * 1024 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the env var holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String { "https://api.groq.com/openai".to_string() }
fn default_model() -> String { "llama-3.1-8b-instant".to_string() }
fn default_api_key_env() -> String { "GROQ_API_KEY".to_string() }
fn default_timeout_secs() -> u64 { 30 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration. An explicitly configured path must exist; the
    /// default path falls back to built-in defaults when absent.
    pub fn load() -> Result<Self> {
        match std::env::var("PGXRISK_CONFIG") {
            Ok(path) => {
                if !Path::new(&path).exists() {
                    return Err(PgxError::Config(format!("Config file not found: {path}")));
                }
                Self::from_file(&path)
            }
            Err(_) => {
                let path = "pgxrisk.toml";
                if Path::new(path).exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Resolve the LLM API key. Missing credentials are a fatal startup
    /// error, not a per-request one.
    pub fn api_key(&self) -> Result<SecretString> {
        std::env::var(&self.llm.api_key_env)
            .map(SecretString::from)
            .map_err(|_| {
                PgxError::Config(format!(
                    "{} not found in environment variables",
                    self.llm.api_key_env
                ))
            })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
