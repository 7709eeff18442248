use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Which generative-model service answers analysis prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenAi,
}

impl LlmProvider {
    /// Environment variable holding the credential for this provider.
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "GOOGLE_API_KEY",
            LlmProvider::OpenAi => "OPENAI_API_KEY",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini-1.5-flash-latest",
            LlmProvider::OpenAi => "gpt-3.5-turbo",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            "openai" => Ok(LlmProvider::OpenAi),
            other => bail!("Unknown LLM provider '{other}' (expected 'gemini' or 'openai')"),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::Gemini => f.write_str("gemini"),
            LlmProvider::OpenAi => f.write_str("openai"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if the provider's credential is missing.
#[derive(Clone)]
pub struct Config {
    pub llm_provider: LlmProvider,
    pub llm_api_key: String,
    pub llm_model: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

// Keeps the credential out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("llm_provider", &self.llm_provider)
            .field("llm_api_key", &"<redacted>")
            .field("llm_model", &self.llm_model)
            .field("port", &self.port)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let llm_provider = match lookup("LLM_PROVIDER") {
            Some(value) => value.parse::<LlmProvider>()?,
            None => LlmProvider::Gemini,
        };

        let llm_api_key = require(&lookup, llm_provider.api_key_var())?;

        let llm_model = lookup("LLM_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| llm_provider.default_model().to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let max_upload_mb = lookup("MAX_UPLOAD_MB")
            .unwrap_or_else(|| "10".to_string())
            .parse::<usize>()
            .context("MAX_UPLOAD_MB must be a whole number of megabytes")?;

        Ok(Config {
            llm_provider,
            llm_api_key,
            llm_model,
            port,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}
