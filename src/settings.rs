// Settings for the producer agent
// Read from the process environment: provider, model and the provider's API key

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const LLM_PROVIDER_VAR: &str = "LLM_PROVIDER";
pub const MODEL_NAME_VAR: &str = "MODEL_NAME";
pub const MODEL_TEMPERATURE_VAR: &str = "MODEL_TEMPERATURE";

const MAX_TEMPERATURE: f32 = 2.0;

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("LLM_PROVIDER must be one of openai, anthropic, google, mistral (got '{0}')")]
    InvalidProvider(String),

    #[error("MODEL_TEMPERATURE must be a number between 0.0 and 2.0 (got '{0}')")]
    InvalidTemperature(String),

    #[error("{var} must be set when LLM_PROVIDER is '{provider}'.")]
    MissingApiKey {
        var: &'static str,
        provider: LlmProvider,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Anthropic,
    Google,
    Mistral,
}

impl LlmProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "openai",
            LlmProvider::Anthropic => "anthropic",
            LlmProvider::Google => "google",
            LlmProvider::Mistral => "mistral",
        }
    }

    /// Environment variable holding this provider's key
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
            LlmProvider::Google => "GOOGLE_API_KEY",
            LlmProvider::Mistral => "MISTRAL_API_KEY",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LlmProvider {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAi),
            "anthropic" => Ok(LlmProvider::Anthropic),
            "google" => Ok(LlmProvider::Google),
            "mistral" => Ok(LlmProvider::Mistral),
            _ => Err(SettingsError::InvalidProvider(s.to_string())),
        }
    }
}

/// Validated agent settings.
///
/// Only the selected provider's key is kept.
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub llm_provider: LlmProvider,
    pub model_name: String,
    pub model_temperature: f32,
    api_key: String,
}

impl Settings {
    /// Read from the process environment only. A `.env` file is not loaded;
    /// export its variables in the shell that starts the agent.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let llm_provider: LlmProvider = get(LLM_PROVIDER_VAR)
            .ok_or(SettingsError::Missing(LLM_PROVIDER_VAR))?
            .parse()?;

        let model_name = get(MODEL_NAME_VAR).ok_or(SettingsError::Missing(MODEL_NAME_VAR))?;

        let raw_temperature =
            get(MODEL_TEMPERATURE_VAR).ok_or(SettingsError::Missing(MODEL_TEMPERATURE_VAR))?;
        let model_temperature = raw_temperature
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|t| (0.0..=MAX_TEMPERATURE).contains(t))
            .ok_or_else(|| SettingsError::InvalidTemperature(raw_temperature.clone()))?;

        let api_key = get(llm_provider.api_key_var()).ok_or(SettingsError::MissingApiKey {
            var: llm_provider.api_key_var(),
            provider: llm_provider,
        })?;

        Ok(Settings {
            llm_provider,
            model_name: model_name.trim().to_string(),
            model_temperature,
            api_key,
        })
    }

    /// Full model identifier, e.g. "anthropic:claude-sonnet"
    pub fn model(&self) -> String {
        format!("{}:{}", self.llm_provider, self.model_name)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("llm_provider", &self.llm_provider)
            .field("model_name", &self.model_name)
            .field("model_temperature", &self.model_temperature)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
