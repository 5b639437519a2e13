//! Environment-driven configuration for both binaries.
//!
//! # Chat endpoint
//!
//! - `HOST` / `PORT`: bind address (default `0.0.0.0:8000`)
//! - `GROQ_API_KEY`: model provider key; falls back to the secret file at
//!   `CHAT_API_KEY_FILE` (default `/etc/secrets/GROQ_API_KEY`). Required.
//! - `CHAT_MODEL_BASE_URL`, `CHAT_MODEL`: provider URL and model name
//! - `CHAT_SYSTEM_PROMPT`: system message placed before the history
//! - `CHAT_MEMORY_WINDOW`: exchanges replayed to the model (default 5)
//! - `CHAT_MODEL_TEMPERATURE`: optional sampling temperature
//! - `CHAT_MODEL_MAX_TOKENS`: optional completion length cap
//! - `CHAT_MODEL_TIMEOUT_SECS`: model request timeout (default 60)
//!
//! # Chat UI
//!
//! - `UI_HOST` / `UI_PORT`: bind address (default `0.0.0.0:8501`)
//! - `CHAT_API_URL`: chat endpoint URL (default `http://127.0.0.1:8000/chat`)
//! - `CHAT_API_TIMEOUT_SECS`: endpoint call timeout (default 30)
//! - `CHAT_TONE_PREFIX`: prepend tone phrases (default true)
//! - `CHAT_NORMALIZE_TEXT`: normalize text before scoring (default false)
//! - `CHAT_UI_TITLE`: page title (default "Chatbot")
//! - `CHAT_SESSION_IDLE_SECS`: idle time before a session is dropped
//!   (default 3600, must be positive)

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::llms::providers::openai::DEFAULT_MODEL;
use crate::memory::DEFAULT_WINDOW;
use crate::session::store::DEFAULT_IDLE_TTL;
use crate::session::SessionOptions;
use crate::utilities::errors::ChatError;

/// System prompt used when `CHAT_SYSTEM_PROMPT` is unset.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Where a mounted secret holding the API key is looked for by default.
pub const DEFAULT_API_KEY_FILE: &str = "/etc/secrets/GROQ_API_KEY";

/// Settings for the chat endpoint server.
#[derive(Clone)]
pub struct EndpointConfig {
    pub host: String,
    pub port: u16,
    pub api_key: String,
    /// `None` uses the provider default.
    pub model_base_url: Option<String>,
    pub model: String,
    pub system_prompt: String,
    pub memory_window: usize,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub model_timeout: Duration,
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &"<redacted>")
            .field("model_base_url", &self.model_base_url)
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt)
            .field("memory_window", &self.memory_window)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("model_timeout", &self.model_timeout)
            .finish()
    }
}

impl EndpointConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ChatError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ChatError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key_file = lookup("CHAT_API_KEY_FILE").unwrap_or_else(|| DEFAULT_API_KEY_FILE.into());
        let api_key = resolve_api_key(lookup("GROQ_API_KEY"), Path::new(&key_file))?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_var(&lookup, "PORT", 8000)?,
            api_key,
            model_base_url: non_empty(lookup("CHAT_MODEL_BASE_URL")),
            model: non_empty(lookup("CHAT_MODEL")).unwrap_or_else(|| DEFAULT_MODEL.into()),
            system_prompt: non_empty(lookup("CHAT_SYSTEM_PROMPT"))
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.into()),
            memory_window: parse_var(&lookup, "CHAT_MEMORY_WINDOW", DEFAULT_WINDOW)?,
            temperature: parse_optional_var(&lookup, "CHAT_MODEL_TEMPERATURE")?,
            max_tokens: parse_optional_var(&lookup, "CHAT_MODEL_MAX_TOKENS")?,
            model_timeout: Duration::from_secs(parse_var(&lookup, "CHAT_MODEL_TIMEOUT_SECS", 60)?),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for the chat UI server.
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub host: String,
    pub port: u16,
    pub api_url: String,
    pub api_timeout: Duration,
    pub tone_prefix: bool,
    pub normalize_input: bool,
    pub title: String,
    pub session_idle_ttl: Duration,
}

impl UiConfig {
    pub fn from_env() -> Result<Self, ChatError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ChatError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let idle_secs = parse_var(&lookup, "CHAT_SESSION_IDLE_SECS", DEFAULT_IDLE_TTL.as_secs())?;
        if idle_secs == 0 {
            return Err(ChatError::Configuration("CHAT_SESSION_IDLE_SECS must be positive".into()));
        }

        Ok(Self {
            host: lookup("UI_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_var(&lookup, "UI_PORT", 8501)?,
            api_url: non_empty(lookup("CHAT_API_URL"))
                .unwrap_or_else(|| "http://127.0.0.1:8000/chat".into()),
            api_timeout: Duration::from_secs(parse_var(&lookup, "CHAT_API_TIMEOUT_SECS", 30)?),
            tone_prefix: parse_bool(&lookup, "CHAT_TONE_PREFIX", true)?,
            normalize_input: parse_bool(&lookup, "CHAT_NORMALIZE_TEXT", false)?,
            title: non_empty(lookup("CHAT_UI_TITLE")).unwrap_or_else(|| "Chatbot".into()),
            session_idle_ttl: Duration::from_secs(idle_secs),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            tone_prefix: self.tone_prefix,
            normalize_input: self.normalize_input,
        }
    }
}

/// Pick the API key from the environment value, else from `secret_file`.
///
/// Surrounding whitespace is trimmed; a blank key counts as missing.
pub fn resolve_api_key(env_value: Option<String>, secret_file: &Path) -> Result<String, ChatError> {
    if let Some(key) = non_empty(env_value) {
        return Ok(key);
    }
    match std::fs::read_to_string(secret_file) {
        Ok(contents) => non_empty(Some(contents)).ok_or_else(|| {
            ChatError::Configuration(format!("secret file {} is empty", secret_file.display()))
        }),
        Err(e) => Err(ChatError::Configuration(format!(
            "GROQ_API_KEY is not set and secret file {} could not be read: {}",
            secret_file.display(),
            e
        ))),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ChatError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_optional_var(lookup, key)?.unwrap_or(default))
}

fn parse_optional_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ChatError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup(key)) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| ChatError::Configuration(format!("invalid {}={:?}: {}", key, raw, e))),
    }
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ChatError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = non_empty(lookup(key)) else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ChatError::Configuration(format!(
            "invalid {}={:?}: expected a boolean",
            key, raw
        ))),
    }
}
