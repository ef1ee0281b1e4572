use crate::errors::WidgetError;

pub const BACKEND_URL_VAR: &str = "CHAT_WIDGET_BACKEND_URL";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Runtime settings for native hosts, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, WidgetError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WidgetError> {
        let raw = lookup(BACKEND_URL_VAR).unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = raw.trim().trim_end_matches('/').to_string();

        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(WidgetError::Config(format!(
                "{BACKEND_URL_VAR} must be an http(s) URL, got '{raw}'"
            )));
        }

        Ok(Self { backend_url })
    }
}
