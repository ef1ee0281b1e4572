use thiserror::Error;

/// Everything that can go wrong between the widget and its backend.
/// The `Display` text is what ends up in the chat log after the
/// context prefix ("Request failed: ", "Image analysis failed: ").
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    // ── Transport errors ─────────────────────────────────────────────────────
    #[error("{0}")]
    Network(String),

    #[error("Network request failed (HTTP {status})")]
    Status { status: u16 },

    #[error("Invalid response: {0}")]
    Decode(String),

    // ── Request building ─────────────────────────────────────────────────────
    #[error("Could not encode request: {0}")]
    Encode(String),

    // ── Local resources ──────────────────────────────────────────────────────
    #[error("Could not read file: {0}")]
    Io(String),

    // ── Startup ──────────────────────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WidgetError {
    pub fn network(message: impl Into<String>) -> Self {
        WidgetError::Network(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        WidgetError::Decode(message.into())
    }

    /// True for failures that happened after the request left the client.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            WidgetError::Network(_) | WidgetError::Status { .. } | WidgetError::Decode(_)
        )
    }
}
