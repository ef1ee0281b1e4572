//! The seam between the controller and whatever carries requests to the
//! `/chat` and `/process` endpoints.

#[cfg(not(target_arch = "wasm32"))]
pub mod http;

use crate::errors::WidgetError;
use crate::models::{BackendReply, ChatRequest, ImageFile};

pub const CHAT_PATH: &str = "/chat";
pub const PROCESS_PATH: &str = "/process";

/// Transport to the chat backend. A non-2xx status, a network failure and an
/// undecodable body all come back as `Err`.
#[allow(async_fn_in_trait)]
pub trait ChatBackend {
    async fn ask(&self, request: &ChatRequest) -> Result<BackendReply, WidgetError>;

    async fn analyze(&self, question: &str, image: &ImageFile) -> Result<BackendReply, WidgetError>;
}

/// Joins a base URL and an endpoint path without doubling the slash.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}
