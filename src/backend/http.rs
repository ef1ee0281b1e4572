use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use tracing::{debug, error};

use crate::backend::{endpoint, ChatBackend, CHAT_PATH, PROCESS_PATH};
use crate::errors::WidgetError;
use crate::models::{BackendReply, ChatRequest, ImageFile};

/// `reqwest` transport used by native hosts.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, WidgetError> {
        // No timeout: a request stays pending until the server or the OS gives up.
        let client = Client::builder()
            .build()
            .map_err(|e| WidgetError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ChatBackend for HttpBackend {
    async fn ask(&self, request: &ChatRequest) -> Result<BackendReply, WidgetError> {
        let url = endpoint(&self.base_url, CHAT_PATH);
        debug!("POST {url}");

        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Chat request to {url} failed: {e}");
                WidgetError::network(e.to_string())
            })?;

        read_reply(resp).await
    }

    async fn analyze(&self, question: &str, image: &ImageFile) -> Result<BackendReply, WidgetError> {
        let url = endpoint(&self.base_url, PROCESS_PATH);
        debug!("POST {url} ({} bytes, {})", image.bytes().len(), image.mime());

        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.name().to_string())
            .mime_str(image.mime())
            .map_err(|e| WidgetError::Encode(format!("bad MIME type '{}': {e}", image.mime())))?;
        let form = Form::new()
            .text("question", question.to_string())
            .part("image", part);

        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Image request to {url} failed: {e}");
                WidgetError::network(e.to_string())
            })?;

        read_reply(resp).await
    }
}

async fn read_reply(resp: Response) -> Result<BackendReply, WidgetError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(WidgetError::Status { status: status.as_u16() });
    }

    resp.json::<BackendReply>()
        .await
        .map_err(|e| WidgetError::decode(e.to_string()))
}
