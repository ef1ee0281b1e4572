use gloo_net::http::{Request, Response};
use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use chat_widget::backend::{endpoint, CHAT_PATH, PROCESS_PATH};
use chat_widget::{BackendReply, ChatBackend, ChatRequest, ImageFile, WidgetError};

/// `fetch`-based transport. The widget is served by its backend, so the
/// default base URL is empty and requests go to the page's own origin.
#[derive(Clone, Debug, Default)]
pub struct FetchBackend {
    base_url: String,
}

impl FetchBackend {
    pub fn same_origin() -> Self {
        Self::default()
    }
}

impl ChatBackend for FetchBackend {
    async fn ask(&self, request: &ChatRequest) -> Result<BackendReply, WidgetError> {
        let resp = Request::post(&endpoint(&self.base_url, CHAT_PATH))
            .json(request)
            .map_err(|e| WidgetError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| WidgetError::network(e.to_string()))?;

        read_reply(resp).await
    }

    async fn analyze(&self, question: &str, image: &ImageFile) -> Result<BackendReply, WidgetError> {
        let form = image_form(question, image)
            .map_err(|e| WidgetError::Encode(format!("Failed to build form data: {e:?}")))?;

        let resp = Request::post(&endpoint(&self.base_url, PROCESS_PATH))
            .body(form)
            .map_err(|e| WidgetError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| WidgetError::network(e.to_string()))?;

        read_reply(resp).await
    }
}

async fn read_reply(resp: Response) -> Result<BackendReply, WidgetError> {
    if !resp.ok() {
        return Err(WidgetError::Status { status: resp.status() });
    }

    resp.json::<BackendReply>()
        .await
        .map_err(|e| WidgetError::decode(e.to_string()))
}

/// Multipart body with a `question` text field and an `image` file part.
/// The browser sets the multipart boundary header itself.
fn image_form(question: &str, image: &ImageFile) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    form.append_with_str("question", question)?;

    let bytes = Uint8Array::from(image.bytes());
    let options = BlobPropertyBag::new();
    options.set_type(image.mime());
    let blob = Blob::new_with_u8_array_sequence_and_options(&Array::of1(&bytes), &options)?;
    form.append_with_blob_and_filename("image", &blob, image.name())?;

    Ok(form)
}
