use js_sys::Uint8Array;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

use chat_widget::{ImageFile, WidgetError};

/// First file currently chosen in a file input, if any.
pub fn selected_file(input: &HtmlInputElement) -> Option<File> {
    input.files().and_then(|files| files.get(0))
}

/// Reads the whole file into memory.
pub async fn read_image(file: &File) -> Result<ImageFile, WidgetError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| WidgetError::Io(format!("{}: {e:?}", file.name())))?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(ImageFile::new(file.name(), file.type_(), bytes))
}
