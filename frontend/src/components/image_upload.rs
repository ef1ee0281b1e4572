use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

use crate::files;
use crate::state::{ControllerHandle, WidgetState};

/// Image question field, file picker and preview.
#[component]
pub fn ImageUpload(state: WidgetState, controller: ControllerHandle) -> impl IntoView {
    let on_file_change = move |ev: ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let controller = controller.get_value();
        match files::selected_file(&input) {
            None => controller.select_image(None),
            Some(file) => {
                // Reads can finish out of order; the controller keeps only the latest.
                let ticket = controller.begin_image_read();
                spawn_local(async move {
                    let result = files::read_image(&file).await;
                    if !controller.finish_image_read(ticket, result) {
                        log::debug!("Ignored superseded read of '{}'", file.name());
                    }
                });
            }
        }
    };

    let on_upload = move |_| {
        let question = state.image_question.get_untracked();
        let controller = controller.get_value();
        spawn_local(async move {
            controller.submit_image_question(&question).await;
        });
    };

    let preview_display = move || {
        if state.preview.with(Option::is_some) { "block" } else { "none" }
    };

    view! {
        <div class="image-upload">
            <input
                id="image-question"
                type="text"
                placeholder="Ask something about the image..."
                prop:value=move || state.image_question.get()
                on:input=move |ev| state.image_question.set(event_target_value(&ev))
            />
            <input
                id="image-input"
                type="file"
                accept="image/*"
                node_ref={state.file_input}
                on:change=on_file_change
            />
            <button
                id="upload-button"
                on:click=on_upload
                disabled=move || state.image_busy.get()
            >
                "Upload & Ask"
            </button>
            <div
                id="image-preview-container"
                class="image-preview-container"
                style:display=preview_display
            >
                <img
                    id="image-preview"
                    alt="Preview"
                    src=move || state.preview.get().unwrap_or_default()
                />
            </div>
        </div>
    }
}
