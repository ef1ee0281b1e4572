mod api;
mod components;
mod files;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::chat::ChatPanel;
use components::image_upload::ImageUpload;
use state::WidgetState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = WidgetState::new();
    let controller = state.controller();

    view! {
        <div class="chat-container">
            <ChatPanel state=state controller=controller />
            <ImageUpload state=state controller=controller />
        </div>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
