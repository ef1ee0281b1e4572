use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use chat_widget::{EntryKind, LogEntry};

use crate::state::{ControllerHandle, WidgetState};

/// Message log plus the text input row.
#[component]
pub fn ChatPanel(state: WidgetState, controller: ControllerHandle) -> impl IntoView {
    let chat_box = NodeRef::<leptos::html::Div>::new();

    // Keep the newest entry in view.
    Effect::new(move || {
        state.entries.track();
        if let Some(el) = chat_box.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let send = move || {
        let text = state.text_input.get_untracked();
        let controller = controller.get_value();
        spawn_local(async move {
            controller.submit_text(&text).await;
        });
    };

    let on_keypress = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <div id="chat-box" class="chat-box" node_ref=chat_box>
            <For
                each=move || state.entries.get()
                key=|entry| entry.id
                let:entry
            >
                <EntryView entry=entry />
            </For>
        </div>
        <div class="input-area">
            <input
                id="user-input"
                type="text"
                placeholder="Type your question here..."
                prop:value=move || state.text_input.get()
                on:input=move |ev| state.text_input.set(event_target_value(&ev))
                on:keypress=on_keypress
            />
            <button
                id="send-button"
                on:click=move |_| send()
                disabled=move || state.text_busy.get()
            >
                "Send"
            </button>
        </div>
    }
}

/// A single log entry.
#[component]
fn EntryView(entry: LogEntry) -> impl IntoView {
    match entry.kind {
        EntryKind::Message(message) => {
            let class = format!("message {}", message.role().css_class());
            let text = message.text().to_string();
            view! {
                <div class=class>
                    <p>{text}</p>
                </div>
            }
            .into_any()
        }
        EntryKind::Thumbnail { data_url } => view! {
            <div class="message user-message">
                <img class="uploaded-image" src=data_url alt="Uploaded image" />
            </div>
        }
        .into_any(),
        EntryKind::Placeholder { label } => view! { <div class="loading">{label}</div> }.into_any(),
    }
}
