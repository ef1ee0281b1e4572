use std::rc::Rc;

use leptos::html::Input;
use leptos::prelude::*;

use chat_widget::{Action, ChatController, EntryId, EntryKind, FormView, LogEntry, MessageLog};

use crate::api::FetchBackend;

pub type WidgetController = ChatController<FetchBackend, WidgetState, WidgetState>;

/// The controller lives in a local arena slot so event handlers can copy
/// the handle around freely.
pub type ControllerHandle = StoredValue<Rc<WidgetController>, LocalStorage>;

/// Reactive widget state. It is both the message log and the form view the
/// controller writes to; components only read it.
#[derive(Clone, Copy)]
pub struct WidgetState {
    pub entries: RwSignal<Vec<LogEntry>>,
    pub text_input: RwSignal<String>,
    pub image_question: RwSignal<String>,
    pub preview: RwSignal<Option<String>>,
    pub text_busy: RwSignal<bool>,
    pub image_busy: RwSignal<bool>,
    pub file_input: NodeRef<Input>,
    next_id: StoredValue<u64>,
}

impl WidgetState {
    pub fn new() -> Self {
        Self {
            entries: RwSignal::new(Vec::new()),
            text_input: RwSignal::new(String::new()),
            image_question: RwSignal::new(String::new()),
            preview: RwSignal::new(None),
            text_busy: RwSignal::new(false),
            image_busy: RwSignal::new(false),
            file_input: NodeRef::new(),
            next_id: StoredValue::new(0),
        }
    }

    /// Builds the controller around this state and stores it.
    pub fn controller(self) -> ControllerHandle {
        let controller = ChatController::new(FetchBackend::same_origin(), self, self);
        StoredValue::new_local(Rc::new(controller))
    }
}

impl MessageLog for WidgetState {
    fn append(&self, kind: EntryKind) -> EntryId {
        let id = EntryId(self.next_id.get_value());
        self.next_id.set_value(id.0 + 1);
        self.entries.update(|entries| entries.push(LogEntry { id, kind }));
        id
    }

    fn remove(&self, id: EntryId) -> bool {
        let mut removed = false;
        self.entries.update(|entries| {
            if let Some(pos) = entries.iter().position(|e| e.id == id) {
                entries.remove(pos);
                removed = true;
            }
        });
        removed
    }
}

impl FormView for WidgetState {
    fn clear_text_input(&self) {
        self.text_input.set(String::new());
    }

    fn clear_image_form(&self) {
        self.image_question.set(String::new());
        // Resetting the value does not fire `change`, so the controller's
        // own selection is cleared separately.
        if let Some(input) = self.file_input.get_untracked() {
            input.set_value("");
        }
    }

    fn show_preview(&self, data_url: &str) {
        self.preview.set(Some(data_url.to_string()));
    }

    fn hide_preview(&self) {
        self.preview.set(None);
    }

    fn set_busy(&self, action: Action, busy: bool) {
        match action {
            Action::Text => self.text_busy.set(busy),
            Action::Image => self.image_busy.set(busy),
        }
    }
}
