//! Chat widget core: a controller that turns user actions into requests
//! against a `/chat` + `/process` backend and renders the results into an
//! append-only message log. Hosts plug in the log, the form view and the
//! transport.

pub mod backend;
pub mod errors;
pub mod message_log;
pub mod models;
pub mod service;
pub mod view;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

pub use backend::ChatBackend;
pub use errors::WidgetError;
pub use message_log::{MemoryLog, MessageLog, PendingEntry};
pub use models::{Action, BackendReply, ChatRequest, EntryId, EntryKind, ImageFile, LogEntry, Message, Role};
pub use service::chat_controller::{ChatController, Outcome, ReadTicket};
pub use view::FormView;
