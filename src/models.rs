use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Bot,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
            Role::System => "system",
        }
    }

    /// Class the page stylesheet uses for entries of this role.
    pub fn css_class(&self) -> &'static str {
        match self {
            Role::User => "user-message",
            Role::Bot => "bot-message",
            Role::System => "system-message",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered chat line. Fields are private so a message cannot change
/// once it is in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
    role: Role,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self { text: text.into(), role }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Role::Bot, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Message(Message),
    /// The submitted image, rendered inline in the log.
    Thumbnail { data_url: String },
    /// Transient "in flight" marker.
    Placeholder { label: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: EntryId,
    pub kind: EntryKind,
}

impl LogEntry {
    pub fn message(&self) -> Option<&Message> {
        match &self.kind {
            EntryKind::Message(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, EntryKind::Placeholder { .. })
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub question: String,
}

impl ChatRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self { question: question.into() }
    }
}

/// What the backend answered with a 2xx status: exactly one of an answer
/// or an application-level error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawReply")]
pub enum BackendReply {
    Answer(String),
    Error(String),
}

/// Wire shape of a reply before the answer/error choice is made.
#[derive(Deserialize)]
struct RawReply {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl TryFrom<RawReply> for BackendReply {
    type Error = String;

    fn try_from(raw: RawReply) -> Result<Self, String> {
        match (raw.answer, raw.error) {
            (Some(answer), _) if !answer.is_empty() => Ok(BackendReply::Answer(answer)),
            (_, Some(error)) => Ok(BackendReply::Error(error)),
            _ => Err("reply carries neither an answer nor an error".to_string()),
        }
    }
}

/// The two kinds of user action that talk to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Text,
    Image,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Text => "text",
            Action::Image => "image",
        }
    }
}

/// A file the user picked, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    name: String,
    mime: String,
    bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime = mime.into();
        let mime = if mime.trim().is_empty() { FALLBACK_MIME.to_string() } else { mime };
        Self { name: name.into(), mime, bytes }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `data:` URL suitable for an `<img src>`.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// The current selection together with its decoded preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImage {
    pub serial: u64,
    pub file: ImageFile,
    pub preview: String,
}
