//! Terminal host: the same controller, driven from stdin and rendered as
//! plain text lines.

use std::path::{Path, PathBuf};

use crate::errors::WidgetError;
use crate::message_log::{MemoryLog, MessageLog};
use crate::models::{EntryId, EntryKind, ImageFile};
use crate::view::FormView;

pub const HELP: &str = "\
Commands:
  <text>             ask a question
  /image <path>      select an image
  /clear             drop the selected image
  /ask <question>    ask about the selected image
  /help              show this help
  /quit              exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    SelectImage(PathBuf),
    ClearImage,
    AskImage(String),
    Help,
    Quit,
    /// A slash command that is not recognised, or is missing its argument.
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Text(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match (name, arg.is_empty()) {
        ("image", false) => Command::SelectImage(PathBuf::from(arg)),
        ("clear", _) => Command::ClearImage,
        // An empty question still goes to the controller so it can say what is missing.
        ("ask", _) => Command::AskImage(arg.to_string()),
        ("help", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Reads an image from disk, guessing its MIME type from the extension.
pub async fn load_image(path: &Path) -> Result<ImageFile, WidgetError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| WidgetError::Io(format!("{}: {e}", path.display())))?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageFile::new(name, mime.essence_str(), bytes))
}

pub fn render_entry(kind: &EntryKind) -> String {
    match kind {
        EntryKind::Message(m) => format!("[{}] {}", m.role(), m.text()),
        EntryKind::Thumbnail { data_url } => {
            let mime = data_url
                .strip_prefix("data:")
                .and_then(|rest| rest.split(';').next())
                .unwrap_or("image");
            format!("[image] ({mime})")
        }
        EntryKind::Placeholder { label } => format!("… {label}"),
    }
}

/// Prints every entry as it is appended and keeps the full log in memory.
#[derive(Debug, Default)]
pub struct TerminalLog {
    inner: MemoryLog,
}

impl TerminalLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &MemoryLog {
        &self.inner
    }
}

impl MessageLog for TerminalLog {
    fn append(&self, kind: EntryKind) -> EntryId {
        println!("{}", render_entry(&kind));
        self.inner.append(kind)
    }

    fn remove(&self, id: EntryId) -> bool {
        self.inner.remove(id)
    }
}

/// Form side of the terminal host; there are no fields to clear, so it
/// only reports preview changes.
#[derive(Debug, Default)]
pub struct TerminalView;

impl FormView for TerminalView {
    fn clear_text_input(&self) {}

    fn clear_image_form(&self) {
        println!("(image selection cleared)");
    }

    fn show_preview(&self, data_url: &str) {
        println!("(image selected, {} bytes encoded)", data_url.len());
    }

    fn hide_preview(&self) {}
}
