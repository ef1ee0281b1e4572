//! The visible message log and the placeholder guard that lives in it.

use std::cell::{Cell, RefCell};

use tracing::debug;

use crate::models::{EntryId, EntryKind, LogEntry, Message};

/// Append-only sink for chat entries. Only placeholders are ever removed.
pub trait MessageLog {
    fn append(&self, kind: EntryKind) -> EntryId;

    /// Detaches the entry. Returns `false` when it was already gone.
    fn remove(&self, id: EntryId) -> bool;
}

impl<L: MessageLog + ?Sized> MessageLog for &L {
    fn append(&self, kind: EntryKind) -> EntryId {
        (**self).append(kind)
    }

    fn remove(&self, id: EntryId) -> bool {
        (**self).remove(id)
    }
}

/// Placeholder that removes itself from the log when settled or dropped.
pub struct PendingEntry<'a, L: MessageLog + ?Sized> {
    log: &'a L,
    id: EntryId,
}

impl<'a, L: MessageLog + ?Sized> PendingEntry<'a, L> {
    pub fn open(log: &'a L, label: &str) -> Self {
        let id = log.append(EntryKind::Placeholder { label: label.to_string() });
        Self { log, id }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Consumes the guard; the removal itself happens in `Drop`.
    pub fn settle(self) {}
}

impl<L: MessageLog + ?Sized> Drop for PendingEntry<'_, L> {
    fn drop(&mut self) {
        if !self.log.remove(self.id) {
            debug!("placeholder {:?} was already detached", self.id);
        }
    }
}

/// In-memory log used by tests and by the terminal host.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: RefCell<Vec<LogEntry>>,
    next_id: Cell<u64>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.entries
            .borrow()
            .iter()
            .filter_map(|e| e.message().cloned())
            .collect()
    }

    pub fn placeholder_count(&self) -> usize {
        self.entries.borrow().iter().filter(|e| e.is_placeholder()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl MessageLog for MemoryLog {
    fn append(&self, kind: EntryKind) -> EntryId {
        let id = EntryId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push(LogEntry { id, kind });
        id
    }

    fn remove(&self, id: EntryId) -> bool {
        let mut entries = self.entries.borrow_mut();
        match entries.iter().position(|e| e.id == id) {
            Some(pos) => {
                entries.remove(pos);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_assigned_in_append_order() {
        let log = MemoryLog::new();
        let a = log.append(EntryKind::Message(Message::user("a")));
        let b = log.append(EntryKind::Message(Message::bot("b")));
        assert!(a < b);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn second_remove_is_a_no_op() {
        let log = MemoryLog::new();
        let id = log.append(EntryKind::Placeholder { label: "Thinking...".into() });
        assert!(log.remove(id));
        assert!(!log.remove(id));
        assert!(log.is_empty());
    }

    #[test]
    fn pending_entry_is_removed_on_settle() {
        let log = MemoryLog::new();
        let pending = PendingEntry::open(&log, "Thinking...");
        assert_eq!(log.placeholder_count(), 1);
        pending.settle();
        assert_eq!(log.placeholder_count(), 0);
    }

    #[test]
    fn pending_entry_is_removed_when_dropped_early() {
        let log = MemoryLog::new();
        {
            let _pending = PendingEntry::open(&log, "Analyzing image...");
            log.append(EntryKind::Message(Message::system("interleaved")));
        }
        assert_eq!(log.placeholder_count(), 0);
        assert_eq!(log.messages(), vec![Message::system("interleaved")]);
    }

    #[test]
    fn pending_entry_tolerates_external_removal() {
        let log = MemoryLog::new();
        let pending = PendingEntry::open(&log, "Thinking...");
        assert!(log.remove(pending.id()));
        pending.settle();
        assert!(log.is_empty());
    }
}
