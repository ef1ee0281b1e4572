use std::cell::{Cell, RefCell};

use tracing::{debug, error, info, warn};

use crate::backend::ChatBackend;
use crate::errors::WidgetError;
use crate::message_log::{MessageLog, PendingEntry};
use crate::models::{Action, BackendReply, ChatRequest, EntryKind, ImageFile, Message, PendingImage};
use crate::view::FormView;

pub const THINKING_LABEL: &str = "Thinking...";
pub const ANALYZING_LABEL: &str = "Analyzing image...";

pub const ERROR_PREFIX: &str = "Error: ";
pub const REQUEST_FAILED_PREFIX: &str = "Request failed: ";
pub const IMAGE_FAILED_PREFIX: &str = "Image analysis failed: ";

pub const MISSING_QUESTION: &str = "Please enter a question about the image.";
pub const MISSING_IMAGE: &str = "Please select an image to upload.";

/// How a single submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Blank input; nothing happened.
    Ignored,
    /// The same kind of action is still waiting on the backend.
    Busy,
    /// Local validation failed; no request was issued.
    Invalid,
    Answered,
    /// 2xx reply carrying an `error` field.
    BackendError,
    /// Transport failure.
    Failed,
}

/// Identifies one asynchronous file read started by the host. Only the
/// most recent read may turn into a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket(u64);

/// Marks one action kind as in flight until dropped.
struct InFlight<'a, V: FormView> {
    flag: &'a Cell<bool>,
    view: &'a V,
    action: Action,
}

impl<'a, V: FormView> InFlight<'a, V> {
    fn acquire(flag: &'a Cell<bool>, view: &'a V, action: Action) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        view.set_busy(action, true);
        Some(Self { flag, view, action })
    }
}

impl<V: FormView> Drop for InFlight<'_, V> {
    fn drop(&mut self) {
        self.flag.set(false);
        self.view.set_busy(self.action, false);
    }
}

/// Drives the widget: validates input, writes the log, talks to the backend.
///
/// All state uses interior mutability so every operation takes `&self`;
/// hosts share one controller between event handlers. No `RefCell` borrow
/// is ever held across an `.await`.
pub struct ChatController<B, L, V> {
    backend: B,
    log: L,
    view: V,
    pending_image: RefCell<Option<PendingImage>>,
    next_selection: Cell<u64>,
    read_generation: Cell<u64>,
    text_in_flight: Cell<bool>,
    image_in_flight: Cell<bool>,
}

impl<B, L, V> ChatController<B, L, V>
where
    B: ChatBackend,
    L: MessageLog,
    V: FormView,
{
    pub fn new(backend: B, log: L, view: V) -> Self {
        Self {
            backend,
            log,
            view,
            pending_image: RefCell::new(None),
            next_selection: Cell::new(0),
            read_generation: Cell::new(0),
            text_in_flight: Cell::new(false),
            image_in_flight: Cell::new(false),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn pending_image(&self) -> Option<PendingImage> {
        self.pending_image.borrow().clone()
    }

    pub fn is_busy(&self, action: Action) -> bool {
        match action {
            Action::Text => self.text_in_flight.get(),
            Action::Image => self.image_in_flight.get(),
        }
    }

    /// Sends a free-text question to `/chat`.
    pub async fn submit_text(&self, input: &str) -> Outcome {
        let question = input.trim();
        if question.is_empty() {
            return Outcome::Ignored;
        }

        let Some(_in_flight) = InFlight::acquire(&self.text_in_flight, &self.view, Action::Text)
        else {
            warn!("Text submission rejected: previous request still pending");
            return Outcome::Busy;
        };

        self.append(Message::user(question));
        self.view.clear_text_input();

        let pending = PendingEntry::open(&self.log, THINKING_LABEL);
        let result = self.backend.ask(&ChatRequest::new(question)).await;
        pending.settle();

        self.finish(Action::Text, result)
    }

    /// Replaces (or with `None`, clears) the pending image selection.
    /// Any file read still in progress is superseded.
    pub fn select_image(&self, file: Option<ImageFile>) {
        self.read_generation.set(self.read_generation.get() + 1);
        match file {
            Some(file) => {
                let serial = self.next_selection.get();
                self.next_selection.set(serial + 1);
                let preview = file.data_url();
                debug!("Selected image '{}' ({} bytes)", file.name(), file.bytes().len());
                *self.pending_image.borrow_mut() = Some(PendingImage {
                    serial,
                    file,
                    preview: preview.clone(),
                });
                self.view.show_preview(&preview);
            }
            None => {
                self.pending_image.borrow_mut().take();
                self.view.hide_preview();
            }
        }
    }

    /// Called when the host starts reading a chosen file in the background.
    pub fn begin_image_read(&self) -> ReadTicket {
        let generation = self.read_generation.get() + 1;
        self.read_generation.set(generation);
        ReadTicket(generation)
    }

    /// Applies a finished read unless a newer change superseded it. A failed
    /// read leaves no selection and a hidden preview. Returns whether the
    /// result was applied.
    pub fn finish_image_read(&self, ticket: ReadTicket, result: Result<ImageFile, WidgetError>) -> bool {
        if ticket.0 != self.read_generation.get() {
            debug!("Dropping stale image read {ticket:?}");
            return false;
        }
        match result {
            Ok(file) => self.select_image(Some(file)),
            Err(e) => {
                error!("Image preview failed: {e}");
                self.select_image(None);
            }
        }
        true
    }

    /// Sends `question` together with the pending image to `/process`.
    pub async fn submit_image_question(&self, question: &str) -> Outcome {
        let question = question.trim();
        let selected = self.pending_image();

        if question.is_empty() {
            self.append(Message::system(MISSING_QUESTION));
        }
        if selected.is_none() {
            self.append(Message::system(MISSING_IMAGE));
        }
        let Some(selected) = selected.filter(|_| !question.is_empty()) else {
            return Outcome::Invalid;
        };

        let Some(_in_flight) = InFlight::acquire(&self.image_in_flight, &self.view, Action::Image)
        else {
            warn!("Image submission rejected: previous request still pending");
            return Outcome::Busy;
        };

        self.append(Message::user(question));
        self.log.append(EntryKind::Thumbnail { data_url: selected.preview.clone() });

        let pending = PendingEntry::open(&self.log, ANALYZING_LABEL);
        let result = self.backend.analyze(question, &selected.file).await;
        pending.settle();

        if result.is_ok() {
            self.clear_selection(selected.serial);
        }
        self.finish(Action::Image, result)
    }

    // ── Helpers ──────────────────────────────────────────────────────────────

    fn append(&self, message: Message) {
        self.log.append(EntryKind::Message(message));
    }

    fn finish(&self, action: Action, result: Result<BackendReply, WidgetError>) -> Outcome {
        match result {
            Ok(BackendReply::Answer(answer)) => {
                info!("Received {} answer ({} chars)", action.as_str(), answer.chars().count());
                self.append(Message::bot(answer));
                Outcome::Answered
            }
            Ok(BackendReply::Error(message)) => {
                warn!("Backend rejected {} request: {message}", action.as_str());
                self.append(Message::system(format!("{ERROR_PREFIX}{message}")));
                Outcome::BackendError
            }
            Err(e) => {
                if e.is_transport() {
                    error!("{} request failed: {e}", action.as_str());
                } else {
                    warn!("{} request not sent: {e}", action.as_str());
                }
                let prefix = match action {
                    Action::Text => REQUEST_FAILED_PREFIX,
                    Action::Image => IMAGE_FAILED_PREFIX,
                };
                self.append(Message::system(format!("{prefix}{e}")));
                Outcome::Failed
            }
        }
    }

    /// Drops the selection only if it is still the one that was submitted.
    fn clear_selection(&self, serial: u64) {
        let cleared = {
            let mut pending = self.pending_image.borrow_mut();
            if pending.as_ref().is_some_and(|p| p.serial == serial) {
                *pending = None;
                true
            } else {
                false
            }
        };

        if cleared {
            self.view.clear_image_form();
            self.view.hide_preview();
        } else {
            debug!("Image selection changed during request; keeping the new one");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use futures_util::future::join;

    use super::*;
    use crate::message_log::MemoryLog;
    use crate::models::{EntryKind, Role};

    // ── Test doubles ─────────────────────────────────────────────────────────

    #[derive(Default)]
    struct MockBackend {
        replies: RefCell<VecDeque<Result<BackendReply, WidgetError>>>,
        asked: RefCell<Vec<ChatRequest>>,
        analyzed: RefCell<Vec<(String, ImageFile)>>,
        /// Suspend once before replying so other futures can run.
        yield_first: bool,
    }

    impl MockBackend {
        fn replying(replies: Vec<Result<BackendReply, WidgetError>>) -> Self {
            Self { replies: RefCell::new(replies.into()), ..Self::default() }
        }

        fn slow(mut self) -> Self {
            self.yield_first = true;
            self
        }

        async fn next_reply(&self) -> Result<BackendReply, WidgetError> {
            if self.yield_first {
                tokio::task::yield_now().await;
            }
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(WidgetError::network("no scripted reply")))
        }

        fn request_count(&self) -> usize {
            self.asked.borrow().len() + self.analyzed.borrow().len()
        }
    }

    impl ChatBackend for MockBackend {
        async fn ask(&self, request: &ChatRequest) -> Result<BackendReply, WidgetError> {
            self.asked.borrow_mut().push(request.clone());
            self.next_reply().await
        }

        async fn analyze(&self, question: &str, image: &ImageFile) -> Result<BackendReply, WidgetError> {
            self.analyzed.borrow_mut().push((question.to_string(), image.clone()));
            self.next_reply().await
        }
    }

    #[derive(Default)]
    struct RecordingView {
        text_cleared: Cell<usize>,
        image_cleared: Cell<usize>,
        preview: RefCell<Option<String>>,
        busy_changes: RefCell<Vec<(Action, bool)>>,
    }

    impl FormView for RecordingView {
        fn clear_text_input(&self) {
            self.text_cleared.set(self.text_cleared.get() + 1);
        }

        fn clear_image_form(&self) {
            self.image_cleared.set(self.image_cleared.get() + 1);
        }

        fn show_preview(&self, data_url: &str) {
            *self.preview.borrow_mut() = Some(data_url.to_string());
        }

        fn hide_preview(&self) {
            self.preview.borrow_mut().take();
        }

        fn set_busy(&self, action: Action, busy: bool) {
            self.busy_changes.borrow_mut().push((action, busy));
        }
    }

    type TestController = ChatController<MockBackend, MemoryLog, RecordingView>;

    fn controller(backend: MockBackend) -> TestController {
        ChatController::new(backend, MemoryLog::new(), RecordingView::default())
    }

    fn answer(text: &str) -> Result<BackendReply, WidgetError> {
        Ok(BackendReply::Answer(text.to_string()))
    }

    fn photo() -> ImageFile {
        ImageFile::new("cat.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff])
    }

    fn transcript(c: &TestController) -> Vec<(Role, String)> {
        c.log()
            .messages()
            .into_iter()
            .map(|m| (m.role(), m.text().to_string()))
            .collect()
    }

    // ── submit_text ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn answer_is_rendered_as_bot_message() {
        let c = controller(MockBackend::replying(vec![answer("Hi there")]));

        assert_eq!(c.submit_text("Hello").await, Outcome::Answered);

        assert_eq!(
            transcript(&c),
            vec![(Role::User, "Hello".into()), (Role::Bot, "Hi there".into())]
        );
        assert_eq!(c.log().placeholder_count(), 0);
        assert_eq!(c.backend().asked.borrow()[0], ChatRequest::new("Hello"));
        assert_eq!(c.view().text_cleared.get(), 1);
    }

    #[tokio::test]
    async fn network_failure_is_rendered_with_request_failed_prefix() {
        let c = controller(MockBackend::replying(vec![Err(WidgetError::network(
            "connection refused",
        ))]));

        assert_eq!(c.submit_text("Hello").await, Outcome::Failed);

        assert_eq!(
            transcript(&c),
            vec![
                (Role::User, "Hello".into()),
                (Role::System, "Request failed: connection refused".into()),
            ]
        );
        assert_eq!(c.log().placeholder_count(), 0);
    }

    #[tokio::test]
    async fn non_success_status_is_a_transport_failure() {
        let c = controller(MockBackend::replying(vec![Err(WidgetError::Status { status: 500 })]));

        c.submit_text("Hello").await;

        assert_eq!(
            transcript(&c).last().unwrap(),
            &(Role::System, "Request failed: Network request failed (HTTP 500)".to_string())
        );
    }

    #[tokio::test]
    async fn backend_error_field_is_rendered_as_system_message() {
        let c = controller(MockBackend::replying(vec![Ok(BackendReply::Error(
            "model overloaded".into(),
        ))]));

        assert_eq!(c.submit_text("Hello").await, Outcome::BackendError);

        assert_eq!(
            transcript(&c).last().unwrap(),
            &(Role::System, "Error: model overloaded".to_string())
        );
    }

    #[tokio::test]
    async fn blank_input_changes_nothing() {
        let c = controller(MockBackend::default());

        assert_eq!(c.submit_text("").await, Outcome::Ignored);
        assert_eq!(c.submit_text("   \t\n").await, Outcome::Ignored);

        assert!(c.log().is_empty());
        assert_eq!(c.backend().request_count(), 0);
        assert_eq!(c.view().text_cleared.get(), 0);
        assert!(c.view().busy_changes.borrow().is_empty());
    }

    #[tokio::test]
    async fn input_is_trimmed_before_sending() {
        let c = controller(MockBackend::replying(vec![answer("ok")]));

        c.submit_text("  What time is it?  ").await;

        assert_eq!(c.backend().asked.borrow()[0].question, "What time is it?");
        assert_eq!(transcript(&c)[0], (Role::User, "What time is it?".to_string()));
    }

    #[tokio::test]
    async fn every_submission_ends_with_exactly_one_terminal_entry() {
        let c = controller(MockBackend::replying(vec![
            answer("one"),
            Ok(BackendReply::Error("two".into())),
            Err(WidgetError::decode("three")),
        ]));

        for question in ["a", "b", "c"] {
            let before = c.log().len();
            c.submit_text(question).await;
            assert_eq!(c.log().len(), before + 2);
            assert_eq!(c.log().placeholder_count(), 0);
        }
    }

    // ── In-flight gating ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn overlapping_text_submission_is_rejected() {
        let c = controller(MockBackend::replying(vec![answer("first reply")]).slow());

        let (first, second) = join(c.submit_text("first"), c.submit_text("second")).await;

        assert_eq!(first, Outcome::Answered);
        assert_eq!(second, Outcome::Busy);
        assert_eq!(
            transcript(&c),
            vec![(Role::User, "first".into()), (Role::Bot, "first reply".into())]
        );
        assert_eq!(c.backend().asked.borrow().len(), 1);
        assert_eq!(c.view().text_cleared.get(), 1);
    }

    #[tokio::test]
    async fn text_and_image_submissions_may_overlap() {
        let c = controller(
            MockBackend::replying(vec![answer("text reply"), answer("image reply")]).slow(),
        );
        c.select_image(Some(photo()));

        let (text, image) = join(c.submit_text("hi"), c.submit_image_question("what?")).await;

        assert_eq!(text, Outcome::Answered);
        assert_eq!(image, Outcome::Answered);
        assert_eq!(c.log().placeholder_count(), 0);
        assert_eq!(c.backend().request_count(), 2);
    }

    #[tokio::test]
    async fn busy_flag_is_reported_to_the_view() {
        let c = controller(MockBackend::replying(vec![answer("ok")]));

        c.submit_text("Hello").await;

        assert_eq!(
            *c.view().busy_changes.borrow(),
            vec![(Action::Text, true), (Action::Text, false)]
        );
        assert!(!c.is_busy(Action::Text));
    }

    #[tokio::test]
    async fn dropping_a_pending_submission_releases_placeholder_and_flag() {
        let c = controller(MockBackend::replying(vec![answer("never seen")]).slow());

        let mut fut = Box::pin(c.submit_text("Hello"));
        assert!(futures_util::poll!(fut.as_mut()).is_pending());
        assert_eq!(c.log().placeholder_count(), 1);
        assert!(c.is_busy(Action::Text));

        drop(fut);

        assert_eq!(c.log().placeholder_count(), 0);
        assert!(!c.is_busy(Action::Text));
        assert_eq!(transcript(&c), vec![(Role::User, "Hello".into())]);
    }

    #[tokio::test]
    async fn thinking_placeholder_is_shown_while_text_is_pending() {
        let c = controller(MockBackend::replying(vec![answer("ok")]).slow());

        let mut fut = Box::pin(c.submit_text("Hello"));
        assert!(futures_util::poll!(fut.as_mut()).is_pending());
        assert_eq!(
            c.log().entries().last().unwrap().kind,
            EntryKind::Placeholder { label: THINKING_LABEL.into() }
        );

        assert_eq!(fut.await, Outcome::Answered);
        assert_eq!(c.log().placeholder_count(), 0);
    }

    #[tokio::test]
    async fn analyzing_placeholder_is_shown_while_image_is_pending() {
        let c = controller(MockBackend::replying(vec![answer("A cat.")]).slow());
        c.select_image(Some(photo()));

        let mut fut = Box::pin(c.submit_image_question("What is this?"));
        assert!(futures_util::poll!(fut.as_mut()).is_pending());
        assert_eq!(
            c.log().entries().last().unwrap().kind,
            EntryKind::Placeholder { label: ANALYZING_LABEL.into() }
        );

        assert_eq!(fut.await, Outcome::Answered);
        assert_eq!(c.log().placeholder_count(), 0);
    }

    // ── Image selection ──────────────────────────────────────────────────────

    #[test]
    fn selecting_an_image_shows_its_preview() {
        let c = controller(MockBackend::default());

        c.select_image(Some(photo()));

        assert_eq!(c.view().preview.borrow().as_deref(), Some("data:image/jpeg;base64,/9j/"));
        assert_eq!(c.pending_image().unwrap().file, photo());
    }

    #[test]
    fn select_then_clear_returns_to_hidden_state() {
        let c = controller(MockBackend::default());

        c.select_image(Some(photo()));
        c.select_image(None);

        assert!(c.view().preview.borrow().is_none());
        assert!(c.pending_image().is_none());

        c.select_image(None);
        assert!(c.view().preview.borrow().is_none());
        assert!(c.pending_image().is_none());
    }

    #[test]
    fn new_selection_replaces_the_previous_one() {
        let c = controller(MockBackend::default());
        let other = ImageFile::new("dog.png", "image/png", vec![1, 2]);

        c.select_image(Some(photo()));
        c.select_image(Some(other.clone()));

        let pending = c.pending_image().unwrap();
        assert_eq!(pending.file, other);
        assert_eq!(pending.serial, 1);
    }

    #[test]
    fn stale_read_does_not_override_a_newer_pick() {
        let c = controller(MockBackend::default());
        let other = ImageFile::new("dog.png", "image/png", vec![1, 2]);

        let first = c.begin_image_read();
        let second = c.begin_image_read();
        assert!(c.finish_image_read(second, Ok(other.clone())));
        assert!(!c.finish_image_read(first, Ok(photo())));

        assert_eq!(c.pending_image().unwrap().file, other);
        assert_eq!(c.view().preview.borrow().as_deref(), Some(other.data_url().as_str()));
    }

    #[test]
    fn stale_read_does_not_undo_a_clear() {
        let c = controller(MockBackend::default());

        let ticket = c.begin_image_read();
        c.select_image(None);
        assert!(!c.finish_image_read(ticket, Ok(photo())));

        assert!(c.pending_image().is_none());
        assert!(c.view().preview.borrow().is_none());
    }

    #[test]
    fn failed_read_drops_the_previous_selection() {
        let c = controller(MockBackend::default());
        c.select_image(Some(photo()));

        let ticket = c.begin_image_read();
        assert!(c.finish_image_read(ticket, Err(WidgetError::Io("cat.jpg: aborted".into()))));

        assert!(c.pending_image().is_none());
        assert!(c.view().preview.borrow().is_none());
        assert!(c.log().is_empty());
    }

    #[test]
    fn fresh_read_becomes_the_selection() {
        let c = controller(MockBackend::default());

        let ticket = c.begin_image_read();
        assert!(c.finish_image_read(ticket, Ok(photo())));

        assert_eq!(c.pending_image().unwrap().file, photo());
    }

    // ── submit_image_question ────────────────────────────────────────────────

    #[tokio::test]
    async fn missing_image_is_reported_without_request() {
        let c = controller(MockBackend::default());

        assert_eq!(c.submit_image_question("What is this?").await, Outcome::Invalid);

        assert_eq!(transcript(&c), vec![(Role::System, MISSING_IMAGE.into())]);
        assert_eq!(c.backend().request_count(), 0);
    }

    #[tokio::test]
    async fn missing_question_is_reported_without_request() {
        let c = controller(MockBackend::default());
        c.select_image(Some(photo()));

        assert_eq!(c.submit_image_question("  ").await, Outcome::Invalid);

        assert_eq!(transcript(&c), vec![(Role::System, MISSING_QUESTION.into())]);
        assert_eq!(c.backend().request_count(), 0);
        assert!(c.pending_image().is_some());
    }

    #[tokio::test]
    async fn both_missing_preconditions_are_reported() {
        let c = controller(MockBackend::default());

        c.submit_image_question("").await;

        assert_eq!(
            transcript(&c),
            vec![(Role::System, MISSING_QUESTION.into()), (Role::System, MISSING_IMAGE.into())]
        );
    }

    #[tokio::test]
    async fn backend_error_on_image_still_clears_the_form() {
        let c = controller(MockBackend::replying(vec![Ok(BackendReply::Error(
            "unsupported format".into(),
        ))]));
        c.select_image(Some(photo()));

        assert_eq!(c.submit_image_question("What is this?").await, Outcome::BackendError);

        let kinds: Vec<EntryKind> = c.log().entries().into_iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EntryKind::Message(Message::user("What is this?")),
                EntryKind::Thumbnail { data_url: photo().data_url() },
                EntryKind::Message(Message::system("Error: unsupported format")),
            ]
        );
        assert_eq!(c.view().image_cleared.get(), 1);
        assert!(c.view().preview.borrow().is_none());
        assert!(c.pending_image().is_none());

        let analyzed = c.backend().analyzed.borrow();
        assert_eq!(analyzed[0], ("What is this?".to_string(), photo()));
    }

    #[tokio::test]
    async fn answered_image_question_renders_bot_reply() {
        let c = controller(MockBackend::replying(vec![answer("A cat.")]));
        c.select_image(Some(photo()));

        assert_eq!(c.submit_image_question("What is this?").await, Outcome::Answered);

        assert_eq!(transcript(&c).last().unwrap(), &(Role::Bot, "A cat.".to_string()));
        assert!(c.pending_image().is_none());
    }

    #[tokio::test]
    async fn image_transport_failure_keeps_the_selection() {
        let c = controller(MockBackend::replying(vec![Err(WidgetError::network("timed out"))]));
        c.select_image(Some(photo()));

        assert_eq!(c.submit_image_question("What is this?").await, Outcome::Failed);

        assert_eq!(
            transcript(&c).last().unwrap(),
            &(Role::System, "Image analysis failed: timed out".to_string())
        );
        assert_eq!(c.log().placeholder_count(), 0);
        assert!(c.pending_image().is_some());
        assert_eq!(c.view().image_cleared.get(), 0);
    }

    #[tokio::test]
    async fn selection_made_during_request_survives_settlement() {
        let c = controller(MockBackend::replying(vec![answer("A cat.")]).slow());
        let other = ImageFile::new("dog.png", "image/png", vec![1, 2]);
        c.select_image(Some(photo()));

        join(c.submit_image_question("What is this?"), async {
            c.select_image(Some(other.clone()));
        })
        .await;

        assert_eq!(c.pending_image().unwrap().file, other);
        assert_eq!(c.view().image_cleared.get(), 0);
        assert!(c.view().preview.borrow().is_some());
    }

    #[tokio::test]
    async fn overlapping_image_submission_is_rejected() {
        let c = controller(MockBackend::replying(vec![answer("A cat.")]).slow());
        c.select_image(Some(photo()));

        let (first, second) =
            join(c.submit_image_question("one?"), c.submit_image_question("two?")).await;

        assert_eq!(first, Outcome::Answered);
        assert_eq!(second, Outcome::Busy);
        assert_eq!(c.backend().analyzed.borrow().len(), 1);
    }
}
