//! View controller: the single owner of visible state.
//!
//! ## Event model
//!
//! ```text
//!  user input ──▶ EventSender ──┐
//!                               ▼
//!                       ┌──────────────┐  spawn   ┌───────────┐
//!                       │ViewController│─────────▶│ Transport │
//!                       └──────────────┘          └───────────┘
//!                          ▲    ▲                       │
//!         timer expiries ──┘    └──── SubmissionResolved┘
//! ```
//!
//! Everything funnels through one unbounded channel and is handled by
//! whichever task owns the controller, so [`ViewState`] has exactly one
//! writer. The network call and the banner/feedback timers run on spawned
//! tokio tasks and report back as messages; nothing else touches state.
//!
//! The controller must be driven from inside a tokio runtime because it
//! spawns those tasks.
//!
//! ## Submissions in flight
//!
//! At most one submission is pending: submit is refused while loading. Tab
//! switches never cancel it, and [`ViewController::run`] keeps handling its
//! resolution after [`UiEvent::Quit`] so the outcome is still rendered.

pub mod state;

pub use state::{Key, KeyChord, Phase, Tab, UiEvent, ViewState};

use crate::clipboard::Clipboard;
use crate::config::ExplainerConfig;
use crate::error::{ClipboardError, ExplainerError, ValidationError};
use crate::observer::{NoopObserver, ObserverHandle};
use crate::pipeline::format::{format_summary, markup_to_text};
use crate::pipeline::transport::Transport;
use crate::pipeline::validate::{validate_file, validate_topic};
use crate::submission::{Submission, UploadFile};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Everything the controller reacts to: user events plus completions of the
/// work it spawned.
enum Message {
    Ui(UiEvent),
    SubmissionResolved(Result<String, ExplainerError>),
    ErrorExpired { generation: u64 },
    CopyFeedbackExpired { generation: u64 },
}

/// Handle used by input sources to feed [`UiEvent`]s to a controller.
#[derive(Clone)]
pub struct EventSender {
    tx: UnboundedSender<Message>,
}

impl EventSender {
    /// Queue an event. Returns `false` if the controller is gone.
    pub fn send(&self, event: UiEvent) -> bool {
        self.tx.send(Message::Ui(event)).is_ok()
    }
}

/// Owns [`ViewState`] and wires user actions to validation, transport and
/// formatting.
pub struct ViewController<T: Transport, C: Clipboard> {
    config: ExplainerConfig,
    transport: Arc<T>,
    clipboard: C,
    observer: ObserverHandle,
    state: ViewState,
    selected_file: Option<UploadFile>,
    topic: String,
    markup: Option<String>,
    pending: bool,
    error_generation: u64,
    copy_generation: u64,
    quit: bool,
    tx: UnboundedSender<Message>,
    rx: UnboundedReceiver<Message>,
}

impl<T: Transport, C: Clipboard> ViewController<T, C> {
    pub fn new(config: ExplainerConfig, transport: T, clipboard: C) -> Self {
        let (tx, rx) = unbounded_channel();
        info!("Paper explainer initialized, endpoint: {}", config.endpoint);
        Self {
            config,
            transport: Arc::new(transport),
            clipboard,
            observer: Arc::new(NoopObserver),
            state: ViewState::default(),
            selected_file: None,
            topic: String::new(),
            markup: None,
            pending: false,
            error_generation: 0,
            copy_generation: 0,
            quit: false,
            tx,
            rx,
        }
    }

    pub fn with_observer(mut self, observer: ObserverHandle) -> Self {
        self.observer = observer;
        self
    }

    /// A handle for feeding user events from another task.
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Markup of the summary currently in the results region.
    pub fn summary_markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }

    /// Plain-text form of the current summary, as copied to the clipboard.
    pub fn summary_text(&self) -> Option<String> {
        self.markup.as_deref().map(markup_to_text)
    }

    /// Whether a submission has been sent and not resolved yet.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Handle a user event immediately.
    pub fn dispatch(&mut self, event: UiEvent) {
        self.handle(Message::Ui(event));
    }

    /// Wait for the next queued message and handle it.
    ///
    /// Returns `false` once [`UiEvent::Quit`] has been handled.
    pub async fn step(&mut self) -> bool {
        if self.quit {
            return false;
        }
        if let Some(msg) = self.rx.recv().await {
            self.handle(msg);
        }
        !self.quit
    }

    /// Process messages until the pending submission has resolved.
    pub async fn settle(&mut self) {
        while self.pending && self.step().await {}
    }

    /// Process messages until [`UiEvent::Quit`], then wait for a pending
    /// submission to resolve. User events queued after the quit are dropped.
    pub async fn run(mut self) {
        while self.step().await {}
        while self.pending {
            match self.rx.recv().await {
                Some(Message::Ui(_)) => {}
                Some(msg) => self.handle(msg),
                None => break,
            }
        }
        debug!("View controller stopped");
    }

    // ── Dispatch ─────────────────────────────────────────────────────────

    fn handle(&mut self, msg: Message) {
        let before = self.state.clone();

        match msg {
            Message::Ui(event) => self.handle_ui(event),
            Message::SubmissionResolved(result) => self.on_resolved(result),
            Message::ErrorExpired { generation } => {
                if generation == self.error_generation && self.state.error_message.is_some() {
                    self.hide_error();
                    if self.state.phase == Phase::Failure {
                        self.state.phase = Phase::Idle;
                    }
                }
            }
            Message::CopyFeedbackExpired { generation } => {
                if generation == self.copy_generation {
                    self.state.copy_feedback = false;
                }
            }
        }

        if self.state != before {
            debug!("View state: {:?}", self.state);
            self.observer.on_state_changed(&self.state);
        }
    }

    fn handle_ui(&mut self, event: UiEvent) {
        match event {
            UiEvent::SelectTab(tab) => {
                self.state.active_tab = tab;
                self.hide_error();
            }
            UiEvent::DragEnter => self.state.drag_over = true,
            UiEvent::DragLeave => self.state.drag_over = false,
            UiEvent::FileChosen(file) => {
                self.state.drag_over = false;
                self.choose_file(file);
            }
            UiEvent::RemoveFile => {
                self.selected_file = None;
                self.state.selected_file = None;
            }
            UiEvent::TextEdited(text) => self.topic = text,
            UiEvent::Submit => self.submit(),
            UiEvent::Key(chord) => {
                if chord.is_submit_shortcut() && self.state.submit_enabled() {
                    self.submit();
                }
            }
            UiEvent::Copy => self.copy(),
            UiEvent::Quit => self.quit = true,
        }
    }

    // ── Input ────────────────────────────────────────────────────────────

    fn choose_file(&mut self, file: UploadFile) {
        match validate_file(file, self.config.max_upload_bytes) {
            Ok(file) => {
                info!("Selected {} ({} bytes)", file.name, file.size);
                self.state.selected_file = Some(file.name.clone());
                self.selected_file = Some(file);
                self.hide_error();
            }
            Err(e) => {
                warn!("Rejected file: {:?}", e);
                self.show_error(e.to_string());
            }
        }
    }

    fn validated_submission(&self) -> Result<Submission, ValidationError> {
        match self.state.active_tab {
            Tab::Pdf => {
                let file = self
                    .selected_file
                    .clone()
                    .ok_or(ValidationError::NoFileSelected)?;
                Ok(Submission::Pdf(validate_file(
                    file,
                    self.config.max_upload_bytes,
                )?))
            }
            Tab::Text => Ok(Submission::text(validate_topic(&self.topic)?)),
        }
    }

    // ── Submission ───────────────────────────────────────────────────────

    fn submit(&mut self) {
        if !self.state.submit_enabled() {
            debug!("Submit ignored: a request is already in flight");
            return;
        }
        self.hide_error();

        let submission = match self.validated_submission() {
            Ok(s) => s,
            Err(e) => {
                self.show_error(e.to_string());
                return;
            }
        };

        self.pending = true;
        self.state.loading = true;
        self.state.result_visible = false;
        self.state.phase = Phase::Submitting;

        let transport = Arc::clone(&self.transport);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = transport.summarize(submission).await;
            let _ = tx.send(Message::SubmissionResolved(result));
        });
    }

    fn on_resolved(&mut self, result: Result<String, ExplainerError>) {
        self.pending = false;
        self.state.loading = false;

        match result {
            Ok(summary) => {
                let markup = self.markup.insert(format_summary(&summary));
                self.state.result_visible = true;
                self.state.phase = Phase::Success;
                self.observer.on_summary_rendered(markup);
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                self.state.phase = Phase::Failure;
                self.show_error(format!("Failed to process: {e}"));
            }
        }
    }

    // ── Clipboard ────────────────────────────────────────────────────────

    fn copy(&mut self) {
        match self.copy_summary() {
            Ok(text) => {
                self.state.copy_feedback = true;
                self.copy_generation += 1;
                self.spawn_timer(
                    self.config.copy_feedback,
                    Message::CopyFeedbackExpired {
                        generation: self.copy_generation,
                    },
                );
                self.observer.on_copied(&text);
            }
            Err(ClipboardError::NothingToCopy) => {
                self.show_error(ClipboardError::NothingToCopy.to_string());
            }
            Err(e) => {
                warn!("Copy failed: {}", e);
                self.show_error("Failed to copy to clipboard".to_string());
            }
        }
    }

    fn copy_summary(&mut self) -> Result<String, ClipboardError> {
        let text = self.summary_text().ok_or(ClipboardError::NothingToCopy)?;
        self.clipboard.set_text(&text)?;
        Ok(text)
    }

    // ── Error banner ─────────────────────────────────────────────────────

    fn show_error(&mut self, message: String) {
        self.state.error_message = Some(message);
        self.error_generation += 1;
        self.spawn_timer(
            self.config.error_display,
            Message::ErrorExpired {
                generation: self.error_generation,
            },
        );
    }

    fn hide_error(&mut self) {
        self.state.error_message = None;
    }

    fn spawn_timer(&self, after: std::time::Duration, msg: Message) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(msg);
        });
    }
}
