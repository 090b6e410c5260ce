//! # paper-explainer
//!
//! Client for a research-paper summarization service: submit a PDF or a
//! free-text topic, get back a plain-language summary, render it.
//!
//! ## Flow Overview
//!
//! ```text
//! user event
//!  │
//!  ├─ 1. View      ViewController receives the event (single owner of state)
//!  ├─ 2. Validate  PDF media type, 50 MiB ceiling, non-blank topic
//!  ├─ 3. Request   one-field multipart form: `pdf` or `topic`
//!  ├─ 4. Transport POST to the configured endpoint, classify the outcome
//!  ├─ 5. Format    near-markdown summary → headings, bold, paragraphs, lists
//!  └─ 6. Render    observer is told; error banner clears itself after 5 s
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paper_explainer::{
//!     ExplainerConfig, HttpTransport, MemoryClipboard, Tab, UiEvent, ViewController,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExplainerConfig::default();
//!     let transport = HttpTransport::new(&config)?;
//!     let mut view = ViewController::new(config, transport, MemoryClipboard::new());
//!
//!     view.dispatch(UiEvent::SelectTab(Tab::Text));
//!     view.dispatch(UiEvent::TextEdited("HER2-positive breast cancer".into()));
//!     view.dispatch(UiEvent::Submit);
//!     view.settle().await;
//!
//!     if let Some(text) = view.summary_text() {
//!         println!("{text}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `paper-explainer` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod clipboard;
pub mod config;
pub mod error;
pub mod observer;
pub mod pipeline;
pub mod submission;
pub mod view;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use clipboard::{Clipboard, MemoryClipboard, Osc52Clipboard};
pub use config::{ExplainerConfig, ExplainerConfigBuilder};
pub use error::{ClipboardError, ExplainerError, ValidationError};
pub use observer::{NoopObserver, ObserverHandle, ViewObserver};
pub use pipeline::format::{format_summary, markup_to_text};
pub use pipeline::transport::{HttpTransport, Transport};
pub use submission::{Submission, SummaryResponse, UploadFile};
pub use view::{EventSender, Key, KeyChord, Phase, Tab, UiEvent, ViewController, ViewState};
