//! Observer trait for view-controller output.
//!
//! Inject an [`Arc<dyn ViewObserver>`] via
//! [`crate::view::ViewController::with_observer`] to be told whenever the
//! visible state changes, a summary is rendered, or text is copied.
//!
//! The controller never draws anything itself. A terminal front end, a test
//! harness, or a GUI toolkit can all sit behind this trait without the
//! controller knowing which.
//!
//! # Example
//!
//! ```rust
//! use paper_explainer::ViewObserver;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! struct CountingObserver {
//!     renders: AtomicUsize,
//! }
//!
//! impl ViewObserver for CountingObserver {
//!     fn on_summary_rendered(&self, _markup: &str) {
//!         self.renders.fetch_add(1, Ordering::SeqCst);
//!     }
//! }
//! ```

use crate::view::ViewState;
use std::sync::Arc;

/// Receives view updates from the controller.
///
/// All methods have default no-op implementations so implementors only
/// override what they render. Calls always come from the task that owns the
/// controller, one at a time.
pub trait ViewObserver: Send + Sync {
    /// Called after any event that changed the [`ViewState`].
    fn on_state_changed(&self, state: &ViewState) {
        let _ = state;
    }

    /// Called when a summary has been formatted and the results region is
    /// revealed. The observer should bring it into view.
    ///
    /// # Arguments
    /// * `markup` — output of [`crate::pipeline::format::format_summary`]
    fn on_summary_rendered(&self, markup: &str) {
        let _ = markup;
    }

    /// Called after the summary text has been written to the clipboard.
    fn on_copied(&self, text: &str) {
        let _ = text;
    }
}

/// Observer that ignores everything. The default when none is configured.
pub struct NoopObserver;

impl ViewObserver for NoopObserver {}

/// Shared observer handle as stored by the controller.
pub type ObserverHandle = Arc<dyn ViewObserver>;
