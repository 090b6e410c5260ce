//! Visible state and the events that change it.

use crate::submission::UploadFile;
use serde::Serialize;

/// Which input mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Pdf,
    Text,
}

/// Where the interaction stands.
///
/// Validation is synchronous inside the submit handler, so it never shows up
/// as an observable phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Success,
    Failure,
}

/// Everything a renderer needs to draw the page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ViewState {
    pub active_tab: Tab,
    pub phase: Phase,
    /// Loading indicator shown; submit disabled.
    pub loading: bool,
    /// Error banner text. `Some` means the banner is visible.
    pub error_message: Option<String>,
    /// Results region shown. Never true while `loading`.
    pub result_visible: bool,
    /// Name of the chosen file, shown in the file preview.
    pub selected_file: Option<String>,
    /// A drag is hovering over the upload zone.
    pub drag_over: bool,
    /// "Copied!" indicator shown.
    pub copy_feedback: bool,
}

impl ViewState {
    pub fn submit_enabled(&self) -> bool {
        !self.loading
    }
}

/// Keys the controller cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: Key,
    pub ctrl: bool,
    /// Cmd on macOS, Super/Windows elsewhere.
    pub meta: bool,
}

impl KeyChord {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            meta: false,
        }
    }

    pub fn meta(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: true,
        }
    }

    /// Ctrl+Enter or Cmd+Enter.
    pub fn is_submit_shortcut(&self) -> bool {
        self.key == Key::Enter && (self.ctrl || self.meta)
    }
}

/// User actions fed to the controller.
#[derive(Debug, Clone)]
pub enum UiEvent {
    SelectTab(Tab),
    DragEnter,
    DragLeave,
    /// A file was dropped on the upload zone or picked from the browser.
    FileChosen(UploadFile),
    RemoveFile,
    /// The topic text area now holds this text.
    TextEdited(String),
    Submit,
    Key(KeyChord),
    Copy,
    /// Stop the event loop.
    Quit,
}
