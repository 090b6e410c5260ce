//! Clipboard targets for the "copy summary" action.
//!
//! A terminal has no clipboard API of its own, so [`Osc52Clipboard`] asks
//! the terminal emulator to set the system clipboard with an OSC 52 escape
//! sequence (`ESC ] 52 ; c ; <base64> BEL`). Most modern emulators honour it,
//! including over SSH. [`MemoryClipboard`] keeps the text in-process.

use crate::error::ClipboardError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Somewhere copied text can be written.
pub trait Clipboard: Send + 'static {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Writes OSC 52 sequences to a terminal stream.
pub struct Osc52Clipboard<W: Write + Send + 'static> {
    out: W,
}

impl Osc52Clipboard<io::Stderr> {
    /// Clipboard that talks to the terminal through stderr, leaving stdout
    /// free for piped output.
    pub fn stderr() -> Self {
        Self { out: io::stderr() }
    }
}

impl<W: Write + Send + 'static> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Build the OSC 52 sequence that sets the clipboard to `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

impl<W: Write + Send + 'static> Clipboard for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// In-process clipboard. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last copied text, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|_| ClipboardError::Write(io::Error::other("clipboard lock poisoned")))?;
        *guard = Some(text.to_string());
        Ok(())
    }
}
