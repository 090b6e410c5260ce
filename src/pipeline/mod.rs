//! Pipeline stages between user input and rendered summary.
//!
//! Each submodule implements exactly one step, so each can be tested on its
//! own and the view controller only has to sequence them.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ validate ──▶ request ──▶ transport ──▶ format
//! (path)    (type/size)  (multipart)  (HTTP POST)   (markup)
//! ```
//!
//! 1. [`input`]     — read a local file and determine its media type
//! 2. [`validate`]  — reject non-PDFs, oversize files and blank topics
//! 3. [`request`]   — package the submission as a one-field multipart form
//! 4. [`transport`] — the only stage with network I/O; classifies the outcome
//! 5. [`format`]    — fixed substitution rules from near-markdown to markup

pub mod format;
pub mod input;
pub mod request;
pub mod transport;
pub mod validate;
