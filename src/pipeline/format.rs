//! Summary formatting: turn the endpoint's near-markdown into display markup.
//!
//! This is a best-effort formatter, not a markdown parser. It applies a fixed
//! sequence of substitutions and nothing else: no escaping, no nested lists,
//! no repair of unbalanced `**`. Malformed nesting on odd input is expected.
//!
//! ## Rule Order
//!
//! Headings and bold run before paragraph and list wrapping, and list
//! wrapping runs before the final "starts with a heading" check. Reordering
//! changes the output.

use once_cell::sync::Lazy;
use regex::Regex;

/// Convert a raw summary to markup.
///
/// Rules (applied in order, after CRLF normalisation):
/// 1. `### ` / `## ` at line start → `<h3>…</h3>`
/// 2. `**…**` → `<strong>…</strong>` (non-greedy, global)
/// 3. `\n\n` → `</p><p>`
/// 4. `- ` at line start (or right after a paragraph break) → `<li>…</li>`
/// 5. each run of consecutive `<li>` lines → `<ul>…</ul>`
/// 6. wrap everything in `<p>…</p>` unless it starts with `<h3>`
pub fn format_summary(summary: &str) -> String {
    let s = normalise_line_endings(summary);
    let s = headings(&s);
    let s = bold(&s);
    let s = paragraphs(&s);
    let s = list_items(&s);
    let s = wrap_lists(&s);
    wrap_paragraph(s)
}

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 1: Headings ─────────────────────────────────────────────────────────

static RE_H3: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^### (.*)$").unwrap());
static RE_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^## (.*)$").unwrap());

fn headings(input: &str) -> String {
    let s = RE_H3.replace_all(input, "<h3>${1}</h3>");
    RE_H2.replace_all(&s, "<h3>${1}</h3>").into_owned()
}

// ── Rule 2: Bold ─────────────────────────────────────────────────────────────

static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

fn bold(input: &str) -> String {
    RE_BOLD
        .replace_all(input, "<strong>${1}</strong>")
        .into_owned()
}

// ── Rule 3: Paragraph boundaries ─────────────────────────────────────────────

const PARAGRAPH_BREAK: &str = "</p><p>";

fn paragraphs(input: &str) -> String {
    input.replace("\n\n", PARAGRAPH_BREAK)
}

// ── Rule 4: List items ───────────────────────────────────────────────────────

static RE_LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^|</p><p>)- (.*)$").unwrap());

fn list_items(input: &str) -> String {
    RE_LIST_ITEM
        .replace_all(input, "${1}<li>${2}</li>")
        .into_owned()
}

// ── Rule 5: Wrap list runs ───────────────────────────────────────────────────

static RE_LIST_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<li>.*</li>(?:\n<li>.*</li>)*").unwrap());

fn wrap_lists(input: &str) -> String {
    RE_LIST_RUN.replace_all(input, "<ul>${0}</ul>").into_owned()
}

// ── Rule 6: Outer paragraph ──────────────────────────────────────────────────

fn wrap_paragraph(input: String) -> String {
    if input.starts_with("<h3>") {
        input
    } else {
        format!("<p>{input}</p>")
    }
}

// ── Plain text ───────────────────────────────────────────────────────────────

static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static RE_EXTRA_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Reduce formatted markup to readable text.
///
/// Block boundaries become line breaks and list items get a bullet. Used for
/// copy-to-clipboard and for printing the summary in a terminal.
pub fn markup_to_text(markup: &str) -> String {
    let s = markup
        .replace(PARAGRAPH_BREAK, "\n\n")
        .replace("</h3>", "\n")
        .replace("<ul>", "\n")
        .replace("</ul>", "\n")
        .replace("<li>", "• ");
    let s = RE_TAG.replace_all(&s, "");
    let s = RE_EXTRA_NEWLINES.replace_all(&s, "\n\n");
    s.trim().to_string()
}
