//! Terminal output helpers for `gtasks-ctl`.
//!
//! `anstream` auto-detects terminal capabilities, so everything here
//! degrades to plain text when piped. Command handlers compose these
//! instead of printing directly: statuses get a glyph prefix, records are
//! rendered as indented label/value pairs, and list entries as bullets.

mod styles;

use std::io::Write;

pub(crate) use styles::clap_styles;

use styles::{CAUTION, EMPHASIS, FAIL, MUTED, OK};

/// Confirmation with a green checkmark.
pub(crate) fn success(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{OK}✓ {msg}{OK:#}").ok();
}

/// Failure with a red cross, on stderr.
pub(crate) fn error(msg: impl std::fmt::Display) {
    let mut err = anstream::stderr().lock();
    writeln!(err, "{FAIL}✗ {msg}{FAIL:#}").ok();
}

/// Caution, typically an empty result or a no-op delete.
pub(crate) fn warning(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{CAUTION}! {msg}{CAUTION:#}").ok();
}

/// Bold section header.
pub(crate) fn header(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{EMPHASIS}{msg}{EMPHASIS:#}").ok();
}

/// Indented "Label: value" pair with the label bolded.
pub(crate) fn label(name: impl std::fmt::Display, value: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "  {EMPHASIS}{name}:{EMPHASIS:#} {value}").ok();
}

/// Dimmed secondary text: hints, progress notes, snippets.
pub(crate) fn muted(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{MUTED}{msg}{MUTED:#}").ok();
}

/// Indented check line for `auth status` style reports.
pub(crate) fn status_icon(ok: bool, msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    if ok {
        writeln!(out, "  {OK}✓{OK:#} {msg}").ok();
    } else {
        writeln!(out, "  {FAIL}✗{FAIL:#} {msg}").ok();
    }
}

/// Bulleted list entry.
pub(crate) fn item(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "  • {msg}").ok();
}

pub(crate) fn blank() {
    let mut out = anstream::stdout().lock();
    writeln!(out).ok();
}

/// Unstyled line, for bodies and `--json` output.
pub(crate) fn plain(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{msg}").ok();
}
