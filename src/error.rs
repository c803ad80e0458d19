// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Crate-wide error taxonomy.
//!
//! `ParseWarning` and `AllocationFailure` are constructed only to be logged via
//! `tracing::warn!` at the point of failure inside the parser; they are never returned
//! from [`crate::parser::Parser::write_bytes`], which always completes. `ResizeFailure`
//! and `PtyError` are the variants actually surfaced to callers as `Result::Err`.
//! `FontError` is returned by [`crate::font::FontCollaborator`] methods.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum TermError {
    #[error("unrecognized escape/CSI/OSC sequence: {detail}")]
    #[diagnostic(
        code(post_term::parser::warning),
        help("the sequence was dropped and the parser returned to NORMAL state")
    )]
    ParseWarning { detail: String },

    #[error("allocation failed while buffering {what}")]
    #[diagnostic(
        code(post_term::parser::alloc_failure),
        help("the in-flight sequence was abandoned; no grid mutation occurred")
    )]
    AllocationFailure { what: &'static str },

    #[error("failed to grow cell buffer to {width}x{height}")]
    #[diagnostic(
        code(post_term::terminal::resize_failure),
        help("the grid retains its previous dimensions")
    )]
    ResizeFailure { width: u32, height: u32 },

    #[error("pty I/O failed: {detail}")]
    #[diagnostic(code(post_term::pty::error), help("the event loop should decide whether to shut down"))]
    PtyError { detail: String },

    #[error("no renderable glyph for code point {char_code:#x}")]
    #[diagnostic(
        code(post_term::font::not_renderable),
        help("render a blank cell for this frame instead of failing")
    )]
    FontError { char_code: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_warning_displays_detail() {
        let err = TermError::ParseWarning { detail: "unknown final byte '~'".to_string() };
        assert_eq!(err.to_string(), "unrecognized escape/CSI/OSC sequence: unknown final byte '~'");
    }

    #[test]
    fn resize_failure_displays_dimensions() {
        let err = TermError::ResizeFailure { width: 80, height: 24 };
        assert_eq!(err.to_string(), "failed to grow cell buffer to 80x24");
    }
}
