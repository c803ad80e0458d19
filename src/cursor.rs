// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Cursor position, current attributes, and pending-wrap state.

use crate::color::Color;

/// Cursor position, visibility, current SGR state, and the pending-wrap flag.
///
/// Invariants while the owning [`crate::terminal::Terminal`] is quiescent:
/// `0 <= x < width`, `0 <= y < height`, and `last_column_flag` implies `x == width - 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub x: u32,
    pub y: u32,
    pub fg: Color,
    pub bg: Color,
    pub sgr: u16,
    pub visible: bool,
    /// True only immediately after a print that landed in the rightmost column
    /// without yet wrapping; the next printable character wraps.
    pub last_column_flag: bool,
    pub blink_time: u64,
}

impl Cursor {
    pub fn new(fg: Color, bg: Color) -> Self {
        Self { x: 0, y: 0, fg, bg, sgr: 0, visible: true, last_column_flag: false, blink_time: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_cursor_starts_at_origin_visible() {
        let cursor = Cursor::new(Color::WHITE, Color::BLACK);
        assert_eq!((cursor.x, cursor.y), (0, 0));
        assert!(cursor.visible);
        assert!(!cursor.last_column_flag);
    }
}
