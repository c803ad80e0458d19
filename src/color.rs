// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! RGBA color and the fixed 16-entry xterm palette used by SGR.

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color quadruple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
}

/// The fixed xterm 16-color palette used by SGR codes 30-37/40-47/90-97/100-107.
///
/// Index 0-7 are the "normal" colors, 8-15 the "bright" ones.
pub const PALETTE: [Color; 16] = [
    Color::rgb(0, 0, 0),
    Color::rgb(205, 0, 0),
    Color::rgb(0, 205, 0),
    Color::rgb(205, 205, 0),
    Color::rgb(0, 0, 238),
    Color::rgb(205, 0, 205),
    Color::rgb(0, 205, 205),
    Color::rgb(229, 229, 229),
    Color::rgb(127, 127, 127),
    Color::rgb(255, 0, 0),
    Color::rgb(0, 255, 0),
    Color::rgb(255, 255, 0),
    Color::rgb(92, 92, 255),
    Color::rgb(255, 0, 255),
    Color::rgb(0, 255, 255),
    Color::rgb(255, 255, 255),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn palette_has_sixteen_entries_matching_xterm() {
        assert_eq!(PALETTE.len(), 16);
        assert_eq!(PALETTE[1], Color::rgb(205, 0, 0));
        assert_eq!(PALETTE[15], Color::rgb(255, 255, 255));
    }

    #[test]
    fn defaults_are_white_on_black() {
        assert_eq!(Color::WHITE, Color::rgb(255, 255, 255));
        assert_eq!(Color::BLACK, Color::rgb(0, 0, 0));
    }
}
