// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Typed configuration surface. This crate never loads config from disk, env, or CLI
//! flags; embedding applications own that and construct/deserialize a [`Config`].

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Recognized configuration keys and their start-up defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fg: Color,
    pub bg: Color,
    pub tab_width: u8,
    pub bracketed_paste_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { fg: Color::WHITE, bg: Color::BLACK, tab_width: 8, bracketed_paste_mode: false }
    }
}
