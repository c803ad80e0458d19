// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A VT100/ANSI terminal emulator core.
//!
//! Bytes produced by a child process on a pseudo-terminal are interpreted as a stream of
//! printable characters and control sequences; those operations mutate a two-dimensional
//! grid of character cells that a renderer later displays. This crate covers the hard
//! engineering core of that pipeline: a byte-level state machine for ANSI/VT sequences
//! ([`parser`]) and the cell grid + cursor it drives ([`terminal`]).
//!
//! PTY, font, and renderer concerns are modeled as collaborator traits
//! ([`pty`], [`font`], [`renderer`]) so this crate has no windowing dependency.

pub mod cell;
pub mod color;
pub mod config;
pub mod cursor;
pub mod error;
pub mod font;
pub mod grid;
pub mod keys;
pub mod parser;
pub mod pty;
pub mod renderer;
pub mod terminal;

pub use cell::Cell;
pub use color::Color;
pub use config::Config;
pub use cursor::Cursor;
pub use error::TermError;
pub use grid::{Grid, GridView};
pub use terminal::Terminal;
