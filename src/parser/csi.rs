// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The CSI command tables (public and private), keyed on the final byte.
//!
//! Mirrors the original source's two 128-entry `commands[128]`/`privateCommands[128]`
//! function-pointer tables: a command is looked up by final byte and private-marker
//! state, then dispatched according to its arity. This module only decides *which*
//! command and *which* argument values; execution lives on
//! [`crate::terminal::Terminal`].

use crate::parser::param::{self, Param};

/// CSI final-byte commands this crate recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `@` ICH — Insert Character
    Ich,
    /// `A` CUU — Cursor Up
    Cuu,
    /// `B` CUD — Cursor Down
    Cud,
    /// `C` CUF — Cursor Forward
    Cuf,
    /// `D` CUB — Cursor Back
    Cub,
    /// `E` CNL — Cursor Next Line
    Cnl,
    /// `F` CPL — Cursor Previous Line
    Cpl,
    /// `G` CHA — Cursor Horizontal Absolute
    Cha,
    /// `H` CUP — Cursor Position
    Cup,
    /// `I` CHT — Cursor Horizontal Tab
    Cht,
    /// `J` ED — Erase in Display
    Ed,
    /// `K` EL — Erase in Line
    El,
    /// `m` SGR — Select Graphic Rendition
    Sgr,
    /// `?...h` DECSET — DEC Private Mode Set
    Decset,
    /// `?...l` DECRST — DEC Private Mode Reset
    Decrst,
}

/// The three argument shapes a CSI command can take (§4.1.3).
pub enum Arity {
    /// Invoked once per parameter; empty parameters use `default`; a completely
    /// empty parameter list invokes once with `default`.
    Mul(u32),
    /// Invoked with the last parameter's value, defaulted if empty or absent.
    One(u32),
    /// Invoked with the first two parameters, each defaulted independently.
    Two(u32, u32),
}

impl Command {
    pub fn arity(self) -> Arity {
        match self {
            Command::Ich => Arity::One(1),
            Command::Cuu => Arity::One(1),
            Command::Cud => Arity::One(1),
            Command::Cuf => Arity::One(1),
            Command::Cub => Arity::One(1),
            Command::Cnl => Arity::One(1),
            Command::Cpl => Arity::One(1),
            Command::Cha => Arity::One(1),
            Command::Cup => Arity::Two(1, 1),
            Command::Cht => Arity::One(1),
            Command::Ed => Arity::One(0),
            Command::El => Arity::One(0),
            Command::Sgr => Arity::Mul(0),
            Command::Decset => Arity::One(0),
            Command::Decrst => Arity::One(0),
        }
    }
}

/// Looks up a command by final byte, from the public table or, when `is_private`,
/// the DEC private table (entries only reachable after `ESC [ ?`).
pub fn lookup(final_byte: u8, is_private: bool) -> Option<Command> {
    if is_private {
        lookup_private(final_byte)
    } else {
        lookup_public(final_byte)
    }
}

fn lookup_public(final_byte: u8) -> Option<Command> {
    match final_byte {
        b'@' => Some(Command::Ich),
        b'A' => Some(Command::Cuu),
        b'B' => Some(Command::Cud),
        b'C' => Some(Command::Cuf),
        b'D' => Some(Command::Cub),
        b'E' => Some(Command::Cnl),
        b'F' => Some(Command::Cpl),
        b'G' => Some(Command::Cha),
        b'H' => Some(Command::Cup),
        b'I' => Some(Command::Cht),
        b'J' => Some(Command::Ed),
        b'K' => Some(Command::El),
        b'm' => Some(Command::Sgr),
        _ => None,
    }
}

fn lookup_private(final_byte: u8) -> Option<Command> {
    match final_byte {
        b'h' => Some(Command::Decset),
        b'l' => Some(Command::Decrst),
        _ => None,
    }
}

/// The decoded arguments for one dispatch, already resolved per the command's arity.
pub enum Args {
    Mul(Vec<u32>),
    One(u32),
    Two(u32, u32),
}

/// Resolves `params` against `cmd`'s arity, applying the documented defaulting rules.
pub fn resolve_args(cmd: Command, params: &[Param]) -> Args {
    match cmd.arity() {
        Arity::Mul(default) => Args::Mul(param::mul_values(params, default)),
        Arity::One(default) => Args::One(param::one_value(params, default)),
        Arity::Two(d1, d2) => {
            let (a, b) = param::two_values(params, d1, d2);
            Args::Two(a, b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(b'@', false, Some(Command::Ich); "ich")]
    #[test_case(b'm', false, Some(Command::Sgr); "sgr")]
    #[test_case(b'h', true, Some(Command::Decset); "decset")]
    #[test_case(b'h', false, None; "h is not public")]
    #[test_case(b'~', false, None; "unknown final byte")]
    fn lookup_matches_table(byte: u8, is_private: bool, expected: Option<Command>) {
        assert_eq!(lookup(byte, is_private), expected);
    }

    #[test]
    fn cup_resolves_as_two_with_independent_defaults() {
        let params = vec![Param { n: 0, is_empty: true }, Param { n: 5, is_empty: false }];
        match resolve_args(Command::Cup, &params) {
            Args::Two(r, c) => assert_eq!((r, c), (1, 5)),
            _ => panic!("expected Two"),
        }
    }

    #[test]
    fn sgr_resolves_as_mul_with_default_zero_on_empty_params() {
        match resolve_args(Command::Sgr, &[]) {
            Args::Mul(values) => assert_eq!(values, vec![0]),
            _ => panic!("expected Mul"),
        }
    }
}
