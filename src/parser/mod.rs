// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The byte-level VT/ANSI state machine (P).
//!
//! This is a hand-rolled parser, not a wrapper around a general-purpose ANSI
//! parsing crate: the state machine, parameter list, and CSI command tables below
//! mirror the original source's explicit per-byte dispatch and fixed-size
//! `commands[128]`/`privateCommands[128]` tables rather than delegating to one.

pub mod csi;
pub mod osc;
pub mod param;
pub mod sgr;
mod state;

use crate::renderer::RendererCollaborator;
use crate::terminal::Mutator;
use osc::OscAccumulator;
use param::ParamList;
use state::ParserState;

const BEL: u8 = 0x07;
const BS: u8 = 0x08;
const HT: u8 = 0x09;
const LF: u8 = 0x0A;
const FF: u8 = 0x0C;
const CR: u8 = 0x0D;
const SUB: u8 = 0x1A;
const ESC: u8 = 0x1B;

/// The byte state machine: current state, the in-flight CSI parameter list and
/// private-marker flag, and the OSC accumulator. Created and destroyed together
/// with its owning [`crate::terminal::Terminal`].
pub(crate) struct Parser {
    state: ParserState,
    is_private: bool,
    /// True for exactly the one byte immediately after `ESC [`, where a `?`
    /// switches to the private command table instead of being a parameter digit.
    csi_at_start: bool,
    params: ParamList,
    osc: OscAccumulator,
}

impl Parser {
    pub(crate) fn new() -> Self {
        Self {
            state: ParserState::Normal,
            is_private: false,
            csi_at_start: false,
            params: ParamList::new(),
            osc: OscAccumulator::new(),
        }
    }

    /// Consumes every byte; never fails fatally. Invalid sequences are dropped
    /// with a warning and the state machine returns to NORMAL.
    pub(crate) fn write_bytes(
        &mut self,
        bytes: &[u8],
        m: &mut Mutator<'_>,
        renderer: &mut dyn RendererCollaborator,
    ) {
        for &byte in bytes {
            self.write_byte(byte, m, renderer);
        }
    }

    fn write_byte(&mut self, byte: u8, m: &mut Mutator<'_>, renderer: &mut dyn RendererCollaborator) {
        match self.state {
            ParserState::Normal => self.normal_byte(byte, m),
            ParserState::Esc => self.esc_byte(byte, m),
            ParserState::DesignateG0 => self.state = ParserState::Normal,
            ParserState::Csi => self.csi_byte(byte, m),
            ParserState::Osc => self.osc_byte(byte, renderer),
        }
    }

    fn normal_byte(&mut self, byte: u8, m: &mut Mutator<'_>) {
        match byte {
            BEL => {}
            BS => m.backspace(),
            HT => m.tab(),
            LF | FF => m.line_feed(),
            CR => m.carriage_return(),
            SUB => {}
            ESC => self.state = ParserState::Esc,
            printable => m.print_byte(printable),
        }
    }

    fn esc_byte(&mut self, byte: u8, m: &mut Mutator<'_>) {
        match byte {
            b'[' => {
                self.state = ParserState::Csi;
                self.is_private = false;
                self.csi_at_start = true;
                self.params = ParamList::new();
            }
            b']' => {
                self.state = ParserState::Osc;
                self.osc.reset();
            }
            b'(' => self.state = ParserState::DesignateG0,
            b'E' => {
                m.next_line();
                self.state = ParserState::Normal;
            }
            other => {
                tracing::warn!(byte = other, "unexpected character after escape");
                self.state = ParserState::Normal;
            }
        }
    }

    fn csi_byte(&mut self, byte: u8, m: &mut Mutator<'_>) {
        if self.csi_at_start {
            self.csi_at_start = false;
            if byte == b'?' {
                self.is_private = true;
                return;
            }
        }

        match byte {
            b'0'..=b'9' => self.params.push_digit((byte - b'0') as u32),
            b';' => self.params.separator(),
            final_byte => {
                let params = std::mem::take(&mut self.params).finish();
                match csi::lookup(final_byte, self.is_private) {
                    Some(cmd) => m.apply_csi(cmd, &params),
                    None => tracing::warn!(
                        byte = final_byte,
                        is_private = self.is_private,
                        "unrecognized CSI final byte"
                    ),
                }
                self.state = ParserState::Normal;
            }
        }
    }

    fn osc_byte(&mut self, byte: u8, renderer: &mut dyn RendererCollaborator) {
        if self.osc.is_text_phase() {
            if byte == BEL {
                let text = self.osc.take_text();
                if osc::sets_window_title(self.osc.code().unwrap_or(u8::MAX)) {
                    renderer.set_window_title(&text);
                }
                self.osc.reset();
                self.state = ParserState::Normal;
            } else {
                self.osc.push_byte(byte);
            }
            return;
        }

        if self.osc.code().is_some() {
            if byte != b';' {
                tracing::warn!(byte, "invalid OSC: expected ';'");
                self.state = ParserState::Normal;
                return;
            }
            self.osc.enter_text_phase();
            return;
        }

        match byte {
            b'0' | b'1' | b'2' => self.osc.set_code(byte - b'0'),
            other => {
                tracing::warn!(byte = other, "invalid OSC code");
                self.state = ParserState::Normal;
            }
        }
    }
}
