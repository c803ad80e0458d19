// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The screen model: grid, cursor, mode flags, and the grid/cursor mutators the
//! parser drives. T and P are created and destroyed together; see [`Terminal::new`].

use crate::cell::Cell;
use crate::config::Config;
use crate::cursor::Cursor;
use crate::error::TermError;
use crate::grid::{Grid, GridView};
use crate::parser::csi::{self, Args, Command};
use crate::parser::param::Param;
use crate::parser::Parser;
use crate::renderer::RendererCollaborator;

/// The screen state (T) plus its owned parser (P), created and torn down together.
pub struct Terminal {
    grid: Grid,
    cursor: Cursor,
    bracketed_paste_mode: bool,
    config: Config,
    parser: Parser,
}

impl Terminal {
    pub fn new(width: u32, height: u32, config: Config) -> Self {
        let grid = Grid::new(width, height, config.fg, config.bg);
        let cursor = Cursor::new(config.fg, config.bg);
        Self {
            grid,
            cursor,
            bracketed_paste_mode: config.bracketed_paste_mode,
            config,
            parser: Parser::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bracketed_paste_mode(&self) -> bool {
        self.bracketed_paste_mode
    }

    /// Reallocates the cell buffer for a new size in cells, clamping each dimension
    /// to at least 1 and clamping the cursor back into bounds. Current design does
    /// not preserve content across a resize. On allocation failure the grid retains
    /// its previous dimensions and the error is surfaced to the caller unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), TermError> {
        self.grid.resize(width, height, self.config.fg, self.config.bg)?;
        self.cursor.x = self.cursor.x.min(self.grid.width() - 1);
        self.cursor.y = self.cursor.y.min(self.grid.height() - 1);
        self.cursor.last_column_flag = false;
        Ok(())
    }

    /// A borrowed grid view plus a copy of the cursor, for one renderer frame.
    pub fn snapshot(&self) -> (GridView<'_>, Cursor) {
        (self.grid.view(), self.cursor)
    }

    /// Forwards to the parser, which consumes every byte and mutates this terminal's
    /// grid/cursor/mode flags in place. `renderer` receives `set_window_title` calls
    /// from completed OSC sequences.
    pub fn write_bytes(&mut self, bytes: &[u8], renderer: &mut dyn RendererCollaborator) {
        let Terminal { grid, cursor, bracketed_paste_mode, config, parser } = self;
        let mut mutator = Mutator { grid, cursor, bracketed_paste_mode, config };
        parser.write_bytes(bytes, &mut mutator, renderer);
    }
}

/// Borrows T's grid, cursor, and mode flag together for the duration of one
/// parser call, per the ownership rule in §3: neither T nor P holds a reference
/// into the other outside of an explicit method call.
pub(crate) struct Mutator<'a> {
    grid: &'a mut Grid,
    cursor: &'a mut Cursor,
    bracketed_paste_mode: &'a mut bool,
    config: &'a Config,
}

impl<'a> Mutator<'a> {
    /// Advances `y` by one, scrolling the grid up by a row when it would run off
    /// the bottom. Returns the new `y`.
    fn advance_y(&mut self, y: u32) -> u32 {
        let mut y = y + 1;
        if y == self.grid.height() {
            self.grid.scroll_up_one(self.config.fg, self.config.bg);
            y = self.grid.height() - 1;
        }
        y
    }

    /// Increments `cursor.x`, handling the pending-wrap flag per §4.1.2.
    fn advance_cursor(&mut self) {
        self.cursor.x += 1;
        if self.cursor.x == self.grid.width() {
            if self.cursor.last_column_flag {
                self.cursor.last_column_flag = false;
                self.cursor.x = 0;
                self.cursor.y = self.advance_y(self.cursor.y);
            } else {
                self.cursor.last_column_flag = true;
                self.cursor.x = self.grid.width() - 1;
            }
        }
    }

    /// Writes one printable byte at the cursor, wrapping first if pending, then
    /// advances the cursor.
    pub(crate) fn print_byte(&mut self, byte: u8) {
        if self.cursor.last_column_flag {
            self.cursor.last_column_flag = false;
            self.cursor.x = 0;
            self.cursor.y = self.advance_y(self.cursor.y);
        }
        let cell = Cell {
            char_code: byte as u32,
            fg: self.cursor.fg,
            bg: self.cursor.bg,
            sgr: self.cursor.sgr,
        };
        self.grid.set_cell(self.cursor.x, self.cursor.y, cell);
        self.advance_cursor();
    }

    pub(crate) fn backspace(&mut self) {
        self.cursor.last_column_flag = false;
        if self.cursor.x > 0 {
            self.cursor.x -= 1;
        } else if self.cursor.y > 0 {
            self.cursor.x = self.grid.width() - 1;
            self.cursor.y -= 1;
        }
    }

    pub(crate) fn tab(&mut self) {
        self.cursor.last_column_flag = false;
        for _ in 0..self.config.tab_width {
            self.advance_cursor();
        }
    }

    pub(crate) fn line_feed(&mut self) {
        self.cursor.last_column_flag = false;
        self.cursor.x = 0;
        self.cursor.y = self.advance_y(self.cursor.y);
    }

    pub(crate) fn carriage_return(&mut self) {
        self.cursor.last_column_flag = false;
        self.cursor.x = 0;
    }

    pub(crate) fn next_line(&mut self) {
        self.line_feed();
    }

    /// Dispatches a fully-parsed CSI command against the borrowed grid/cursor.
    pub(crate) fn apply_csi(&mut self, cmd: Command, params: &[Param]) {
        match csi::resolve_args(cmd, params) {
            Args::One(n) => self.apply_csi_one(cmd, n),
            Args::Mul(values) => {
                for n in values {
                    self.sgr_apply(n);
                }
            }
            Args::Two(a, b) => self.cup(a, b),
        }
    }

    fn apply_csi_one(&mut self, cmd: Command, n: u32) {
        match cmd {
            Command::Ich => self.ich(n),
            Command::Cuu => self.cuu(n),
            Command::Cud => self.cud(n),
            Command::Cuf => self.cuf(n),
            Command::Cub => self.cub(n),
            Command::Cnl => self.cnl(n),
            Command::Cpl => self.cpl(n),
            Command::Cha => self.cha(n),
            Command::Cht => self.cht(n),
            Command::Ed => self.ed(n),
            Command::El => self.el(n),
            Command::Decset => self.decset(n),
            Command::Decrst => self.decrst(n),
            Command::Cup | Command::Sgr => unreachable!("not a ONE-arity command"),
        }
    }

    fn ich(&mut self, n: u32) {
        let width = self.grid.width();
        let x = self.cursor.x;
        let n = n.min(width - x);
        if n > 0 {
            self.grid.insert_blank_cells(self.cursor.y, x, n, self.config.fg, self.config.bg);
        }
        self.cursor.last_column_flag = false;
    }

    fn cuu(&mut self, n: u32) {
        self.cursor.y = self.cursor.y.saturating_sub(n);
    }

    fn cud(&mut self, n: u32) {
        self.cursor.y = (self.cursor.y + n).min(self.grid.height() - 1);
    }

    fn cuf(&mut self, n: u32) {
        self.cursor.x = (self.cursor.x + n).min(self.grid.width() - 1);
    }

    fn cub(&mut self, n: u32) {
        self.cursor.x = self.cursor.x.saturating_sub(n);
    }

    fn cnl(&mut self, n: u32) {
        self.cursor.x = 0;
        self.cursor.y = (self.cursor.y + n).min(self.grid.height() - 1);
    }

    fn cpl(&mut self, n: u32) {
        self.cursor.x = 0;
        self.cursor.y = if self.cursor.y <= n { 0 } else { self.cursor.y - n };
    }

    /// CHA uses the parameter verbatim as `x` (see spec design notes §9: this
    /// diverges from standard 1-based xterm CHA, matching observed source behaviour).
    fn cha(&mut self, n: u32) {
        self.cursor.x = n.min(self.grid.width() - 1);
    }

    fn cup(&mut self, r: u32, c: u32) {
        let r = r.clamp(1, self.grid.height());
        let c = c.clamp(1, self.grid.width());
        self.cursor.y = r - 1;
        self.cursor.x = c - 1;
        self.cursor.last_column_flag = false;
    }

    fn cht(&mut self, n: u32) {
        let tab_width = self.config.tab_width as u32;
        let x = (self.cursor.x / tab_width) * tab_width + n * tab_width;
        self.cursor.x = x.min(self.grid.width() - 1);
    }

    /// ED: 0 erases cursor..end-of-screen, 1 erases start-of-screen..cursor
    /// (exclusive), 2 or 3 erases the whole screen (param 3 has no scrollback
    /// distinction to make here, so it behaves like 2).
    fn ed(&mut self, n: u32) {
        let (width, height) = (self.grid.width(), self.grid.height());
        let empty = Cell::empty(self.config.fg, self.config.bg);
        match n {
            0 => {
                for x in self.cursor.x..width {
                    self.grid.set_cell(x, self.cursor.y, empty);
                }
                for y in (self.cursor.y + 1)..height {
                    for x in 0..width {
                        self.grid.set_cell(x, y, empty);
                    }
                }
            }
            1 => {
                for y in 0..self.cursor.y {
                    for x in 0..width {
                        self.grid.set_cell(x, y, empty);
                    }
                }
                for x in 0..self.cursor.x {
                    self.grid.set_cell(x, self.cursor.y, empty);
                }
            }
            _ => {
                for y in 0..height {
                    for x in 0..width {
                        self.grid.set_cell(x, y, empty);
                    }
                }
            }
        }
        self.cursor.last_column_flag = false;
    }

    /// EL: 0 erases cursor..end-of-row, 1 erases `[0, x)`, 2 erases the whole row.
    fn el(&mut self, n: u32) {
        let width = self.grid.width();
        let empty = Cell::empty(self.config.fg, self.config.bg);
        match n {
            0 => {
                for x in self.cursor.x..width {
                    self.grid.set_cell(x, self.cursor.y, empty);
                }
            }
            1 => {
                for x in 0..self.cursor.x {
                    self.grid.set_cell(x, self.cursor.y, empty);
                }
            }
            _ => {
                for x in 0..width {
                    self.grid.set_cell(x, self.cursor.y, empty);
                }
            }
        }
        self.cursor.last_column_flag = false;
    }

    fn sgr_apply(&mut self, n: u32) {
        if !crate::parser::sgr::is_recognized(n) {
            tracing::warn!(code = n, "unrecognized SGR code");
            return;
        }
        let (sgr, fg, bg) =
            crate::parser::sgr::apply(self.cursor.sgr, self.cursor.fg, self.cursor.bg, n, self.config);
        self.cursor.sgr = sgr;
        self.cursor.fg = fg;
        self.cursor.bg = bg;
    }

    fn decset(&mut self, n: u32) {
        if n == 2004 {
            *self.bracketed_paste_mode = true;
        } else {
            tracing::warn!(mode = n, "unsupported DECSET mode");
        }
    }

    fn decrst(&mut self, n: u32) {
        if n == 2004 {
            *self.bracketed_paste_mode = false;
        } else {
            tracing::warn!(mode = n, "unsupported DECRST mode");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PALETTE;
    use crate::renderer::NullRenderer;
    use pretty_assertions::assert_eq;

    fn term(width: u32, height: u32) -> Terminal {
        Terminal::new(width, height, Config::default())
    }

    fn write(term: &mut Terminal, bytes: &[u8]) {
        let mut renderer = NullRenderer::default();
        term.write_bytes(bytes, &mut renderer);
    }

    #[test]
    fn s1_plain_text_with_newline() {
        let mut t = term(10, 3);
        write(&mut t, b"ab\ncd");
        let (grid, cursor) = t.snapshot();
        assert_eq!(grid.cell(0, 0).char_code, b'a' as u32);
        assert_eq!(grid.cell(1, 0).char_code, b'b' as u32);
        assert_eq!(grid.cell(0, 1).char_code, b'c' as u32);
        assert_eq!(grid.cell(1, 1).char_code, b'd' as u32);
        assert_eq!((cursor.x, cursor.y), (2, 1));
    }

    #[test]
    fn s2_wrap_at_row_boundary() {
        let mut t = term(10, 3);
        write(&mut t, b"abcdefghij");
        let (_, cursor) = t.snapshot();
        assert_eq!((cursor.x, cursor.y), (9, 0));
        assert!(cursor.last_column_flag);

        write(&mut t, b"k");
        let (grid, cursor) = t.snapshot();
        assert_eq!(grid.cell(0, 1).char_code, b'k' as u32);
        assert_eq!((cursor.x, cursor.y), (1, 1));
        assert!(!cursor.last_column_flag);
    }

    #[test]
    fn s3_cup_then_print() {
        let mut t = term(10, 3);
        write(&mut t, b"ab\x1b[1;3Hx");
        let (grid, cursor) = t.snapshot();
        assert_eq!((cursor.x, cursor.y), (3, 0));
        assert_eq!(grid.cell(2, 0).char_code, b'x' as u32);
        assert_eq!(grid.cell(0, 0).char_code, b'a' as u32);
        assert_eq!(grid.cell(1, 0).char_code, b'b' as u32);
    }

    #[test]
    fn s4_erase_display_keeps_cursor() {
        let mut t = term(10, 3);
        write(&mut t, b"hello\x1b[2J");
        let (grid, cursor) = t.snapshot();
        for y in 0..3 {
            for x in 0..10 {
                assert!(grid.cell(x, y).is_empty());
            }
        }
        assert_eq!((cursor.x, cursor.y), (5, 0));
    }

    #[test]
    fn s5_sgr_colors_apply_then_reset() {
        let mut t = term(10, 3);
        write(&mut t, b"\x1b[31mA\x1b[0mB");
        let (grid, _) = t.snapshot();
        assert_eq!(grid.cell(0, 0).fg, PALETTE[1]);
        assert_eq!(grid.cell(1, 0).fg, Config::default().fg);
    }

    #[test]
    fn s6_osc_sets_window_title() {
        let mut t = term(10, 3);
        let mut renderer = NullRenderer::default();
        t.write_bytes(b"\x1b]0;title\x07", &mut renderer);
        assert_eq!(renderer.last_title.as_deref(), Some("title"));
        let (grid, _) = t.snapshot();
        assert!(grid.cell(0, 0).is_empty());
    }

    #[test]
    fn cha_uses_parameter_verbatim_not_one_based() {
        let mut t = term(10, 3);
        write(&mut t, b"\x1b[5G");
        let (_, cursor) = t.snapshot();
        assert_eq!(cursor.x, 5);
    }

    #[test]
    fn cup_with_leading_empty_param_defaults_row() {
        let mut t = term(10, 3);
        write(&mut t, b"\x1b[;5H");
        let (_, cursor) = t.snapshot();
        assert_eq!((cursor.x, cursor.y), (4, 0));
    }

    #[test]
    fn unknown_final_byte_leaves_grid_untouched() {
        let mut t = term(10, 3);
        write(&mut t, b"a\x1b[~b");
        let (grid, _) = t.snapshot();
        assert_eq!(grid.cell(0, 0).char_code, b'a' as u32);
        assert_eq!(grid.cell(1, 0).char_code, b'b' as u32);
    }

    #[test]
    fn scroll_on_overflow_discards_top_row() {
        let mut t = term(10, 3);
        write(&mut t, b"row0\n\n\nrow_last");
        let (grid, _) = t.snapshot();
        assert_eq!(grid.cell(0, 2).char_code, b'r' as u32);
    }

    #[test]
    fn resize_clamps_cursor_into_new_bounds() {
        let mut t = term(10, 3);
        write(&mut t, b"\x1b[3;9H");
        t.resize(5, 2).unwrap();
        let (grid, cursor) = t.snapshot();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 2);
        assert!(cursor.x < 5 && cursor.y < 2);
    }

    #[test]
    fn ich_clamps_to_remaining_width() {
        let mut t = term(5, 1);
        write(&mut t, b"abcde\x1b[1;2H\x1b[10@");
        let (grid, _) = t.snapshot();
        assert!(grid.cell(1, 0).is_empty());
        assert!(grid.cell(4, 0).is_empty());
    }

    #[test]
    fn decset_bracketed_paste_mode_tracks_2004() {
        let mut t = term(5, 1);
        assert!(!t.bracketed_paste_mode());
        write(&mut t, b"\x1b[?2004h");
        assert!(t.bracketed_paste_mode());
        write(&mut t, b"\x1b[?2004l");
        assert!(!t.bracketed_paste_mode());
    }
}
