// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! SGR (Select Graphic Rendition) as a pure function over cursor attribute state.

use crate::cell::{
    SGR_BOLD, SGR_CONCEAL, SGR_DBL_UNDERLINE, SGR_FAINT, SGR_INVERT, SGR_ITALIC, SGR_RAPID_BLINK,
    SGR_SLOW_BLINK, SGR_STRIKE, SGR_UNDERLINE,
};
use crate::color::{Color, PALETTE};
use crate::config::Config;

/// Applies one SGR code to `(sgr, fg, bg)`, returning the updated triple. `n` not in
/// the recognized table is a no-op here; the caller logs the warning.
pub fn apply(sgr: u16, fg: Color, bg: Color, n: u32, cfg: &Config) -> (u16, Color, Color) {
    match n {
        0 => (0, cfg.fg, cfg.bg),
        1 => (set_clear(sgr, SGR_BOLD, SGR_FAINT), fg, bg),
        2 => (set_clear(sgr, SGR_FAINT, SGR_BOLD), fg, bg),
        3 => (sgr | SGR_ITALIC, fg, bg),
        4 => (set_clear(sgr, SGR_UNDERLINE, SGR_DBL_UNDERLINE), fg, bg),
        5 => (set_clear(sgr, SGR_SLOW_BLINK, SGR_RAPID_BLINK), fg, bg),
        6 => (set_clear(sgr, SGR_RAPID_BLINK, SGR_SLOW_BLINK), fg, bg),
        7 => (sgr | SGR_INVERT, fg, bg),
        8 => (sgr | SGR_CONCEAL, fg, bg),
        9 => (sgr | SGR_STRIKE, fg, bg),
        21 => (set_clear(sgr, SGR_DBL_UNDERLINE, SGR_UNDERLINE), fg, bg),
        22 => (sgr & !(SGR_BOLD | SGR_FAINT), fg, bg),
        23 => (sgr & !SGR_ITALIC, fg, bg),
        24 => (sgr & !(SGR_UNDERLINE | SGR_DBL_UNDERLINE), fg, bg),
        25 => (sgr & !(SGR_SLOW_BLINK | SGR_RAPID_BLINK), fg, bg),
        27 => (sgr & !SGR_INVERT, fg, bg),
        28 => (sgr & !SGR_CONCEAL, fg, bg),
        29 => (sgr & !SGR_STRIKE, fg, bg),
        30..=37 => (sgr, PALETTE[(n - 30) as usize], bg),
        39 => (sgr, cfg.fg, bg),
        40..=47 => (sgr, fg, PALETTE[(n - 40) as usize]),
        49 => (sgr, fg, cfg.bg),
        90..=97 => (sgr, PALETTE[(n - 90 + 8) as usize], bg),
        100..=107 => (sgr, fg, PALETTE[(n - 100 + 8) as usize]),
        _ => (sgr, fg, bg),
    }
}

/// Whether `n` is a code this table recognizes (used by the caller to decide
/// whether to log a warning for an unrecognized SGR code).
pub fn is_recognized(n: u32) -> bool {
    matches!(n, 0..=9 | 21..=25 | 27..=29 | 30..=37 | 39 | 40..=47 | 49 | 90..=97 | 100..=107)
}

/// Sets `set_bit` and clears `clear_bit` — used for the documented mutually-exclusive
/// SGR pairs (BOLD/FAINT, UNDERLINE/DBL_UNDERLINE, SLOW_BLINK/RAPID_BLINK).
fn set_clear(sgr: u16, set_bit: u16, clear_bit: u16) -> u16 {
    (sgr | set_bit) & !clear_bit
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reset_clears_sgr_and_restores_default_colors() {
        let cfg = Config::default();
        let (sgr, fg, bg) = apply(SGR_BOLD | SGR_ITALIC, Color::rgb(1, 2, 3), Color::rgb(4, 5, 6), 0, &cfg);
        assert_eq!(sgr, 0);
        assert_eq!(fg, cfg.fg);
        assert_eq!(bg, cfg.bg);
    }

    #[test]
    fn bold_and_faint_are_mutually_exclusive() {
        let cfg = Config::default();
        let (sgr, ..) = apply(SGR_FAINT, Color::WHITE, Color::BLACK, 1, &cfg);
        assert_eq!(sgr, SGR_BOLD);
        let (sgr, ..) = apply(SGR_BOLD, Color::WHITE, Color::BLACK, 2, &cfg);
        assert_eq!(sgr, SGR_FAINT);
    }

    #[test]
    fn underline_and_double_underline_are_mutually_exclusive() {
        let cfg = Config::default();
        let (sgr, ..) = apply(SGR_DBL_UNDERLINE, Color::WHITE, Color::BLACK, 4, &cfg);
        assert_eq!(sgr, SGR_UNDERLINE);
        let (sgr, ..) = apply(SGR_UNDERLINE, Color::WHITE, Color::BLACK, 21, &cfg);
        assert_eq!(sgr, SGR_DBL_UNDERLINE);
    }

    #[test]
    fn fg_palette_codes_30_to_37() {
        let cfg = Config::default();
        let (_, fg, _) = apply(0, Color::WHITE, Color::BLACK, 31, &cfg);
        assert_eq!(fg, PALETTE[1]);
    }

    #[test]
    fn bright_fg_palette_codes_90_to_97() {
        let cfg = Config::default();
        let (_, fg, _) = apply(0, Color::WHITE, Color::BLACK, 91, &cfg);
        assert_eq!(fg, PALETTE[9]);
    }

    #[test]
    fn code_39_resets_fg_to_config_default() {
        let cfg = Config::default();
        let (_, fg, _) = apply(0, Color::rgb(1, 2, 3), Color::BLACK, 39, &cfg);
        assert_eq!(fg, cfg.fg);
    }

    #[test]
    fn unrecognized_code_is_a_no_op_but_flagged() {
        let cfg = Config::default();
        let before = (5u16, Color::WHITE, Color::BLACK);
        let after = apply(before.0, before.1, before.2, 200, &cfg);
        assert_eq!(before, after);
        assert!(!is_recognized(200));
    }
}
