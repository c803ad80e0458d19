// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The renderer collaborator contract (§4.3). No concrete windowing/graphics
//! backend ships in this crate; an embedding application implements this trait
//! over its own window + GPU/2D surface.

use crate::cursor::Cursor;
use crate::grid::GridView;

/// Consumes the grid + cursor once per frame and draws pixels; owns the window and
/// the cell pixel size.
///
/// The expected per-frame sequence (driven by the host event loop, not by this
/// crate): poll the PTY, clear, draw cells (background rect + underline bar at
/// `baseline + 2` + foreground glyph blit), then blink-toggle the cursor every
/// 500ms and draw a vertical bar at the cursor cell if `cursor.visible`.
pub trait RendererCollaborator {
    /// Cell pixel dimensions, used by the composition root to compute the grid
    /// size that should be passed to `Terminal::resize` on a window-size change.
    fn cell_size(&self) -> (u32, u32);

    /// Renders one frame from a grid snapshot and cursor copy.
    fn render_frame(&mut self, grid: GridView<'_>, cursor: &Cursor);

    /// Invoked when an OSC 0/1/2 sequence completes.
    fn set_window_title(&mut self, title: &str);
}

/// A no-op renderer used by tests and by callers that only care about the grid
/// model, not pixels.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_title: Option<String>,
    pub frames_rendered: u64,
}

impl RendererCollaborator for NullRenderer {
    fn cell_size(&self) -> (u32, u32) {
        (8, 16)
    }

    fn render_frame(&mut self, _grid: GridView<'_>, _cursor: &Cursor) {
        self.frames_rendered += 1;
    }

    fn set_window_title(&mut self, title: &str) {
        self.last_title = Some(title.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn null_renderer_records_title() {
        let mut r = NullRenderer::default();
        r.set_window_title("hello");
        assert_eq!(r.last_title.as_deref(), Some("hello"));
    }
}
