//! Terminal surface
//!
//! Thin owner of a `vt100` parser: feeds PTY output in, reports title
//! changes and exposes the screen for rendering. Escape-code handling and
//! the screen buffer belong to `vt100`.

pub mod input;
pub mod render;

use crate::config::DEFAULT_TITLE;
use crate::pty::{DEFAULT_COLS, DEFAULT_ROWS};

/// Lines kept above the visible screen
pub const SCROLLBACK_LINES: usize = 2000;

/// Screen state of one session
pub struct TerminalSurface {
    parser: vt100::Parser,
    title: String,
    scrollback_offset: usize,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl std::fmt::Debug for TerminalSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSurface")
            .field("size", &self.size())
            .field("title", &self.title)
            .finish()
    }
}

impl TerminalSurface {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            parser: vt100::Parser::new(rows.max(1), cols.max(1), SCROLLBACK_LINES),
            title: String::new(),
            scrollback_offset: 0,
        }
    }

    /// Feed PTY output. Returns true when the terminal title changed.
    pub fn feed(&mut self, bytes: &[u8]) -> bool {
        self.parser.process(bytes);
        // new output snaps the view back to the bottom
        if self.scrollback_offset != 0 {
            self.scrollback_offset = 0;
            self.parser.set_scrollback(0);
        }

        let title = self.parser.screen().title();
        if title != self.title {
            self.title = title.to_string();
            true
        } else {
            false
        }
    }

    /// Title set by the program via OSC 0/2, empty if none
    pub fn raw_title(&self) -> &str {
        &self.title
    }

    /// Title to show in the window: the program's, or the application name
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }

    pub fn screen(&self) -> &vt100::Screen {
        self.parser.screen()
    }

    /// (rows, cols)
    pub fn size(&self) -> (u16, u16) {
        self.parser.screen().size()
    }

    /// Change the grid size. Returns true when it actually changed.
    pub fn resize(&mut self, rows: u16, cols: u16) -> bool {
        let (rows, cols) = (rows.max(1), cols.max(1));
        if self.size() == (rows, cols) {
            return false;
        }
        self.parser.set_scrollback(0);
        self.parser.set_size(rows, cols);
        if self.scrollback_offset != 0 {
            self.set_scrollback(self.scrollback_offset);
        }
        true
    }

    /// Visible text, rows joined by newlines
    pub fn contents(&self) -> String {
        self.parser.screen().contents()
    }

    /// Scroll the view into history by `delta` lines (negative scrolls down)
    pub fn scroll(&mut self, delta: isize) {
        self.set_scrollback(self.scrollback_offset.saturating_add_signed(delta));
    }

    fn set_scrollback(&mut self, target: usize) {
        // vt100 only clamps to the history length; an offset past the
        // screen height underflows when the visible rows are computed
        let max = usize::from(self.size().0);
        self.parser.set_scrollback(target.min(max));
        self.scrollback_offset = self.parser.screen().scrollback();
    }

    pub fn scrollback_offset(&self) -> usize {
        self.scrollback_offset
    }

    pub fn application_cursor(&self) -> bool {
        self.parser.screen().application_cursor()
    }

    pub fn bracketed_paste(&self) -> bool {
        self.parser.screen().bracketed_paste()
    }

    /// Bytes to send for a paste, wrapped when the program enabled bracketed paste
    pub fn paste_payload(&self, text: &str) -> Vec<u8> {
        input::paste_bytes(text, self.bracketed_paste())
    }
}
