//! Title display surface
//!
//! Whatever shows the session title: the window header, the OS window title,
//! or a recorder in headless use.

/// Receives title updates and user-visible notices from a session host
pub trait TitleSurface {
    /// Replace the displayed title; the last call wins
    fn set_title(&mut self, title: &str);

    /// Show a short runtime message (spawn failure, dropped input)
    fn show_notice(&mut self, _notice: &str) {}
}

/// Keeps every title and notice it is given
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TitleLog {
    pub titles: Vec<String>,
    pub notices: Vec<String>,
}

impl TitleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent title
    pub fn current(&self) -> Option<&str> {
        self.titles.last().map(String::as_str)
    }
}

impl TitleSurface for TitleLog {
    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn show_notice(&mut self, notice: &str) {
        self.notices.push(notice.to_string());
    }
}
