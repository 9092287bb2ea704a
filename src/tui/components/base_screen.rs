//! Per-screen request state shared by every screen

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::ui::Styles;

/// Kind of request a screen is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Busy {
    /// Reading data; leaving the screen discards it
    Fetching,
    /// Writing data; input is blocked until the server answers
    Saving,
}

/// `idle -> loading -> {success -> idle, error -> idle}`. The last error is
/// kept for display until the next request starts.
#[derive(Debug, Clone, Default)]
pub struct ScreenStatus {
    pub busy: Option<Busy>,
    pub error_message: Option<String>,
}

impl ScreenStatus {
    pub fn start(&mut self, busy: Busy) {
        self.busy = Some(busy);
        self.error_message = None;
    }

    pub fn succeed(&mut self) {
        self.busy = None;
        self.error_message = None;
    }

    pub fn fail(&mut self, message: String) {
        self.busy = None;
        self.error_message = Some(message);
    }

    pub fn is_loading(&self) -> bool {
        self.busy.is_some()
    }

    pub fn is_fetching(&self) -> bool {
        self.busy == Some(Busy::Fetching)
    }
}

/// Visible error panel
pub fn render_error(f: &mut Frame, area: Rect, title: &str, message: &str, hint: &str) {
    let text = format!("{}\n\n{}", message, hint);
    let panel = Paragraph::new(text)
        .style(Styles::error())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Styles::error()),
        );
    f.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        let mut status = ScreenStatus::default();
        assert!(!status.is_loading());

        status.start(Busy::Fetching);
        assert!(status.is_fetching());

        status.fail("boom".to_string());
        assert!(!status.is_loading());
        assert_eq!(status.error_message.as_deref(), Some("boom"));

        status.start(Busy::Saving);
        assert!(status.is_loading());
        assert!(!status.is_fetching());
        assert!(status.error_message.is_none());

        status.succeed();
        assert!(!status.is_loading());
    }
}
