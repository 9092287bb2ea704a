//! Full-screen loading indicator

use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::ui::{centered_rect, Styles};

const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

pub struct LoadingIndicator;

impl LoadingIndicator {
    pub fn frame(tick: usize) -> char {
        SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
    }

    /// Cover `area` and show a spinner with `message`
    pub fn render(f: &mut Frame, area: Rect, tick: usize, message: &str) {
        f.render_widget(Clear, area);
        f.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
            area,
        );

        let inner = centered_rect(60, 20, area);
        let text = format!("{} {}", Self::frame(tick), message);
        f.render_widget(
            Paragraph::new(text)
                .style(Styles::warning())
                .alignment(Alignment::Center),
            inner,
        );
    }
}
