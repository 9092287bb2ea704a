//! Teacher users screen. The route exists but the feature does not yet.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::{
    traits::{Screen, ScreenAction},
    ui::Styles,
};

#[derive(Debug, Default)]
pub struct TeacherUsersScreen;

impl TeacherUsersScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Screen for TeacherUsersScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect, _tick: usize) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Managing teacher users is not available yet.",
                Styles::warning(),
            )),
            Line::from(""),
            Line::from(Span::styled("Esc: Back", Styles::info())),
        ];
        f.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title("Teacher Users")
                        .borders(Borders::ALL)
                        .border_style(Styles::inactive_border()),
                ),
            area,
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => ScreenAction::NavigateBack,
            _ => ScreenAction::None,
        }
    }
}
