//! Confirm/cancel prompt for destructive actions

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::ui::{centered_rect, Styles};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Cancel,
    Confirm,
}

/// Outcome of a key press on the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    Pending,
    Confirmed,
    Cancelled,
}

/// Dialog asking whether to delete a post. Starts on Cancel.
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    pub post_id: String,
    pub title: String,
    pub message: String,
    pub selected: ConfirmChoice,
}

impl ConfirmDialog {
    pub fn delete_post(post_id: &str, post_title: &str) -> Self {
        Self {
            post_id: post_id.to_string(),
            title: "Delete post".to_string(),
            message: format!("Are you sure you want to delete \"{}\"?", post_title),
            selected: ConfirmChoice::Cancel,
        }
    }

    fn toggle(&mut self) {
        self.selected = match self.selected {
            ConfirmChoice::Cancel => ConfirmChoice::Confirm,
            ConfirmChoice::Confirm => ConfirmChoice::Cancel,
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle();
                DialogResult::Pending
            }
            KeyCode::Enter => match self.selected {
                ConfirmChoice::Confirm => DialogResult::Confirmed,
                ConfirmChoice::Cancel => DialogResult::Cancelled,
            },
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('c') => DialogResult::Cancelled,
            _ => DialogResult::Pending,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 30, area);

        let button = |label: &str, choice: ConfirmChoice, style| {
            if self.selected == choice {
                Span::styled(format!("[ {} ]", label), Styles::selected())
            } else {
                Span::styled(format!("  {}  ", label), style)
            }
        };

        let text = vec![
            Line::from(self.message.clone()),
            Line::from(""),
            Line::from(vec![
                button("Cancel", ConfirmChoice::Cancel, Styles::inactive()),
                Span::raw("    "),
                button("Delete", ConfirmChoice::Confirm, Styles::danger()),
            ]),
            Line::from(""),
            Line::from(Span::styled("←/→: Choose | Enter: Apply | Esc: Cancel", Styles::info())),
        ];

        let dialog = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(self.title.as_str())
                    .borders(Borders::ALL)
                    .border_style(Styles::warning()),
            );

        f.render_widget(Clear, popup_area);
        f.render_widget(dialog, popup_area);
    }
}
