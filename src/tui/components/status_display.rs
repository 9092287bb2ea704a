//! Status display component for showing messages

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::ui::Styles;

/// Types of status messages
#[derive(Debug, Clone, PartialEq)]
pub enum StatusType {
    Info,
    Success,
    Warning,
    Error,
}

/// Status message with type and content
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub status_type: StatusType,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl StatusMessage {
    pub fn new(message: String, status_type: StatusType) -> Self {
        Self {
            message,
            status_type,
            timestamp: chrono::Local::now(),
        }
    }
}

/// Status bar shown under every screen
#[derive(Debug, Default)]
pub struct StatusDisplay {
    pub current_message: Option<StatusMessage>,
    pub show_timestamp: bool,
}

impl StatusDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamp = true;
        self
    }

    pub fn set_info(&mut self, message: String) {
        self.current_message = Some(StatusMessage::new(message, StatusType::Info));
    }

    pub fn set_success(&mut self, message: String) {
        self.current_message = Some(StatusMessage::new(message, StatusType::Success));
    }

    pub fn set_warning(&mut self, message: String) {
        self.current_message = Some(StatusMessage::new(message, StatusType::Warning));
    }

    pub fn set_error(&mut self, message: String) {
        self.current_message = Some(StatusMessage::new(message, StatusType::Error));
    }

    pub fn get_current(&self) -> Option<&StatusMessage> {
        self.current_message.as_ref()
    }

    /// Render with the given fallback text when there is no message
    pub fn render(&self, f: &mut Frame, area: Rect, idle_text: &str) {
        let (content, style) = match &self.current_message {
            Some(message) => (
                self.format_message(message),
                match message.status_type {
                    StatusType::Info => Styles::info(),
                    StatusType::Success => Styles::success(),
                    StatusType::Warning => Styles::warning(),
                    StatusType::Error => Styles::error(),
                },
            ),
            None => (idle_text.to_string(), Styles::inactive()),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border());

        f.render_widget(Paragraph::new(content).style(style).block(block), area);
    }

    fn format_message(&self, message: &StatusMessage) -> String {
        let prefix = match message.status_type {
            StatusType::Info => "ℹ",
            StatusType::Success => "✓",
            StatusType::Warning => "⚠",
            StatusType::Error => "✗",
        };

        if self.show_timestamp {
            format!(
                "{} [{}] {}",
                prefix,
                message.timestamp.format("%H:%M:%S"),
                message.message
            )
        } else {
            format!("{} {}", prefix, message.message)
        }
    }
}
