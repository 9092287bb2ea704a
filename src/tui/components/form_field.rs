//! Form field component for user input

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::{traits::FormHandler, ui::Styles};

/// Type of form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormFieldType {
    Text,
    TextArea,
    /// Shown but never editable (dates)
    ReadOnly,
}

/// Individual form field. The cursor counts characters, not bytes.
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub field_type: FormFieldType,
    pub is_focused: bool,
    pub cursor_position: usize,
}

impl FormField {
    pub fn new(label: &str, field_type: FormFieldType) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            field_type,
            is_focused: false,
            cursor_position: 0,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor_position = self.char_count();
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    pub fn is_editable(&self) -> bool {
        self.field_type != FormFieldType::ReadOnly
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if !self.is_editable() {
            return;
        }
        let offset = self.byte_offset(self.cursor_position);
        self.value.insert(offset, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if !self.is_editable() || self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let offset = self.byte_offset(self.cursor_position);
        self.value.remove(offset);
    }

    pub fn delete_char_forward(&mut self) {
        if self.is_editable() && self.cursor_position < self.char_count() {
            let offset = self.byte_offset(self.cursor_position);
            self.value.remove(offset);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.char_count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
    }

    /// Rows the field wants, borders included
    pub fn height(&self) -> u16 {
        match self.field_type {
            FormFieldType::TextArea => 6,
            _ => 3,
        }
    }

    /// Cursor row and column inside the field (ignores soft wrapping)
    fn cursor_row_col(&self) -> (u16, u16) {
        let before: String = self.value.chars().take(self.cursor_position).collect();
        let row = before.matches('\n').count();
        let col = before
            .rsplit('\n')
            .next()
            .map(|line| unicode_width::UnicodeWidthStr::width(line))
            .unwrap_or(0);
        (row as u16, col as u16)
    }

    /// Render the form field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let showing_placeholder = self.value.is_empty() && !self.placeholder.is_empty();
        let display_text = if showing_placeholder {
            &self.placeholder
        } else {
            &self.value
        };

        let border_style = if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let text_style = if showing_placeholder || !self.is_editable() {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let block = Block::default()
            .title(self.label.as_str())
            .borders(Borders::ALL)
            .border_style(border_style);

        let mut paragraph = Paragraph::new(display_text.to_string())
            .style(text_style)
            .block(block);
        if self.field_type == FormFieldType::TextArea {
            paragraph = paragraph.wrap(Wrap { trim: false });
        }

        f.render_widget(paragraph, area);

        if self.is_focused && self.is_editable() {
            let (row, col) = self.cursor_row_col();
            let cursor_x = area.x + 1 + col;
            let cursor_y = area.y + 1 + row;
            if cursor_x < area.x + area.width.saturating_sub(1)
                && cursor_y < area.y + area.height.saturating_sub(1)
            {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

/// Form container that manages multiple fields
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub current_field: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let current_field = fields.iter().position(FormField::is_editable).unwrap_or(0);
        let mut form = Self {
            fields,
            current_field,
        };
        form.update_focus();
        form
    }

    fn update_focus(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(i == self.current_field);
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, index: usize, value: &str) {
        if let Some(field) = self.fields.get_mut(index) {
            field.set_value(value);
        }
    }

    pub fn get_current_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current_field)
    }

    /// True when the focused field is the last editable one
    pub fn on_last_editable(&self) -> bool {
        self.fields
            .iter()
            .rposition(FormField::is_editable)
            .map(|last| last == self.current_field)
            .unwrap_or(true)
    }

    /// Apply an editing or focus key. Returns false when the key is not a
    /// form key, leaving it to the screen.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.previous_field(),
            KeyCode::Char(c) => self.handle_char_input(c),
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Delete => self.handle_delete(),
            KeyCode::Left => {
                if let Some(field) = self.get_current_field_mut() {
                    field.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(field) = self.get_current_field_mut() {
                    field.move_cursor_right();
                }
            }
            KeyCode::Home => {
                if let Some(field) = self.get_current_field_mut() {
                    field.move_cursor_to_start();
                }
            }
            KeyCode::End => {
                if let Some(field) = self.get_current_field_mut() {
                    field.move_cursor_to_end();
                }
            }
            _ => return false,
        }
        true
    }

    /// Render fields stacked top to bottom
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let mut constraints: Vec<Constraint> = self
            .fields
            .iter()
            .map(|field| Constraint::Length(field.height()))
            .collect();
        constraints.push(Constraint::Min(0));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (field, chunk) in self.fields.iter().zip(chunks.iter()) {
            field.render(f, *chunk);
        }
    }
}

impl FormHandler for Form {
    fn get_current_field(&self) -> usize {
        self.current_field
    }

    fn set_current_field(&mut self, field: usize) {
        if field < self.fields.len() {
            self.current_field = field;
            self.update_focus();
        }
    }

    fn get_field_count(&self) -> usize {
        self.fields.len()
    }

    fn is_focusable(&self, field: usize) -> bool {
        self.fields.get(field).map(FormField::is_editable).unwrap_or(false)
    }

    fn handle_char_input(&mut self, c: char) {
        if let Some(field) = self.get_current_field_mut() {
            field.insert_char(c);
        }
    }

    fn handle_backspace(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char();
        }
    }

    fn handle_delete(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char_forward();
        }
    }
}
