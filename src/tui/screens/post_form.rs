//! Key handling and layout shared by the create and edit forms

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::{
    components::{Form, FormFieldType},
    traits::{FormHandler, ScreenAction},
    ui::Styles,
};

// Field order shared by both forms
pub const TITLE: usize = 0;
pub const AUTHOR: usize = 1;
pub const DESCRIPTION: usize = 2;
pub const CREATE_DATE: usize = 3;
pub const UPDATE_DATE: usize = 4;

/// Ctrl-S submits, Esc leaves. Enter submits from the last editable field
/// and otherwise moves on. Alt-Enter or Shift-Enter adds a newline in the
/// description.
pub fn handle_form_key(form: &mut Form, key: KeyEvent) -> ScreenAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
        return ScreenAction::Submit;
    }

    match key.code {
        KeyCode::Esc => ScreenAction::NavigateBack,
        KeyCode::Enter if key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) => {
            if let Some(field) = form.get_current_field_mut() {
                if field.field_type == FormFieldType::TextArea {
                    field.insert_char('\n');
                }
            }
            ScreenAction::None
        }
        KeyCode::Enter => {
            if form.on_last_editable() {
                ScreenAction::Submit
            } else {
                form.next_field();
                ScreenAction::None
            }
        }
        _ => {
            form.handle_key(key);
            ScreenAction::None
        }
    }
}

pub fn draw_form(
    f: &mut Frame,
    area: Rect,
    form: &Form,
    title: &str,
    submit_label: &str,
    error: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Fields
            Constraint::Length(3), // Buttons
        ])
        .split(area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Styles::active_border());
    let inner = block.inner(chunks[0]);
    f.render_widget(block, chunks[0]);
    form.render(f, inner);

    let (text, style) = match error {
        Some(error) => (format!("✗ {}", error), Styles::error()),
        None => (
            format!(
                "Esc: Cancel | Ctrl-S/Enter: {} | Tab: Next field | Alt-Enter: New line",
                submit_label
            ),
            Styles::info(),
        ),
    };
    f.render_widget(
        Paragraph::new(text).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        ),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::FormField;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn post_form() -> Form {
        Form::new(vec![
            FormField::new("Title", FormFieldType::Text),
            FormField::new("Author", FormFieldType::Text),
            FormField::new("Description", FormFieldType::TextArea),
            FormField::new("Create Date", FormFieldType::ReadOnly),
            FormField::new("Update Date", FormFieldType::ReadOnly),
        ])
    }

    #[test]
    fn test_enter_moves_on_then_submits_from_description() {
        let mut form = post_form();
        assert_eq!(handle_form_key(&mut form, key(KeyCode::Enter)), ScreenAction::None);
        assert_eq!(handle_form_key(&mut form, key(KeyCode::Enter)), ScreenAction::None);
        assert_eq!(form.get_current_field(), DESCRIPTION);
        assert_eq!(handle_form_key(&mut form, key(KeyCode::Enter)), ScreenAction::Submit);
        assert_eq!(form.value(DESCRIPTION), "");
    }

    #[test]
    fn test_modified_enter_adds_newline_only_in_description() {
        let mut form = post_form();
        let alt_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT);
        assert_eq!(handle_form_key(&mut form, alt_enter), ScreenAction::None);
        assert_eq!(form.value(TITLE), "");

        form.set_current_field(DESCRIPTION);
        handle_form_key(&mut form, key(KeyCode::Char('a')));
        handle_form_key(&mut form, KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        handle_form_key(&mut form, key(KeyCode::Char('b')));
        assert_eq!(form.value(DESCRIPTION), "a\nb");
    }
}
