//! Create post screen

use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::models::{storage_date, NewPost};
use crate::tui::{
    components::{Form, FormField, FormFieldType, LoadingIndicator, ScreenStatus},
    traits::{Screen, ScreenAction},
};

use super::post_form::{
    draw_form, handle_form_key, AUTHOR, CREATE_DATE, DESCRIPTION, TITLE, UPDATE_DATE,
};

/// Create post screen state
pub struct CreatePostScreen {
    pub form: Form,
    pub status: ScreenStatus,
}

impl CreatePostScreen {
    pub fn new(today: NaiveDate) -> Self {
        let date = storage_date(today);
        Self {
            form: Form::new(vec![
                FormField::new("Title", FormFieldType::Text),
                FormField::new("Author", FormFieldType::Text),
                FormField::new("Description", FormFieldType::TextArea),
                FormField::new("Create Date", FormFieldType::ReadOnly).with_value(&date),
                FormField::new("Update Date", FormFieldType::ReadOnly).with_value(&date),
            ]),
            status: ScreenStatus::default(),
        }
    }

    /// Post exactly as typed; nothing is validated client-side.
    pub fn new_post(&self) -> NewPost {
        NewPost {
            title: self.form.value(TITLE).to_string(),
            author: self.form.value(AUTHOR).to_string(),
            description: self.form.value(DESCRIPTION).to_string(),
            create_date: self.form.value(CREATE_DATE).to_string(),
            update_date: self.form.value(UPDATE_DATE).to_string(),
        }
    }
}

impl Screen for CreatePostScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect, tick: usize) {
        if self.status.is_loading() {
            LoadingIndicator::render(f, area, tick, "Creating post...");
            return;
        }
        draw_form(
            f,
            area,
            &self.form,
            "New Post",
            "Create",
            self.status.error_message.as_deref(),
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        if self.status.is_loading() {
            return ScreenAction::None;
        }
        handle_form_key(&mut self.form, key)
    }

    fn captures_text(&self) -> bool {
        true
    }

    fn is_loading(&self) -> bool {
        self.status.is_loading()
    }
}
