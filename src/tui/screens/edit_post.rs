//! Edit post screen

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};

use crate::models::{display_date, storage_date, Post, PostUpdate};
use crate::tui::{
    components::{
        base_screen::render_error, Busy, Form, FormField, FormFieldType, LoadingIndicator,
        ScreenStatus,
    },
    traits::{Screen, ScreenAction},
};

use super::post_form::{
    draw_form, handle_form_key, AUTHOR, CREATE_DATE, DESCRIPTION, TITLE, UPDATE_DATE,
};

/// Edit post screen state
pub struct EditPostScreen {
    pub post_id: Option<String>,
    pub form: Form,
    /// Record as fetched; `None` until the load succeeds
    pub loaded: Option<Post>,
    pub status: ScreenStatus,
}

impl Default for EditPostScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl EditPostScreen {
    pub fn new() -> Self {
        Self {
            post_id: None,
            form: Self::empty_form(),
            loaded: None,
            status: ScreenStatus::default(),
        }
    }

    fn empty_form() -> Form {
        Form::new(vec![
            FormField::new("Title", FormFieldType::Text),
            FormField::new("Author", FormFieldType::Text),
            FormField::new("Description", FormFieldType::TextArea),
            FormField::new("Create Date", FormFieldType::ReadOnly),
            FormField::new("Update Date", FormFieldType::ReadOnly),
        ])
    }

    /// Start over for another post
    pub fn reset(&mut self, post_id: &str) {
        self.post_id = Some(post_id.to_string());
        self.form = Self::empty_form();
        self.loaded = None;
        self.status = ScreenStatus::default();
    }

    /// Fill the form from the fetched record
    pub fn populate(&mut self, post: Post) {
        self.form.set_value(TITLE, &post.title);
        self.form.set_value(AUTHOR, &post.author);
        self.form.set_value(DESCRIPTION, &post.description);
        self.form.set_value(CREATE_DATE, &display_date(&post.create_date));
        self.form.set_value(UPDATE_DATE, &display_date(&post.update_date));
        self.loaded = Some(post);
    }

    /// Body of the save request, stamped with `today`
    pub fn post_update(&self, today: NaiveDate) -> PostUpdate {
        PostUpdate {
            title: self.form.value(TITLE).to_string(),
            author: self.form.value(AUTHOR).to_string(),
            description: self.form.value(DESCRIPTION).to_string(),
            update_date: storage_date(today),
        }
    }
}

impl Screen for EditPostScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect, tick: usize) {
        if let Some(busy) = self.status.busy {
            let message = match busy {
                Busy::Fetching => "Loading post...",
                Busy::Saving => "Saving post...",
            };
            LoadingIndicator::render(f, area, tick, message);
            return;
        }

        if self.loaded.is_none() {
            let message = self
                .status
                .error_message
                .as_deref()
                .unwrap_or("The post is not available.");
            render_error(f, area, "Could not load post", message, "Esc: Back");
            return;
        }

        draw_form(
            f,
            area,
            &self.form,
            "Edit Post",
            "Save",
            self.status.error_message.as_deref(),
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        // Esc leaves a pending load, which cancels it.
        if self.status.is_fetching() || self.loaded.is_none() {
            return match key.code {
                KeyCode::Esc => ScreenAction::NavigateBack,
                _ => ScreenAction::None,
            };
        }
        if self.status.is_loading() {
            return ScreenAction::None;
        }
        handle_form_key(&mut self.form, key)
    }

    fn captures_text(&self) -> bool {
        self.loaded.is_some()
    }

    fn is_loading(&self) -> bool {
        self.status.is_loading()
    }
}
