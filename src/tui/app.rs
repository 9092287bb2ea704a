//! Main TUI application state and logic

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::components::{AuthHeader, Busy, LoadingIndicator, StatusDisplay};
use super::events::{AppEvent, TaskOutcome};
use super::screens::*;
use super::tasks::ScreenTasks;
use super::traits::{Screen, ScreenAction};
use super::ui::{centered_rect, Styles};
use crate::api::PostApi;
use crate::auth::{AuthProvider, AuthState};
use crate::config::Config;
use crate::models;
use crate::navigation::{Navigator, Route, RouteStack, ScreenKind};

const TICK_RATE: Duration = Duration::from_millis(100);

/// Main TUI application state
pub struct App {
    /// Application configuration
    pub config: Config,
    pub navigator: RouteStack,
    pub auth: AuthState,

    api: Arc<dyn PostApi>,
    auth_provider: Arc<dyn AuthProvider>,
    clock: fn() -> NaiveDate,

    // Screen states
    pub post_list: PostListScreen,
    pub create_post: CreatePostScreen,
    pub edit_post: EditPostScreen,
    pub teacher_users: TeacherUsersScreen,

    // Global application state
    pub status: StatusDisplay,
    pub tick: usize,
    pub should_quit: bool,
    pub show_help_popup: bool,

    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    tasks: ScreenTasks,
    auth_task: Option<JoinHandle<()>>,
}

impl App {
    /// Create a new TUI application
    pub fn new(
        config: Config,
        api: Arc<dyn PostApi>,
        auth_provider: Arc<dyn AuthProvider>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            config,
            navigator: RouteStack::new(),
            auth: AuthState::default(),

            api,
            auth_provider,
            clock: models::today,

            post_list: PostListScreen::new(),
            create_post: CreatePostScreen::new(models::today()),
            edit_post: EditPostScreen::new(),
            teacher_users: TeacherUsersScreen::new(),

            status: StatusDisplay::new().with_timestamps(),
            tick: 0,
            should_quit: false,
            show_help_popup: false,

            events_tx,
            events_rx,
            tasks: ScreenTasks::new(),
            auth_task: None,
        }
    }

    /// Use another source for "today" when stamping posts
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self.create_post = CreatePostScreen::new(clock());
        self
    }

    /// Activate the home screen. Must run inside the tokio runtime.
    pub fn start(&mut self) {
        info!("Using API at {}", self.config.api_url);
        let route = self.navigator.current().clone();
        self.activate(route);
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.start();

        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            while let Ok(event) = self.events_rx.try_recv() {
                self.handle_app_event(event);
            }

            self.tick = self.tick.wrapping_add(1);
            if self.should_quit {
                break;
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Wait for the next background event
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.events_rx.recv().await
    }

    fn shutdown(&mut self) {
        self.tasks.cancel_all();
        if let Some(handle) = self.auth_task.take() {
            handle.abort();
        }
        info!("Shutting down");
    }

    fn current_kind(&self) -> ScreenKind {
        self.navigator.current().kind()
    }

    fn current_screen_mut(&mut self) -> &mut dyn Screen {
        match self.current_kind() {
            ScreenKind::Home => &mut self.post_list,
            ScreenKind::Create => &mut self.create_post,
            ScreenKind::Edit => &mut self.edit_post,
            ScreenKind::TeacherUsers => &mut self.teacher_users,
        }
    }

    fn current_screen(&self) -> &dyn Screen {
        match self.current_kind() {
            ScreenKind::Home => &self.post_list,
            ScreenKind::Create => &self.create_post,
            ScreenKind::Edit => &self.edit_post,
            ScreenKind::TeacherUsers => &self.teacher_users,
        }
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help_popup = false;
            }
            return;
        }

        // The login flow owns the keyboard until it settles.
        if self.auth.is_loading {
            if key.code == KeyCode::Esc && self.auth_task.is_some() {
                self.cancel_login();
            }
            return;
        }

        if !self.current_screen().captures_text() {
            match key.code {
                KeyCode::F(1) | KeyCode::Char('?') => {
                    self.show_help_popup = true;
                    return;
                }
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                _ => {}
            }
        }

        let action = self.current_screen_mut().handle_key_event(key);
        self.apply(action);
    }

    fn apply(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::NavigateTo(route) => self.navigate_to(route),
            ScreenAction::NavigateBack => self.go_back(),
            ScreenAction::Reload => {
                let route = self.navigator.current().clone();
                self.activate(route);
            }
            ScreenAction::Submit => self.submit(),
            ScreenAction::DeletePost(id) => self.delete_post(id),
            ScreenAction::Login => self.login(),
            ScreenAction::Logout => self.logout(),
            ScreenAction::SetStatus(message) => self.status.set_info(message),
            ScreenAction::None => {}
        }
    }

    /// Push `route`, leaving the current screen
    pub fn navigate_to(&mut self, route: Route) {
        self.tasks.cancel(self.current_kind());
        self.navigator.navigate(route.clone());
        self.activate(route);
    }

    /// Pop back to the previous screen. No-op at the root.
    pub fn go_back(&mut self) {
        let leaving = self.current_kind();
        if !self.navigator.go_back() {
            return;
        }
        self.tasks.cancel(leaving);
        let route = self.navigator.current().clone();
        self.activate(route);
    }

    /// Reset the screen for `route` and start its load
    fn activate(&mut self, route: Route) {
        match route {
            Route::Home => self.load_posts(),
            Route::EditScreen { post_id } => {
                self.edit_post.reset(&post_id);
                self.load_post(post_id);
            }
            Route::CreatePostScreen => {
                self.create_post = CreatePostScreen::new((self.clock)());
            }
            Route::TeacherUsersScreen => {}
        }
    }

    fn load_posts(&mut self) {
        let api = Arc::clone(&self.api);
        let query = self.post_list.query();
        match &query {
            Some(term) => info!("Searching posts for {:?}", term),
            None => info!("Loading posts"),
        }

        self.post_list.confirm = None;
        self.post_list.status.start(Busy::Fetching);
        self.tasks
            .spawn(ScreenKind::Home, self.events_tx.clone(), async move {
                let result = match query {
                    Some(term) => api.search_posts(&term).await,
                    None => api.list_posts().await,
                };
                TaskOutcome::PostsLoaded(result)
            });
    }

    fn load_post(&mut self, id: String) {
        info!("Loading post {}", id);
        let api = Arc::clone(&self.api);
        self.edit_post.status.start(Busy::Fetching);
        self.tasks
            .spawn(ScreenKind::Edit, self.events_tx.clone(), async move {
                TaskOutcome::PostLoaded(api.get_post(&id).await)
            });
    }

    fn submit(&mut self) {
        if self.current_screen().is_loading() {
            debug!("Ignoring submit while a request is in flight");
            return;
        }
        match self.current_kind() {
            ScreenKind::Create => self.create(),
            ScreenKind::Edit => self.save(),
            other => debug!("Nothing to submit on {:?}", other),
        }
    }

    fn create(&mut self) {
        let new_post = self.create_post.new_post();
        info!("Creating post {:?}", new_post.title);

        let api = Arc::clone(&self.api);
        self.create_post.status.start(Busy::Saving);
        self.tasks
            .spawn(ScreenKind::Create, self.events_tx.clone(), async move {
                TaskOutcome::PostCreated(api.create_post(&new_post).await)
            });
    }

    fn save(&mut self) {
        if self.edit_post.loaded.is_none() {
            return;
        }
        let Some(id) = self.edit_post.post_id.clone() else {
            return;
        };
        let update = self.edit_post.post_update((self.clock)());
        info!("Updating post {}", id);

        let api = Arc::clone(&self.api);
        self.edit_post.status.start(Busy::Saving);
        self.tasks
            .spawn(ScreenKind::Edit, self.events_tx.clone(), async move {
                TaskOutcome::PostUpdated(api.update_post(&id, &update).await)
            });
    }

    fn delete_post(&mut self, id: String) {
        info!("Deleting post {}", id);
        let api = Arc::clone(&self.api);
        self.post_list.status.start(Busy::Saving);
        self.tasks
            .spawn(ScreenKind::Home, self.events_tx.clone(), async move {
                let result = api.delete_post(&id).await;
                TaskOutcome::PostDeleted { id, result }
            });
    }

    fn login(&mut self) {
        if self.auth.is_authenticated() {
            self.status.set_info("Already logged in".to_string());
            return;
        }
        info!("Starting login");
        self.auth.begin();

        let provider = Arc::clone(&self.auth_provider);
        let tx = self.events_tx.clone();
        self.auth_task = Some(tokio::spawn(async move {
            let challenge_tx = tx.clone();
            let result = provider
                .authorize(Box::new(move |challenge| {
                    let _ = challenge_tx.send(AppEvent::AuthChallenge(challenge));
                }))
                .await;
            let _ = tx.send(AppEvent::LoggedIn(result));
        }));
    }

    fn cancel_login(&mut self) {
        if let Some(handle) = self.auth_task.take() {
            handle.abort();
        }
        warn!("Login cancelled");
        self.auth.settle();
        self.status.set_warning("Login cancelled".to_string());
    }

    fn logout(&mut self) {
        if !self.auth.is_authenticated() {
            self.status.set_info("Not logged in".to_string());
            return;
        }
        info!("Logging out");
        self.auth.begin();

        let provider = Arc::clone(&self.auth_provider);
        let tx = self.events_tx.clone();
        self.auth_task = Some(tokio::spawn(async move {
            let _ = tx.send(AppEvent::LoggedOut(provider.clear_session().await));
        }));
    }

    /// Apply an event coming from a background task
    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Task {
                screen,
                generation,
                outcome,
            } => {
                if !self.tasks.accept(screen, generation) {
                    debug!(
                        "Dropping stale result for {:?} (generation {}, current {})",
                        screen,
                        generation,
                        self.tasks.generation(screen)
                    );
                    return;
                }
                self.handle_outcome(outcome);
            }
            AppEvent::AuthChallenge(challenge) => {
                if self.auth.is_loading {
                    info!("Waiting for the user to confirm code {}", challenge.user_code);
                    self.auth.challenge = Some(challenge);
                }
            }
            AppEvent::LoggedIn(result) => {
                if !self.auth.is_loading {
                    return;
                }
                self.auth_task = None;
                match result {
                    Ok(user) => {
                        self.status
                            .set_success(format!("Logado como {}", user.display_name()));
                        self.auth.signed_in(user);
                    }
                    Err(e) => {
                        error!("Login failed: {}", e);
                        self.auth.settle();
                        self.status.set_error(format!("Login failed: {}", e));
                    }
                }
            }
            AppEvent::LoggedOut(result) => {
                self.auth_task = None;
                match result {
                    Ok(()) => {
                        info!("Logged out");
                        self.auth.signed_out();
                        self.status.set_info("Logged out".to_string());
                    }
                    Err(e) => {
                        error!("Logout failed: {}", e);
                        self.auth.settle();
                        self.status.set_error(format!("Logout failed: {}", e));
                    }
                }
            }
        }
    }

    fn handle_outcome(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::PostsLoaded(Ok(posts)) => {
                info!("Loaded {} posts", posts.len());
                self.post_list.status.succeed();
                self.post_list.set_posts(posts);
            }
            TaskOutcome::PostsLoaded(Err(e)) => {
                error!("Failed to load posts: {}", e);
                self.post_list.set_posts(Vec::new());
                self.post_list.status.fail(e.to_string());
                self.status.set_error(format!("Could not load posts: {}", e));
            }
            TaskOutcome::PostLoaded(Ok(post)) => {
                debug!("Loaded post {}", post.id);
                self.edit_post.status.succeed();
                self.edit_post.populate(post);
            }
            TaskOutcome::PostLoaded(Err(e)) => {
                error!("Failed to load post: {}", e);
                let message = if e.is_not_found() {
                    "This post no longer exists.".to_string()
                } else {
                    e.to_string()
                };
                self.edit_post.status.fail(message);
                self.status.set_error(format!("Could not load post: {}", e));
            }
            TaskOutcome::PostCreated(Ok(created)) => {
                match created {
                    Some(post) => info!("Created post {}", post.id),
                    None => info!("Created post"),
                }
                self.create_post.status.succeed();
                self.status.set_success("Post cadastrado com sucesso!".to_string());
                self.go_back();
            }
            TaskOutcome::PostCreated(Err(e)) => {
                error!("Failed to create post: {}", e);
                self.create_post.status.fail(format!("Could not create post: {}", e));
                self.status.set_error(format!("Could not create post: {}", e));
            }
            TaskOutcome::PostUpdated(Ok(_)) => {
                info!("Updated post");
                self.edit_post.status.succeed();
                self.status.set_success("Post editado com sucesso!".to_string());
                self.go_back();
            }
            TaskOutcome::PostUpdated(Err(e)) => {
                error!("Failed to update post: {}", e);
                self.edit_post.status.fail(format!("Could not save post: {}", e));
                self.status.set_error(format!("Could not save post: {}", e));
            }
            TaskOutcome::PostDeleted { id, result: Ok(()) } => {
                info!("Deleted post {}", id);
                self.status.set_success("Post deleted".to_string());
                self.load_posts();
            }
            TaskOutcome::PostDeleted { id, result: Err(e) } => {
                error!("Failed to delete post {}: {}", id, e);
                self.post_list.status.succeed();
                self.status.set_error(format!("Could not delete post: {}", e));
            }
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();
        let on_home = self.current_kind() == ScreenKind::Home;

        let constraints = if on_home {
            vec![
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Screen
                Constraint::Length(3), // Status bar
            ]
        } else {
            vec![Constraint::Min(0), Constraint::Length(3)]
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(size);
        let (content, status_area) = if on_home {
            AuthHeader::render(f, chunks[0], &self.auth);
            (chunks[1], chunks[2])
        } else {
            (chunks[0], chunks[1])
        };

        let tick = self.tick;
        self.current_screen_mut().draw(f, content, tick);

        if self.auth.is_loading {
            if self.auth.challenge.is_some() {
                let popup = centered_rect(70, 60, content);
                f.render_widget(Clear, popup);
                AuthHeader::render_challenge(f, popup, &self.auth);
            } else {
                LoadingIndicator::render(f, content, tick, "Contacting the identity provider...");
            }
        }

        let idle_text = format!(
            "Blog Educacional - {} | Esc: Back | q: Quit | F1/?: Help",
            self.navigator.current().title()
        );
        self.status.render(f, status_area, &idle_text);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    /// Draw help popup with context-sensitive shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 70, area);
        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.get_context_help())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("Help - Context Shortcuts")
                    .borders(Borders::ALL)
                    .border_style(Styles::title()),
            );
        f.render_widget(help_popup, popup_area);
    }

    /// Get context-sensitive help content
    fn get_context_help(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            Esc - Go back\n\
            q / Ctrl-C - Quit (q is typed while editing text)\n\
            F1 / ? - Toggle this help\n\n";

        let screen_help = match self.current_kind() {
            ScreenKind::Home => {
                "Posts:\n\
                ↑/↓ - Select post\n\
                e / Enter - Edit post\n\
                d - Delete post\n\
                n - New post\n\
                / - Search\n\
                r - Refresh\n\
                t - Teacher users\n\
                l / o - Log in / Log out"
            }
            ScreenKind::Create | ScreenKind::Edit => {
                "Post Form:\n\
                Tab / Shift+Tab - Next / previous field\n\
                Enter - Next field, saves from Description\n\
                Alt+Enter / Shift+Enter - New line in Description\n\
                Ctrl-S - Save\n\
                Esc - Cancel"
            }
            ScreenKind::TeacherUsers => {
                "Teacher Users:\n\
                Esc - Back to posts"
            }
        };

        format!("{}{}", global_help, screen_help)
    }
}
