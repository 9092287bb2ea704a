//! Stack navigation between screens

use tracing::debug;

/// Navigable routes. The edit route carries the post id as its only parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    EditScreen { post_id: String },
    CreatePostScreen,
    TeacherUsersScreen,
}

/// Route identity without parameters, used to key per-screen work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Home,
    Edit,
    Create,
    TeacherUsers,
}

impl Route {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Route::Home => ScreenKind::Home,
            Route::EditScreen { .. } => ScreenKind::Edit,
            Route::CreatePostScreen => ScreenKind::Create,
            Route::TeacherUsersScreen => ScreenKind::TeacherUsers,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Posts",
            Route::EditScreen { .. } => "Edit Post",
            Route::CreatePostScreen => "Create Post",
            Route::TeacherUsersScreen => "Teacher Users",
        }
    }
}

/// Navigation capability the screens rely on
pub trait Navigator {
    /// Push a route on top of the stack
    fn navigate(&mut self, route: Route);

    /// Pop the current route. Returns false when already at the root.
    fn go_back(&mut self) -> bool;

    /// Route currently on top
    fn current(&self) -> &Route;

    /// Number of routes on the stack
    fn depth(&self) -> usize;
}

/// Route stack whose root is always `Home`
#[derive(Debug, Clone)]
pub struct RouteStack {
    routes: Vec<Route>,
}

impl Default for RouteStack {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteStack {
    pub fn new() -> Self {
        Self {
            routes: vec![Route::Home],
        }
    }
}

impl Navigator for RouteStack {
    fn navigate(&mut self, route: Route) {
        debug!("Navigate {:?} -> {:?}", self.current(), route);
        self.routes.push(route);
    }

    fn go_back(&mut self) -> bool {
        if self.routes.len() <= 1 {
            return false;
        }
        let left = self.routes.pop();
        debug!("Back from {:?} to {:?}", left, self.current());
        true
    }

    fn current(&self) -> &Route {
        // The root is never popped.
        &self.routes[self.routes.len() - 1]
    }

    fn depth(&self) -> usize {
        self.routes.len()
    }
}
