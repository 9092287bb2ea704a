//! Header of the post list: app title, login/logout action and greeting

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::auth::AuthState;
use crate::tui::ui::Styles;

pub const APP_TITLE: &str = "Blog Educacional";

pub struct AuthHeader;

impl AuthHeader {
    /// Label of the auth action for the current state
    pub fn action_label(auth: &AuthState) -> &'static str {
        if auth.is_authenticated() {
            "[o] Log out"
        } else {
            "[l] Log in"
        }
    }

    /// Greeting, only when a user is signed in
    pub fn greeting(auth: &AuthState) -> Option<String> {
        auth.user
            .as_ref()
            .map(|user| format!("Logado como {}", user.display_name()))
    }

    pub fn render(f: &mut Frame, area: Rect, auth: &AuthState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(14)])
            .split(inner);

        let mut left = vec![Span::styled(APP_TITLE, Styles::title())];
        if let Some(greeting) = Self::greeting(auth) {
            left.push(Span::raw("  "));
            left.push(Span::styled(greeting, Styles::success()));
        }
        f.render_widget(Paragraph::new(Line::from(left)), chunks[0]);

        f.render_widget(
            Paragraph::new(Self::action_label(auth)).style(Styles::info()),
            chunks[1],
        );
    }

    /// Panel telling the user where to confirm the login code
    pub fn render_challenge(f: &mut Frame, area: Rect, auth: &AuthState) {
        let Some(challenge) = &auth.challenge else {
            return;
        };

        let mut lines = vec![
            Line::from("To log in, open this address in a browser:"),
            Line::from(Span::styled(challenge.verification_uri.clone(), Styles::info())),
            Line::from(""),
            Line::from(vec![
                Span::raw("and enter the code "),
                Span::styled(challenge.user_code.clone(), Styles::title()),
            ]),
        ];
        if let Some(complete) = &challenge.verification_uri_complete {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("Or go straight to {}", complete)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Waiting for confirmation... Esc: Cancel",
            Styles::warning(),
        )));

        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(
                Block::default()
                    .title("Log in")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            ),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    #[test]
    fn test_greeting_and_action_follow_user() {
        let mut auth = AuthState::default();
        assert_eq!(AuthHeader::action_label(&auth), "[l] Log in");
        assert!(AuthHeader::greeting(&auth).is_none());

        auth.signed_in(User {
            sub: "auth0|1".to_string(),
            nickname: Some("prof.ana".to_string()),
            name: None,
            email: None,
        });
        assert_eq!(AuthHeader::action_label(&auth), "[o] Log out");
        assert_eq!(AuthHeader::greeting(&auth).as_deref(), Some("Logado como prof.ana"));
    }
}
