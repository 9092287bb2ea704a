//! Post card: title, author line, description and the card's actions

use ratatui::text::{Line, Span};

use crate::models::Post;
use crate::tui::ui::{truncate_to_width, Styles};

pub struct PostCard;

impl PostCard {
    /// Subtitle under the title
    pub fn byline(post: &Post) -> String {
        format!("by {}", post.author)
    }

    /// Lines of one card, each fitted to `width` columns
    pub fn lines(post: &Post, width: usize, is_selected: bool) -> Vec<Line<'static>> {
        let title_style = if is_selected {
            Styles::selected()
        } else {
            Styles::card_title()
        };

        let description = post
            .description
            .lines()
            .next()
            .unwrap_or_default();

        let actions = vec![
            Span::styled("[e] Edit", Styles::inactive()),
            Span::raw("  "),
            Span::styled("[d] Delete", Styles::danger()),
        ];

        vec![
            Line::from(Span::styled(truncate_to_width(&post.title, width), title_style)),
            Line::from(Span::styled(
                truncate_to_width(&Self::byline(post), width),
                Styles::muted(),
            )),
            Line::from(Span::styled(truncate_to_width(description, width), Styles::default())),
            Line::from(actions),
        ]
    }
}
