use std::io::Write;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::api::PostApi;
use crate::models::{display_date, NewPost, Post};
use crate::tui::ui::truncate_to_width;

#[derive(Parser)]
#[command(name = "blogdesk")]
#[command(about = "Terminal client for the Blog Educacional backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Run in CLI mode (print output and exit, no interactive TUI)
    #[arg(long, global = true)]
    pub cli: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List every post
    List,

    /// Search posts by term (opens the TUI pre-filled without --cli)
    Search {
        /// Text to search for
        term: String,
    },

    /// Show a single post
    Show {
        /// Post id
        id: String,
    },

    /// Create a post dated today
    Create {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        author: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a post
    Delete {
        /// Post id
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Run one command against `api`, writing the report to `out`
pub async fn run_cli_command<W: Write>(
    command: Commands,
    api: &dyn PostApi,
    today: NaiveDate,
    out: &mut W,
) -> Result<()> {
    match command {
        Commands::List => {
            let posts = api.list_posts().await.context("Failed to list posts")?;
            print_posts(out, &posts)?;
        }
        Commands::Search { term } => {
            info!("Searching posts for {:?}", term);
            let posts = api
                .search_posts(&term)
                .await
                .with_context(|| format!("Search failed for {:?}", term))?;
            if posts.is_empty() {
                writeln!(out, "No posts found for: {}", term)?;
            } else {
                print_posts(out, &posts)?;
            }
        }
        Commands::Show { id } => {
            let post = api
                .get_post(&id)
                .await
                .with_context(|| format!("Failed to load post {}", id))?;
            print_post(out, &post)?;
        }
        Commands::Create {
            title,
            author,
            description,
        } => {
            let new_post = NewPost::dated(&title, &author, &description, today);
            let created = api
                .create_post(&new_post)
                .await
                .context("Failed to create post")?;
            writeln!(out, "Post cadastrado com sucesso!")?;
            if let Some(post) = created {
                writeln!(out, "Id: {}", post.id)?;
            }
        }
        Commands::Delete { id, yes } => {
            if !yes {
                bail!("Refusing to delete post {} without --yes", id);
            }
            api.delete_post(&id)
                .await
                .with_context(|| format!("Failed to delete post {}", id))?;
            writeln!(out, "Deleted post {}", id)?;
        }
    }

    Ok(())
}

fn print_posts<W: Write>(out: &mut W, posts: &[Post]) -> Result<()> {
    if posts.is_empty() {
        writeln!(out, "No posts found")?;
        return Ok(());
    }

    writeln!(out, "Found {} posts:", posts.len())?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<26} {:<40} {:<20} {:<10}",
        "Id", "Title", "Author", "Updated"
    )?;
    writeln!(out, "{}", "-".repeat(99))?;
    for post in posts {
        writeln!(
            out,
            "{:<26} {:<40} {:<20} {:<10}",
            post.id,
            truncate_to_width(&post.title, 38),
            truncate_to_width(&post.author, 18),
            display_date(&post.update_date)
        )?;
    }
    Ok(())
}

fn print_post<W: Write>(out: &mut W, post: &Post) -> Result<()> {
    writeln!(out, "{}", post.title)?;
    writeln!(out, "by {}", post.author)?;
    writeln!(
        out,
        "Created {} | Updated {}",
        display_date(&post.create_date),
        display_date(&post.update_date)
    )?;
    writeln!(out)?;
    writeln!(out, "{}", post.description)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{post, ApiCall, RecordingApi};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    async fn run(api: &RecordingApi, command: Commands) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = run_cli_command(command, api, today(), &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_cli_mode() {
        let cli = Cli::parse_from(["blogdesk", "--cli", "delete", "abc", "--yes"]);
        assert!(cli.cli);
        assert_eq!(
            cli.command,
            Some(Commands::Delete {
                id: "abc".to_string(),
                yes: true
            })
        );

        let cli = Cli::parse_from(["blogdesk"]);
        assert!(!cli.cli);
        assert!(cli.command.is_none());
    }

    #[tokio::test]
    async fn test_list_prints_display_dates() {
        let api = RecordingApi::with_posts(vec![post("1", "A", "B", "C")]);
        let (result, out) = run(&api, Commands::List).await;
        result.unwrap();
        assert!(out.contains("Found 1 posts"));
        assert!(out.contains("01/01/2024"));
    }

    #[tokio::test]
    async fn test_delete_requires_yes() {
        let api = RecordingApi::with_posts(vec![post("1", "A", "B", "C")]);

        let (result, _) = run(
            &api,
            Commands::Delete {
                id: "1".to_string(),
                yes: false,
            },
        )
        .await;
        assert!(result.is_err());
        assert!(api.calls().is_empty());

        let (result, out) = run(
            &api,
            Commands::Delete {
                id: "1".to_string(),
                yes: true,
            },
        )
        .await;
        result.unwrap();
        assert_eq!(api.calls(), vec![ApiCall::Delete("1".to_string())]);
        assert!(out.contains("Deleted post 1"));
    }

    #[tokio::test]
    async fn test_create_stamps_today() {
        let api = RecordingApi::default();
        let (result, out) = run(
            &api,
            Commands::Create {
                title: String::new(),
                author: "Ana".to_string(),
                description: "D".to_string(),
            },
        )
        .await;
        result.unwrap();
        assert!(out.contains("Post cadastrado com sucesso!"));

        match api.calls().as_slice() {
            [ApiCall::Create(new_post)] => {
                assert_eq!(new_post.title, "");
                assert_eq!(new_post.create_date, "2024-03-07");
                assert_eq!(new_post.update_date, "2024-03-07");
            }
            calls => panic!("unexpected calls: {:?}", calls),
        }
    }

    #[tokio::test]
    async fn test_show_missing_post_fails() {
        let api = RecordingApi::default();
        let (result, _) = run(
            &api,
            Commands::Show {
                id: "nope".to_string(),
            },
        )
        .await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to load post nope"));
    }
}
