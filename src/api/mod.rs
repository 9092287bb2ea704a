//! Client side of the blog's REST API
//!
//! Every screen talks to the remote origin through the [`PostApi`] trait so
//! the screen logic can run against an in-memory double in tests.

pub mod client;
pub mod errors;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;

use crate::models::{NewPost, Post, PostUpdate};

pub use client::BlogClient;
pub use errors::ApiError;

/// Post CRUD operations offered by the remote origin
#[async_trait]
pub trait PostApi: Send + Sync {
    /// `GET /posts`
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError>;

    /// `GET /posts/search?q={term}`
    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, ApiError>;

    /// `GET /posts/{id}`
    async fn get_post(&self, id: &str) -> Result<Post, ApiError>;

    /// `POST /posts`. Returns the created post when the server echoes it back.
    async fn create_post(&self, post: &NewPost) -> Result<Option<Post>, ApiError>;

    /// `PUT /posts/{id}`. Returns the updated post when the server echoes it back.
    async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<Option<Post>, ApiError>;

    /// `DELETE /posts/{id}`
    async fn delete_post(&self, id: &str) -> Result<(), ApiError>;
}
