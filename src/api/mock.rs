//! In-memory [`PostApi`] used by unit tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ApiError, PostApi};
use crate::models::{NewPost, Post, PostUpdate};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List,
    Search(String),
    Get(String),
    Create(NewPost),
    Update(String, PostUpdate),
    Delete(String),
}

/// Stores posts in memory and records every call made against it.
#[derive(Default)]
pub struct RecordingApi {
    posts: Mutex<Vec<Post>>,
    calls: Mutex<Vec<ApiCall>>,
    failing: AtomicBool,
}

impl RecordingApi {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
            ..Default::default()
        }
    }

    /// Make every following call fail with a 500.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                body: "Internal Server Error".to_string(),
            });
        }
        Ok(())
    }

    fn not_found(id: &str) -> ApiError {
        ApiError::Status {
            status: 404,
            body: format!("post {} not found", id),
        }
    }
}

pub fn post(id: &str, title: &str, author: &str, description: &str) -> Post {
    Post {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        description: description.to_string(),
        create_date: "2024-01-01".to_string(),
        update_date: "2024-01-01".to_string(),
    }
}

#[async_trait]
impl PostApi for RecordingApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.record(ApiCall::List)?;
        Ok(self.posts())
    }

    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, ApiError> {
        self.record(ApiCall::Search(term.to_string()))?;
        let term = term.to_lowercase();
        Ok(self
            .posts()
            .into_iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&term)
                    || p.description.to_lowercase().contains(&term)
            })
            .collect())
    }

    async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        self.record(ApiCall::Get(id.to_string()))?;
        self.posts()
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create_post(&self, new_post: &NewPost) -> Result<Option<Post>, ApiError> {
        self.record(ApiCall::Create(new_post.clone()))?;
        let mut posts = self.posts.lock().unwrap();
        let created = Post {
            id: format!("srv-{}", posts.len() + 1),
            title: new_post.title.clone(),
            author: new_post.author.clone(),
            description: new_post.description.clone(),
            create_date: new_post.create_date.clone(),
            update_date: new_post.update_date.clone(),
        };
        posts.push(created.clone());
        Ok(Some(created))
    }

    async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<Option<Post>, ApiError> {
        self.record(ApiCall::Update(id.to_string(), update.clone()))?;
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        post.title = update.title.clone();
        post.author = update.author.clone();
        post.description = update.description.clone();
        post.update_date = update.update_date.clone();
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        self.record(ApiCall::Delete(id.to_string()))?;
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
