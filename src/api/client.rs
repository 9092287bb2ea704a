use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::{ApiError, PostApi};
use crate::config::Config;
use crate::models::{NewPost, Post, PostUpdate};

/// HTTP implementation of [`PostApi`] against the remote origin.
#[derive(Debug, Clone)]
pub struct BlogClient {
    http: Client,
    base_url: Url,
}

impl BlogClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(config.http.user_agent.as_str())
            .timeout(config.http_timeout())
            .build()?;
        Self::with_client(http, &config.api_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL. Each segment is percent-encoded,
    /// so an id can never escape its slot in the path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Blog API answered {}: {}", status, body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ApiError> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            context: context.to_string(),
            source,
        })
    }

    /// Write endpoints do not promise a body; a 2xx without a parseable post
    /// still counts as success.
    async fn send_write(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<Option<Post>, ApiError> {
        let body = self.send(request).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<Post>(&body) {
            Ok(post) => Ok(Some(post)),
            Err(e) => {
                debug!("{} response is not a post ({}), ignoring body", context, e);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl PostApi for BlogClient {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let url = self.endpoint(&["posts"])?;
        info!("Fetching posts from {}", url);
        let posts: Vec<Post> = self.send_json(self.http.get(url), "post list").await?;
        info!("Fetched {} posts", posts.len());
        Ok(posts)
    }

    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, ApiError> {
        let url = self.endpoint(&["posts", "search"])?;
        info!("Searching posts for '{}'", term);
        let request = self.http.get(url).query(&[("q", term)]);
        let posts: Vec<Post> = self.send_json(request, "post search").await?;
        info!("Search for '{}' returned {} posts", term, posts.len());
        Ok(posts)
    }

    async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        let url = self.endpoint(&["posts", id])?;
        info!("Fetching post {}", id);
        self.send_json(self.http.get(url), "post").await
    }

    async fn create_post(&self, post: &NewPost) -> Result<Option<Post>, ApiError> {
        let url = self.endpoint(&["posts"])?;
        info!("Creating post '{}' by '{}'", post.title, post.author);
        self.send_write(self.http.post(url).json(post), "create post")
            .await
    }

    async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<Option<Post>, ApiError> {
        let url = self.endpoint(&["posts", id])?;
        info!("Updating post {}", id);
        self.send_write(self.http.put(url).json(update), "update post")
            .await
    }

    async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["posts", id])?;
        info!("Deleting post {}", id);
        self.send(self.http.delete(url)).await?;
        Ok(())
    }
}
