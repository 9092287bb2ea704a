//! Auth0 login through the OAuth 2.0 device authorization grant
//!
//! A terminal has no redirect target, so the user confirms a short code in a
//! browser while this side polls the token endpoint. The access token is kept
//! in memory only and dropped on logout.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::{AuthError, AuthProvider, ChallengeCallback, DeviceChallenge};
use crate::config::Config;
use crate::models::User;

const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";
const SCOPES: &str = "openid profile email";
/// Extra wait the server asks for with `slow_down`
const SLOW_DOWN_STEP: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct DeviceCodeResponse {
    device_code: String,
    user_code: String,
    verification_uri: String,
    #[serde(default)]
    verification_uri_complete: Option<String>,
    expires_in: u64,
    #[serde(default = "default_interval")]
    interval: u64,
}

fn default_interval() -> u64 {
    5
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
    error: String,
    #[serde(default)]
    error_description: String,
}

pub struct Auth0DeviceAuth {
    http: Client,
    issuer: Url,
    client_id: String,
    access_token: Mutex<Option<String>>,
}

impl Auth0DeviceAuth {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(config.http.user_agent.as_str())
            .timeout(config.http_timeout())
            .build()?;
        Ok(Self::with_client(
            http,
            config.auth_issuer_url()?,
            &config.auth.client_id,
        ))
    }

    pub fn with_client(http: Client, issuer: Url, client_id: &str) -> Self {
        Self {
            http,
            issuer,
            client_id: client_id.to_string(),
            access_token: Mutex::new(None),
        }
    }

    pub fn has_session(&self) -> bool {
        self.access_token
            .lock()
            .map(|token| token.is_some())
            .unwrap_or(false)
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.issuer
            .join(path)
            .map_err(|_| AuthError::InvalidUrl(format!("{}{}", self.issuer, path)))
    }

    async fn read(&self, request: RequestBuilder) -> Result<(StatusCode, String), AuthError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    async fn request_device_code(&self) -> Result<DeviceCodeResponse, AuthError> {
        let url = self.endpoint("oauth/device/code")?;
        let request = self
            .http
            .post(url)
            .form(&[("client_id", self.client_id.as_str()), ("scope", SCOPES)]);
        let (status, body) = self.read(request).await?;
        if !status.is_success() {
            return Err(provider_error(status, &body));
        }
        decode(&body, "device code")
    }

    async fn poll_for_token(&self, device: &DeviceCodeResponse) -> Result<String, AuthError> {
        let url = self.endpoint("oauth/token")?;
        let deadline = Instant::now() + Duration::from_secs(device.expires_in);
        let mut interval = Duration::from_secs(device.interval);

        loop {
            tokio::time::sleep(interval).await;
            if Instant::now() >= deadline {
                return Err(AuthError::Expired);
            }

            let request = self.http.post(url.clone()).form(&[
                ("grant_type", DEVICE_GRANT_TYPE),
                ("device_code", device.device_code.as_str()),
                ("client_id", self.client_id.as_str()),
            ]);
            let (status, body) = self.read(request).await?;

            if status.is_success() {
                let token: TokenResponse = decode(&body, "token")?;
                return Ok(token.access_token);
            }

            match serde_json::from_str::<OAuthErrorBody>(&body) {
                Ok(err) => match err.error.as_str() {
                    "authorization_pending" => debug!("Login still pending"),
                    "slow_down" => {
                        interval += SLOW_DOWN_STEP;
                        debug!("Provider asked to slow down, polling every {:?}", interval);
                    }
                    "expired_token" => return Err(AuthError::Expired),
                    "access_denied" => return Err(AuthError::Denied),
                    _ => {
                        return Err(AuthError::Provider {
                            code: err.error,
                            description: err.error_description,
                        })
                    }
                },
                Err(_) => return Err(provider_error(status, &body)),
            }
        }
    }

    async fn fetch_user(&self, access_token: &str) -> Result<User, AuthError> {
        let url = self.endpoint("userinfo")?;
        let (status, body) = self.read(self.http.get(url).bearer_auth(access_token)).await?;
        if !status.is_success() {
            return Err(provider_error(status, &body));
        }
        decode(&body, "user info")
    }
}

#[async_trait]
impl AuthProvider for Auth0DeviceAuth {
    async fn authorize(&self, on_challenge: ChallengeCallback) -> Result<User, AuthError> {
        info!("Starting device login against {}", self.issuer);
        let device = self.request_device_code().await?;

        on_challenge(DeviceChallenge {
            verification_uri: device.verification_uri.clone(),
            verification_uri_complete: device.verification_uri_complete.clone(),
            user_code: device.user_code.clone(),
        });

        let access_token = self.poll_for_token(&device).await?;
        let user = self.fetch_user(&access_token).await?;

        match self.access_token.lock() {
            Ok(mut slot) => *slot = Some(access_token),
            Err(_) => warn!("Session lock poisoned, token not kept"),
        }

        info!("Logged in as {}", user.display_name());
        Ok(user)
    }

    async fn clear_session(&self) -> Result<(), AuthError> {
        let previous = self
            .access_token
            .lock()
            .map(|mut slot| slot.take())
            .unwrap_or(None);
        if previous.is_some() {
            info!("Session cleared");
        } else {
            debug!("No active session to clear");
        }
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, AuthError> {
    serde_json::from_str(body).map_err(|source| AuthError::Decode {
        context: context.to_string(),
        source,
    })
}

fn provider_error(status: StatusCode, body: &str) -> AuthError {
    match serde_json::from_str::<OAuthErrorBody>(body) {
        Ok(err) => AuthError::Provider {
            code: err.error,
            description: err.error_description,
        },
        Err(_) => AuthError::Provider {
            code: status.as_u16().to_string(),
            description: body.to_string(),
        },
    }
}
