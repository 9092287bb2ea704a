//! Centralized configuration management for blogdesk

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Result, Context};
use reqwest::Url;

/// Production origin of the blog API
pub const DEFAULT_API_URL: &str = "https://fiap-blog-backend-latest.onrender.com";
/// Auth0 tenant the blog is registered with
pub const DEFAULT_AUTH_DOMAIN: &str = "dev-vzb0dhm7zcb5paj1.us.auth0.com";
/// Public client identifier of the blog application
pub const DEFAULT_AUTH_CLIENT_ID: &str = "VmVzjCj0B98h6pqbjfSMgcL99u4Eff5O";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote origin serving `/posts`
    pub api_url: String,
    /// Identity provider settings
    pub auth: AuthConfig,
    /// HTTP client configuration
    pub http: HttpConfig,
    /// Log file written by the TUI and CLI
    pub log_file: PathBuf,
}

/// Identity provider configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Auth0 domain, optionally with a scheme (`http://` for local testing)
    pub domain: String,
    /// Auth0 client identifier
    pub client_id: String,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_AUTH_DOMAIN.to_string(),
            client_id: DEFAULT_AUTH_CLIENT_ID.to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "blogdesk/0.1.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth: AuthConfig::default(),
            http: HttpConfig::default(),
            log_file: PathBuf::from("blogdesk.log"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let auth = AuthConfig {
            domain: lookup("BLOGDESK_AUTH_DOMAIN").unwrap_or(defaults.auth.domain),
            client_id: lookup("BLOGDESK_AUTH_CLIENT_ID").unwrap_or(defaults.auth.client_id),
        };

        let http = HttpConfig {
            timeout_seconds: parse_env_var(&lookup, "BLOGDESK_HTTP_TIMEOUT_SECONDS")?
                .unwrap_or(defaults.http.timeout_seconds),
            user_agent: lookup("BLOGDESK_USER_AGENT").unwrap_or(defaults.http.user_agent),
        };

        Ok(Config {
            api_url: lookup("BLOGDESK_API_URL").unwrap_or(defaults.api_url),
            auth,
            http,
            log_file: lookup("BLOGDESK_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        })
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Issuer URL of the identity provider, `https://{domain}` unless the
    /// domain already carries a scheme
    pub fn auth_issuer_url(&self) -> Result<Url> {
        let domain = self.auth.domain.trim_end_matches('/');
        let raw = if domain.contains("://") {
            domain.to_string()
        } else {
            format!("https://{}", domain)
        };
        Url::parse(&raw).with_context(|| format!("Invalid auth domain: {}", self.auth.domain))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let api_url = Url::parse(&self.api_url)
            .with_context(|| format!("Invalid API URL: {}", self.api_url))?;
        if api_url.cannot_be_a_base() {
            return Err(anyhow::anyhow!("API URL cannot be used as a base: {}", self.api_url));
        }

        self.auth_issuer_url()?;

        if self.auth.client_id.trim().is_empty() {
            return Err(anyhow::anyhow!("Auth client id must not be empty"));
        }

        if self.http.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("HTTP timeout must be greater than zero"));
        }

        // Check if parent directory of the log file exists
        if let Some(parent) = self.log_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(anyhow::anyhow!(
                    "Log file directory does not exist: {}",
                    parent.display()
                ));
            }
        }

        Ok(())
    }
}

/// Helper function to parse a looked-up variable as a specific type
fn parse_env_var<F, T>(lookup: &F, var_name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match lookup(var_name) {
        Some(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.auth.domain, DEFAULT_AUTH_DOMAIN);
        assert_eq!(config.auth.client_id, DEFAULT_AUTH_CLIENT_ID);
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.log_file, PathBuf::from("blogdesk.log"));
        config.validate().unwrap();
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("BLOGDESK_API_URL", "http://localhost:3000"),
            ("BLOGDESK_HTTP_TIMEOUT_SECONDS", "5"),
            ("BLOGDESK_AUTH_DOMAIN", "http://127.0.0.1:9999"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.http_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.auth_issuer_url().unwrap().as_str(),
            "http://127.0.0.1:9999/"
        );
    }

    #[test]
    fn test_config_rejects_bad_timeout() {
        let err = Config::from_lookup(lookup_from(&[("BLOGDESK_HTTP_TIMEOUT_SECONDS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("BLOGDESK_HTTP_TIMEOUT_SECONDS"));

        let config =
            Config::from_lookup(lookup_from(&[("BLOGDESK_HTTP_TIMEOUT_SECONDS", "0")])).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.api_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.log_file = dir.path().join("missing").join("blogdesk.log");
        assert!(config.validate().is_err());
        config.log_file = dir.path().join("blogdesk.log");
        config.validate().unwrap();
    }

    #[test]
    fn test_issuer_url_defaults_to_https() {
        let config = Config::default();
        assert_eq!(
            config.auth_issuer_url().unwrap().as_str(),
            "https://dev-vzb0dhm7zcb5paj1.us.auth0.com/"
        );
    }
}
