use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::api::error::ApiError;
use crate::api::user::User;
use crate::api::UserApi;
use crate::config::ApiConfig;

/// Longest error body kept in a [`ApiError::Status`] message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// [`UserApi`] backed by a JSON HTTP endpoint.
pub struct HttpUserApi {
    client: Client,
    endpoint: Url,
    timeout_seconds: u64,
}

impl HttpUserApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let endpoint = users_endpoint(&config.base_url, &config.users_path)?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .timeout(Duration::from_secs(config.timeout_seconds as u64))
            .user_agent(concat!("mvi-users/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            endpoint,
            timeout_seconds: config.timeout_seconds as u64,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn classify(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout {
                seconds: self.timeout_seconds,
            }
        } else {
            ApiError::Connection(err)
        }
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        tracing::debug!(endpoint = %self.endpoint, "Requesting user list");

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect()
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        let users: Vec<User> = serde_json::from_slice(&bytes)?;
        tracing::debug!(count = users.len(), "Decoded user list");
        Ok(users)
    }
}

/// Join base URL and users path, treating the base as a directory.
fn users_endpoint(base_url: &str, users_path: &str) -> Result<Url, ApiError> {
    let invalid = |reason: String| ApiError::InvalidEndpoint {
        url: format!("{}{}", base_url, users_path),
        reason,
    };

    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let base = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
    }
    base.join(users_path.trim_start_matches('/'))
        .map_err(|e| invalid(e.to_string()))
}
