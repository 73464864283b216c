//! HTTP client for the platform's REST API.
//!
//! Every endpoint reports success or failure through the response status;
//! non-success statuses, transport errors and timeouts all become an
//! [`ApiError`].

use coolschool_bridge::auth::{AuthSession, RegisterRequest};
use coolschool_bridge::config::ApiConfig;
use coolschool_bridge::course::{Asset, Category, CreatedCourse, NewCourse, StoredAsset};
use coolschool_bridge::ids::ResourceId;
use coolschool_bridge::quiz::QuizInfo;
use reqwest::{RequestBuilder, StatusCode, multipart};
use url::Url;

use crate::registration::AccountStore;
use crate::workflow::{AssetStorage, RecordStore};

/// Errors produced while talking to the API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API url: {0}")]
    Url(#[from] url::ParseError),
    #[error("request timed out")]
    Timeout,
    #[error("server responded with {status}")]
    Status { status: StatusCode },
    #[error("request failed: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if let Some(status) = err.status() {
            ApiError::Status { status }
        } else {
            ApiError::Transport(err.without_url())
        }
    }
}

/// Resolves API endpoints and performs authenticated requests.
#[derive(Debug, Clone)]
pub(crate) struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Builds a client for `config`, authenticating as `session` if present.
    pub fn new(
        client: reqwest::Client,
        config: &ApiConfig,
        session: Option<&AuthSession>,
    ) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            token: session
                .map(|session| session.access_token.clone())
                .filter(|token| !token.is_empty()),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: serde::de::DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let request = self.client.get(self.endpoint("categories/all")?);
        Self::send(self.authorize(request)).await
    }

    pub async fn quiz_info(&self, id: &ResourceId) -> Result<QuizInfo, ApiError> {
        let request = self.client.get(self.endpoint(&format!("quizzes/{id}/info"))?);
        Self::send(self.authorize(request)).await
    }
}

impl AssetStorage for ApiClient {
    async fn upload(&self, asset: &Asset) -> Result<StoredAsset, ApiError> {
        let mut part = multipart::Part::bytes(asset.bytes.clone()).file_name(asset.file_name.clone());
        if let Some(content_type) = &asset.content_type {
            part = part.mime_str(content_type)?;
        }

        let form = multipart::Form::new().part("file", part);
        let request = self.client.post(self.endpoint("files/upload")?).multipart(form);
        Self::send(self.authorize(request)).await
    }
}

impl RecordStore for ApiClient {
    async fn create(&self, record: &NewCourse) -> Result<CreatedCourse, ApiError> {
        let request = self.client.post(self.endpoint("courses/create")?).json(record);
        Self::send(self.authorize(request)).await
    }
}

impl AccountStore for ApiClient {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, ApiError> {
        let request = self.client.post(self.endpoint("auth/register")?).json(request);
        Self::send(request).await
    }
}

#[cfg(test)]
mod tests {
    use coolschool_bridge::auth::User;
    use coolschool_bridge::ids::UserId;

    use super::*;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn endpoints_are_resolved_below_the_base_path() {
        for base in ["http://school.test/api/v1", "http://school.test/api/v1/"] {
            let api = ApiClient::new(reqwest::Client::new(), &config(base), None).unwrap();
            assert_eq!(
                api.endpoint("files/upload").unwrap().as_str(),
                "http://school.test/api/v1/files/upload"
            );
        }
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ApiClient::new(reqwest::Client::new(), &config("not a url"), None);
        assert!(matches!(result, Err(ApiError::Url(_))));
    }

    #[test]
    fn empty_session_token_is_not_sent() {
        let session = AuthSession {
            access_token: String::new(),
            user: User {
                id: UserId(1),
                username: "ivan".into(),
                email: String::new(),
            },
        };
        let api = ApiClient::new(reqwest::Client::new(), &ApiConfig::default(), Some(&session))
            .unwrap();
        assert!(api.token.is_none());
    }
}
