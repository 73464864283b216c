use coolschool_bridge::auth::AuthSession;
use coolschool_bridge::course::Category;

use crate::api::{ApiClient, ApiError};

/// The core application state that holds configuration, the HTTP client, and
/// the authenticated session.
///
/// It is designed to be wrapped in thread-safe, async-friendly concurrency
/// primitives (see [`SharedState`]) so handlers can take short read locks and
/// copy out what they need before awaiting on the network.
#[derive(Debug, Clone)]
pub struct State {
    /// The loaded application configuration.
    pub config: coolschool_bridge::config::Config,
    /// Shared HTTP client for making efficient, pooled requests.
    pub request_client: reqwest::Client,
    /// Session of the signed-in user, if any.
    pub session: Option<AuthSession>,
    /// Last fetched category catalog.
    pub categories: Vec<Category>,
}

impl State {
    /// API client authenticated as the current session.
    pub(crate) fn api(&self) -> Result<ApiClient, ApiError> {
        ApiClient::new(
            self.request_client.clone(),
            &self.config.api,
            self.session.as_ref(),
        )
    }
}

/// Thread-safe, async-friendly shared reference to the application [`State`].
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
