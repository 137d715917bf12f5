use reqwest::StatusCode;
use std::sync::Arc;
use validator::Validate;

use crate::config::{Config, PreferencesProvider};
use crate::error::SearchError;
use crate::models::{Link, SearchQuery};
use crate::notify::{ErrorHandler, Notifier, Toast};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:6391";

/// Result of one search. Never an `Err`: failures have already been
/// reported to the notifier or error handler by the time this is returned.
#[derive(Debug)]
pub enum SearchOutcome {
    Links(Vec<Link>),
    Unauthorized,
    Failed(SearchError),
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Links(_))
    }

    pub fn links(&self) -> &[Link] {
        match self {
            SearchOutcome::Links(links) => links.as_slice(),
            SearchOutcome::Unauthorized | SearchOutcome::Failed(_) => &[],
        }
    }

    pub fn into_links(self) -> Vec<Link> {
        match self {
            SearchOutcome::Links(links) => links,
            SearchOutcome::Unauthorized | SearchOutcome::Failed(_) => Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
    preferences: Arc<dyn PreferencesProvider>,
    notifier: Arc<dyn Notifier>,
    error_handler: Arc<dyn ErrorHandler>,
}

impl SearchClient {
    pub fn new(
        preferences: Arc<dyn PreferencesProvider>,
        notifier: Arc<dyn Notifier>,
        error_handler: Arc<dyn ErrorHandler>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            preferences,
            notifier,
            error_handler,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_config(self, config: &Config) -> Self {
        self.with_base_url(config.server.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn search(&self, query: &SearchQuery) -> SearchOutcome {
        match self.try_search(query).await {
            Ok(links) => SearchOutcome::Links(links),
            Err(SearchError::Unauthorized) => {
                self.notifier.show_toast(Toast::incorrect_api_key()).await;
                SearchOutcome::Unauthorized
            }
            Err(err) => {
                self.error_handler.handle_error(&err);
                SearchOutcome::Failed(err)
            }
        }
    }

    /// One GET against `/search`, without the notify/handle policy of
    /// [`SearchClient::search`].
    pub async fn try_search(&self, query: &SearchQuery) -> Result<Vec<Link>, SearchError> {
        let preferences = self.preferences.preferences()?;
        let query = query.merge_preferences(&preferences);
        query.validate()?;

        let url = format!("{}/search", self.base_url);
        let pairs = query.query_pairs();
        tracing::debug!("GET {} {:?}", url, pairs);

        let response = self
            .http
            .get(&url)
            .header("x-api-key", &preferences.api_key)
            .query(&pairs)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.bytes().await?;
                let links: Vec<Link> = serde_json::from_slice(&body)?;
                tracing::debug!("Anybox returned {} links", links.len());
                Ok(links)
            }
            StatusCode::UNAUTHORIZED => {
                tracing::warn!("Anybox rejected the API key");
                Err(SearchError::Unauthorized)
            }
            status => {
                let message = response.text().await?;
                Err(SearchError::Server {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
