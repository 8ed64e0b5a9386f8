//! Journey planner v2 HTTP client.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use super::error::JourneyPlannerError;
use super::stop_finder::StopFinderRequest;
use super::trips::TripsRequest;
use super::types::{StopFinderResponse, SystemMessage, TripsResponse};

/// Default base URL for the journey planner v2 API.
pub const DEFAULT_BASE_URL: &str = "https://journeyplanner.integration.sl.se/v2";

/// Header carrying the caller's client id.
const CORRELATION_HEADER: &str = "x-correlation-id";

/// Longest body excerpt kept in decode errors.
const BODY_EXCERPT: usize = 500;

/// Configuration for the journey planner client.
#[derive(Debug, Clone)]
pub struct JourneyPlannerConfig {
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Sent as `X-Correlation-ID` on every request
    pub client_id: Option<String>,
    /// Log every request URL
    pub debug: bool,
}

impl Default for JourneyPlannerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            client_id: None,
            debug: false,
        }
    }
}

impl JourneyPlannerConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the client id sent as `X-Correlation-ID`.
    pub fn with_client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Log request URLs at debug level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Journey planner v2 API client.
#[derive(Debug, Clone)]
pub struct JourneyPlannerClient {
    http: reqwest::Client,
    base_url: String,
    debug: bool,
}

impl JourneyPlannerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: JourneyPlannerConfig) -> Result<Self, JourneyPlannerError> {
        let mut headers = HeaderMap::new();
        if let Some(id) = &config.client_id {
            let value = HeaderValue::from_str(id)
                .map_err(|_| JourneyPlannerError::InvalidClientId(id.clone()))?;
            headers.insert(HeaderName::from_static(CORRELATION_HEADER), value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            debug: config.debug,
        })
    }

    /// Search for stops, addresses and points of interest.
    pub async fn stop_finder(
        &self,
        request: &StopFinderRequest,
    ) -> Result<StopFinderResponse, JourneyPlannerError> {
        let query = request.query()?;
        let response: StopFinderResponse = self.get_json("/stop-finder", &query).await?;
        log_system_messages(&response.system_messages);
        debug!(locations = response.locations.len(), "stop finder complete");
        Ok(response)
    }

    /// Search for trips.
    ///
    /// The request is validated first; site IDs are sent as EFA IDs.
    pub async fn trips(&self, request: &TripsRequest) -> Result<TripsResponse, JourneyPlannerError> {
        let query = request.query()?;
        let response: TripsResponse = self.get_json("/trips", &query).await?;
        log_system_messages(&response.system_messages);
        debug!(journeys = response.journeys.len(), "trip search complete");
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, JourneyPlannerError> {
        let url = format!("{}{endpoint}", self.base_url);
        let request = self.http.get(&url).query(query).build()?;

        if self.debug {
            debug!(url = %request.url(), "journey planner request");
        } else {
            trace!(endpoint, "journey planner request");
        }

        let response = self.http.execute(request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JourneyPlannerError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| JourneyPlannerError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_EXCERPT).collect()),
        })
    }
}

fn log_system_messages(messages: &[SystemMessage]) {
    for msg in messages.iter().filter(|m| m.is_error()) {
        warn!(code = msg.code, module = %msg.module, text = %msg.text, "journey planner reported an error");
    }
}
