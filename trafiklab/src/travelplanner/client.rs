//! Travelplanner HTTP client.
//!
//! Provides async methods for the SL Travelplanner 3.1 XML API: trip
//! search, trip reconstruction and journey detail. Handles the API key,
//! status checks and conversion to domain types.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::domain::Leg;

use super::convert::{TripsResponse, convert_journey_detail, convert_trip_list};
use super::error::TravelplannerError;
use super::request::{JourneyDetailRequest, Query, TripsRequest};
use super::types::{HafasStatus, JourneyDetail, TripList};

/// Default base URL for the Travelplanner API.
pub const DEFAULT_BASE_URL: &str = "https://journeyplanner.integration.sl.se";

/// Path prefix of every Travelplanner endpoint.
const API_PATH: &str = "/v1/TravelplannerV3_1";

/// Longest body excerpt kept in decode errors.
const BODY_EXCERPT: usize = 500;

/// Configuration for the Travelplanner client.
#[derive(Debug, Clone)]
pub struct TravelplannerConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Log every request URL (with the key removed)
    pub debug: bool,
}

impl TravelplannerConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            debug: false,
        }
    }

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

    /// Log request URLs at debug level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Check that the key and base URL are set.
    pub fn validate(&self) -> Result<(), TravelplannerError> {
        if self.api_key.is_empty() {
            return Err(TravelplannerError::MissingApiKey);
        }
        if self.base_url.is_empty() {
            return Err(TravelplannerError::MissingBaseUrl);
        }
        Ok(())
    }
}

/// Travelplanner 3.1 API client.
#[derive(Debug, Clone)]
pub struct TravelplannerClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    debug: bool,
}

impl TravelplannerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TravelplannerConfig) -> Result<Self, TravelplannerError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            debug: config.debug,
        })
    }

    /// Search for trips.
    ///
    /// Stop IDs in the request are converted to HAFAS form first; a bad ID
    /// fails the call before anything is sent.
    pub async fn trips(&self, request: &TripsRequest) -> Result<TripsResponse, TravelplannerError> {
        let query = request.query()?;
        let list: TripList = self.get_xml("/trip.xml", query).await?;
        debug!(trips = list.trips.len(), "trip search complete");
        Ok(convert_trip_list(&list)?)
    }

    /// Rebuild a trip from its reconstruction context (`Trip::ctx_recon`).
    pub async fn reconstruction(&self, ctx: &str) -> Result<TripsResponse, TravelplannerError> {
        let list: TripList = self
            .get_xml("/Reconstruction.xml", vec![("ctx", ctx.to_string())])
            .await?;
        Ok(convert_trip_list(&list)?)
    }

    /// Fetch the full run of a vehicle from a leg's journey detail reference.
    pub async fn journey_detail(
        &self,
        request: &JourneyDetailRequest,
    ) -> Result<Leg, TravelplannerError> {
        let detail: JourneyDetail = self.get_xml("/journeydetail.xml", request.query()).await?;
        Ok(convert_journey_detail(&detail))
    }

    async fn get_xml<T>(&self, endpoint: &str, query: Query) -> Result<T, TravelplannerError>
    where
        T: DeserializeOwned + HafasStatus,
    {
        let url = format!("{}{API_PATH}{endpoint}", self.base_url);

        let request = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(&query)
            .build()?;

        if self.debug {
            debug!(url = %redact_key(request.url()), "travel planner request");
        } else {
            trace!(endpoint, "travel planner request");
        }

        let response = self.http.execute(request).await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(TravelplannerError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TravelplannerError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TravelplannerError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: T = quick_xml::de::from_str(&body).map_err(|e| TravelplannerError::Xml {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_EXCERPT).collect()),
        })?;

        if let Some(code) = parsed.error_code() {
            return Err(TravelplannerError::Service {
                code: code.to_string(),
                text: parsed.error_text().unwrap_or_default().to_string(),
            });
        }

        Ok(parsed)
    }
}

/// A copy of `url` without its `key` query parameter.
fn redact_key(url: &reqwest::Url) -> reqwest::Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| *k != "key")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut redacted = url.clone();
    if kept.is_empty() {
        redacted.set_query(None);
    } else {
        redacted.query_pairs_mut().clear().extend_pairs(kept);
    }
    redacted
}
