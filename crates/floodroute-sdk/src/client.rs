//! HTTP implementation of [`PlannerApi`].

use crate::api::{OptimizeOutcome, PlannerApi};
use crate::error::ApiError;
use floodroute_core::{Coordinates, OptimizeRequest, SearchHit};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = concat!("floodroute/", env!("CARGO_PKG_VERSION"));

/// Client for the planner backend (`/api/search`, `/api/reverse-search`, `/api/optimize`).
#[derive(Debug, Clone)]
pub struct HttpPlannerApi {
    client: Client,
    base_url: Url,
}

impl HttpPlannerApi {
    /// Create a client for the backend at `base_url` (e.g. "http://localhost:5000").
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::Url(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Url(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl PlannerApi for HttpPlannerApi {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ApiError> {
        let url = self.endpoint(&["api", "search", query])?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    async fn reverse_search(&self, at: Coordinates) -> Result<Option<String>, ApiError> {
        let lon = at.lon.to_string();
        let lat = at.lat.to_string();
        let url = self.endpoint(&["api", "reverse-search", &lon, &lat])?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        // Unresolved points come back as `[]` or an object without a name.
        let body: Value = Self::read_json(response).await?;
        Ok(body
            .get("display_name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string))
    }

    async fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeOutcome, ApiError> {
        let url = self.endpoint(&["api", "optimize"])?;
        tracing::debug!(
            "POST {} ({} destination(s))",
            url,
            request.destinations.len()
        );

        let response = self.client.post(url).json(request).send().await?;
        let body: Value = Self::read_json(response).await?;
        Ok(OptimizeOutcome::from_body(body))
    }
}
