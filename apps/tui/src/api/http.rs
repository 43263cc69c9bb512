use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ApiError, ListingApi};
use crate::domain::{AnalysisResult, Candidate, TradeType};

/// Body the backend sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// [`ListingApi`] over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpListingApi {
    client: Client,
    base_url: Url,
}

impl HttpListingApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::UnusableBaseUrl(base_url.to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Appends `segments` to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::UnusableBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        tracing::debug!(%url, ?query, "GET");

        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.error);
            tracing::warn!(status = status.as_u16(), ?message, "request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ListingApi for HttpListingApi {
    async fn search_complexes(&self, keyword: &str) -> Result<Vec<Candidate>, ApiError> {
        let url = self.endpoint(&["api", "apartments", "search"])?;
        self.get_json(url, &[("keyword", keyword)]).await
    }

    async fn fetch_analysis(
        &self,
        complex_id: &str,
        trade_type: TradeType,
    ) -> Result<AnalysisResult, ApiError> {
        let url = self.endpoint(&["api", "apartments", complex_id, "analysis"])?;
        self.get_json(url, &[("trade_type", trade_type.as_code())])
            .await
    }
}
