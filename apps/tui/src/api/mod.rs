//! Client side of the listing backend's HTTP contract.
//!
//! The rest of the crate only sees [`ListingApi`], so the session logic can
//! be driven by an in-memory fake in tests.

#[cfg(any(test, feature = "test-util"))]
pub mod fake;
mod http;

pub use http::HttpListingApi;

use async_trait::async_trait;

use crate::domain::{AnalysisResult, Candidate, TradeType};

/// Shown for transport failures regardless of which request failed.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "서버와 통신 중 오류가 발생했습니다.";

#[async_trait]
pub trait ListingApi: Send + Sync {
    /// `GET /api/apartments/search?keyword=<keyword>`
    async fn search_complexes(&self, keyword: &str) -> Result<Vec<Candidate>, ApiError>;

    /// `GET /api/apartments/{id}/analysis?trade_type=<code>`
    async fn fetch_analysis(
        &self,
        complex_id: &str,
        trade_type: TradeType,
    ) -> Result<AnalysisResult, ApiError>;
}

/// Which call an error came from; picks the generic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    Search,
    Analysis,
}

impl ApiOperation {
    pub const fn generic_failure(self) -> &'static str {
        match self {
            Self::Search => "검색에 실패했습니다.",
            Self::Analysis => "분석 데이터 로딩에 실패했습니다.",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Status { status: u16, message: Option<String> },

    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid API base url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("API base url cannot carry a path: {0}")]
    UnusableBaseUrl(String),
}

impl ApiError {
    /// Message to put in front of the user for a failed `operation`.
    ///
    /// A non-2xx response with an `error` body shows that text verbatim,
    /// one without falls back to the operation's generic message, and
    /// anything that never produced a usable response is a transport failure.
    pub fn user_message(&self, operation: ApiOperation) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            Self::Status { .. } => operation.generic_failure().to_string(),
            Self::Transport(_) | Self::Decode(_) | Self::InvalidUrl(_) | Self::UnusableBaseUrl(_) => {
                TRANSPORT_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_when_present() {
        let err = ApiError::Status {
            status: 404,
            message: Some("not found".into()),
        };

        assert_eq!(err.user_message(ApiOperation::Analysis), "not found");
    }

    #[test]
    fn missing_server_message_uses_operation_fallback() {
        let err = ApiError::Status {
            status: 500,
            message: None,
        };

        assert_eq!(err.user_message(ApiOperation::Search), "검색에 실패했습니다.");
        assert_eq!(
            err.user_message(ApiOperation::Analysis),
            "분석 데이터 로딩에 실패했습니다."
        );
    }

    #[test]
    fn undecodable_body_reads_as_transport_failure() {
        let decode = serde_json::from_str::<Vec<Candidate>>("<html>").unwrap_err();
        let err = ApiError::from(decode);

        assert_eq!(err.user_message(ApiOperation::Search), TRANSPORT_FAILURE_MESSAGE);
    }
}
