//! Mapping of GitHub responses onto [`ApiError`].

use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::http::{HttpError, HttpResponse};

/// Check if a response is GitHub's rate limit signal.
///
/// Primary limits answer 403 with `x-ratelimit-remaining: 0`; secondary
/// limits answer 403 or 429 with a "rate limit" message in the body.
pub fn is_rate_limit_response(response: &HttpResponse) -> bool {
    match response.status {
        429 => true,
        403 => {
            response.header("x-ratelimit-remaining") == Some("0")
                || String::from_utf8_lossy(&response.body)
                    .to_lowercase()
                    .contains("rate limit")
        }
        _ => false,
    }
}

/// Reset time advertised by the `x-ratelimit-reset` header.
pub fn rate_limit_reset(response: &HttpResponse) -> Option<DateTime<Utc>> {
    response
        .header("x-ratelimit-reset")
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|epoch| DateTime::from_timestamp(epoch, 0))
}

/// Convert a non-success response into an error.
pub fn error_from_response(response: &HttpResponse, resource: &str) -> ApiError {
    if is_rate_limit_response(response) {
        return ApiError::RateLimited {
            reset_at: rate_limit_reset(response),
        };
    }

    match response.status {
        401 | 403 => ApiError::AuthRequired,
        404 => ApiError::not_found(resource),
        status => ApiError::api(status, api_message(&response.body)),
    }
}

/// Extract GitHub's `message` field from an error body, falling back to the raw text.
fn api_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string())
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        ApiError::network(err.to_string())
    }
}
