use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned by the hosting service's API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request quota for the current window is exhausted.
    #[error("{}", rate_limited_message(.reset_at))]
    RateLimited { reset_at: Option<DateTime<Utc>> },

    /// Authentication required or the token was rejected.
    #[error("Authentication required")]
    AuthRequired,

    /// Organization or repository not found.
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Statistics are still being computed by the service.
    #[error("Statistics for {resource} are being generated, try again shortly")]
    StatsPending { resource: String },

    /// Network or connection error (including timeouts).
    #[error("Network error: {message}")]
    Network { message: String },

    /// Any other non-success response.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("Decode error: {message}")]
    Decode { message: String },
}

fn rate_limited_message(reset_at: &Option<DateTime<Utc>>) -> String {
    match reset_at {
        Some(at) => format!("Rate limit exceeded. Resets at {at}"),
        None => "Rate limit exceeded".to_string(),
    }
}

/// Coarse classification used to decide between a soft and a hard stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    RateLimited,
    Other,
}

impl ApiError {
    #[inline]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    #[inline]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    #[inline]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    #[inline]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Classify this error as a rate-limit signal or anything else.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::RateLimited { .. } => ErrorClass::RateLimited,
            _ => ErrorClass::Other,
        }
    }

    #[inline]
    pub fn is_rate_limited(&self) -> bool {
        self.class() == ErrorClass::RateLimited
    }

    /// When a rate limit resets, if this is a rate limit error that advertised it.
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::RateLimited { reset_at } => *reset_at,
            _ => None,
        }
    }
}

/// Errors that end a report run without output.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Unexpected API failure; nothing is reported.
    #[error(transparent)]
    Fatal(#[from] ApiError),

    /// The run was cancelled before all pages were read.
    #[error("Interrupted")]
    Interrupted,

    /// Writing to stdout or a file failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Extract a short error message suitable for display.
///
/// Takes the first line of an error message, which keeps API error bodies
/// from flooding log output.
#[inline]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
