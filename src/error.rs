//! Typed failures surfaced by the networking and favorites layers.
use std::fmt;
use thiserror::Error;

/// Category of a failed HTTP call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    NoInternet,
    InvalidRequest,
    NoData,
    FailedResponse,
    ResponseStatus,
    Serialization,
}

impl NetworkErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkErrorKind::NoInternet => "no_internet",
            NetworkErrorKind::InvalidRequest => "invalid_request",
            NetworkErrorKind::NoData => "no_data",
            NetworkErrorKind::FailedResponse => "failed_response",
            NetworkErrorKind::ResponseStatus => "response_status",
            NetworkErrorKind::Serialization => "serialization",
        }
    }
}

impl fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single request. `code` is the HTTP status for
/// [`NetworkErrorKind::ResponseStatus`] and a fixed negative code otherwise.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} ({code}): {message}")]
pub struct NetworkError {
    pub kind: NetworkErrorKind,
    pub message: String,
    pub code: i32,
}

impl NetworkError {
    pub const INVALID_REQUEST_CODE: i32 = -1001;
    pub const NO_DATA_CODE: i32 = -1002;
    pub const FAILED_RESPONSE_CODE: i32 = -1003;
    pub const SERIALIZATION_CODE: i32 = -1006;
    pub const NO_INTERNET_CODE: i32 = -1009;

    pub fn no_internet() -> Self {
        Self {
            kind: NetworkErrorKind::NoInternet,
            message: "No internet connection".into(),
            code: Self::NO_INTERNET_CODE,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: NetworkErrorKind::InvalidRequest,
            message: message.into(),
            code: Self::INVALID_REQUEST_CODE,
        }
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self {
            kind: NetworkErrorKind::NoData,
            message: message.into(),
            code: Self::NO_DATA_CODE,
        }
    }

    pub fn failed_response(message: impl Into<String>) -> Self {
        Self {
            kind: NetworkErrorKind::FailedResponse,
            message: message.into(),
            code: Self::FAILED_RESPONSE_CODE,
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: NetworkErrorKind::ResponseStatus,
            message: message.into(),
            code: i32::from(status),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self {
            kind: NetworkErrorKind::Serialization,
            message: message.into(),
            code: Self::SERIALIZATION_CODE,
        }
    }

    pub fn is_no_internet(&self) -> bool {
        self.kind == NetworkErrorKind::NoInternet
    }
}

/// Failure of a favorites store operation.
#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("movie {0} already exists in favorites")]
    AlreadyExists(String),
    #[error("movie {0} does not exist in favorites")]
    DoesNotExist(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_http_code() {
        let err = NetworkError::status(503, "Service Unavailable");
        assert_eq!(err.kind, NetworkErrorKind::ResponseStatus);
        assert_eq!(err.code, 503);
        assert_eq!(err.to_string(), "response_status (503): Service Unavailable");
    }

    #[test]
    fn each_kind_has_distinct_code() {
        let codes = [
            NetworkError::no_internet().code,
            NetworkError::invalid_request("x").code,
            NetworkError::no_data("x").code,
            NetworkError::failed_response("x").code,
            NetworkError::serialization("x").code,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(NetworkError::no_internet().is_no_internet());
    }
}
