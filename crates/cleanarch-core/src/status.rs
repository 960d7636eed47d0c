//! # Response Status Catalog
//!
//! Defines the two-valued [`Status`] carried by every formatted response and
//! error body, and the closed [`StatusCode`] catalog of numeric codes a
//! usecase may report.
//!
//! `StatusCode` serializes as its bare integer so formatted bodies can be
//! emitted by any transport without translation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Outcome marker written into formatted responses and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The usecase completed successfully.
    Success,
    /// The usecase or the request failed.
    Error,
}

impl Status {
    /// Returns the wire string of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = StatusCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            other => Err(StatusCodeError::UnknownStatus(other.to_string())),
        }
    }
}

/// Error raised when a status or status code falls outside the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusCodeError {
    /// The numeric code is not part of [`StatusCode`].
    #[error("unknown status code: {0}")]
    UnknownCode(u16),

    /// The string is not a [`Status`] wire value.
    #[error("unknown status: {0:?}")]
    UnknownStatus(String),
}

/// Closed catalog of numeric status codes.
///
/// | Code | Variant |
/// |------|---------|
/// | 200 | `Ok` |
/// | 201 | `Created` |
/// | 202 | `Accepted` |
/// | 204 | `NoContent` |
/// | 400 | `BadRequest` |
/// | 401 | `Unauthorized` |
/// | 403 | `Forbidden` |
/// | 404 | `NotFound` |
/// | 409 | `ResourceAlreadyExists` |
/// | 417 | `ExpectationFailed` |
/// | 423 | `Locked` |
/// | 429 | `TooManyRequests` |
/// | 500 | `InternalServerError` |
/// | 503 | `ServiceUnavailable` |
/// | 504 | `GatewayTimeout` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum StatusCode {
    Ok = 200,
    Created = 201,
    Accepted = 202,
    NoContent = 204,
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    ResourceAlreadyExists = 409,
    ExpectationFailed = 417,
    Locked = 423,
    TooManyRequests = 429,
    InternalServerError = 500,
    ServiceUnavailable = 503,
    GatewayTimeout = 504,
}

/// Number of entries in the status code catalog.
pub const STATUS_CODE_COUNT: usize = 15;

impl StatusCode {
    /// Returns every catalog entry in ascending numeric order.
    pub fn all_codes() -> &'static [StatusCode] {
        &[
            Self::Ok,
            Self::Created,
            Self::Accepted,
            Self::NoContent,
            Self::BadRequest,
            Self::Unauthorized,
            Self::Forbidden,
            Self::NotFound,
            Self::ResourceAlreadyExists,
            Self::ExpectationFailed,
            Self::Locked,
            Self::TooManyRequests,
            Self::InternalServerError,
            Self::ServiceUnavailable,
            Self::GatewayTimeout,
        ]
    }

    /// Returns the numeric value of this code.
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// True for the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.as_u16())
    }

    /// True for the 4xx range.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.as_u16())
    }

    /// True for the 5xx range.
    pub fn is_server_error(&self) -> bool {
        self.as_u16() >= 500
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = StatusCodeError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::all_codes()
            .iter()
            .copied()
            .find(|c| c.as_u16() == code)
            .ok_or(StatusCodeError::UnknownCode(code))
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.as_u16()
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u16::deserialize(deserializer)?;
        StatusCode::try_from(code).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_count() {
        assert_eq!(StatusCode::all_codes().len(), STATUS_CODE_COUNT);
    }

    #[test]
    fn test_catalog_values() {
        assert_eq!(StatusCode::Ok.as_u16(), 200);
        assert_eq!(StatusCode::NoContent.as_u16(), 204);
        assert_eq!(StatusCode::BadRequest.as_u16(), 400);
        assert_eq!(StatusCode::ResourceAlreadyExists.as_u16(), 409);
        assert_eq!(StatusCode::ExpectationFailed.as_u16(), 417);
        assert_eq!(StatusCode::Locked.as_u16(), 423);
        assert_eq!(StatusCode::TooManyRequests.as_u16(), 429);
        assert_eq!(StatusCode::GatewayTimeout.as_u16(), 504);
    }

    #[test]
    fn test_catalog_sorted_and_unique() {
        let codes: Vec<u16> = StatusCode::all_codes().iter().map(|c| c.as_u16()).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_try_from_known_and_unknown() {
        for code in StatusCode::all_codes() {
            assert_eq!(StatusCode::try_from(code.as_u16()), Ok(*code));
        }
        assert_eq!(
            StatusCode::try_from(418),
            Err(StatusCodeError::UnknownCode(418))
        );
    }

    #[test]
    fn test_ranges() {
        assert!(StatusCode::Created.is_success());
        assert!(!StatusCode::Created.is_client_error());
        assert!(StatusCode::NotFound.is_client_error());
        assert!(StatusCode::ServiceUnavailable.is_server_error());
        assert!(!StatusCode::Locked.is_server_error());
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_value(StatusCode::BadRequest).unwrap();
        assert_eq!(json, serde_json::json!(400));
        let parsed: StatusCode = serde_json::from_value(serde_json::json!(201)).unwrap();
        assert_eq!(parsed, StatusCode::Created);
        assert!(serde_json::from_value::<StatusCode>(serde_json::json!(299)).is_err());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_value(Status::Success).unwrap(),
            serde_json::json!("success")
        );
        assert_eq!(Status::Error.to_string(), "error");
        assert_eq!("success".parse::<Status>(), Ok(Status::Success));
        assert!("SUCCESS".parse::<Status>().is_err());
    }
}
