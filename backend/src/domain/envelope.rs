//! Uniform result envelope returned by guarded operations.

use serde::Serialize;
use utoipa::ToSchema;

use super::{Error, ErrorCode};

/// Message shown instead of infrastructure failures in production.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// How much of an unexpected failure reaches the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorExposure {
    /// Surface the underlying message (development).
    Verbose,
    /// Replace infrastructure failures with [`UNEXPECTED_ERROR`].
    #[default]
    Redacted,
}

impl ErrorExposure {
    /// Exposure matching the deployment mode.
    #[must_use]
    pub const fn for_production(production: bool) -> Self {
        if production { Self::Redacted } else { Self::Verbose }
    }

    /// Client-facing message for `error`.
    #[must_use]
    pub fn message_for<'a>(self, error: &'a Error) -> &'a str {
        match self {
            Self::Redacted if error.code().is_unexpected() => UNEXPECTED_ERROR,
            Self::Redacted | Self::Verbose => error.message(),
        }
    }
}

/// `{ success, data?, error? }`
///
/// The error category travels with the envelope so transports can pick a
/// status code, but it is not serialised.
///
/// # Examples
/// ```
/// use hiring_backend::domain::{ActionResponse, Error, ErrorExposure};
///
/// let ok = ActionResponse::ok(3_u32);
/// assert!(ok.success);
///
/// let failed: ActionResponse<u32> =
///     ActionResponse::failure(&Error::internal("pool exhausted"), ErrorExposure::Redacted);
/// assert_eq!(failed.error.as_deref(), Some("An unexpected error occurred"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ActionResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    code: Option<ErrorCode>,
}

impl<T> ActionResponse<T> {
    /// Successful envelope.
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }

    /// Failed envelope carrying the exposure-filtered message.
    #[must_use]
    pub fn failure(error: &Error, exposure: ErrorExposure) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(exposure.message_for(error).to_owned()),
            code: Some(error.code()),
        }
    }

    /// Envelope for an operation outcome.
    #[must_use]
    pub fn from_result(result: Result<T, Error>, exposure: ErrorExposure) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::failure(&error, exposure),
        }
    }

    /// Category of the failure, `None` on success.
    #[must_use]
    pub const fn error_code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Transform the payload of a successful envelope.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionResponse<U> {
        ActionResponse {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
            code: self.code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    const MISSING_RELATION: &str = "relation \"jobs\" does not exist";
    const ALREADY_APPLIED: &str = "Vous avez déjà postulé à cette offre.";

    #[rstest]
    #[case(Error::internal(MISSING_RELATION), ErrorExposure::Redacted, UNEXPECTED_ERROR)]
    #[case(Error::service_unavailable("pool timed out"), ErrorExposure::Redacted, UNEXPECTED_ERROR)]
    #[case(Error::internal(MISSING_RELATION), ErrorExposure::Verbose, MISSING_RELATION)]
    #[case(Error::forbidden("Unauthorized access"), ErrorExposure::Redacted, "Unauthorized access")]
    #[case(Error::conflict(ALREADY_APPLIED), ErrorExposure::Redacted, ALREADY_APPLIED)]
    fn failure_messages_follow_exposure(
        #[case] error: Error,
        #[case] exposure: ErrorExposure,
        #[case] expected: &str,
    ) {
        let envelope: ActionResponse<()> = ActionResponse::failure(&error, exposure);
        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some(expected));
        assert_eq!(envelope.error_code(), Some(error.code()));
    }

    #[rstest]
    fn success_serialises_without_error_key() {
        let value = serde_json::to_value(ActionResponse::ok(json!({"id": 1}))).expect("json");
        assert_eq!(value, json!({"success": true, "data": {"id": 1}}));
    }

    #[rstest]
    fn failure_serialises_without_data_or_code() {
        let error = Error::not_found("Application not found");
        let envelope: ActionResponse<u8> = ActionResponse::failure(&error, ErrorExposure::Verbose);
        let value = serde_json::to_value(envelope).expect("json");
        assert_eq!(
            value,
            json!({"success": false, "error": "Application not found"})
        );
    }

    #[rstest]
    fn production_flag_selects_redaction() {
        assert_eq!(ErrorExposure::for_production(true), ErrorExposure::Redacted);
        assert_eq!(ErrorExposure::for_production(false), ErrorExposure::Verbose);
    }
}
