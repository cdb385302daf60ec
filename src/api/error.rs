use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mail::SendError;
use crate::models::ValidationError;

/// Body returned when a submission is missing fields.
pub const MISSING_FIELDS_MESSAGE: &str = "All fields are required.";

/// Body returned when delivery fails. Never includes the underlying cause.
pub const RELAY_FAILURE_MESSAGE: &str = "Failed to send email. Try again later.";

/// Why a contact submission was not relayed.
#[derive(Debug, Error)]
pub enum RelayError {
    /// One or more of name, email, subject, message is absent or empty.
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingField,

    /// The mail transport failed. The cause is logged, not returned.
    #[error("relay failed: {0}")]
    RelayFailure(#[from] SendError),
}

impl From<ValidationError> for RelayError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingField => Self::MissingField,
        }
    }
}

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            Self::MissingField => {
                tracing::warn!("Rejected contact submission: missing fields");
                (StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE)
            }
            Self::RelayFailure(cause) => {
                tracing::error!("Email sending error: {}", cause);
                (StatusCode::INTERNAL_SERVER_ERROR, RELAY_FAILURE_MESSAGE)
            }
        };

        (
            status,
            Json(ErrorBody {
                error: error.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactForm;

    #[test]
    fn incomplete_form_maps_to_missing_field() {
        let err: RelayError = ContactForm::default().validate().unwrap_err().into();
        assert!(matches!(err, RelayError::MissingField));
    }

    #[test]
    fn missing_field_is_a_client_error() {
        let response = RelayError::from(ValidationError::MissingField).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn relay_failure_is_a_server_error() {
        let response =
            RelayError::from(SendError::Transport("auth rejected".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
