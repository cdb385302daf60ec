use axum::{
    extract::{FromRequest, Request, State},
    http::header,
    response::IntoResponse,
    Form, Json,
};
use serde::{Deserialize, Serialize};

use super::{AppState, RelayError};
use crate::models::ContactForm;

/// Body returned after a message was handed to the mail transport.
pub const SUCCESS_MESSAGE: &str = "Email sent successfully!";

/// JSON success body: `{"message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub message: String,
}

// ============================================================
// Extractors
// ============================================================

/// Contact form decoded from either a JSON or a URL-encoded form body.
///
/// A body that cannot be decoded is treated the same as one with missing
/// fields, so browsers posting a plain HTML form and scripts posting JSON
/// get the same error contract.
pub struct ContactPayload(pub ContactForm);

impl<S> FromRequest<S> for ContactPayload
where
    S: Send + Sync,
{
    type Rejection = RelayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let form = if is_form {
            Form::<ContactForm>::from_request(req, state)
                .await
                .map(|Form(form)| form)
                .map_err(|rejection| {
                    tracing::warn!("Undecodable form body: {}", rejection.body_text());
                    RelayError::MissingField
                })?
        } else {
            Json::<ContactForm>::from_request(req, state)
                .await
                .map(|Json(form)| form)
                .map_err(|rejection| {
                    tracing::warn!("Undecodable JSON body: {}", rejection.body_text());
                    RelayError::MissingField
                })?
        };

        Ok(Self(form))
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Contact
// ============================================================

/// Validate a submission and relay it to the operator in one delivery attempt.
pub async fn contact(
    State(state): State<AppState>,
    ContactPayload(form): ContactPayload,
) -> Result<Json<ContactReceipt>, RelayError> {
    let message = form.validate()?;
    let outbound = message.to_outbound(state.recipient());

    state.sender().send(&outbound).await?;
    tracing::info!("Relayed contact message: {}", outbound.subject);

    Ok(Json(ContactReceipt {
        message: SUCCESS_MESSAGE.to_string(),
    }))
}
