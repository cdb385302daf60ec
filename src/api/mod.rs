mod error;
mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::{ErrorBody, RelayError, MISSING_FIELDS_MESSAGE, RELAY_FAILURE_MESSAGE};
pub use handlers::{ContactPayload, ContactReceipt, SUCCESS_MESSAGE};

use crate::config::RelayConfig;
use crate::mail::{MessageSender, SmtpSender};

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    sender: Arc<dyn MessageSender>,
    recipient: Arc<str>,
}

impl AppState {
    pub fn new(sender: Arc<dyn MessageSender>, recipient: impl Into<String>) -> Self {
        let recipient: String = recipient.into();
        Self {
            sender,
            recipient: Arc::from(recipient),
        }
    }

    /// State backed by SMTP delivery to the configured operator.
    pub fn from_config(config: RelayConfig) -> Self {
        let recipient = config.recipient().to_string();
        Self::new(Arc::new(SmtpSender::new(config)), recipient)
    }

    pub fn sender(&self) -> &dyn MessageSender {
        self.sender.as_ref()
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/contact", post(handlers::contact))
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
