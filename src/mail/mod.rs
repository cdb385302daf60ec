//! Outbound mail delivery.
//!
//! The relay hands every validated submission to a [`MessageSender`]. The
//! production implementation is [`SmtpSender`]; tests plug in their own.

mod smtp;

pub use smtp::SmtpSender;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::OutboundMessage;

/// Reasons a message could not be delivered.
///
/// These are for the operator's logs only; callers of the relay never see them.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("mail credentials are not configured (set MAIL_USER and MAIL_PASS)")]
    MissingCredentials,

    #[error("invalid address {address:?}: {reason}")]
    Address { address: String, reason: String },

    #[error("could not build message: {0}")]
    Build(String),

    #[error("transport failed: {0}")]
    Transport(String),
}

/// Delivers one email. A single call is a single delivery attempt.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<(), SendError>;
}
