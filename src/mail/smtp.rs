use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use secrecy::ExposeSecret;

use super::{MessageSender, SendError};
use crate::config::RelayConfig;
use crate::models::OutboundMessage;

/// Delivers messages through an authenticated SMTP relay.
#[derive(Clone, Debug)]
pub struct SmtpSender {
    config: RelayConfig,
}

impl SmtpSender {
    pub fn new(config: RelayConfig) -> Self {
        Self { config }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, SendError> {
        let (Some(user), Some(pass)) = (&self.config.mail_user, &self.config.mail_pass) else {
            return Err(SendError::MissingCredentials);
        };
        let credentials = Credentials::new(user.clone(), pass.expose_secret().to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
            .map_err(|e| SendError::Transport(e.to_string()))?
            .credentials(credentials)
            .build();
        Ok(transport)
    }
}

#[async_trait]
impl MessageSender for SmtpSender {
    async fn send(&self, message: &OutboundMessage) -> Result<(), SendError> {
        let transport = self.transport()?;
        let email = build_email(message)?;

        tracing::debug!(host = %self.config.smtp_host, to = %message.to, "sending contact email");
        transport
            .send(email)
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;
        Ok(())
    }
}

fn mailbox(address: &str) -> Result<Mailbox, SendError> {
    address.parse().map_err(|e: lettre::address::AddressError| SendError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

fn build_email(message: &OutboundMessage) -> Result<Message, SendError> {
    Message::builder()
        .from(mailbox(&message.from)?)
        .reply_to(mailbox(&message.reply_to)?)
        .to(mailbox(&message.to)?)
        .subject(message.subject.clone())
        .multipart(MultiPart::alternative_plain_html(
            message.text.clone(),
            message.html.clone(),
        ))
        .map_err(|e| SendError::Build(e.to_string()))
}
