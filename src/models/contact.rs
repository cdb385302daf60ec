use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix put in front of every relayed subject line.
pub const SUBJECT_PREFIX: &str = "Portfolio Contact: ";

/// Why a [`ContactForm`] failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name, email, subject and message are all required")]
    MissingField,
}

/// A contact-form submission as it arrives on the wire.
///
/// Every field is optional here so that a missing field is reported as a
/// validation error instead of a decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactForm {
    /// Require all four fields to be present and non-empty.
    ///
    /// The email address is not checked for format here; a bad address
    /// surfaces later as a delivery failure.
    pub fn validate(self) -> Result<ContactMessage, ValidationError> {
        fn required(field: Option<String>) -> Result<String, ValidationError> {
            field
                .filter(|value| !value.is_empty())
                .ok_or(ValidationError::MissingField)
        }

        Ok(ContactMessage {
            name: required(self.name)?,
            email: required(self.email)?,
            subject: required(self.subject)?,
            message: required(self.message)?,
        })
    }
}

/// A validated contact submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Build the email sent to the site operator at `recipient`.
    ///
    /// The sender is the address the visitor typed in, so replying from the
    /// operator's inbox goes straight back to them.
    pub fn to_outbound(&self, recipient: &str) -> OutboundMessage {
        let html = format!(
            "<h3>New message from {name}</h3>\n\
             <p><strong>Email:</strong> {email}</p>\n\
             <p><strong>Message:</strong></p>\n\
             <p>{message}</p>",
            name = escape_html(&self.name),
            email = escape_html(&self.email),
            message = escape_html(&self.message),
        );
        let text = format!(
            "New message from {}\n\nEmail: {}\n\nMessage:\n{}\n",
            self.name, self.email, self.message
        );

        OutboundMessage {
            from: self.email.clone(),
            reply_to: self.email.clone(),
            to: recipient.to_string(),
            subject: format!("{}{}", SUBJECT_PREFIX, self.subject),
            html,
            text,
        }
    }
}

/// Transport-neutral email handed to a [`MessageSender`](crate::mail::MessageSender).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub from: String,
    pub reply_to: String,
    pub to: String,
    pub subject: String,
    /// HTML body; all visitor-supplied text is escaped.
    pub html: String,
    /// Plain-text alternative of `html`.
    pub text: String,
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
