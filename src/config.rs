//! Relay configuration loaded from environment variables.

use secrecy::SecretString;

/// Default SMTP submission host.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Operator mail settings.
///
/// Missing credentials do not stop the server from starting; they surface
/// as a delivery failure the first time a message is relayed.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Operator address (from MAIL_USER). Used both to log in and as the recipient.
    pub mail_user: Option<String>,
    /// Application-specific password (from MAIL_PASS).
    pub mail_pass: Option<SecretString>,
    /// SMTP relay host (from FOLIO_SMTP_HOST).
    pub smtp_host: String,
}

impl RelayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            mail_user: non_empty("MAIL_USER"),
            mail_pass: non_empty("MAIL_PASS").map(SecretString::from),
            smtp_host: non_empty("FOLIO_SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
        }
    }

    /// Address submissions are delivered to; empty when unconfigured.
    pub fn recipient(&self) -> &str {
        self.mail_user.as_deref().unwrap_or_default()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
