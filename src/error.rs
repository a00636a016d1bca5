//! Error types for device communication.
//!
//! Every request to the device resolves to either a value or a
//! [`GatewayError`]. The sync loop never propagates these: they end up in
//! the last-error slot of the store. `anyhow` is only used on the setup path
//! in `main`.

/// Result of a single gateway request.
///
/// `Ok(None)` is an envelope that carried neither `Error` nor `Value`.
pub type Reply<T> = std::result::Result<Option<T>, GatewayError>;

/// Failure of a single request to the device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The device answered with an `Error` envelope.
    #[error("{0}")]
    Remote(String),

    /// The request never produced an envelope (timeout, refused, bad body).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The `Value` did not have the shape expected for the command.
    #[error("Unexpected reply to {command}: {message}")]
    Decode { command: String, message: String },
}

impl GatewayError {
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn decode(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            command: command.into(),
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Transport(format!("timed out: {}", e))
        } else {
            Self::Transport(e.to_string())
        }
    }
}
