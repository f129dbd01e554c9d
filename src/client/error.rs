use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("not logged in")]
    NotLoggedIn,

    #[error("session storage: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ClientError {
    /// Message to show the user: the server's own words when it sent any.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Server {
                message: Some(m), ..
            } if !m.is_empty() => m.clone(),
            ClientError::NotLoggedIn => "Please log in first".to_string(),
            _ => fallback.to_string(),
        }
    }
}
