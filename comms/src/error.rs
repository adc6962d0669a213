/// Result type of every rooms backend call
pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The configured backend url can not be used to build request urls
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// The request could not be sent or the response could not be read
    #[error("transport error: {0}")]
    Transport(String),
    /// The backend replied with a non-2xx status
    #[error("http error {status}: {body}")]
    Status {
        status: u16,
        /// `msg` field of the error body, when the backend supplied one
        message: Option<String>,
        body: String,
    },
    /// The backend replied with a body that does not have the expected shape
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl ApiError {
    /// The message the backend wants to be shown to the user, if any.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
