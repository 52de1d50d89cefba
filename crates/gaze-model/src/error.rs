use std::fmt;

#[derive(Debug)]
pub enum ModelError {
    /// No API key was configured.
    MissingKey,
    /// Network or transport failure talking to the service.
    Transport(String),
    /// The service answered with a non-success status (quota, auth, ...).
    Api { status: u16, message: String },
    /// The service answered 200 but the payload did not match the schema.
    Malformed(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::MissingKey => write!(f, "no API key configured"),
            ModelError::Transport(msg) => write!(f, "model transport error: {msg}"),
            ModelError::Api { status, message } => {
                write!(f, "model API error {status}: {message}")
            }
            ModelError::Malformed(msg) => write!(f, "malformed model output: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}
