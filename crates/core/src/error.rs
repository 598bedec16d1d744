use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("config error: {0}")]
    Config(String),

    /// The polled stats endpoint could not be reached or returned garbage.
    #[error("upstream unavailable: {0}")]
    Upstream(String),

    #[error("history error: {0}")]
    History(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = GuardError> = std::result::Result<T, E>;
