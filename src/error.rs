use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
    #[error("invalid term `{term}`: {reason}")]
    InvalidTerm { term: String, reason: String },
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    #[error("failed to fetch series for `{id}`")]
    Fetch {
        id: String,
        #[source]
        source: Box<AppError>,
    },
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }

    pub fn invalid_term<T: Into<String>, R: Into<String>>(term: T, reason: R) -> Self {
        AppError::InvalidTerm {
            term: term.into(),
            reason: reason.into(),
        }
    }

    /// Attach the instrument id to a transport or decoding failure.
    pub fn fetch<T: Into<String>>(id: T, source: AppError) -> Self {
        AppError::Fetch {
            id: id.into(),
            source: Box::new(source),
        }
    }
}
