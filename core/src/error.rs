use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown {kind} '{key}'. Available: {}", .valid.join(", "))]
    InvalidArgument {
        kind: &'static str,
        key: String,
        valid: Vec<String>,
    },

    #[error("No data: {0}")]
    NoData(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ForecastError {
    pub fn invalid_argument<I, S>(kind: &'static str, key: &str, valid: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::InvalidArgument {
            kind,
            key: key.to_string(),
            valid: valid.into_iter().map(Into::into).collect(),
        }
    }
}

pub type ForecastResult<T> = Result<T, ForecastError>;
