use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read {name}: {detail}")]
    Extraction { name: String, detail: String },

    #[error("api error: {0}")]
    Api(String),

    #[error("{0}")]
    Validation(String),

    #[error("no regulation file could be loaded")]
    NoRegulations,

    #[error("config error: {0}")]
    Config(String),
}

impl DocError {
    /// Shorthand for an extraction failure on a named file.
    pub fn extraction(name: &str, detail: impl std::fmt::Display) -> Self {
        Self::Extraction {
            name: name.to_string(),
            detail: detail.to_string(),
        }
    }
}

impl From<reqwest::Error> for DocError {
    fn from(e: reqwest::Error) -> Self {
        Self::Api(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DocError>;
