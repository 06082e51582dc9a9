use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TriptychError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("rate response has no positive quote for {0}")]
    MissingQuote(&'static str),

    #[error("No open database connection")]
    NotConnected,
}

impl TriptychError {
    /// Message shown to the user in an error notice.
    ///
    /// Database errors are unwrapped to the driver's own text so dialogs name
    /// the underlying failure instead of the wrapper.
    pub fn user_message(&self) -> String {
        match self {
            TriptychError::DatabaseError(SqlxError::Database(db)) => db.message().to_string(),
            TriptychError::DatabaseError(other) => other.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<figment::Error> for TriptychError {
    fn from(e: figment::Error) -> Self {
        TriptychError::Config(e.to_string())
    }
}
