use thiserror::Error;

/// Message shown when the add form is submitted with a missing field.
pub const EMPTY_FIELDS_MESSAGE: &str = "Title and content cannot be empty";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Subscription error: {0}")]
    Subscription(String),

    #[error("Write failed: {0}")]
    Write(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn empty_fields() -> Self {
        Self::Validation(EMPTY_FIELDS_MESSAGE.to_string())
    }

    pub fn subscription<S: Into<String>>(msg: S) -> Self {
        Self::Subscription(msg.into())
    }

    pub fn write<S: Into<String>>(msg: S) -> Self {
        Self::Write(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Whether retrying the same operation later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Anyhow(_) | Self::Subscription(_) | Self::Write(_)
        )
    }

    pub fn is_pii_safe(&self) -> bool {
        match self {
            Self::Database(_) | Self::Anyhow(_) => false,
            Self::Validation(_)
            | Self::Subscription(_)
            | Self::Write(_)
            | Self::Config(_) => true,
        }
    }

    pub fn to_safe_string(&self) -> String {
        if self.is_pii_safe() {
            self.to_string()
        } else {
            match self {
                Self::Database(_) => "Database operation failed".to_string(),
                Self::Anyhow(_) => "Operation failed".to_string(),
                _ => self.to_string(),
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
