use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid allow-list entry: {entry}")]
    InvalidAllowEntry { entry: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
