use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(u64),

    #[error("Name and email must not be empty")]
    EmptyField,

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Email {0} already exists")]
    DuplicateEmail(String),

    #[error("Failed to save users to {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No user IDs left after {0}")]
    IdsExhausted(u64),

    #[error("Failed to encode users: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Not a valid user ID: {0}")]
    InvalidId(String),
}

pub type Result<T> = std::result::Result<T, UserError>;
