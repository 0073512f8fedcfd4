use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown namespace: {value}")]
    UnknownNamespace { value: String },
    #[error("invalid option {option}: {reason}")]
    InvalidOption { option: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
