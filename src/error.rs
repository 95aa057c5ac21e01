use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Text conversion failed: {0}")]
    Conversion(String),

    #[error("Candidate unavailable: {0}")]
    Candidate(String),

    #[error("{0}")]
    Other(String),
}
