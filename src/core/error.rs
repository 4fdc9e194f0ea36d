use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabulaError {
    #[error("roll server error: {0}")]
    RollServer(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TabulaError>;
