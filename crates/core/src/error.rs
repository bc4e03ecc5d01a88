use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimeslotError {
    #[error("Config error: {key}={value:?}: {reason}")]
    Config {
        key: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, TimeslotError>;
