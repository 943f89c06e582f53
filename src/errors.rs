use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("invalid input for {field}: {value:?}")]
    InvalidInput {
        field: String,
        value: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("telemetry error: {0}")]
    Telemetry(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
