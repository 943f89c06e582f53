use tracing_subscriber::EnvFilter;

use crate::errors::{CalculatorError, Result};

/// install the global fmt subscriber
///
/// `RUST_LOG` wins over `log_level` when set.
pub fn init(log_level: &str) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level).map_err(|err| {
            CalculatorError::InvalidConfiguration {
                message: format!("invalid log level/filter '{log_level}': {err}"),
            }
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| CalculatorError::Telemetry(err.to_string()))
}
