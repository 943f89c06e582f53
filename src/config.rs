use serde::{Deserialize, Serialize};

use crate::decimal::{DEFAULT_DISPLAY_DP, MAX_DISPLAY_DP};
use crate::errors::{CalculatorError, Result};
use crate::types::RepaymentType;

/// how raw form text becomes numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// browser `parseFloat` semantics, unparseable text becomes NaN
    #[default]
    Lenient,
    /// reject anything that is not a complete finite number
    Strict,
}

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub currency_symbol: String,
    pub display_decimal_places: u32,
    pub parse_mode: ParseMode,
    pub default_repayment_type: RepaymentType,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "£".to_string(),
            display_decimal_places: DEFAULT_DISPLAY_DP,
            parse_mode: ParseMode::Lenient,
            default_repayment_type: RepaymentType::Repayment,
        }
    }
}

impl CalculatorConfig {
    /// create strict configuration, rejecting non-numeric input
    pub fn strict() -> Self {
        Self {
            parse_mode: ParseMode::Strict,
            ..Self::default()
        }
    }

    /// set the display currency symbol
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// load from json, missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CalculatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.display_decimal_places > MAX_DISPLAY_DP {
            return Err(CalculatorError::InvalidConfiguration {
                message: format!(
                    "display_decimal_places must be at most {MAX_DISPLAY_DP}, got {}",
                    self.display_decimal_places
                ),
            });
        }
        Ok(())
    }
}
