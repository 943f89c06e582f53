pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod form;
pub mod parse;
pub mod payments;
pub mod serialization;
pub mod state;
pub mod telemetry;
pub mod types;

// re-export key types
pub use config::{CalculatorConfig, ParseMode};
pub use decimal::{format_amount, Money};
pub use errors::{CalculatorError, Result};
pub use events::{Event, EventStore};
pub use form::{FormattedResult, MortgageForm, MortgageFormBuilder};
pub use payments::{calculate, AmortizationCalculator};
pub use serialization::{handle_json_request, CalculationRequest, CalculationResponse, FormView};
pub use state::{FormState, FormStatus};
pub use types::{CalculationResult, FormField, LoanInput, RepaymentType, SessionId};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use uuid::Uuid;
