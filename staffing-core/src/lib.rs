//! Staffing CRM Core - Record and Filter Types
//!
//! Pure data structures shared by the filter engine and its callers.
//! This crate contains ONLY data types and boundary normalization - no
//! evaluation logic.

pub mod config;
pub mod error;
pub mod filter;
pub mod record;

pub use config::SearchDefaults;
pub use error::{ConfigError, InputError, StaffingError, StaffingResult, ValidationError};
pub use filter::{
    Combinator, Condition, ConditionGroup, ConditionOperator, FilterSpec, OperatorKind,
};
pub use record::{records_from_json_str, FieldValue, Record};
