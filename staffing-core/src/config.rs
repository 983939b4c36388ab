//! Configuration types

use crate::error::{ConfigError, StaffingResult};
use serde::{Deserialize, Serialize};

/// Defaults for the contact list quick filter.
///
/// API layers and the CLI use these when a request does not say which
/// fields the search box covers or how long the "recent" windows are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDefaults {
    /// Fields the free-text search box looks at
    pub search_fields: Vec<String>,
    /// Field holding the record's creation timestamp (RFC 3339)
    pub created_field: String,
    /// Length of the "this week" window in days
    pub week_days: u32,
    /// Length of the "this month" window in days
    pub month_days: u32,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            search_fields: vec![
                "first_name".to_string(),
                "last_name".to_string(),
                "email".to_string(),
            ],
            created_field: "created_at".to_string(),
            week_days: 7,
            month_days: 30,
        }
    }
}

impl SearchDefaults {
    /// Create from environment variables with fallback to defaults.
    ///
    /// Environment variables:
    /// - `STAFFING_SEARCH_FIELDS`: Comma-separated search fields (default: first_name,last_name,email)
    /// - `STAFFING_CREATED_FIELD`: Creation timestamp field (default: created_at)
    /// - `STAFFING_WEEK_DAYS`: Days in the week window (default: 7)
    /// - `STAFFING_MONTH_DAYS`: Days in the month window (default: 30)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SearchDefaults::from_env`] with an injectable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let search_fields = lookup("STAFFING_SEARCH_FIELDS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|fields| !fields.is_empty())
            .unwrap_or(defaults.search_fields);

        Self {
            search_fields,
            created_field: lookup("STAFFING_CREATED_FIELD")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.created_field),
            week_days: lookup("STAFFING_WEEK_DAYS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.week_days),
            month_days: lookup("STAFFING_MONTH_DAYS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.month_days),
        }
    }

    /// Validate the configuration.
    ///
    /// Validates:
    /// - at least one search field, none blank
    /// - created_field is not blank
    /// - both windows are at least one day
    pub fn validate(&self) -> StaffingResult<()> {
        if self.search_fields.is_empty() || self.search_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "search_fields".to_string(),
                value: format!("{:?}", self.search_fields),
                reason: "search_fields must list at least one non-blank field".to_string(),
            }
            .into());
        }

        if self.created_field.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "created_field".to_string(),
                value: self.created_field.clone(),
                reason: "created_field must not be blank".to_string(),
            }
            .into());
        }

        for (field, days) in [("week_days", self.week_days), ("month_days", self.month_days)] {
            if days == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: days.to_string(),
                    reason: format!("{} must be positive", field),
                }
                .into());
            }
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
