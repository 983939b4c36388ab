//! Staffing CRM Filter - Advanced Filter Engine
//!
//! Evaluates the advanced filter builder's specification against in-memory
//! list records and renders it as a sentence for the "filter active" banner.
//!
//! Flow through a list view:
//! ```text
//! Records (list query result)
//!     ↓
//! search::QuickFilter (search box, facets, created window)
//!     ↓
//! engine::apply_advanced_filters (condition groups)
//!     ↓
//! Visible records            describe::describe_filter → banner text
//! ```
//!
//! Everything here is synchronous and stateless; calls are independent and
//! safe to run concurrently.

pub mod catalog;
pub mod describe;
pub mod engine;
pub mod search;

pub use catalog::{FieldCatalog, FieldDefinition, FieldKind, SelectOption};
pub use describe::{
    describe_condition, describe_filter, describe_filter_with, field_label, NO_FILTERS_APPLIED,
};
pub use engine::{
    apply_advanced_filters, evaluate_condition, group_matches, is_filter_empty, matches_record,
    select_matching,
};
pub use search::{apply_filters, apply_quick_filter, Facet, FacetValue, QuickFilter, Timeframe};

// Re-export core types for convenience
pub use staffing_core::{
    Combinator, Condition, ConditionGroup, ConditionOperator, FieldValue, FilterSpec,
    OperatorKind, Record, SearchDefaults, StaffingError, StaffingResult,
};
