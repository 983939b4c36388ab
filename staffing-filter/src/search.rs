//! Quick search and facet filtering for list views
//!
//! The contact list narrows records with a search box, a few dropdown
//! facets and a "created within" window before the advanced filter runs.
//! [`apply_filters`] chains the two the same way the list view does.

use crate::engine::spec_matches;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use staffing_core::{FilterSpec, Record, SearchDefaults};

/// Selection made in a facet dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum FacetValue {
    /// "All" - the facet does not constrain anything
    Any,
    /// Exact, case-sensitive match on the field's text form
    Equals(String),
    /// The field is missing, null or empty (e.g. "global" records with no business)
    Missing,
}

/// A single dropdown constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub field: String,
    pub value: FacetValue,
}

impl Facet {
    pub fn new(field: impl Into<String>, value: FacetValue) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match &self.value {
            FacetValue::Any => true,
            FacetValue::Equals(expected) => {
                record.get(&self.field).is_some() && record.text(&self.field) == expected.as_str()
            }
            FacetValue::Missing => record.is_absent(&self.field),
        }
    }
}

/// "Created within" window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    #[default]
    All,
    LastDays(u32),
}

impl Timeframe {
    /// Map the list view's dropdown keys (`all`, `week`, `month`) onto a
    /// window. Unknown keys mean no constraint.
    pub fn from_key(key: &str, defaults: &SearchDefaults) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "week" => Timeframe::LastDays(defaults.week_days),
            "month" => Timeframe::LastDays(defaults.month_days),
            _ => Timeframe::All,
        }
    }
}

/// Everything the list view applies before the advanced filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickFilter {
    pub term: String,
    pub search_fields: Vec<String>,
    pub facets: Vec<Facet>,
    pub timeframe: Timeframe,
    pub created_field: String,
}

impl Default for QuickFilter {
    fn default() -> Self {
        Self::from_defaults(&SearchDefaults::default())
    }
}

impl QuickFilter {
    pub fn from_defaults(defaults: &SearchDefaults) -> Self {
        Self {
            term: String::new(),
            search_fields: defaults.search_fields.clone(),
            facets: Vec::new(),
            timeframe: Timeframe::All,
            created_field: defaults.created_field.clone(),
        }
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    pub fn with_facet(mut self, field: impl Into<String>, value: FacetValue) -> Self {
        self.facets.push(Facet::new(field, value));
        self
    }

    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = timeframe;
        self
    }

    /// Whether anything here would hide a record.
    pub fn is_active(&self) -> bool {
        !self.term.is_empty()
            || self.facets.iter().any(|f| f.value != FacetValue::Any)
            || self.timeframe != Timeframe::All
    }

    pub fn matches(&self, record: &Record, now: DateTime<Utc>) -> bool {
        self.matches_term(record)
            && self.facets.iter().all(|facet| facet.matches(record))
            && self.matches_timeframe(record, now)
    }

    /// Case-insensitive substring search. The term is used as typed,
    /// surrounding spaces included.
    fn matches_term(&self, record: &Record) -> bool {
        let term = self.term.to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.search_fields
            .iter()
            .any(|field| record.text(field).to_lowercase().contains(&term))
    }

    fn matches_timeframe(&self, record: &Record, now: DateTime<Utc>) -> bool {
        let days = match self.timeframe {
            Timeframe::All => return true,
            Timeframe::LastDays(days) => days,
        };
        match parse_timestamp(&record.text(&self.created_field)) {
            Some(created) => now.signed_duration_since(created) <= Duration::days(i64::from(days)),
            None => false,
        }
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Records passing the quick filter, in order.
pub fn apply_quick_filter(
    records: &[Record],
    quick: &QuickFilter,
    now: DateTime<Utc>,
) -> Vec<Record> {
    records
        .iter()
        .filter(|record| quick.matches(record, now))
        .cloned()
        .collect()
}

/// Quick filter first, then the advanced filter, preserving order.
pub fn apply_filters(
    records: &[Record],
    quick: &QuickFilter,
    spec: Option<&FilterSpec>,
    now: DateTime<Utc>,
) -> Vec<Record> {
    let spec = spec.filter(|spec| spec.has_conditions());
    let kept: Vec<Record> = records
        .iter()
        .filter(|record| quick.matches(record, now))
        .filter(|record| spec.map_or(true, |spec| spec_matches(record, spec)))
        .cloned()
        .collect();

    tracing::trace!(
        total = records.len(),
        kept = kept.len(),
        quick_active = quick.is_active(),
        "list filters applied"
    );
    kept
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use staffing_core::{Condition, ConditionGroup, FieldValue, OperatorKind};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).single().expect("valid date")
    }

    fn contacts() -> Vec<Record> {
        vec![
            Record::new()
                .with("contact_id", 1i64)
                .with("first_name", "John")
                .with("last_name", "Doe")
                .with("email", "john@example.com")
                .with("status", "active")
                .with("business_id", "b-1")
                .with("created_at", "2025-03-12T09:00:00Z"),
            Record::new()
                .with("contact_id", 2i64)
                .with("first_name", "Jane")
                .with("last_name", "Smith")
                .with("email", "jane@example.com")
                .with("status", "inactive")
                .with("business_id", FieldValue::Null)
                .with("created_at", "2025-02-20T09:00:00+00:00"),
            Record::new()
                .with("contact_id", 3i64)
                .with("first_name", "Bob")
                .with("last_name", "Johnson")
                .with("email", "bob@test.com")
                .with("status", "active")
                .with("created_at", "not a date"),
        ]
    }

    fn ids(records: &[Record]) -> Vec<String> {
        records.iter().map(|r| r.text("contact_id").into_owned()).collect()
    }

    #[test]
    fn test_empty_quick_filter_keeps_everything() {
        let quick = QuickFilter::default().with_term("");
        assert!(!quick.is_active());
        assert_eq!(ids(&apply_quick_filter(&contacts(), &quick, now())), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_term_is_not_trimmed() {
        let quick = QuickFilter::default().with_term(" doe");
        assert!(quick.is_active());
        assert!(apply_quick_filter(&contacts(), &quick, now()).is_empty());

        let quick = QuickFilter::default().with_term("@example");
        assert_eq!(ids(&apply_quick_filter(&contacts(), &quick, now())), vec!["1", "2"]);
    }

    #[test]
    fn test_term_searches_names_and_email() {
        let quick = QuickFilter::default().with_term("JOHN");
        assert_eq!(ids(&apply_quick_filter(&contacts(), &quick, now())), vec!["1", "3"]);

        let quick = QuickFilter::default().with_term("test.com");
        assert_eq!(ids(&apply_quick_filter(&contacts(), &quick, now())), vec!["3"]);
    }

    #[test]
    fn test_equals_facet_is_case_sensitive() {
        let quick = QuickFilter::default()
            .with_facet("status", FacetValue::Equals("active".to_string()));
        assert!(quick.is_active());
        assert_eq!(ids(&apply_quick_filter(&contacts(), &quick, now())), vec!["1", "3"]);

        let quick = QuickFilter::default()
            .with_facet("status", FacetValue::Equals("Active".to_string()));
        assert!(apply_quick_filter(&contacts(), &quick, now()).is_empty());
    }

    #[test]
    fn test_missing_facet_selects_global_records() {
        let quick = QuickFilter::default().with_facet("business_id", FacetValue::Missing);
        assert_eq!(ids(&apply_quick_filter(&contacts(), &quick, now())), vec!["2", "3"]);
    }

    #[test]
    fn test_timeframe_windows() {
        let defaults = SearchDefaults::default();

        let week = QuickFilter::default().with_timeframe(Timeframe::from_key("week", &defaults));
        assert_eq!(ids(&apply_quick_filter(&contacts(), &week, now())), vec!["1"]);

        let month = QuickFilter::default().with_timeframe(Timeframe::from_key("month", &defaults));
        assert_eq!(ids(&apply_quick_filter(&contacts(), &month, now())), vec!["1", "2"]);

        assert_eq!(Timeframe::from_key("all", &defaults), Timeframe::All);
        assert_eq!(Timeframe::from_key("fortnight", &defaults), Timeframe::All);
    }

    #[test]
    fn test_parse_timestamp() {
        assert!(parse_timestamp("2025-03-12T09:00:00Z").is_some());
        assert!(parse_timestamp("2025-03-12T09:00:00.123+05:30").is_some());
        assert_eq!(
            parse_timestamp("2025-03-12"),
            Utc.with_ymd_and_hms(2025, 3, 12, 0, 0, 0).single()
        );
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_apply_filters_runs_quick_then_advanced() {
        let quick = QuickFilter::default()
            .with_facet("status", FacetValue::Equals("active".to_string()));
        let spec = FilterSpec::single(ConditionGroup::all(vec![Condition::new(
            "last_name",
            OperatorKind::Contains,
            "john",
        )]));

        assert_eq!(ids(&apply_filters(&contacts(), &quick, Some(&spec), now())), vec!["3"]);
        assert_eq!(ids(&apply_filters(&contacts(), &quick, None, now())), vec!["1", "3"]);
    }
}
