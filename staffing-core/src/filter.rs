//! Filter specification types
//!
//! These are the shapes the advanced filter builder sends: a list of
//! condition groups joined by a top-level combinator, each group holding
//! field/operator/value conditions joined by its own combinator.
//!
//! Deserialization is the input boundary and is deliberately forgiving.
//! Builders have disagreed on key names (`operator` vs `logicalOperator`)
//! and occasionally send malformed pieces; all of that is normalized here so
//! the evaluator only ever sees [`Combinator`] and [`ConditionOperator`].

use crate::error::{InputError, StaffingResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// OPERATORS
// ============================================================================

/// Comparison applied by a single condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 8] = [
        OperatorKind::Equals,
        OperatorKind::NotEquals,
        OperatorKind::Contains,
        OperatorKind::NotContains,
        OperatorKind::StartsWith,
        OperatorKind::EndsWith,
        OperatorKind::IsEmpty,
        OperatorKind::IsNotEmpty,
    ];

    /// Wire name, as the builder sends it.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorKind::Equals => "equals",
            OperatorKind::NotEquals => "not_equals",
            OperatorKind::Contains => "contains",
            OperatorKind::NotContains => "not_contains",
            OperatorKind::StartsWith => "starts_with",
            OperatorKind::EndsWith => "ends_with",
            OperatorKind::IsEmpty => "is_empty",
            OperatorKind::IsNotEmpty => "is_not_empty",
        }
    }

    /// Phrase used when describing a condition in prose.
    pub fn phrase(&self) -> &'static str {
        match self {
            OperatorKind::Equals => "equals",
            OperatorKind::NotEquals => "does not equal",
            OperatorKind::Contains => "contains",
            OperatorKind::NotContains => "does not contain",
            OperatorKind::StartsWith => "starts with",
            OperatorKind::EndsWith => "ends with",
            OperatorKind::IsEmpty => "is empty",
            OperatorKind::IsNotEmpty => "is not empty",
        }
    }

    /// Whether the condition's value participates in the comparison.
    pub fn takes_value(&self) -> bool {
        !matches!(self, OperatorKind::IsEmpty | OperatorKind::IsNotEmpty)
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        OperatorKind::ALL
            .into_iter()
            .find(|op| op.as_str() == normalized)
            .ok_or_else(|| s.to_string())
    }
}

/// Operator as received: either one we know or the raw text we did not
/// recognise. Unrecognised operators never match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConditionOperator {
    Known(OperatorKind),
    Unrecognized(String),
}

impl ConditionOperator {
    pub fn known(&self) -> Option<OperatorKind> {
        match self {
            ConditionOperator::Known(op) => Some(*op),
            ConditionOperator::Unrecognized(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConditionOperator::Known(op) => op.as_str(),
            ConditionOperator::Unrecognized(raw) => raw,
        }
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => s
                .parse()
                .map(ConditionOperator::Known)
                .unwrap_or_else(|_| ConditionOperator::Unrecognized(s.clone())),
            Value::Null => ConditionOperator::default(),
            other => ConditionOperator::Unrecognized(other.to_string()),
        }
    }
}

impl Default for ConditionOperator {
    fn default() -> Self {
        ConditionOperator::Unrecognized(String::new())
    }
}

impl From<OperatorKind> for ConditionOperator {
    fn from(op: OperatorKind) -> Self {
        ConditionOperator::Known(op)
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConditionOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConditionOperator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| ConditionOperator::from_json(&v))
    }
}

// ============================================================================
// COMBINATOR
// ============================================================================

/// Logical join between conditions in a group, or between groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Combinator {
    #[default]
    And,
    Or,
}

impl Combinator {
    /// Lowercase word used in descriptions.
    pub fn word(&self) -> &'static str {
        match self {
            Combinator::And => "and",
            Combinator::Or => "or",
        }
    }

    /// Uppercase spelling the builder emits.
    pub fn as_upper(&self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }

    fn from_json(value: Option<&Value>) -> Option<Combinator> {
        value.and_then(Value::as_str).and_then(|s| s.parse().ok())
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_upper())
    }
}

impl FromStr for Combinator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(Combinator::And),
            "or" => Ok(Combinator::Or),
            _ => Err(s.to_string()),
        }
    }
}

impl Serialize for Combinator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_upper())
    }
}

// ============================================================================
// CONDITIONS AND GROUPS
// ============================================================================

/// One field/operator/value predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Record field to read. Blank means the condition never matches.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub field: String,
    #[serde(default)]
    pub operator: ConditionOperator,
    /// `None` when the wire value was missing, null, or not a string.
    #[serde(default, deserialize_with = "text_or_none")]
    pub value: Option<String>,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: OperatorKind, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: Some(value.into()),
        }
    }

    /// Condition for a value-less operator such as `is_empty`.
    pub fn unary(field: impl Into<String>, operator: OperatorKind) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: Some(String::new()),
        }
    }

    /// Placeholder for a list element that was not a condition at all.
    fn malformed(raw: &Value) -> Self {
        Self {
            field: String::new(),
            operator: ConditionOperator::Unrecognized(raw.to_string()),
            value: None,
        }
    }
}

/// Conditions joined by one combinator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "WireGroup", into = "WireGroup")]
pub struct ConditionGroup {
    pub conditions: Vec<Condition>,
    pub combinator: Combinator,
}

impl ConditionGroup {
    pub fn new(combinator: Combinator, conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            combinator,
        }
    }

    /// Group that requires every condition.
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self::new(Combinator::And, conditions)
    }

    /// Group that requires at least one condition.
    pub fn any(conditions: Vec<Condition>) -> Self {
        Self::new(Combinator::Or, conditions)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Group shape on the wire. Two builders disagree on the combinator key;
/// `logicalOperator` wins when both are usable.
#[derive(Serialize, Deserialize)]
struct WireGroup {
    #[serde(default, deserialize_with = "lenient_conditions")]
    conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operator: Option<Value>,
    #[serde(default, rename = "logicalOperator", skip_serializing_if = "Option::is_none")]
    logical_operator: Option<Value>,
}

impl From<WireGroup> for ConditionGroup {
    fn from(wire: WireGroup) -> Self {
        let combinator = Combinator::from_json(wire.logical_operator.as_ref())
            .or_else(|| Combinator::from_json(wire.operator.as_ref()))
            .unwrap_or_default();
        Self {
            conditions: wire.conditions,
            combinator,
        }
    }
}

impl From<ConditionGroup> for WireGroup {
    fn from(group: ConditionGroup) -> Self {
        Self {
            conditions: group.conditions,
            operator: None,
            logical_operator: Some(Value::String(group.combinator.as_upper().to_string())),
        }
    }
}

/// A complete advanced filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default, deserialize_with = "lenient_groups")]
    pub groups: Vec<ConditionGroup>,
    #[serde(default, rename = "groupOperator", deserialize_with = "lenient_combinator")]
    pub group_operator: Combinator,
}

impl FilterSpec {
    pub fn new(groups: Vec<ConditionGroup>) -> Self {
        Self {
            groups,
            group_operator: Combinator::And,
        }
    }

    pub fn single(group: ConditionGroup) -> Self {
        Self::new(vec![group])
    }

    pub fn with_group_operator(mut self, combinator: Combinator) -> Self {
        self.group_operator = combinator;
        self
    }

    /// True when at least one group carries a condition.
    pub fn has_conditions(&self) -> bool {
        self.groups.iter().any(|g| !g.conditions.is_empty())
    }

    /// True when some record could be filtered out. An empty group is
    /// vacuously true, so under OR it lets every record through.
    pub fn constrains_records(&self) -> bool {
        self.has_conditions()
            && !(self.group_operator == Combinator::Or
                && self.groups.iter().any(ConditionGroup::is_empty))
    }

    /// Normalize an arbitrary JSON value. Never fails: any shape that is not
    /// an object is the identity filter.
    pub fn from_json_value(value: Value) -> FilterSpec {
        match value {
            Value::Object(_) => FilterSpec::deserialize(&value).unwrap_or_default(),
            _ => FilterSpec::default(),
        }
    }

    /// Parse a JSON document. `null` means "no filter".
    pub fn from_json_str(input: &str) -> StaffingResult<Option<FilterSpec>> {
        let value: Value = serde_json::from_str(input).map_err(|e| InputError::InvalidJson {
            reason: e.to_string(),
        })?;
        Ok(match value {
            Value::Null => None,
            other => Some(FilterSpec::from_json_value(other)),
        })
    }
}

// ============================================================================
// LENIENT DESERIALIZERS
// ============================================================================

fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn text_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_conditions<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Condition>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .iter()
            .map(|item| Condition::deserialize(item).unwrap_or_else(|_| Condition::malformed(item)))
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_groups<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<ConditionGroup>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .iter()
            .map(|item| ConditionGroup::deserialize(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_combinator<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Combinator, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(Combinator::from_json(Some(&value)).unwrap_or_default())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(value: Value) -> FilterSpec {
        FilterSpec::from_json_value(value)
    }

    #[test]
    fn test_operator_kind_round_trips_wire_names() {
        for op in OperatorKind::ALL {
            assert_eq!(op.as_str().parse::<OperatorKind>(), Ok(op));
        }
        assert_eq!(" Starts_With ".parse::<OperatorKind>(), Ok(OperatorKind::StartsWith));
        assert!("between".parse::<OperatorKind>().is_err());
    }

    #[test]
    fn test_takes_value() {
        assert!(OperatorKind::Contains.takes_value());
        assert!(!OperatorKind::IsEmpty.takes_value());
        assert!(!OperatorKind::IsNotEmpty.takes_value());
    }

    #[test]
    fn test_combinator_parses_any_case() {
        assert_eq!("and".parse::<Combinator>(), Ok(Combinator::And));
        assert_eq!("OR".parse::<Combinator>(), Ok(Combinator::Or));
        assert_eq!("Or".parse::<Combinator>(), Ok(Combinator::Or));
        assert!("xor".parse::<Combinator>().is_err());
    }

    #[test]
    fn test_group_defaults_to_and() {
        let parsed = spec(json!({"groups": [{"conditions": []}]}));
        assert_eq!(parsed.groups[0].combinator, Combinator::And);
        assert_eq!(parsed.group_operator, Combinator::And);
    }

    #[test]
    fn test_group_accepts_legacy_operator_key() {
        let parsed = spec(json!({"groups": [{"operator": "or", "conditions": []}]}));
        assert_eq!(parsed.groups[0].combinator, Combinator::Or);
    }

    #[test]
    fn test_logical_operator_wins_over_operator() {
        let parsed = spec(json!({
            "groups": [{"operator": "or", "logicalOperator": "AND", "conditions": []}]
        }));
        assert_eq!(parsed.groups[0].combinator, Combinator::And);
    }

    #[test]
    fn test_unusable_logical_operator_falls_back_to_operator() {
        let parsed = spec(json!({
            "groups": [{"operator": "or", "logicalOperator": "maybe", "conditions": []}]
        }));
        assert_eq!(parsed.groups[0].combinator, Combinator::Or);
    }

    #[test]
    fn test_group_operator_is_read() {
        let parsed = spec(json!({"groupOperator": "or", "groups": []}));
        assert_eq!(parsed.group_operator, Combinator::Or);

        let parsed = spec(json!({"groupOperator": 7, "groups": []}));
        assert_eq!(parsed.group_operator, Combinator::And);
    }

    #[test]
    fn test_unknown_operator_is_kept_raw() {
        let parsed = spec(json!({
            "groups": [{"conditions": [{"field": "x", "operator": "between", "value": "1"}]}]
        }));
        assert_eq!(
            parsed.groups[0].conditions[0].operator,
            ConditionOperator::Unrecognized("between".to_string())
        );
    }

    #[test]
    fn test_non_string_value_becomes_none() {
        let parsed = spec(json!({
            "groups": [{"conditions": [
                {"field": "contact_id", "operator": "equals", "value": 5},
                {"field": "email", "operator": "is_empty"}
            ]}]
        }));
        assert_eq!(parsed.groups[0].conditions[0].value, None);
        assert_eq!(parsed.groups[0].conditions[1].value, None);
    }

    #[test]
    fn test_builder_ids_are_ignored() {
        let parsed = spec(json!({
            "groups": [{
                "id": 1,
                "logicalOperator": "OR",
                "conditions": [{"id": 2, "field": "first_name", "operator": "starts_with", "value": "J"}]
            }],
            "groupOperator": "AND"
        }));
        assert_eq!(
            parsed.groups[0].conditions[0],
            Condition::new("first_name", OperatorKind::StartsWith, "J")
        );
        assert_eq!(parsed.groups[0].combinator, Combinator::Or);
    }

    #[test]
    fn test_malformed_shapes_are_identity() {
        assert!(!spec(json!({"groups": "nope"})).has_conditions());
        assert!(!spec(json!({"groups": {"a": 1}})).has_conditions());
        assert!(!spec(json!([1, 2, 3])).has_conditions());
        assert!(!spec(json!("text")).has_conditions());
        assert!(!spec(json!({"groups": [{"conditions": "x"}]})).has_conditions());
    }

    #[test]
    fn test_non_object_group_becomes_empty_group() {
        let parsed = spec(json!({
            "groups": [3, {"conditions": [{"field": "a", "operator": "is_empty"}]}]
        }));
        assert_eq!(parsed.groups.len(), 2);
        assert!(parsed.groups[0].is_empty());
        assert_eq!(parsed.groups[1].conditions.len(), 1);
    }

    #[test]
    fn test_non_object_condition_is_unmatchable_placeholder() {
        let parsed = spec(json!({"groups": [{"conditions": ["oops"]}]}));
        let condition = &parsed.groups[0].conditions[0];
        assert!(condition.field.is_empty());
        assert_eq!(condition.operator.known(), None);
        assert!(parsed.has_conditions());
    }

    #[test]
    fn test_constrains_records() {
        let active = ConditionGroup::all(vec![Condition::unary("email", OperatorKind::IsEmpty)]);
        let padded = FilterSpec::new(vec![active.clone(), ConditionGroup::default()]);

        assert!(!FilterSpec::default().constrains_records());
        assert!(FilterSpec::single(active).constrains_records());
        assert!(padded.constrains_records());
        assert!(!padded.with_group_operator(Combinator::Or).constrains_records());
    }

    #[test]
    fn test_from_json_str() {
        assert_eq!(FilterSpec::from_json_str("null").expect("parse"), None);
        assert_eq!(
            FilterSpec::from_json_str("{}").expect("parse"),
            Some(FilterSpec::default())
        );
        assert!(FilterSpec::from_json_str("{").is_err());
    }

    #[test]
    fn test_serializes_in_builder_shape() {
        let filter = FilterSpec::single(ConditionGroup::any(vec![Condition::new(
            "status",
            OperatorKind::Equals,
            "active",
        )]))
        .with_group_operator(Combinator::Or);

        let value = serde_json::to_value(&filter).expect("serialize");
        assert_eq!(
            value,
            json!({
                "groups": [{
                    "conditions": [{"field": "status", "operator": "equals", "value": "active"}],
                    "logicalOperator": "OR"
                }],
                "groupOperator": "OR"
            })
        );

        let back: FilterSpec = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, filter);
    }
}
