//! Advanced filter evaluation
//!
//! Evaluation is a pure function of the records and the filter.
//! Nothing here fails: a condition that cannot be evaluated (blank field,
//! unrecognised operator, missing value) simply does not match.

use staffing_core::{
    Combinator, Condition, ConditionGroup, ConditionOperator, FilterSpec, OperatorKind, Record,
};

/// True when the filter is absent or carries no conditions in any group.
pub fn is_filter_empty(spec: Option<&FilterSpec>) -> bool {
    spec.map_or(true, |s| !s.has_conditions())
}

/// Records that satisfy `spec`, in their original order.
///
/// An empty spec passes every record through.
pub fn apply_advanced_filters(records: &[Record], spec: Option<&FilterSpec>) -> Vec<Record> {
    select_matching(records, spec).into_iter().cloned().collect()
}

/// Borrowing form of [`apply_advanced_filters`].
pub fn select_matching<'a>(records: &'a [Record], spec: Option<&FilterSpec>) -> Vec<&'a Record> {
    let spec = match spec {
        Some(spec) if spec.has_conditions() => spec,
        _ => return records.iter().collect(),
    };

    let kept: Vec<&Record> = records
        .iter()
        .filter(|record| spec_matches(record, spec))
        .collect();

    tracing::trace!(
        kept = kept.len(),
        total = records.len(),
        groups = spec.groups.len(),
        "advanced filter applied"
    );
    kept
}

/// Evaluate a whole spec against one record.
pub fn matches_record(record: &Record, spec: &FilterSpec) -> bool {
    !spec.has_conditions() || spec_matches(record, spec)
}

/// [`matches_record`] for a spec already known to carry conditions.
pub(crate) fn spec_matches(record: &Record, spec: &FilterSpec) -> bool {
    combine(spec.group_operator, spec.groups.iter(), |group| {
        group_matches(group, record)
    })
}

/// Evaluate one group. A group without conditions constrains nothing.
pub fn group_matches(group: &ConditionGroup, record: &Record) -> bool {
    if group.conditions.is_empty() {
        return true;
    }
    combine(group.combinator, group.conditions.iter(), |condition| {
        evaluate_condition(condition, record)
    })
}

fn combine<T, I, F>(combinator: Combinator, mut items: I, mut test: F) -> bool
where
    I: Iterator<Item = T>,
    F: FnMut(T) -> bool,
{
    match combinator {
        Combinator::And => items.all(&mut test),
        Combinator::Or => items.any(&mut test),
    }
}

/// Evaluate a single condition against a record.
pub fn evaluate_condition(condition: &Condition, record: &Record) -> bool {
    let field = condition.field.as_str();
    if field.trim().is_empty() {
        tracing::debug!(operator = %condition.operator, "condition has no field, not matching");
        return false;
    }

    let op = match &condition.operator {
        ConditionOperator::Known(op) => *op,
        ConditionOperator::Unrecognized(raw) => {
            tracing::debug!(field, operator = %raw, "unrecognized filter operator, not matching");
            return false;
        }
    };

    let value = condition.value.as_deref();
    match op {
        OperatorKind::IsEmpty => is_blank(record, field),
        OperatorKind::IsNotEmpty => !is_blank(record, field),
        OperatorKind::Equals => compare(record, field, value, |a, e| a == e),
        OperatorKind::NotEquals => compare(record, field, value, |a, e| a != e),
        OperatorKind::Contains => compare(record, field, value, |a, e| a.contains(e)),
        // An empty field does not satisfy `not_contains`, unlike `not_equals`.
        OperatorKind::NotContains => {
            !record.is_absent(field) && compare(record, field, value, |a, e| !a.contains(e))
        }
        OperatorKind::StartsWith => compare(record, field, value, |a, e| a.starts_with(e)),
        OperatorKind::EndsWith => compare(record, field, value, |a, e| a.ends_with(e)),
    }
}

fn is_blank(record: &Record, field: &str) -> bool {
    record.get(field).map_or(true, |value| value.is_blank())
}

/// Case-insensitive comparison. Missing and null fields read as `""`; a
/// missing condition value never satisfies a comparison.
fn compare<F>(record: &Record, field: &str, expected: Option<&str>, test: F) -> bool
where
    F: Fn(&str, &str) -> bool,
{
    let Some(expected) = expected else {
        return false;
    };
    let actual = record.text(field).to_lowercase();
    test(&actual, &expected.to_lowercase())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use staffing_core::FieldValue;

    fn contact() -> Record {
        Record::new()
            .with("contact_id", 1i64)
            .with("first_name", "John")
            .with("email", "John@Example.com")
            .with("remarks", "   ")
            .with("phone", FieldValue::Null)
            .with("years", 7i64)
    }

    fn check(field: &str, op: OperatorKind, value: &str) -> bool {
        evaluate_condition(&Condition::new(field, op, value), &contact())
    }

    #[test]
    fn test_equals_ignores_case() {
        assert!(check("first_name", OperatorKind::Equals, "JOHN"));
        assert!(!check("first_name", OperatorKind::Equals, "Jon"));
    }

    #[test]
    fn test_substring_operators() {
        assert!(check("email", OperatorKind::Contains, "example"));
        assert!(check("email", OperatorKind::StartsWith, "john@"));
        assert!(check("email", OperatorKind::EndsWith, ".COM"));
        assert!(check("email", OperatorKind::NotContains, "test"));
        assert!(!check("email", OperatorKind::NotContains, "EXAMPLE"));
    }

    #[test]
    fn test_numbers_compare_as_text() {
        assert!(check("years", OperatorKind::Equals, "7"));
        assert!(check("contact_id", OperatorKind::StartsWith, "1"));
    }

    #[test]
    fn test_is_empty_covers_null_missing_and_whitespace() {
        assert!(check("phone", OperatorKind::IsEmpty, ""));
        assert!(check("missing", OperatorKind::IsEmpty, ""));
        assert!(check("remarks", OperatorKind::IsEmpty, ""));
        assert!(!check("first_name", OperatorKind::IsEmpty, ""));
        assert!(check("first_name", OperatorKind::IsNotEmpty, ""));
        assert!(!check("phone", OperatorKind::IsNotEmpty, ""));
    }

    #[test]
    fn test_absent_field_reads_as_empty_string() {
        for field in ["phone", "missing"] {
            assert!(check(field, OperatorKind::Equals, ""), "{} should equal \"\"", field);
            assert!(check(field, OperatorKind::NotEquals, "x"), "{} should differ from x", field);
            assert!(check(field, OperatorKind::StartsWith, ""));
            assert!(!check(field, OperatorKind::Contains, "x"));
            assert!(!check(field, OperatorKind::EndsWith, "x"));
        }
    }

    #[test]
    fn test_not_contains_excludes_empty_fields() {
        assert!(!check("phone", OperatorKind::NotContains, "x"));
        assert!(!check("missing", OperatorKind::NotContains, "x"));
        assert!(check("remarks", OperatorKind::NotContains, "x"));
        assert!(check("first_name", OperatorKind::NotContains, "x"));
    }

    #[test]
    fn test_missing_value_never_satisfies_comparisons() {
        let condition = Condition {
            field: "first_name".to_string(),
            operator: OperatorKind::NotEquals.into(),
            value: None,
        };
        assert!(!evaluate_condition(&condition, &contact()));
    }

    #[test]
    fn test_unrecognized_operator_and_blank_field_fail_closed() {
        let unknown = Condition {
            field: "first_name".to_string(),
            operator: ConditionOperator::Unrecognized("sounds_like".to_string()),
            value: Some("jon".to_string()),
        };
        assert!(!evaluate_condition(&unknown, &contact()));

        let blank = Condition::unary("  ", OperatorKind::IsEmpty);
        assert!(!evaluate_condition(&blank, &contact()));
    }

    #[test]
    fn test_empty_value_prefix_matches_present_fields() {
        assert!(check("first_name", OperatorKind::StartsWith, ""));
        assert!(check("first_name", OperatorKind::Contains, ""));
    }

    #[test]
    fn test_empty_group_is_neutral() {
        assert!(group_matches(&ConditionGroup::any(vec![]), &contact()));
        assert!(group_matches(&ConditionGroup::all(vec![]), &contact()));
    }

    #[test]
    fn test_or_spec_with_an_empty_group_matches_everything() {
        let spec = FilterSpec::new(vec![
            ConditionGroup::all(vec![Condition::new("first_name", OperatorKind::Equals, "Jane")]),
            ConditionGroup::all(vec![]),
        ])
        .with_group_operator(Combinator::Or);
        assert!(matches_record(&contact(), &spec));
        assert!(!spec_matches(&contact(), &FilterSpec::single(spec.groups[0].clone())));
    }

    #[test]
    fn test_matches_record_with_no_conditions_under_or() {
        let spec = FilterSpec::new(vec![]).with_group_operator(Combinator::Or);
        assert!(matches_record(&contact(), &spec));
    }

    #[test]
    fn test_is_filter_empty() {
        assert!(is_filter_empty(None));
        assert!(is_filter_empty(Some(&FilterSpec::default())));
        assert!(is_filter_empty(Some(&FilterSpec::single(ConditionGroup::all(vec![])))));
        assert!(!is_filter_empty(Some(&FilterSpec::single(ConditionGroup::all(vec![
            Condition::new("name", OperatorKind::Contains, "test"),
        ])))));
    }
}
