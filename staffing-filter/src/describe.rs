//! Human-readable descriptions of a filter specification
//!
//! Output is display text for the "filter active" banner. Nothing parses
//! it back, so the format favours readability over precision.

use crate::catalog::FieldCatalog;
use staffing_core::{Condition, ConditionOperator, FilterSpec};

/// Text shown when the filter cannot exclude any record.
pub const NO_FILTERS_APPLIED: &str = "No filters applied";

/// Describe `spec`, labelling fields by title-casing their names.
pub fn describe_filter(spec: Option<&FilterSpec>) -> String {
    describe_with(spec, field_label)
}

/// Describe `spec`, preferring the catalogue's labels for known fields.
pub fn describe_filter_with(spec: Option<&FilterSpec>, catalog: &FieldCatalog) -> String {
    describe_with(spec, |field| catalog.label_for(field))
}

fn describe_with<L>(spec: Option<&FilterSpec>, label: L) -> String
where
    L: Fn(&str) -> String,
{
    let spec = match spec {
        Some(spec) if spec.constrains_records() => spec,
        _ => return NO_FILTERS_APPLIED.to_string(),
    };

    let groups: Vec<_> = spec.groups.iter().filter(|g| !g.is_empty()).collect();
    let parenthesize = groups.len() > 1;
    let group_joiner = format!(" {} ", spec.group_operator.word());

    let mut output = String::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            output.push_str(&group_joiner);
        }

        let wrap = parenthesize && group.conditions.len() > 1;
        if wrap {
            output.push('(');
        }
        let condition_joiner = format!(" {} ", group.combinator.word());
        for (j, condition) in group.conditions.iter().enumerate() {
            if j > 0 {
                output.push_str(&condition_joiner);
            }
            output.push_str(&describe_condition_with(condition, &label));
        }
        if wrap {
            output.push(')');
        }
    }
    output
}

/// Describe a single condition, e.g. `First Name contains john`.
pub fn describe_condition(condition: &Condition) -> String {
    describe_condition_with(condition, &field_label)
}

fn describe_condition_with<L>(condition: &Condition, label: &L) -> String
where
    L: Fn(&str) -> String,
{
    let label = label(&condition.field);
    let value = condition.value.as_deref().unwrap_or("");

    let (phrase, value) = match &condition.operator {
        ConditionOperator::Known(op) if !op.takes_value() => (op.phrase().to_string(), ""),
        ConditionOperator::Known(op) => (op.phrase().to_string(), value),
        ConditionOperator::Unrecognized(raw) => (raw.replace('_', " "), value),
    };

    [label.as_str(), phrase.as_str(), value]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn a machine field name into a label: `job_title` → `Job Title`.
///
/// Underscores become spaces and the first letter of every word is
/// uppercased. The rest of each word is left as written.
pub fn field_label(field: &str) -> String {
    let mut label = String::with_capacity(field.len());
    let mut at_word_start = true;
    for ch in field.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if at_word_start && ch.is_alphabetic() {
            label.extend(ch.to_uppercase());
        } else {
            label.push(ch);
        }
        at_word_start = !ch.is_alphanumeric();
    }
    label
}

// =============================================================================
// TESTS
// =============================================================================
