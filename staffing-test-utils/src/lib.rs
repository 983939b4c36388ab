//! Staffing CRM Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - Reference contact fixtures used across the filter suites
//! - Proptest generators for records and filter specifications
//! - Small assertions for comparing filter output

// Re-export core types for convenience
pub use staffing_core::{
    Combinator, Condition, ConditionGroup, ConditionOperator, FieldValue, FilterSpec,
    OperatorKind, Record,
};

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Fixed record sets with known filter outcomes.

    use super::*;

    fn contact(
        id: i64,
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
        status: &str,
        job_title: &str,
    ) -> Record {
        Record::new()
            .with("contact_id", id)
            .with("first_name", first_name)
            .with("last_name", last_name)
            .with("email", email)
            .with("status", status)
            .with("job_title", job_title)
    }

    /// The four-contact reference set.
    ///
    /// | id | name | email | status | job title |
    /// |---|---|---|---|---|
    /// | 1 | John Doe | john@example.com | active | Java Developer |
    /// | 2 | Jane Smith | jane@example.com | inactive | JavaScript Engineer |
    /// | 3 | Bob Johnson | bob@test.com | active | Python Developer |
    /// | 4 | Alice Williams | null | pending | (empty) |
    pub fn reference_contacts() -> Vec<Record> {
        vec![
            contact(1, "John", "Doe", Some("john@example.com"), "active", "Java Developer"),
            contact(2, "Jane", "Smith", Some("jane@example.com"), "inactive", "JavaScript Engineer"),
            contact(3, "Bob", "Johnson", Some("bob@test.com"), "active", "Python Developer"),
            contact(4, "Alice", "Williams", None, "pending", ""),
        ]
    }

    /// Single group holding one condition.
    pub fn one_condition(field: &str, op: OperatorKind, value: &str) -> FilterSpec {
        FilterSpec::single(ConditionGroup::all(vec![Condition::new(field, op, value)]))
    }

    /// `count` synthetic contacts for benchmarks.
    pub fn synthetic_contacts(count: usize) -> Vec<Record> {
        const FIRST: [&str; 6] = ["John", "Jane", "Bob", "Alice", "Priya", "Carlos"];
        const STATUS: [&str; 4] = ["active", "inactive", "pending", "Placed into Job"];
        const TITLES: [&str; 5] = [
            "Java Developer",
            "JavaScript Engineer",
            "Python Developer",
            "Registered Nurse",
            "",
        ];

        (0..count)
            .map(|i| {
                let email = if i % 7 == 0 {
                    None
                } else {
                    Some(format!("user{}@example.com", i))
                };
                Record::new()
                    .with("contact_id", i as i64)
                    .with("first_name", FIRST[i % FIRST.len()])
                    .with("last_name", format!("Surname{}", i % 97))
                    .with("email", email)
                    .with("status", STATUS[i % STATUS.len()])
                    .with("job_title", TITLES[i % TITLES.len()])
            })
            .collect()
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// `contact_id` of each record, in order. Records without a numeric id are
/// reported as -1.
pub fn contact_ids(records: &[Record]) -> Vec<i64> {
    records
        .iter()
        .map(|r| match r.get("contact_id") {
            Some(FieldValue::Number(n)) => n.as_i64().unwrap_or(-1),
            _ => -1,
        })
        .collect()
}

/// True when `subset` appears in `full` in the same relative order.
pub fn is_ordered_subsequence(subset: &[Record], full: &[Record]) -> bool {
    let mut remaining = full.iter();
    subset
        .iter()
        .all(|wanted| remaining.by_ref().any(|candidate| candidate == wanted))
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for records and filter specifications.

    use super::*;
    use proptest::prelude::*;

    /// Field names shared by generated records and conditions so that
    /// conditions actually hit populated fields.
    pub const FIELD_POOL: [&str; 6] = [
        "first_name",
        "last_name",
        "email",
        "status",
        "job_title",
        "city",
    ];

    pub fn arb_field_name() -> impl Strategy<Value = String> {
        prop::sample::select(FIELD_POOL.to_vec()).prop_map(|name| name.to_string())
    }

    /// Short mixed-case text from a small alphabet, so substring hits are common.
    pub fn arb_text() -> impl Strategy<Value = String> {
        "[abAB ]{0,5}"
    }

    pub fn arb_field_value() -> impl Strategy<Value = FieldValue> {
        prop_oneof![
            4 => arb_text().prop_map(FieldValue::Text),
            1 => (0i64..100).prop_map(FieldValue::from),
            1 => any::<bool>().prop_map(FieldValue::Bool),
            1 => Just(FieldValue::Null),
        ]
    }

    pub fn arb_record() -> impl Strategy<Value = Record> {
        prop::collection::vec((arb_field_name(), arb_field_value()), 0..6)
            .prop_map(|pairs| pairs.into_iter().collect::<Record>())
    }

    /// Records tagged with a `row` field holding their position, so equal
    /// records stay distinguishable in order checks.
    pub fn arb_records() -> impl Strategy<Value = Vec<Record>> {
        prop::collection::vec(arb_record(), 0..16).prop_map(|mut records| {
            for (i, record) in records.iter_mut().enumerate() {
                record.insert("row", i as i64);
            }
            records
        })
    }

    pub fn arb_operator_kind() -> impl Strategy<Value = OperatorKind> {
        prop::sample::select(OperatorKind::ALL.to_vec())
    }

    pub fn arb_combinator() -> impl Strategy<Value = Combinator> {
        prop_oneof![Just(Combinator::And), Just(Combinator::Or)]
    }

    pub fn arb_condition() -> impl Strategy<Value = Condition> {
        (arb_field_name(), arb_operator_kind(), arb_text())
            .prop_map(|(field, op, value)| Condition::new(field, op, value))
    }

    pub fn arb_group() -> impl Strategy<Value = ConditionGroup> {
        (arb_combinator(), prop::collection::vec(arb_condition(), 0..4))
            .prop_map(|(combinator, conditions)| ConditionGroup::new(combinator, conditions))
    }

    pub fn arb_filter_spec() -> impl Strategy<Value = FilterSpec> {
        (prop::collection::vec(arb_group(), 0..4), arb_combinator())
            .prop_map(|(groups, op)| FilterSpec::new(groups).with_group_operator(op))
    }

    /// Specs guaranteed to carry at least one condition.
    pub fn arb_active_filter_spec() -> impl Strategy<Value = FilterSpec> {
        (arb_filter_spec(), arb_condition()).prop_map(|(mut spec, condition)| {
            if !spec.has_conditions() {
                spec.groups.push(ConditionGroup::all(vec![condition]));
            }
            spec
        })
    }

    /// Specs that are structurally present but have no conditions.
    pub fn arb_identity_filter_spec() -> impl Strategy<Value = FilterSpec> {
        (prop::collection::vec(arb_combinator(), 0..4), arb_combinator()).prop_map(
            |(combinators, op)| {
                FilterSpec::new(
                    combinators
                        .into_iter()
                        .map(|c| ConditionGroup::new(c, Vec::new()))
                        .collect(),
                )
                .with_group_operator(op)
            },
        )
    }
}
