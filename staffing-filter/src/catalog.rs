//! Field catalogue for the contact advanced filter builder
//!
//! The builder offers a fixed set of contact fields. Free-text fields allow
//! every operator; select fields (fixed option lists) only allow equality
//! and emptiness checks. The catalogue supplies display labels and lets a
//! caller check a spec before saving or sharing it. Evaluation never
//! consults it.

use crate::describe::field_label;
use serde::{Deserialize, Serialize};
use staffing_core::{ConditionOperator, FilterSpec, OperatorKind, ValidationError};
use std::fmt;

/// Operators offered for free-text fields.
pub const TEXT_OPERATORS: &[OperatorKind] = &OperatorKind::ALL;

/// Operators offered for select fields.
pub const SELECT_OPERATORS: &[OperatorKind] = &[
    OperatorKind::Equals,
    OperatorKind::NotEquals,
    OperatorKind::IsEmpty,
    OperatorKind::IsNotEmpty,
];

/// How the builder lets a user enter a value for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Select,
}

impl FieldKind {
    pub fn operators(&self) -> &'static [OperatorKind] {
        match self {
            FieldKind::Text => TEXT_OPERATORS,
            FieldKind::Select => SELECT_OPERATORS,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => f.write_str("text"),
            FieldKind::Select => f.write_str("select"),
        }
    }
}

/// One choice of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// A filterable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl FieldDefinition {
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: FieldKind::Text,
            options: Vec::new(),
        }
    }

    /// Select field from `(value, label)` pairs.
    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        options: &[(&str, &str)],
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: FieldKind::Select,
            options: options
                .iter()
                .map(|(value, label)| SelectOption {
                    value: value.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }

    pub fn allows(&self, op: OperatorKind) -> bool {
        self.kind.operators().contains(&op)
    }
}

/// Ordered set of filterable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCatalog {
    fields: Vec<FieldDefinition>,
}

impl FieldCatalog {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    /// Fields the contact list's advanced filter builder offers.
    pub fn contacts() -> Self {
        Self::new(vec![
            FieldDefinition::text("first_name", "First Name"),
            FieldDefinition::text("last_name", "Last Name"),
            FieldDefinition::text("email", "Email"),
            FieldDefinition::text("phone", "Phone"),
            FieldDefinition::select(
                "contact_type",
                "Contact Type",
                &[
                    ("it_candidate", "IT Candidate"),
                    ("healthcare_candidate", "Healthcare Candidate"),
                    ("vendor_client", "Vendor/Client"),
                    ("empanelment_contact", "Empanelment Contact"),
                    ("internal_india", "Internal India"),
                    ("internal_usa", "Internal USA"),
                ],
            ),
            FieldDefinition::select(
                "status",
                "Status",
                &[
                    ("Initial Contact", "Initial Contact"),
                    ("Spoke to candidate", "Spoke to candidate"),
                    ("Resume needs to be prepared", "Resume needs to be prepared"),
                    ("Resume prepared and sent for review", "Resume prepared"),
                    ("Assigned to Recruiter", "Assigned to Recruiter"),
                    ("Recruiter started marketing", "Recruiter started marketing"),
                    ("Placed into Job", "Placed into Job"),
                    ("Candidate declined marketing", "Candidate declined"),
                    ("Candidate on vacation", "On vacation"),
                    ("Candidate not responding", "Not responding"),
                    ("Exclusive roles only", "Exclusive roles"),
                ],
            ),
            FieldDefinition::select(
                "visa_status",
                "Visa Status",
                &[
                    ("F1", "F1"),
                    ("OPT", "OPT"),
                    ("STEM OPT", "STEM OPT"),
                    ("H1B", "H1B"),
                    ("H4", "H4"),
                    ("H4 EAD", "H4 EAD"),
                    ("GC EAD", "GC EAD"),
                    ("GC", "GC"),
                    ("USC", "USC"),
                ],
            ),
            FieldDefinition::text("job_title", "Job Title"),
            FieldDefinition::select(
                "years_experience",
                "Years of Experience",
                &[
                    ("0", "0"),
                    ("1 to 3", "1 to 3"),
                    ("4 to 6", "4 to 6"),
                    ("7 to 9", "7 to 9"),
                    ("10 -15", "10 to 15"),
                    ("15+", "15+"),
                ],
            ),
            FieldDefinition::select("country", "Country", &[("USA", "USA"), ("India", "India")]),
            FieldDefinition::text("state", "State"),
            FieldDefinition::text("city", "City"),
            FieldDefinition::select(
                "referral_source",
                "Referral Source",
                &[("FB", "Facebook"), ("Google", "Google"), ("Friend", "Friend")],
            ),
            FieldDefinition::text("remarks", "Remarks"),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Catalogue label, or the title-cased field name for unknown fields.
    pub fn label_for(&self, name: &str) -> String {
        self.get(name)
            .map(|f| f.label.clone())
            .unwrap_or_else(|| field_label(name))
    }

    /// Operators the builder offers for `name`. Unknown fields are treated
    /// as free text.
    pub fn operators_for(&self, name: &str) -> &'static [OperatorKind] {
        self.get(name)
            .map(|f| f.kind.operators())
            .unwrap_or(TEXT_OPERATORS)
    }

    /// Check that every condition names a catalogued field with an operator
    /// that field allows. Reports the first problem found.
    pub fn validate(&self, spec: &FilterSpec) -> Result<(), ValidationError> {
        for (group_index, group) in spec.groups.iter().enumerate() {
            for (condition_index, condition) in group.conditions.iter().enumerate() {
                if condition.field.trim().is_empty() {
                    return Err(ValidationError::BlankField {
                        group: group_index + 1,
                        condition: condition_index + 1,
                    });
                }

                let definition =
                    self.get(&condition.field)
                        .ok_or_else(|| ValidationError::UnknownField {
                            field: condition.field.clone(),
                        })?;

                let op = match &condition.operator {
                    ConditionOperator::Known(op) => *op,
                    ConditionOperator::Unrecognized(raw) => {
                        return Err(ValidationError::UnrecognizedOperator {
                            field: condition.field.clone(),
                            operator: raw.clone(),
                        });
                    }
                };

                if !definition.allows(op) {
                    return Err(ValidationError::OperatorNotAllowed {
                        field: condition.field.clone(),
                        operator: op.to_string(),
                        kind: definition.kind.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
