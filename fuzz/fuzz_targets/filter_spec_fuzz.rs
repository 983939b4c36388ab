//! Fuzz target for filter specification input
//!
//! Feeds arbitrary bytes through the JSON boundary and then every consumer of
//! the resulting spec. Malformed input must come back as an error or as a
//! normalized spec, never as a panic.
//!
//! Run with: cargo +nightly fuzz run filter_spec_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use staffing_core::{FilterSpec, Record};
use staffing_filter::{
    apply_advanced_filters, describe_filter, is_filter_empty, FieldCatalog, NO_FILTERS_APPLIED,
};

fn contacts() -> Vec<Record> {
    vec![
        Record::new()
            .with("first_name", "John")
            .with("email", "john@example.com")
            .with("status", "active"),
        Record::new()
            .with("first_name", "Alice")
            .with("email", Option::<&str>::None)
            .with("job_title", ""),
    ]
}

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(spec) = FilterSpec::from_json_str(input) else {
        return;
    };

    let records = contacts();
    let kept = apply_advanced_filters(&records, spec.as_ref());
    assert!(kept.len() <= records.len());

    let description = describe_filter(spec.as_ref());
    if is_filter_empty(spec.as_ref()) {
        assert_eq!(kept, records);
        assert_eq!(description, NO_FILTERS_APPLIED);
    }

    if let Some(spec) = &spec {
        let _ = FieldCatalog::contacts().validate(spec);
    }
});
