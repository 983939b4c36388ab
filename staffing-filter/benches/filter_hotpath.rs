use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;
use staffing_filter::{
    apply_advanced_filters, apply_filters, describe_filter, FilterSpec, QuickFilter,
    SearchDefaults, Timeframe,
};
use staffing_test_utils::fixtures::synthetic_contacts;
use std::hint::black_box;

fn builder_spec() -> FilterSpec {
    FilterSpec::from_json_value(json!({
        "groupOperator": "or",
        "groups": [
            {"logicalOperator": "AND", "conditions": [
                {"field": "status", "operator": "equals", "value": "Active"},
                {"field": "job_title", "operator": "starts_with", "value": "java"}
            ]},
            {"logicalOperator": "OR", "conditions": [
                {"field": "email", "operator": "is_empty", "value": ""},
                {"field": "last_name", "operator": "contains", "value": "surname4"}
            ]}
        ]
    }))
}

fn bench_advanced_filter(c: &mut Criterion) {
    let contacts = synthetic_contacts(5_000);
    let spec = builder_spec();

    c.bench_function("filter/advanced_5k", |b| {
        b.iter(|| {
            let kept = apply_advanced_filters(black_box(&contacts), Some(&spec));
            black_box(kept.len());
        });
    });

    c.bench_function("filter/describe", |b| {
        b.iter(|| black_box(describe_filter(Some(black_box(&spec)))));
    });
}

fn bench_list_view(c: &mut Criterion) {
    let contacts = synthetic_contacts(5_000);
    let spec = builder_spec();
    let defaults = SearchDefaults::default();
    let quick = QuickFilter::from_defaults(&defaults)
        .with_term("jane")
        .with_timeframe(Timeframe::All);
    let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).single().expect("valid instant");

    c.bench_function("filter/quick_then_advanced_5k", |b| {
        b.iter(|| {
            let kept = apply_filters(black_box(&contacts), &quick, Some(&spec), now);
            black_box(kept.len());
        });
    });
}

criterion_group!(benches, bench_advanced_filter, bench_list_view);
criterion_main!(benches);
