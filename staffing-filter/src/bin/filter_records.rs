//! Filter Records - run a saved advanced filter over exported list records
//!
//! Usage: filter_records <records.json> [filter.json] [--catalog] [--search <term>] [--timeframe all|week|month]
//!
//! The filter description goes to stderr, the kept records to stdout as
//! pretty JSON. Set RUST_LOG=debug to see skipped conditions.

use chrono::Utc;
use staffing_core::{records_from_json_str, FilterSpec, InputError, SearchDefaults, StaffingResult};
use staffing_filter::{
    apply_filters, describe_filter, describe_filter_with, FieldCatalog, QuickFilter, Timeframe,
};
use std::fs;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: filter_records <records.json> [filter.json] [--catalog] [--search <term>] [--timeframe all|week|month]";

#[derive(Debug, Default)]
struct Options {
    records_path: String,
    filter_path: Option<String>,
    catalog_labels: bool,
    term: Option<String>,
    timeframe: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&options) {
        tracing::error!(error = %e, "filter_records failed");
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut positional = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--catalog" => options.catalog_labels = true,
            "--search" => {
                options.term = Some(iter.next().ok_or("--search needs a value")?.clone());
            }
            "--timeframe" => {
                options.timeframe = Some(iter.next().ok_or("--timeframe needs a value")?.clone());
            }
            "-h" | "--help" => return Err(String::new()),
            flag if flag.starts_with("--") => return Err(format!("Unknown option: {}", flag)),
            path => positional.push(path.to_string()),
        }
    }

    let mut positional = positional.into_iter();
    options.records_path = positional.next().ok_or("Missing records file")?;
    options.filter_path = positional.next();
    if let Some(extra) = positional.next() {
        return Err(format!("Unexpected argument: {}", extra));
    }
    Ok(options)
}

fn read(path: &str) -> StaffingResult<String> {
    fs::read_to_string(path).map_err(|e| {
        InputError::Io {
            path: path.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn run(options: &Options) -> StaffingResult<()> {
    let defaults = SearchDefaults::from_env();
    defaults.validate()?;

    let records = records_from_json_str(&read(&options.records_path)?)?;
    let spec = match &options.filter_path {
        Some(path) => FilterSpec::from_json_str(&read(path)?)?,
        None => None,
    };

    let catalog = FieldCatalog::contacts();
    if let Some(spec) = &spec {
        if let Err(e) = catalog.validate(spec) {
            tracing::warn!(error = %e, "filter does not fit the contact field catalogue");
        }
    }

    let description = if options.catalog_labels {
        describe_filter_with(spec.as_ref(), &catalog)
    } else {
        describe_filter(spec.as_ref())
    };
    eprintln!("🔍 {}", description);

    let mut quick = QuickFilter::from_defaults(&defaults);
    if let Some(term) = &options.term {
        quick = quick.with_term(term.clone());
    }
    if let Some(key) = &options.timeframe {
        quick = quick.with_timeframe(Timeframe::from_key(key, &defaults));
    }

    let kept = apply_filters(&records, &quick, spec.as_ref(), Utc::now());
    tracing::info!(total = records.len(), kept = kept.len(), "filtered records");

    let output = serde_json::to_string_pretty(&kept).map_err(|e| InputError::InvalidJson {
        reason: e.to_string(),
    })?;
    println!("{}", output);
    Ok(())
}
