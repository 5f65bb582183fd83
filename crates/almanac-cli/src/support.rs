use crate::config::Config;
use crate::parse::parse_almanac;
use almanac_kernel::{Almanac, MappingTable};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_LOG_FILTER: &str = "warn";

pub fn load_config_or_exit(path: Option<&Path>) -> Config {
    match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

/// Stderr logging. `RUST_LOG` wins over the config filter.
pub fn init_logging(config_filter: Option<&str>, log_span_durations: bool) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .or_else(|| config_filter.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    let fmt = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_span_events(if log_span_durations {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        })
        .with_filter(env_filter);
    if let Err(e) = tracing_subscriber::registry().with(fmt).try_init() {
        eprintln!("warning: logging disabled: {e}");
    }
}

pub fn load_almanac_or_exit(path: &Path) -> Almanac {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: failed to read {}: {e}", path.display());
        std::process::exit(1);
    });
    let almanac = parse_almanac(&text).unwrap_or_else(|e| {
        eprintln!("error: failed to parse {}: {e}", path.display());
        std::process::exit(1);
    });

    for brk in almanac.pipeline.chain_breaks() {
        tracing::warn!(
            stage = brk.stage,
            produces = %brk.produces,
            next_consumes = %brk.next_consumes,
            "stage chain is broken"
        );
    }
    almanac
}

/// Refuse tables with overlapping ranges unless the config allows them.
pub fn guard_overlaps_or_exit(almanac: &Almanac, allow_overlaps: bool) {
    for (idx, stage) in almanac.pipeline.stages().iter().enumerate() {
        let Some((a, b)) = stage.first_overlap() else {
            continue;
        };
        let label = stage_label(stage, idx);
        if allow_overlaps {
            tracing::warn!(stage = %label, first = %a, second = %b, "overlapping ranges");
        } else {
            eprintln!("error: {label}: ranges `{a}` and `{b}` overlap");
            std::process::exit(1);
        }
    }
}

pub fn stage_label(stage: &MappingTable, idx: usize) -> String {
    stage
        .name()
        .map(ToString::to_string)
        .unwrap_or_else(|| format!("stage {idx}"))
}

pub fn print_json(payload: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).expect("json serialization")
    );
}

pub fn yes_no(ok: bool) -> &'static str {
    if ok { "yes" } else { "no" }
}
