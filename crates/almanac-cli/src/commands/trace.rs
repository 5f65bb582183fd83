use crate::config::Config;
use crate::support::{guard_overlaps_or_exit, load_almanac_or_exit, print_json, stage_label};
use almanac_kernel::Value;
use serde_json::json;
use std::path::PathBuf;

pub fn run(input: PathBuf, seed: Value, config: &Config, json_output: bool) {
    let almanac = load_almanac_or_exit(&input);
    guard_overlaps_or_exit(&almanac, config.allow_overlaps);

    let trace = almanac.pipeline.trace(seed);
    let labels: Vec<String> = almanac
        .pipeline
        .stages()
        .iter()
        .enumerate()
        .map(|(idx, stage)| stage_label(stage, idx))
        .collect();
    let routed = trace.last().copied().unwrap_or(seed);

    if json_output {
        let steps: Vec<_> = labels
            .iter()
            .zip(&trace[1..])
            .map(|(stage, value)| json!({ "stage": stage, "value": value }))
            .collect();
        print_json(&json!({
            "input": input.display().to_string(),
            "seed": seed,
            "steps": steps,
            "routed": routed,
        }));
    } else {
        println!("almanac trace {} --seed {seed}", input.display());
        for (stage, value) in labels.iter().zip(&trace[1..]) {
            println!("  {stage}: {value}");
        }
        println!("  Routed: {routed}");
    }
}
