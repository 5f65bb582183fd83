use crate::support::{load_almanac_or_exit, print_json, stage_label, yes_no};
use serde_json::json;
use std::path::PathBuf;

pub fn run(input: PathBuf, json_output: bool) {
    let almanac = load_almanac_or_exit(&input);
    let pipeline = &almanac.pipeline;

    let stages: Vec<_> = pipeline
        .stages()
        .iter()
        .enumerate()
        .map(|(idx, stage)| {
            let overlap = stage
                .first_overlap()
                .map(|(a, b)| vec![a.to_string(), b.to_string()]);
            (stage_label(stage, idx), stage.len(), overlap)
        })
        .collect();
    let chain_breaks = pipeline.chain_breaks();
    let overlaps_ok = stages.iter().all(|(_, _, overlap)| overlap.is_none());
    let chain_ok = chain_breaks.is_empty();
    let ok = overlaps_ok && chain_ok;

    if json_output {
        let stage_rows: Vec<_> = stages
            .iter()
            .map(|(name, ranges, overlap)| {
                json!({ "stage": name, "range_count": ranges, "overlap": overlap })
            })
            .collect();
        print_json(&json!({
            "input": input.display().to_string(),
            "seed_count": almanac.seeds.len(),
            "stage_count": pipeline.len(),
            "stages": stage_rows,
            "chain_breaks": chain_breaks,
            "ok": ok,
        }));
    } else {
        println!("almanac check {}", input.display());
        println!("  Seeds: {}", almanac.seeds.len());
        for (name, ranges, overlap) in &stages {
            match overlap {
                Some(pair) => println!(
                    "  {name}: {ranges} range(s), overlap {} / {}",
                    pair[0], pair[1]
                ),
                None => println!("  {name}: {ranges} range(s)"),
            }
        }
        println!("  Disjoint ranges: {}", yes_no(overlaps_ok));
        println!("  Chained stages: {}", yes_no(chain_ok));
        for brk in &chain_breaks {
            println!(
                "    - stage {} produces {} but the next stage consumes {}",
                brk.stage, brk.produces, brk.next_consumes
            );
        }
    }

    if !ok {
        std::process::exit(1);
    }
}
