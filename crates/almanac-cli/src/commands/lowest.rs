use crate::cli::SeedLayoutArg;
use crate::config::Config;
use crate::support::{guard_overlaps_or_exit, load_almanac_or_exit, print_json};
use almanac_kernel::SeedLayout;
use serde_json::json;
use std::path::PathBuf;

pub struct Args {
    pub input: PathBuf,
    pub layout: Option<SeedLayoutArg>,
    pub parallel: bool,
    pub json: bool,
    pub config: Config,
}

pub fn run(args: Args) {
    let layout = args
        .layout
        .map(SeedLayout::from)
        .unwrap_or(args.config.seed_layout);
    let parallel = args.parallel || args.config.parallel;

    let almanac = load_almanac_or_exit(&args.input);
    guard_overlaps_or_exit(&almanac, args.config.allow_overlaps);

    let result = if parallel {
        almanac.par_minimum_routed_value_with(layout)
    } else {
        almanac.minimum_routed_value_with(layout)
    };
    let minimum = result.unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    let category = almanac
        .pipeline
        .stages()
        .last()
        .and_then(|stage| stage.name())
        .map(|name| name.destination.clone());

    if args.json {
        print_json(&json!({
            "input": args.input.display().to_string(),
            "seed_layout": layout.to_string(),
            "parallel": parallel,
            "seed_count": almanac.seeds.len(),
            "stage_count": almanac.pipeline.len(),
            "category": category,
            "minimum": minimum,
        }));
    } else {
        println!("almanac lowest {} --layout {layout}", args.input.display());
        println!("  Seeds: {}", almanac.seeds.len());
        println!("  Stages: {}", almanac.pipeline.len());
        println!(
            "  Lowest {}: {minimum}",
            category.as_deref().unwrap_or("routed value")
        );
    }
}
