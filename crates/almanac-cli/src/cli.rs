use almanac_kernel::SeedLayout;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "almanac",
    about = "Almanac: route seeds through stage maps and report the lowest result",
    version
)]
pub struct Cli {
    /// TOML config file (defaults to ./almanac.toml when present)
    #[arg(long, env = "ALMANAC_CONFIG", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log span close events with their durations
    #[arg(long, global = true)]
    pub log_span_durations: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the lowest routed value over all seeds
    Lowest {
        /// Path to the almanac text
        input: PathBuf,

        /// Seed layout (overrides config)
        #[arg(long, value_enum)]
        layout: Option<SeedLayoutArg>,

        /// Route seeds on a worker pool
        #[arg(long)]
        parallel: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one seed's value after every stage
    Trace {
        /// Path to the almanac text
        input: PathBuf,

        /// Seed value to trace
        #[arg(long, allow_hyphen_values = true)]
        seed: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize stages and report overlapping ranges or broken chains
    Check {
        /// Path to the almanac text
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SeedLayoutArg {
    #[value(name = "values")]
    Values,
    #[value(name = "ranges")]
    Ranges,
}

impl From<SeedLayoutArg> for SeedLayout {
    fn from(arg: SeedLayoutArg) -> Self {
        match arg {
            SeedLayoutArg::Values => SeedLayout::Values,
            SeedLayoutArg::Ranges => SeedLayout::Ranges,
        }
    }
}
