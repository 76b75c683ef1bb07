use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::GeneratorConfig;

/// Generate an oracle-checked test and timing harness for a limb-array
/// bigint library.
#[derive(Debug, Clone, Parser, Default)]
#[command(
    name = "bigint-testgen",
    version,
    about = "Bigint correctness and micro-benchmark harness generator"
)]
pub struct Cli {
    /// Optional TOML generator configuration.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed for the operand corpus. Overrides the configuration file.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Number of random operands appended to the boundary values.
    #[arg(long, value_name = "N")]
    pub random_count: Option<usize>,

    /// Minimum random operand length in hex digits.
    #[arg(long, value_name = "DIGITS")]
    pub min_digits: Option<usize>,

    /// Exclusive maximum random operand length in hex digits.
    #[arg(long, value_name = "DIGITS")]
    pub max_digits: Option<usize>,

    /// Path of the generated harness source.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write a JSON summary of the generated harness.
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// Regenerate and compare against the existing harness instead of
    /// writing. Requires a seed.
    #[arg(long)]
    pub check: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Cli {
    /// Applies command-line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut GeneratorConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(count) = self.random_count {
            config.corpus.random_count = count;
        }
        if let Some(min) = self.min_digits {
            config.corpus.min_digits = min;
        }
        if let Some(max) = self.max_digits {
            config.corpus.max_digits = max;
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(summary) = &self.summary {
            config.output.summary = Some(summary.clone());
        }
    }
}
