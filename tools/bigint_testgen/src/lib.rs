#![forbid(unsafe_code)]

pub mod cli;
pub mod compose;
pub mod config;
pub mod corpus;
pub mod emit;
pub mod error;
pub mod interner;
pub mod oracle;
pub mod plan;
pub mod runner;

pub use cli::{Cli, LogFormat};
pub use compose::{compose, write_artifact};
pub use config::{CorpusConfig, GeneratorConfig, HarnessConfig, OutputConfig};
pub use corpus::{generate_corpus, Corpus, FIXED_OPERANDS};
pub use error::{ConfigError, CorpusError, GenerateError};
pub use interner::ResultInterner;
pub use oracle::{evaluate_operation, Operation, TestVector};
pub use plan::{build_plan, HarnessPlan, PlanSummary};
pub use runner::{execute, RunArtifacts};
