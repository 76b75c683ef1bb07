use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read generator configuration at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse generator configuration at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("corpus.min_digits must be at least 1")]
    ZeroMinDigits,
    #[error("corpus digit range [{min}, {max}) is empty")]
    EmptyDigitRange { min: usize, max: usize },
    #[error("harness.limb_bits must be one of 8, 16, 32 or 64 (got {0})")]
    UnsupportedLimbBits(u32),
    #[error("harness.result_capacity must be greater than zero")]
    ZeroResultCapacity,
    #[error("harness.namespace {0:?} is not a valid identifier")]
    InvalidNamespace(String),
    #[error("harness.header must not be empty")]
    EmptyHeader,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to create artifact directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("harness result buffer holds {capacity} limbs but the corpus needs {required}")]
    ResultCapacity { required: usize, capacity: usize },
    #[error("unable to replace {path}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("operand {index} ({value:?}) is not a non-empty hex digit string")]
    InvalidOperand { index: usize, value: String },
}
