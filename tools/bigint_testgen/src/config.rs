use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Seed for the corpus RNG. A fresh seed is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub harness: HarnessConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GeneratorConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.corpus.validate()?;
        self.harness.validate()
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CorpusConfig {
    /// Number of random operands appended after the fixed boundary values.
    #[serde(default = "CorpusConfig::default_random_count")]
    pub random_count: usize,
    /// Inclusive lower bound on random operand length, in hex digits.
    #[serde(default = "CorpusConfig::default_min_digits")]
    pub min_digits: usize,
    /// Exclusive upper bound on random operand length, in hex digits.
    #[serde(default = "CorpusConfig::default_max_digits")]
    pub max_digits: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            random_count: Self::default_random_count(),
            min_digits: Self::default_min_digits(),
            max_digits: Self::default_max_digits(),
        }
    }
}

impl CorpusConfig {
    pub fn default_random_count() -> usize {
        50
    }

    pub fn default_min_digits() -> usize {
        1000
    }

    pub fn default_max_digits() -> usize {
        8000
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_digits == 0 {
            return Err(ConfigError::ZeroMinDigits);
        }
        if self.min_digits >= self.max_digits {
            return Err(ConfigError::EmptyDigitRange {
                min: self.min_digits,
                max: self.max_digits,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Header declaring the library under test.
    #[serde(default = "HarnessConfig::default_header")]
    pub header: String,
    /// Namespace holding the library's free functions and `limb_t`.
    #[serde(default = "HarnessConfig::default_namespace")]
    pub namespace: String,
    #[serde(default = "HarnessConfig::default_limb_bits")]
    pub limb_bits: u32,
    /// Size, in limbs, of the scratch buffer every operation writes into.
    #[serde(default = "HarnessConfig::default_result_capacity")]
    pub result_capacity: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            header: Self::default_header(),
            namespace: Self::default_namespace(),
            limb_bits: Self::default_limb_bits(),
            result_capacity: Self::default_result_capacity(),
        }
    }
}

impl HarnessConfig {
    pub fn default_header() -> String {
        "bigint.h".to_string()
    }

    pub fn default_namespace() -> String {
        "bigint".to_string()
    }

    pub fn default_limb_bits() -> u32 {
        32
    }

    pub fn default_result_capacity() -> usize {
        0x1000
    }

    /// Limbs needed to hold a hex string of `hex_len` digits. Never zero.
    pub fn limb_capacity(&self, hex_len: usize) -> usize {
        let digits_per_limb = (self.limb_bits / 4) as usize;
        hex_len.div_ceil(digits_per_limb).max(1)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.limb_bits, 8 | 16 | 32 | 64) {
            return Err(ConfigError::UnsupportedLimbBits(self.limb_bits));
        }
        if self.result_capacity == 0 {
            return Err(ConfigError::ZeroResultCapacity);
        }
        if !is_identifier(&self.namespace) {
            return Err(ConfigError::InvalidNamespace(self.namespace.clone()));
        }
        if self.header.trim().is_empty() {
            return Err(ConfigError::EmptyHeader);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_path")]
    pub path: PathBuf,
    /// Optional JSON run summary.
    #[serde(default)]
    pub summary: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            summary: None,
        }
    }
}

impl OutputConfig {
    pub fn default_path() -> PathBuf {
        PathBuf::from("test.cpp")
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
