use num_bigint::BigUint;
use rand::Rng;

use crate::{config::CorpusConfig, error::CorpusError};

/// Boundary operands placed at the front of every corpus: the identities, a
/// nibble, a byte, a full 64-bit word and the first value past it.
pub const FIXED_OPERANDS: [&str; 6] = [
    "0",
    "1",
    "f",
    "ff",
    "ffffffffffffffff",
    "10000000000000000",
];

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Ordered operand list. Position is the index the harness uses to refer to
/// an operand, so entries are never reordered once generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    operands: Vec<String>,
    values: Vec<BigUint>,
}

impl Corpus {
    /// Builds a corpus from hex strings, parsing each one for the oracle.
    pub fn from_hex(operands: Vec<String>) -> Result<Self, CorpusError> {
        let values = operands
            .iter()
            .enumerate()
            .map(|(index, hex)| {
                parse_hex(hex).ok_or_else(|| CorpusError::InvalidOperand {
                    index,
                    value: hex.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { operands, values })
    }

    #[cfg(test)]
    pub(crate) fn get(&self, index: usize) -> Option<&str> {
        self.operands.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.operands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.operands.iter().map(String::as_str)
    }

    /// Oracle values in corpus order.
    pub fn values(&self) -> &[BigUint] {
        &self.values
    }
}

/// Parses a bare lowercase hex digit string, the form `from_base16` accepts.
pub fn parse_hex(hex: &str) -> Option<BigUint> {
    if hex.is_empty() || !hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return None;
    }
    BigUint::parse_bytes(hex.as_bytes(), 16)
}

/// Appends `random_count` random operands to the boundary values. A draw
/// that is numerically equal to a boundary value (`"f"`, `"00f"`, `"000"`) is
/// redrawn, so each boundary operand appears exactly once.
pub fn generate_corpus<R: Rng>(config: &CorpusConfig, rng: &mut R) -> Result<Corpus, CorpusError> {
    let fixed_values: Vec<BigUint> = FIXED_OPERANDS
        .iter()
        .filter_map(|hex| parse_hex(hex))
        .collect();
    let mut operands: Vec<String> = FIXED_OPERANDS.iter().map(|s| s.to_string()).collect();
    operands.reserve(config.random_count);
    while operands.len() < FIXED_OPERANDS.len() + config.random_count {
        let len = rng.gen_range(config.min_digits..config.max_digits);
        let candidate = random_hex(rng, len);
        let collides = parse_hex(&candidate).is_some_and(|value| fixed_values.contains(&value));
        if !collides {
            operands.push(candidate);
        }
    }
    Corpus::from_hex(operands)
}

fn random_hex<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())]))
        .collect()
}
