use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;

/// Arithmetic entry points of the library under test, in harness order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Add,
        Operation::Sub,
        Operation::Mul,
        Operation::Div,
        Operation::Mod,
    ];

    /// Function name exported by the library, also used for `test_<name>`.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Sub => "sub",
            Operation::Mul => "mul",
            Operation::Div => "div",
            Operation::Mod => "mod",
        }
    }

    /// Whether `(lhs, rhs)` lies inside the operation's domain for an
    /// unsigned library: differences never go negative and divisors are
    /// non-zero and no larger than the dividend.
    pub fn accepts(&self, lhs: &BigUint, rhs: &BigUint) -> bool {
        match self {
            Operation::Add | Operation::Mul => true,
            Operation::Sub => lhs >= rhs,
            Operation::Div | Operation::Mod => !rhs.is_zero() && lhs >= rhs,
        }
    }

    pub fn evaluate(&self, lhs: &BigUint, rhs: &BigUint) -> Option<BigUint> {
        if !self.accepts(lhs, rhs) {
            return None;
        }
        let value = match self {
            Operation::Add => lhs + rhs,
            Operation::Sub => lhs - rhs,
            Operation::Mul => lhs * rhs,
            Operation::Div => lhs / rhs,
            Operation::Mod => lhs % rhs,
        };
        Some(value)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One oracle-checked case: operand positions in the corpus and the
/// expected value as canonical lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVector {
    pub operation: Operation,
    pub lhs: usize,
    pub rhs: usize,
    pub expected: String,
}

/// Runs `operation` over every ordered pair of the corpus (self-pairs
/// included), lhs-major. Pairs outside the domain are skipped.
pub fn evaluate_operation(operation: Operation, corpus: &Corpus) -> Vec<TestVector> {
    let values = corpus.values();
    let mut vectors = Vec::new();
    for (lhs, lhs_value) in values.iter().enumerate() {
        for (rhs, rhs_value) in values.iter().enumerate() {
            if let Some(result) = operation.evaluate(lhs_value, rhs_value) {
                vectors.push(TestVector {
                    operation,
                    lhs,
                    rhs,
                    expected: canonical_hex(&result),
                });
            }
        }
    }
    vectors
}

pub fn canonical_hex(value: &BigUint) -> String {
    value.to_str_radix(16)
}
