use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::HarnessConfig,
    corpus::Corpus,
    interner::ResultInterner,
    oracle::{evaluate_operation, Operation},
};

/// A value the harness materialises at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEntry {
    pub hex: String,
    /// Buffer size, in limbs, allocated for the value.
    pub limbs: usize,
}

/// One `test_op` call: operand positions and the interned result position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub lhs: usize,
    pub rhs: usize,
    pub result: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRoutine {
    pub operation: Operation,
    pub invocations: Vec<Invocation>,
}

/// Everything the renderer needs, with no knowledge of how it is printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessPlan {
    pub operands: Vec<DataEntry>,
    pub expected: Vec<DataEntry>,
    pub routines: Vec<TestRoutine>,
}

impl HarnessPlan {
    #[cfg(test)]
    pub(crate) fn routine(&self, operation: Operation) -> Option<&TestRoutine> {
        self.routines.iter().find(|r| r.operation == operation)
    }

    /// Largest scratch buffer, in limbs, any invocation may write. Mirrors the
    /// library's documented output bounds for each operation.
    pub fn required_result_capacity(&self) -> usize {
        self.routines
            .iter()
            .flat_map(|routine| {
                routine.invocations.iter().map(move |call| {
                    let lhs = self.operands[call.lhs].limbs;
                    let rhs = self.operands[call.rhs].limbs;
                    match routine.operation {
                        Operation::Add => lhs.max(rhs) + 1,
                        Operation::Sub => lhs.max(rhs),
                        Operation::Mul => lhs + rhs,
                        Operation::Div => lhs,
                        Operation::Mod => rhs,
                    }
                })
            })
            .max()
            .unwrap_or(0)
    }

    pub fn invocation_count(&self) -> usize {
        self.routines.iter().map(|r| r.invocations.len()).sum()
    }

    pub fn summary(&self, seed: u64) -> PlanSummary {
        PlanSummary {
            seed,
            operands: self.operands.len(),
            expected_results: self.expected.len(),
            vectors: self
                .routines
                .iter()
                .map(|r| (r.operation, r.invocations.len()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanSummary {
    pub seed: u64,
    pub operands: usize,
    pub expected_results: usize,
    pub vectors: BTreeMap<Operation, usize>,
}

/// Evaluates every operation in harness order and interns the results into
/// one shared table.
pub fn build_plan(corpus: &Corpus, harness: &HarnessConfig) -> HarnessPlan {
    let mut interner = ResultInterner::new();
    let mut routines = Vec::with_capacity(Operation::ALL.len());

    for operation in Operation::ALL {
        let vectors = evaluate_operation(operation, corpus);
        let invocations: Vec<Invocation> = vectors
            .iter()
            .map(|vector| Invocation {
                lhs: vector.lhs,
                rhs: vector.rhs,
                result: interner.intern(&vector.expected),
            })
            .collect();
        debug!(
            operation = %operation,
            vectors = invocations.len(),
            interned = interner.len(),
            "evaluated operation"
        );
        routines.push(TestRoutine {
            operation,
            invocations,
        });
    }

    let operands = corpus
        .iter()
        .map(|hex| data_entry(hex.to_string(), harness))
        .collect();
    let expected = interner
        .into_values()
        .into_iter()
        .map(|hex| data_entry(hex, harness))
        .collect();

    HarnessPlan {
        operands,
        expected,
        routines,
    }
}

fn data_entry(hex: String, harness: &HarnessConfig) -> DataEntry {
    let limbs = harness.limb_capacity(hex.len());
    DataEntry { hex, limbs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CorpusConfig;
    use crate::corpus::{generate_corpus, parse_hex, FIXED_OPERANDS};
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn plan_for(random_count: usize) -> (Corpus, HarnessPlan) {
        let config = CorpusConfig {
            random_count,
            min_digits: 10,
            max_digits: 40,
        };
        let corpus = generate_corpus(&config, &mut StdRng::seed_from_u64(5)).unwrap();
        let plan = build_plan(&corpus, &HarnessConfig::default());
        (corpus, plan)
    }

    #[test]
    fn routines_follow_harness_order() {
        let (_, plan) = plan_for(2);
        let order: Vec<Operation> = plan.routines.iter().map(|r| r.operation).collect();
        assert_eq!(order, Operation::ALL.to_vec());
        assert_eq!(
            plan.routine(Operation::Mod).map(|r| r.operation),
            Some(Operation::Mod)
        );
    }

    #[test]
    fn expected_table_has_no_duplicates() {
        let (_, plan) = plan_for(4);
        let unique: HashSet<&str> = plan.expected.iter().map(|e| e.hex.as_str()).collect();
        assert_eq!(unique.len(), plan.expected.len());
    }

    #[test]
    fn every_invocation_matches_the_oracle() {
        let (corpus, plan) = plan_for(3);
        let values = corpus.values();
        for routine in &plan.routines {
            for call in &routine.invocations {
                let expected = parse_hex(&plan.expected[call.result].hex).unwrap();
                let actual = routine
                    .operation
                    .evaluate(&values[call.lhs], &values[call.rhs])
                    .expect("invocation inside domain");
                assert_eq!(actual, expected);
            }
        }
    }

    #[test]
    fn data_entries_carry_limb_capacity() {
        let (corpus, plan) = plan_for(0);
        assert_eq!(plan.operands.len(), FIXED_OPERANDS.len());
        assert_eq!(corpus.len(), plan.operands.len());
        let boundary = plan
            .operands
            .iter()
            .find(|e| e.hex == "10000000000000000")
            .unwrap();
        assert_eq!(boundary.limbs, 3);
        assert!(plan.expected.iter().all(|e| e.limbs >= 1));
    }

    #[test]
    fn result_capacity_covers_the_widest_product() {
        let (_, plan) = plan_for(0);
        // "10000000000000000" needs three 32-bit limbs, so its square needs six.
        assert_eq!(plan.required_result_capacity(), 6);
    }

    #[test]
    fn summary_counts_vectors_per_operation() {
        let (_, plan) = plan_for(0);
        let summary = plan.summary(11);
        assert_eq!(summary.seed, 11);
        assert_eq!(summary.operands, 6);
        assert_eq!(summary.vectors[&Operation::Add], 36);
        assert_eq!(summary.vectors[&Operation::Sub], 21);
        assert_eq!(summary.vectors[&Operation::Div], 15);
        assert_eq!(plan.invocation_count(), 36 + 21 + 36 + 15 + 15);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["vectors"]["mod"], 15);
    }
}
