use std::{fs, path::PathBuf};

use bigint_testgen::{execute, Cli, GeneratorConfig, Operation};
use tempfile::tempdir;

fn cli_for(output: PathBuf, seed: Option<u64>) -> Cli {
    Cli {
        seed,
        random_count: Some(4),
        min_digits: Some(16),
        max_digits: Some(64),
        output: Some(output),
        ..Cli::default()
    }
}

#[test]
fn same_seed_produces_identical_harness() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.cpp");
    let second = dir.path().join("second.cpp");

    execute(&cli_for(first.clone(), Some(1234))).expect("first run");
    execute(&cli_for(second.clone(), Some(1234))).expect("second run");

    let first = fs::read(first).unwrap();
    let second = fs::read(second).unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn different_seeds_change_the_random_operands() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.cpp");
    let b = dir.path().join("b.cpp");
    execute(&cli_for(a.clone(), Some(1))).unwrap();
    execute(&cli_for(b.clone(), Some(2))).unwrap();
    assert_ne!(fs::read(a).unwrap(), fs::read(b).unwrap());
}

#[test]
fn writes_summary_and_overwrites_existing_harness() {
    let dir = tempdir().unwrap();
    let harness = dir.path().join("test.cpp");
    let summary = dir.path().join("reports/summary.json");
    fs::write(&harness, "stale").unwrap();

    let cli = Cli {
        summary: Some(summary.clone()),
        ..cli_for(harness.clone(), Some(77))
    };
    let artifacts = execute(&cli).expect("generation succeeds");

    assert!(artifacts.written);
    assert_eq!(artifacts.seed, 77);
    assert_eq!(artifacts.summary.operands, 10);
    assert_eq!(artifacts.summary.vectors[&Operation::Add], 100);
    assert_eq!(artifacts.summary.vectors[&Operation::Mul], 100);

    let source = fs::read_to_string(&harness).unwrap();
    assert_ne!(source, "stale");
    assert!(source.contains("ctx.input_count = 10;"));
    assert!(source.contains(
        "ctx.inputs[0].size = bigint::from_base16(ctx.inputs[0].digits, \"0\", 1);"
    ));
    assert!(source.contains("void test_mod(test_context const & ctx)"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(json["seed"], 77);
    assert_eq!(json["vectors"]["add"], 100);
    assert_eq!(artifacts.summary_path, Some(summary));
}

#[test]
fn emitted_vectors_stay_inside_their_domains() {
    let dir = tempdir().unwrap();
    let harness = dir.path().join("test.cpp");
    execute(&cli_for(harness.clone(), Some(5))).unwrap();
    let source = fs::read_to_string(&harness).unwrap();

    // Operand values in corpus order, recovered from the setup routine.
    let operands: Vec<num_bigint::BigUint> = source
        .lines()
        .filter(|line| line.contains("ctx.inputs[") && line.contains("from_base16"))
        .map(|line| {
            let hex = line.split('"').nth(1).unwrap();
            num_bigint::BigUint::parse_bytes(hex.as_bytes(), 16).unwrap()
        })
        .collect();
    assert_eq!(operands.len(), 10);

    for name in ["sub", "div", "mod"] {
        let prefix = format!("test_op(\"{name}\", bigint::{name}, ctx, ");
        for line in source.lines().map(str::trim).filter(|l| l.starts_with(&prefix)) {
            let args: Vec<usize> = line[prefix.len()..line.len() - 2]
                .split(", ")
                .map(|n| n.parse().unwrap())
                .collect();
            let (lhs, rhs) = (&operands[args[0]], &operands[args[1]]);
            assert!(lhs >= rhs, "{name} emitted with lhs < rhs: {line}");
            if name != "sub" {
                assert!(*rhs != num_bigint::BigUint::from(0u8), "{name} divides by zero");
            }
        }
    }
}

#[test]
fn check_mode_accepts_fresh_harness_and_rejects_drift() {
    let dir = tempdir().unwrap();
    let harness = dir.path().join("test.cpp");
    execute(&cli_for(harness.clone(), Some(9))).unwrap();

    let check = Cli {
        check: true,
        ..cli_for(harness.clone(), Some(9))
    };
    let artifacts = execute(&check).expect("unchanged harness passes check");
    assert!(!artifacts.written);

    let drifted = Cli {
        check: true,
        ..cli_for(harness.clone(), Some(10))
    };
    let err = execute(&drifted).err().expect("different seed must drift");
    assert!(err.to_string().contains("harness drift detected"));
}

#[test]
fn check_mode_requires_a_seed() {
    let dir = tempdir().unwrap();
    let cli = Cli {
        check: true,
        ..cli_for(dir.path().join("test.cpp"), None)
    };
    let err = execute(&cli).err().expect("check without seed fails");
    assert!(err.to_string().contains("fixed seed"));
}

#[test]
fn undersized_result_buffer_is_rejected() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("generator.toml");
    fs::write(&config_path, "[harness]\nresult_capacity = 4\n").unwrap();
    let cli = Cli {
        config: Some(config_path),
        ..cli_for(dir.path().join("test.cpp"), Some(3))
    };
    let err = execute(&cli).err().expect("capacity check fails");
    assert!(err.to_string().contains("result buffer holds 4 limbs"));
    assert!(!dir.path().join("test.cpp").exists());
}

#[test]
fn invalid_overrides_are_reported() {
    let dir = tempdir().unwrap();
    let cli = Cli {
        min_digits: Some(80),
        ..cli_for(dir.path().join("test.cpp"), Some(3))
    };
    let err = execute(&cli).err().expect("empty digit range rejected");
    assert!(format!("{err:#}").contains("digit range [80, 64) is empty"));
}

#[test]
fn shipped_configuration_loads() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/bigint_testgen.toml");
    let config = GeneratorConfig::load(&path).expect("shipped config is valid");
    assert_eq!(config.seed, Some(20240917));
    assert_eq!(config.corpus.random_count, 50);
    assert_eq!(config.harness.result_capacity, 0x1000);
}
