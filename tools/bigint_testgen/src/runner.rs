use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use rand::{rngs::OsRng, rngs::StdRng, RngCore, SeedableRng};
use tracing::{info, warn};

use crate::{
    cli::Cli,
    compose::{compose, write_artifact},
    config::GeneratorConfig,
    corpus::generate_corpus,
    error::GenerateError,
    plan::{build_plan, PlanSummary},
};

pub struct RunArtifacts {
    pub seed: u64,
    pub summary: PlanSummary,
    pub harness_path: PathBuf,
    /// Set only when a summary was requested and written.
    pub summary_path: Option<PathBuf>,
    /// False in check mode, where nothing is written.
    pub written: bool,
}

pub fn execute(cli: &Cli) -> Result<RunArtifacts> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config
        .validate()
        .context("invalid generator configuration after command-line overrides")?;

    if cli.check && config.seed.is_none() {
        bail!("--check needs a fixed seed; pass --seed or set `seed` in the configuration");
    }
    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = OsRng.next_u64();
            warn!(seed, "no seed configured; rerun with --seed {seed} to reproduce");
            seed
        }
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let corpus = generate_corpus(&config.corpus, &mut rng)?;
    info!(seed, operands = corpus.len(), "generated operand corpus");

    let plan = build_plan(&corpus, &config.harness);
    let required = plan.required_result_capacity();
    if required > config.harness.result_capacity {
        return Err(GenerateError::ResultCapacity {
            required,
            capacity: config.harness.result_capacity,
        }
        .into());
    }
    info!(
        vectors = plan.invocation_count(),
        expected_results = plan.expected.len(),
        "evaluated oracle results"
    );

    let source = compose(&plan, &config.harness);
    let summary = plan.summary(seed);
    let harness_path = config.output.path.clone();

    if cli.check {
        let existing = fs::read_to_string(&harness_path)
            .with_context(|| format!("unable to read {}", harness_path.display()))?;
        if existing != source {
            bail!(
                "harness drift detected: {} does not match seed {seed}",
                harness_path.display()
            );
        }
        info!(path = %harness_path.display(), "harness is up to date");
        return Ok(RunArtifacts {
            seed,
            summary,
            harness_path,
            summary_path: None,
            written: false,
        });
    }

    write_artifact(&harness_path, &source)?;
    info!(path = %harness_path.display(), bytes = source.len(), "wrote harness");

    let summary_path = match &config.output.summary {
        Some(path) => {
            let mut body = serde_json::to_string_pretty(&summary)
                .context("unable to serialise run summary")?;
            body.push('\n');
            write_artifact(path, &body)?;
            info!(path = %path.display(), "wrote run summary");
            Some(path.clone())
        }
        None => None,
    };

    Ok(RunArtifacts {
        seed,
        summary,
        harness_path,
        summary_path,
        written: true,
    })
}
