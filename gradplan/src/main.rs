/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use gradplan::catalog::{DegreeRequirements, ExtractedCatalog};
use gradplan::config::PlannerConfig;
use gradplan::{validate_plan, Planner, PlannerOutput};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Term-by-term degree planner.
///
/// Example:
///   gradplan -r demos/cs_requirements.json -c demos/planner.yaml --max-credits 16
#[derive(Debug, Parser)]
#[command(
    name = "gradplan",
    about = "Greedy term-by-term degree planner",
    long_about = None,
)]
struct Cli {
    /// Requirements document (JSON, or YAML with a .yaml/.yml extension).
    #[arg(short = 'r', long = "requirements")]
    requirements: PathBuf,

    /// Treat the requirements document as an extracted catalog
    /// (program_name / id / title / offered / prereq logic).
    #[arg(long = "catalog", default_value_t = false)]
    catalog: bool,

    /// Path to the YAML planner configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Minimum credits per term (advisory).
    #[arg(long = "min-credits")]
    min_credits: Option<f64>,

    /// Maximum credits per term.
    #[arg(long = "max-credits")]
    max_credits: Option<f64>,

    /// Target graduation term, e.g. "Spring 2028".
    #[arg(short = 't', long = "target")]
    target: Option<String>,

    /// Allow summer terms.
    #[arg(short = 's', long = "include-summers", default_value_t = false)]
    include_summers: bool,

    /// Disallow summer terms, overriding the config file.
    #[arg(long = "no-summers", default_value_t = false, conflicts_with = "include_summers")]
    no_summers: bool,

    /// Tie-break heuristic: advanced_first, heaviest_first, catalog_order.
    #[arg(long = "heuristic")]
    heuristic: Option<String>,

    /// Skip the post-generation plan validation.
    #[arg(long = "no-validate", default_value_t = false)]
    no_validate: bool,

    /// Write the plan JSON here instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

impl Cli {
    /// Loads the config file (if any) and applies command-line overrides.
    fn resolve_config(&self) -> Result<PlannerConfig> {
        let mut config = match &self.config {
            Some(path) => PlannerConfig::load_from_file(path)?,
            None => {
                warn!("No planner configuration file provided, using defaults");
                PlannerConfig::default()
            }
        };

        if let Some(v) = self.min_credits {
            config.constraints.min_credits = v;
        }
        if let Some(v) = self.max_credits {
            config.constraints.max_credits = v;
        }
        if let Some(t) = &self.target {
            config.constraints.target_grad_term = t.clone();
        }
        if self.include_summers {
            config.constraints.include_summers = true;
        }
        if self.no_summers {
            config.constraints.include_summers = false;
        }
        if let Some(h) = &self.heuristic {
            config.heuristic = h.clone();
        }
        Ok(config)
    }

    fn load_requirements(&self) -> Result<DegreeRequirements> {
        if self.catalog {
            let catalog = ExtractedCatalog::load_from_file(&self.requirements)?;
            info!(
                program = %catalog.program_name,
                catalog_year = ?catalog.catalog_year,
                courses = catalog.courses.len(),
                "mapping extracted catalog to degree requirements"
            );
            Ok(catalog.into_requirements())
        } else {
            DegreeRequirements::load_from_file(&self.requirements)
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // Logs go to stderr; stdout carries the plan.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    config
        .constraints
        .validate()
        .context("Invalid planning constraints")?;

    info!(
        min_credits = config.constraints.min_credits,
        max_credits = config.constraints.max_credits,
        target = %config.constraints.target_grad_term,
        include_summers = config.constraints.include_summers,
        heuristic = %config.heuristic,
        max_terms = config.max_terms,
        "Configuration"
    );

    let requirements = cli.load_requirements()?;
    requirements
        .validate()
        .context("Invalid requirements document")?;
    let planner = Planner::from_config(&config)?;

    let mut plan = planner.plan(&requirements);
    if !cli.no_validate {
        plan.warnings.extend(validate_plan(&plan, &requirements));
    }

    log_summary(&plan);

    let json = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
    match &cli.output {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("Cannot write plan to {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}

fn log_summary(plan: &PlannerOutput) {
    info!(
        "Generated plan with {} terms and {} warnings",
        plan.terms.len(),
        plan.warnings.len()
    );
    for term in &plan.terms {
        info!(
            "  [{name}]  courses={count}  credits={credits}",
            name = term.name,
            count = term.courses.len(),
            credits = term.total_credits,
        );
    }
    for w in &plan.warnings {
        warn!("  {}", w);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
