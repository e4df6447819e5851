/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Planning constraints and planner configuration.
//!
//! Constraints usually arrive with the planning request; the optional YAML
//! planner config supplies defaults for them plus engine knobs:
//! ```yaml
//! constraints:
//!   min_credits: 12
//!   max_credits: 18
//!   target_grad_term: "Fall 2028"
//!   include_summers: false
//! heuristic: advanced_first
//! max_terms: 8
//! ```
//! Every field is optional; missing values fall back to the defaults below.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::scheduler::priority::DEFAULT_HEURISTIC;
use crate::scheduler::MAX_PLAN_TERMS;

// ── Defaults ──────────────────────────────────────────────────────────────────

pub const DEFAULT_MIN_CREDITS: f64 = 12.0;
pub const DEFAULT_MAX_CREDITS: f64 = 17.0;
pub const DEFAULT_TARGET_GRAD_TERM: &str = "Spring 2027";

/// Hard upper limit accepted for either per-term credit bound.
pub const CREDIT_BOUND_LIMIT: f64 = 30.0;

// ── Constraint errors ─────────────────────────────────────────────────────────

/// Precondition violations the caller must reject before planning.
///
/// The engine itself never re-checks these; [`PlanningConstraints::validate`]
/// is the gate used by the CLI and any service front-end.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not exceed {limit}, got {value}")]
    AboveLimit {
        field: &'static str,
        value: f64,
        limit: f64,
    },

    #[error("maximum credits ({max}) must be greater than or equal to minimum credits ({min})")]
    MaxBelowMin { min: f64, max: f64 },
}

// ── PlanningConstraints ───────────────────────────────────────────────────────

/// Per-request planning constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningConstraints {
    /// Advisory per-term floor; shortfalls become warnings.
    pub min_credits: f64,
    /// Hard per-term ceiling.
    pub max_credits: f64,
    /// `"{Season} {Year}"`.
    pub target_grad_term: String,
    pub include_summers: bool,
}

impl Default for PlanningConstraints {
    fn default() -> Self {
        Self {
            min_credits: DEFAULT_MIN_CREDITS,
            max_credits: DEFAULT_MAX_CREDITS,
            target_grad_term: DEFAULT_TARGET_GRAD_TERM.to_string(),
            include_summers: false,
        }
    }
}

impl PlanningConstraints {
    /// Checks `0 < min ≤ max ≤ CREDIT_BOUND_LIMIT`.
    ///
    /// The target term is deliberately not checked here: a malformed target
    /// is reported by the planner as a warning with an empty plan.
    pub fn validate(&self) -> Result<(), ConstraintError> {
        for (field, value) in [
            ("min_credits", self.min_credits),
            ("max_credits", self.max_credits),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConstraintError::NonPositive { field, value });
            }
            if value > CREDIT_BOUND_LIMIT {
                return Err(ConstraintError::AboveLimit {
                    field,
                    value,
                    limit: CREDIT_BOUND_LIMIT,
                });
            }
        }
        if self.max_credits < self.min_credits {
            return Err(ConstraintError::MaxBelowMin {
                min: self.min_credits,
                max: self.max_credits,
            });
        }
        Ok(())
    }
}

// ── Private YAML deserialization types ────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct PlannerConfigFile {
    #[serde(default)]
    constraints: ConstraintsEntry,
    heuristic: Option<String>,
    max_terms: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct ConstraintsEntry {
    min_credits: Option<f64>,
    max_credits: Option<f64>,
    target_grad_term: Option<String>,
    include_summers: Option<bool>,
}

// ── PlannerConfig ─────────────────────────────────────────────────────────────

/// Fully-resolved planner configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub constraints: PlanningConstraints,
    /// Name of the tie-break rule, see [`crate::scheduler::priority`].
    pub heuristic: String,
    /// Maximum number of terms kept in the output plan (1 to `MAX_PLAN_TERMS`).
    pub max_terms: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            constraints: PlanningConstraints::default(),
            heuristic: DEFAULT_HEURISTIC.to_string(),
            max_terms: MAX_PLAN_TERMS,
        }
    }
}

impl PlannerConfig {
    /// Parses the YAML planner config at `path`, filling gaps with defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the YAML is
    /// structurally invalid.  Value ranges are checked later, by
    /// [`PlanningConstraints::validate`] and when the planner is built.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading planner configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        // An empty file deserializes to `null`; treat it as "all defaults".
        let file: PlannerConfigFile = if content.trim().is_empty() {
            PlannerConfigFile::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?
        };

        let defaults = PlannerConfig::default();
        let c = file.constraints;
        let config = PlannerConfig {
            constraints: PlanningConstraints {
                min_credits: c.min_credits.unwrap_or(defaults.constraints.min_credits),
                max_credits: c.max_credits.unwrap_or(defaults.constraints.max_credits),
                target_grad_term: c
                    .target_grad_term
                    .unwrap_or(defaults.constraints.target_grad_term),
                include_summers: c
                    .include_summers
                    .unwrap_or(defaults.constraints.include_summers),
            },
            heuristic: file.heuristic.unwrap_or(defaults.heuristic),
            max_terms: file.max_terms.unwrap_or(defaults.max_terms),
        };

        debug!(
            min_credits = config.constraints.min_credits,
            max_credits = config.constraints.max_credits,
            target = %config.constraints.target_grad_term,
            include_summers = config.constraints.include_summers,
            heuristic = %config.heuristic,
            max_terms = config.max_terms,
            "planner configuration resolved"
        );

        Ok(config)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
