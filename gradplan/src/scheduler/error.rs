/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Diagnostics produced by the planner.
//!
//! Two types model the two failure layers:
//!
//! * [`PlanWarning`]: a constraint the plan could not fully satisfy.  The
//!   planner always returns a best-effort plan; these are rendered into its
//!   `warnings` list in detection order.
//! * [`SchedulerError`]: a planner that cannot be built at all (bad engine
//!   configuration), returned before any scheduling happens.

use thiserror::Error;

use crate::catalog::format_credits;

// ── Plan warnings ─────────────────────────────────────────────────────────────

/// Non-fatal planning diagnostic.
///
/// `Display` renders the exact text that ends up in
/// [`PlannerOutput::warnings`](super::PlannerOutput::warnings).
#[derive(Debug, Clone, PartialEq)]
pub enum PlanWarning {
    /// The target graduation term is not `"{Season} {Year}"`.
    InvalidTargetTerm,

    /// A kept term scheduled fewer credits than the advisory minimum.
    CreditShortfall {
        term: String,
        scheduled: f64,
        minimum: f64,
    },

    /// Courses that never became eligible, or never fit under the ceiling,
    /// before the term sequence ran out.
    Unscheduled { codes: Vec<String> },

    /// The plan's credit total falls short of the degree total.
    BelowRequiredCredits { planned: f64, required: f64 },

    /// More terms were scheduled than the output may hold.
    TooManyTerms { cap: usize },

    /// Courses placed in terms that were cut off by the term cap.
    DroppedAfterCap { cap: usize, codes: Vec<String> },

    /// Required courses absent from the plan (validator).
    MissingCourses { codes: Vec<String> },

    /// A scheduled course whose prerequisites are not in an earlier term
    /// (validator).
    UnmetPrerequisites {
        course: String,
        term: String,
        missing: Vec<String>,
    },
}

impl std::fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanWarning::InvalidTargetTerm => {
                write!(f, "Invalid target graduation term format")
            }

            PlanWarning::CreditShortfall {
                term,
                scheduled,
                minimum,
            } => write!(
                f,
                "{}: Only {} credits scheduled (minimum: {})",
                term,
                format_credits(*scheduled),
                format_credits(*minimum)
            ),

            PlanWarning::Unscheduled { codes } => write!(
                f,
                "Unable to schedule {} courses: {}",
                codes.len(),
                codes.join(", ")
            ),

            PlanWarning::BelowRequiredCredits { planned, required } => write!(
                f,
                "Planned credits ({}) are less than required ({})",
                format_credits(*planned),
                format_credits(*required)
            ),

            PlanWarning::TooManyTerms { cap } => write!(
                f,
                "Plan exceeds {} terms - consider increasing credit load or including summers",
                cap
            ),

            PlanWarning::DroppedAfterCap { cap, codes } => write!(
                f,
                "Dropped {} courses scheduled after term {}: {}",
                codes.len(),
                cap,
                codes.join(", ")
            ),

            PlanWarning::MissingCourses { codes } => {
                write!(f, "Missing required courses: {}", codes.join(", "))
            }

            PlanWarning::UnmetPrerequisites {
                course,
                term,
                missing,
            } => write!(
                f,
                "{} in {} has unmet prerequisites: {}",
                course,
                term,
                missing.join(", ")
            ),
        }
    }
}

// ── Scheduler errors ──────────────────────────────────────────────────────────

/// Errors raised while constructing a [`Planner`](super::Planner).
///
/// Planning itself never fails; see [`PlanWarning`].
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The tie-break heuristic name is not recognised.
    #[error("unknown scheduling heuristic: '{0}' (valid: advanced_first, heaviest_first, catalog_order)")]
    UnknownHeuristic(String),

    /// The output term cap was zero.
    #[error("max_terms must be at least 1")]
    ZeroTermCap,

    /// The output term cap asked for more terms than a plan may hold.
    #[error("max_terms must not exceed {limit}, got {requested}")]
    TermCapAboveLimit { requested: usize, limit: usize },
}
