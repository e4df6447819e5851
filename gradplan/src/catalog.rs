/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Degree requirement documents consumed by the planner.
//!
//! Two document shapes reach the engine:
//!
//! ```text
//! extraction ──(ExtractedCatalog)──► DegreeRequirements ──(Planner)──► PlannerOutput
//!               id / title / offered      code / name / offerings
//!               prereq logic trees        flat prerequisite edges
//! ```
//!
//! # Ownership model
//! `DegreeRequirements` is read-only for the whole planning run.  The
//! scheduler never writes scheduling status back into a [`Course`]; it keeps
//! its own per-request side table indexed by catalog position, so one
//! requirements document can be shared across concurrent planning requests.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// `totalCredits` assumed when an extracted catalog does not state one.
pub const DEFAULT_TOTAL_CREDITS: f64 = 120.0;

/// Largest credit value accepted for a single course.
pub const COURSE_CREDIT_LIMIT: f64 = 20.0;

/// Largest degree total accepted.
pub const TOTAL_CREDIT_LIMIT: f64 = 300.0;

// ── Season ────────────────────────────────────────────────────────────────────

/// Academic season in which a course can be offered and a term can run.
///
/// Declaration order is calendar order within a year, so the derived `Ord`
/// sorts Spring < Summer < Fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// All seasons in calendar order.
    pub const ALL: [Season; 3] = [Season::Spring, Season::Summer, Season::Fall];

    /// Label as it appears in term names and documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }

    /// Exact, case-sensitive match against [`Season::as_str`].
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Course / Prerequisite ─────────────────────────────────────────────────────

/// One catalog course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique course code, e.g. `"CS 201"`.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Credit value.  Non-negative; may be fractional.
    pub credits: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Seasons in which the course is offered.
    #[serde(default)]
    pub offerings: Vec<Season>,
}

impl Course {
    /// Returns `true` if students may enroll in this course during `season`.
    pub fn is_offered_in(&self, season: Season) -> bool {
        self.offerings.contains(&season)
    }
}

/// Flat prerequisite edge: `course` may only be taken in a term strictly
/// after every code in `requires`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prerequisite {
    pub course: String,
    pub requires: Vec<String>,
}

// ── Document errors ───────────────────────────────────────────────────────────

/// Requirements documents the planner must not be handed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequirementsError {
    #[error("course {code}: credits must be between 0 and {limit}, got {value}")]
    CourseCredits {
        code: String,
        value: f64,
        limit: f64,
    },

    #[error("totalCredits must be between 1 and {limit}, got {value}")]
    TotalCredits { value: f64, limit: f64 },
}

// ── DegreeRequirements ────────────────────────────────────────────────────────

/// Validated degree requirements: the engine's input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeRequirements {
    pub institution: String,
    pub program: String,

    /// Credits the degree requires in total.
    pub total_credits: f64,

    pub courses: Vec<Course>,

    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
}

impl DegreeRequirements {
    /// Reads a requirements document from `path`.
    ///
    /// `.yaml` / `.yml` files are parsed as YAML, everything else as JSON.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or does not deserialize
    /// into a requirements document.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let requirements: Self = read_document(path)?;
        info!(
            institution = %requirements.institution,
            program = %requirements.program,
            courses = requirements.courses.len(),
            prerequisite_edges = requirements.prerequisites.len(),
            "loaded degree requirements from {}",
            path.display()
        );
        Ok(requirements)
    }

    /// Checks that every credit value is finite and in range:
    /// `0 ≤ credits ≤ COURSE_CREDIT_LIMIT` per course and
    /// `1 ≤ total_credits ≤ TOTAL_CREDIT_LIMIT`.
    pub fn validate(&self) -> Result<(), RequirementsError> {
        let total = self.total_credits;
        if !total.is_finite() || !(1.0..=TOTAL_CREDIT_LIMIT).contains(&total) {
            return Err(RequirementsError::TotalCredits {
                value: total,
                limit: TOTAL_CREDIT_LIMIT,
            });
        }
        for course in &self.courses {
            let value = course.credits;
            if !value.is_finite() || !(0.0..=COURSE_CREDIT_LIMIT).contains(&value) {
                return Err(RequirementsError::CourseCredits {
                    code: course.code.clone(),
                    value,
                    limit: COURSE_CREDIT_LIMIT,
                });
            }
        }
        Ok(())
    }

    /// Looks up a course by code.
    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }
}

// ── Prerequisite logic trees ──────────────────────────────────────────────────

/// Boolean operator of a [`PrereqExpr::Logic`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicOp {
    And,
    Or,
}

/// Prerequisite expression as produced by catalog extraction.
///
/// On the wire a leaf is a bare string and a node is
/// `{"op": "AND" | "OR", "terms": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrereqExpr {
    Course(String),
    Logic { op: LogicOp, terms: Vec<PrereqExpr> },
}

impl PrereqExpr {
    /// Flattens the expression into the course codes the scheduler must see
    /// completed.
    ///
    /// `AND` contributes every child; `OR` contributes its first alternative
    /// only.  Blank codes are skipped.
    pub fn flatten_into(&self, out: &mut Vec<String>) {
        match self {
            PrereqExpr::Course(code) => {
                let code = code.trim();
                if !code.is_empty() {
                    out.push(code.to_string());
                }
            }
            PrereqExpr::Logic {
                op: LogicOp::And,
                terms,
            } => {
                for term in terms {
                    term.flatten_into(out);
                }
            }
            PrereqExpr::Logic {
                op: LogicOp::Or,
                terms,
            } => {
                if let Some(first) = terms.first() {
                    first.flatten_into(out);
                }
            }
        }
    }
}

// ── ExtractedCatalog ──────────────────────────────────────────────────────────

/// Course entry in the extraction format.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractedCourse {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub credits: f64,
    #[serde(default)]
    pub prereqs: Vec<PrereqExpr>,
    /// Same-term partners.  Carried through for reporting; not enforced.
    #[serde(default)]
    pub coreqs: Vec<String>,
    #[serde(default)]
    pub offered: Vec<Season>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Requirements document in the shape catalog extraction emits.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractedCatalog {
    pub program_name: String,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub catalog_year: Option<String>,
    #[serde(default)]
    pub total_credits: Option<f64>,
    pub courses: Vec<ExtractedCourse>,
}

impl ExtractedCatalog {
    /// Reads an extracted catalog from `path` (JSON or YAML by extension).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        read_document(path)
    }

    /// Maps the extraction format onto [`DegreeRequirements`].
    ///
    /// Every course with a non-empty flattened prerequisite list produces one
    /// edge; duplicate codes within a list are collapsed.
    pub fn into_requirements(self) -> DegreeRequirements {
        let mut courses = Vec::with_capacity(self.courses.len());
        let mut prerequisites = Vec::new();

        for c in self.courses {
            let mut requires = Vec::new();
            for expr in &c.prereqs {
                expr.flatten_into(&mut requires);
            }
            let mut seen = HashSet::new();
            requires.retain(|code| seen.insert(code.clone()));

            if !c.coreqs.is_empty() {
                debug!(course = %c.id, coreqs = ?c.coreqs, "corequisites present but not enforced");
            }
            if !requires.is_empty() {
                prerequisites.push(Prerequisite {
                    course: c.id.clone(),
                    requires,
                });
            }

            courses.push(Course {
                code: c.id,
                name: c.title.unwrap_or_default(),
                credits: c.credits,
                description: c.description,
                offerings: c.offered,
            });
        }

        DegreeRequirements {
            institution: self.institution.unwrap_or_default(),
            program: self.program_name,
            total_credits: self.total_credits.unwrap_or(DEFAULT_TOTAL_CREDITS),
            courses,
            prerequisites,
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Renders a credit value the way planners write it: `3`, `3.5`.
pub fn format_credits(credits: f64) -> String {
    if credits.fract() == 0.0 {
        format!("{:.0}", credits)
    } else {
        credits.to_string()
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open document: {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML document: {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON document: {}", path.display()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
