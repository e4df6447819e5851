/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Independent re-check of a produced plan.
//!
//! [`validate_plan`] never looks at scheduler state: it walks the plan as
//! data and compares it against the input [`DegreeRequirements`].
//! It detects
//! - required courses that appear in no term (one aggregate warning), and
//! - scheduled courses whose prerequisites are not in a strictly earlier
//!   term (one warning per course).
//!
//! Prerequisite edges are read straight from the document, and when a
//! course has several edges the **first** one is authoritative.  The
//! scheduler's index keeps the last edge instead, so a later edge that
//! weakens a requirement still shows up here.
//!
//! The plan is not modified; callers append the returned warnings to
//! [`PlannerOutput::warnings`] if they want them surfaced.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::catalog::DegreeRequirements;
use crate::scheduler::{PlanWarning, PlannerOutput};

/// Validates `plan` against `requirements` and returns warning strings.
///
/// Pure: repeated calls with the same inputs return the same list.
pub fn validate_plan(plan: &PlannerOutput, requirements: &DegreeRequirements) -> Vec<String> {
    let mut findings = Vec::new();

    // ── Missing required courses ──────────────────────────────────────────────
    let planned: HashSet<&str> = plan.scheduled_codes().collect();
    let missing: Vec<String> = requirements
        .courses
        .iter()
        .filter(|c| !planned.contains(c.code.as_str()))
        .map(|c| c.code.clone())
        .collect();
    if !missing.is_empty() {
        findings.push(PlanWarning::MissingCourses { codes: missing });
    }

    // ── Prerequisite ordering ─────────────────────────────────────────────────
    let required: HashSet<&str> = requirements.courses.iter().map(|c| c.code.as_str()).collect();
    let mut by_term: HashMap<&str, Vec<&str>> = HashMap::new();

    for term in &plan.terms {
        let earlier: HashSet<&str> = by_term.values().flatten().copied().collect();

        for course in &term.courses {
            // Courses outside the requirements have no prerequisites to check.
            if !required.contains(course.code.as_str()) {
                continue;
            }
            let unmet: Vec<String> = first_edge(requirements, &course.code)
                .iter()
                .filter(|p| !earlier.contains(p.as_str()))
                .cloned()
                .collect();
            if !unmet.is_empty() {
                findings.push(PlanWarning::UnmetPrerequisites {
                    course: course.code.clone(),
                    term: term.name.clone(),
                    missing: unmet,
                });
            }
        }

        by_term.insert(
            term.name.as_str(),
            term.courses.iter().map(|c| c.code.as_str()).collect(),
        );
    }

    debug!(
        terms = plan.terms.len(),
        findings = findings.len(),
        "plan validated"
    );

    findings.iter().map(ToString::to_string).collect()
}

/// Requirements of the first edge naming `code`; empty when there is none.
fn first_edge<'a>(requirements: &'a DegreeRequirements, code: &str) -> &'a [String] {
    requirements
        .prerequisites
        .iter()
        .find(|p| p.course == code)
        .map(|p| p.requires.as_slice())
        .unwrap_or(&[])
}

// ── Tests ─────────────────────────────────────────────────────────────────────
