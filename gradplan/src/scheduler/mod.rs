/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Greedy term-by-term course scheduler.
//!
//! [`Planner`] turns a [`DegreeRequirements`] document and a set of
//! [`PlanningConstraints`] into a [`PlannerOutput`]: an ordered list of
//! [`Term`]s plus human-readable warnings.
//!
//! ```text
//! target term ──► term sequence ─┐
//!                                ├──► greedy placement ──► cap to max_terms ──► PlannerOutput
//! prerequisites ──► index ───────┘
//! ```
//!
//! For every term in sequence order the scheduler
//! 1. keeps the unscheduled courses offered in the term's season whose
//!    prerequisites all sit in strictly earlier terms,
//! 2. orders them with the configured [`PriorityRule`],
//! 3. accepts courses while the term total stays ≤ `max_credits`.
//!
//! Empty terms are dropped, under-filled terms are kept with a warning, and
//! the run stops once every course is placed.  Nothing here returns an
//! error: infeasibility is always reported through [`PlanWarning`]s.
//!
//! # State
//! The input course list is never mutated.  Per-run placement status lives
//! in a side table indexed by catalog position, allocated inside
//! [`Planner::plan_on`] and dropped at the end of the call, so one `Planner`
//! (and one requirements document) can serve concurrent requests.
//!
//! # Example
//! ```rust,ignore
//! let planner = Planner::from_config(&config)?;
//! let output = planner.plan(&requirements);
//! ```

pub mod error;
pub mod prereq;
pub mod priority;

pub use error::{PlanWarning, SchedulerError};

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{Course, DegreeRequirements, Season};
use crate::config::{PlannerConfig, PlanningConstraints};
use crate::term::{term_sequence, TermLabel};

use prereq::PrerequisiteIndex;
use priority::{AdvancedFirst, Candidate, PriorityRule};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Default maximum number of terms in a plan.
pub const MAX_PLAN_TERMS: usize = 8;

// ── Output types ──────────────────────────────────────────────────────────────

/// One scheduled term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    /// `"{Season} {Year}"`.
    pub name: String,
    /// Courses in the order they were accepted.
    pub courses: Vec<Course>,
    pub total_credits: f64,
}

impl Term {
    fn new(name: String) -> Self {
        Self {
            name,
            courses: Vec::new(),
            total_credits: 0.0,
        }
    }

    /// Season token of the term name, if it is one.
    pub fn season(&self) -> Option<Season> {
        self.name.split_whitespace().next().and_then(Season::from_label)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.courses.iter().any(|c| c.code == code)
    }
}

/// Result of one planning run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerOutput {
    pub terms: Vec<Term>,
    /// Diagnostics in detection order.
    pub warnings: Vec<String>,
    /// Sum of `total_credits` over `terms`.
    pub total_credits: f64,
}

impl PlannerOutput {
    /// Index of the term holding `code`, if it was scheduled.
    pub fn term_index_of(&self, code: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.contains(code))
    }

    /// Codes of every scheduled course, in plan order.
    pub fn scheduled_codes(&self) -> impl Iterator<Item = &str> {
        self.terms
            .iter()
            .flat_map(|t| t.courses.iter().map(|c| c.code.as_str()))
    }
}

// ── Per-run working set ───────────────────────────────────────────────────────

/// Placement status of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Pending,
    /// Index into the (untruncated) scheduled term list.
    Placed(usize),
}

/// Side table parallel to the course list.
struct WorkingSet<'a> {
    courses: &'a [Course],
    status: Vec<Placement>,
    pending: usize,
    /// Codes placed in already-committed terms.
    completed: HashSet<&'a str>,
}

impl<'a> WorkingSet<'a> {
    fn new(courses: &'a [Course]) -> Self {
        Self {
            courses,
            status: vec![Placement::Pending; courses.len()],
            pending: courses.len(),
            completed: HashSet::new(),
        }
    }

    fn place(&mut self, idx: usize, term: usize) {
        if self.status[idx] == Placement::Pending {
            self.pending -= 1;
        }
        self.status[idx] = Placement::Placed(term);
    }

    /// Makes everything placed in `term` visible as completed for later terms.
    fn commit(&mut self, term: usize) {
        for (course, status) in self.courses.iter().zip(&self.status) {
            if *status == Placement::Placed(term) {
                self.completed.insert(course.code.as_str());
            }
        }
    }

    fn is_pending(&self, idx: usize) -> bool {
        self.status[idx] == Placement::Pending
    }

    fn pending_codes(&self) -> Vec<String> {
        self.courses
            .iter()
            .zip(&self.status)
            .filter(|(_, s)| **s == Placement::Pending)
            .map(|(c, _)| c.code.clone())
            .collect()
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

/// The degree planner.
///
/// Holds the request constraints and the engine knobs; all scheduling state is
/// per call, so `Planner` is `Send + Sync`.
#[derive(Debug)]
pub struct Planner {
    constraints: PlanningConstraints,
    rule: Box<dyn PriorityRule>,
    max_terms: usize,
}

impl Planner {
    /// Planner with the default `advanced_first` rule and an 8-term cap.
    pub fn new(constraints: PlanningConstraints) -> Self {
        Self {
            constraints,
            rule: Box::new(AdvancedFirst),
            max_terms: MAX_PLAN_TERMS,
        }
    }

    /// Builds a planner from a resolved [`PlannerConfig`].
    ///
    /// # Errors
    /// [`SchedulerError::UnknownHeuristic`] for an unrecognised rule name,
    /// [`SchedulerError::ZeroTermCap`] for `max_terms == 0` and
    /// [`SchedulerError::TermCapAboveLimit`] for `max_terms > MAX_PLAN_TERMS`.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, SchedulerError> {
        let rule = priority::rule_by_name(&config.heuristic)?;
        Self::new(config.constraints.clone())
            .with_rule(rule)
            .with_max_terms(config.max_terms)
    }

    pub fn with_rule(mut self, rule: Box<dyn PriorityRule>) -> Self {
        self.rule = rule;
        self
    }

    /// Lowers the term cap.  The cap can never exceed [`MAX_PLAN_TERMS`].
    pub fn with_max_terms(mut self, max_terms: usize) -> Result<Self, SchedulerError> {
        if max_terms == 0 {
            return Err(SchedulerError::ZeroTermCap);
        }
        if max_terms > MAX_PLAN_TERMS {
            return Err(SchedulerError::TermCapAboveLimit {
                requested: max_terms,
                limit: MAX_PLAN_TERMS,
            });
        }
        self.max_terms = max_terms;
        Ok(self)
    }

    pub fn constraints(&self) -> &PlanningConstraints {
        &self.constraints
    }

    // ── Public entry points ───────────────────────────────────────────────────

    /// Plans starting from today's local date.
    pub fn plan(&self, requirements: &DegreeRequirements) -> PlannerOutput {
        self.plan_on(requirements, Local::now().date_naive())
    }

    /// Plans as if the current date were `today`.
    pub fn plan_on(&self, requirements: &DegreeRequirements, today: NaiveDate) -> PlannerOutput {
        let c = &self.constraints;
        info!(
            institution = %requirements.institution,
            program = %requirements.program,
            courses = requirements.courses.len(),
            min_credits = c.min_credits,
            max_credits = c.max_credits,
            target = %c.target_grad_term,
            include_summers = c.include_summers,
            heuristic = self.rule.name(),
            "=== Planner::plan() ==="
        );

        let mut warnings = Vec::new();

        let target = match c.target_grad_term.parse::<TermLabel>() {
            Ok(t) => t,
            Err(e) => {
                warn!(target = %c.target_grad_term, error = %e, "rejecting target graduation term");
                record(&mut warnings, PlanWarning::InvalidTargetTerm);
                return finish(Vec::new(), warnings);
            }
        };

        let sequence = term_sequence(target, c.include_summers, today);

        let index = PrerequisiteIndex::build(&requirements.prerequisites);
        for code in index.duplicates() {
            warn!(course = %code, "duplicate prerequisite edge, keeping the last one");
        }

        let mut terms =
            self.schedule_courses(&requirements.courses, &index, &sequence, &mut warnings);

        // Compared against the degree total before the cap is applied; courses
        // cut by the cap are reported separately below.
        let planned: f64 = terms.iter().map(|t| t.total_credits).sum();

        let overflow = if terms.len() > self.max_terms {
            terms.split_off(self.max_terms)
        } else {
            Vec::new()
        };

        if planned < requirements.total_credits {
            record(
                &mut warnings,
                PlanWarning::BelowRequiredCredits {
                    planned,
                    required: requirements.total_credits,
                },
            );
        }

        if !overflow.is_empty() {
            record(
                &mut warnings,
                PlanWarning::TooManyTerms {
                    cap: self.max_terms,
                },
            );
            let codes = overflow
                .iter()
                .flat_map(|t| t.courses.iter().map(|c| c.code.clone()))
                .collect();
            record(
                &mut warnings,
                PlanWarning::DroppedAfterCap {
                    cap: self.max_terms,
                    codes,
                },
            );
        }

        let output = finish(terms, warnings);
        info!(
            terms = output.terms.len(),
            total_credits = output.total_credits,
            warnings = output.warnings.len(),
            "=== Planning complete ==="
        );
        output
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Greedy placement
    // ─────────────────────────────────────────────────────────────────────────

    /// Runs the greedy pass over `sequence` and returns the non-empty terms,
    /// uncapped.
    fn schedule_courses(
        &self,
        courses: &[Course],
        index: &PrerequisiteIndex<'_>,
        sequence: &[TermLabel],
        warnings: &mut Vec<PlanWarning>,
    ) -> Vec<Term> {
        let max = self.constraints.max_credits;
        let min = self.constraints.min_credits;
        let mut ws = WorkingSet::new(courses);
        let mut terms: Vec<Term> = Vec::new();

        for label in sequence {
            if ws.pending == 0 {
                break;
            }

            let mut eligible = Self::eligible_courses(&ws, index, label.season);
            eligible.sort_by(|a, b| self.rule.compare(a, b));

            let term_idx = terms.len();
            let mut term = Term::new(label.to_string());

            for cand in &eligible {
                let credits = cand.course.credits;
                if term.contains(&cand.course.code) {
                    debug!(
                        term = %term.name,
                        course = %cand.course.code,
                        "✗ duplicate catalog entry, already placed in this term"
                    );
                    continue;
                }
                if term.total_credits + credits <= max {
                    term.courses.push(cand.course.clone());
                    term.total_credits += credits;
                    ws.place(cand.catalog_index, term_idx);
                    debug!(
                        term = %term.name,
                        course = %cand.course.code,
                        credits,
                        term_total = term.total_credits,
                        "✓ placed"
                    );
                } else {
                    debug!(
                        term = %term.name,
                        course = %cand.course.code,
                        credits,
                        term_total = term.total_credits,
                        max_credits = max,
                        "✗ exceeds credit ceiling, deferred"
                    );
                }
            }

            if term.total_credits > 0.0 && term.total_credits < min {
                record(
                    warnings,
                    PlanWarning::CreditShortfall {
                        term: term.name.clone(),
                        scheduled: term.total_credits,
                        minimum: min,
                    },
                );
            }

            if term.courses.is_empty() {
                debug!(term = %term.name, eligible = eligible.len(), "no courses placed, dropping term");
                continue;
            }

            info!(
                term = %term.name,
                courses = term.courses.len(),
                credits = term.total_credits,
                "term scheduled"
            );
            ws.commit(term_idx);
            terms.push(term);
        }

        let leftover = ws.pending_codes();
        if !leftover.is_empty() {
            record(warnings, PlanWarning::Unscheduled { codes: leftover });
        }

        terms
    }

    /// Pending courses offered in `season` whose prerequisites are all
    /// completed, in catalog order.  A repeated catalog entry whose code is
    /// already completed is never eligible again.
    fn eligible_courses<'a>(
        ws: &WorkingSet<'a>,
        index: &PrerequisiteIndex<'a>,
        season: Season,
    ) -> Vec<Candidate<'a>> {
        ws.courses
            .iter()
            .enumerate()
            .filter(|(i, course)| {
                ws.is_pending(*i)
                    && !ws.completed.contains(course.code.as_str())
                    && course.is_offered_in(season)
            })
            .filter_map(|(i, course)| {
                let prerequisites = index.requirements_for(&course.code);
                prerequisites
                    .iter()
                    .all(|p| ws.completed.contains(p.as_str()))
                    .then_some(Candidate {
                        course,
                        prerequisites,
                        catalog_index: i,
                    })
            })
            .collect()
    }
}

// ── Convenience entry point ───────────────────────────────────────────────────

/// Plans `requirements` under `constraints` with the default engine settings.
pub fn generate_plan(
    requirements: &DegreeRequirements,
    constraints: &PlanningConstraints,
) -> PlannerOutput {
    Planner::new(constraints.clone()).plan(requirements)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn record(warnings: &mut Vec<PlanWarning>, warning: PlanWarning) {
    warn!(warning = %warning, "plan warning");
    warnings.push(warning);
}

fn finish(terms: Vec<Term>, warnings: Vec<PlanWarning>) -> PlannerOutput {
    let total_credits = terms.iter().map(|t| t.total_credits).sum();
    PlannerOutput {
        terms,
        warnings: warnings.iter().map(ToString::to_string).collect(),
        total_credits,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Prerequisite;
    use crate::scheduler::priority::{CatalogOrder, HeaviestFirst};
    use crate::validation::validate_plan;

    use crate::catalog::Season::{Fall, Spring, Summer};

    // ── Test helpers ──────────────────────────────────────────────────────────

    /// Fixed "today": October 2026, so plans start in Fall 2026.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn course(code: &str, credits: f64, offerings: &[Season]) -> Course {
        Course {
            code: code.to_string(),
            name: format!("{code} name"),
            credits,
            description: None,
            offerings: offerings.to_vec(),
        }
    }

    fn edge(course: &str, requires: &[&str]) -> Prerequisite {
        Prerequisite {
            course: course.to_string(),
            requires: requires.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn requirements(courses: Vec<Course>, prerequisites: Vec<Prerequisite>) -> DegreeRequirements {
        let total_credits = courses.iter().map(|c| c.credits).sum();
        DegreeRequirements {
            institution: "Test University".into(),
            program: "Computer Science".into(),
            total_credits,
            courses,
            prerequisites,
        }
    }

    fn constraints(min: f64, max: f64, target: &str, summers: bool) -> PlanningConstraints {
        PlanningConstraints {
            min_credits: min,
            max_credits: max,
            target_grad_term: target.to_string(),
            include_summers: summers,
        }
    }

    /// The four-course CS/MATH catalog.
    fn cs_math() -> DegreeRequirements {
        requirements(
            vec![
                course("CS 101", 3.0, &[Fall, Spring]),
                course("CS 201", 3.0, &[Fall, Spring]),
                course("MATH 151", 4.0, &[Fall, Spring, Summer]),
                course("MATH 152", 4.0, &[Fall, Spring, Summer]),
            ],
            vec![edge("CS 201", &["CS 101"]), edge("MATH 152", &["MATH 151"])],
        )
    }

    fn codes(term: &Term) -> Vec<&str> {
        term.courses.iter().map(|c| c.code.as_str()).collect()
    }

    /// Asserts every structural invariant of a produced plan.
    fn assert_invariants(out: &PlannerOutput, req: &DegreeRequirements, c: &PlanningConstraints) {
        assert!(out.terms.len() <= MAX_PLAN_TERMS);

        let mut seen = HashSet::new();
        for code in out.scheduled_codes() {
            assert!(seen.insert(code), "{code} scheduled twice");
        }

        let index = PrerequisiteIndex::build(&req.prerequisites);
        for (i, term) in out.terms.iter().enumerate() {
            assert!(!term.courses.is_empty(), "{} is empty", term.name);
            assert!(
                term.total_credits <= c.max_credits,
                "{} exceeds ceiling",
                term.name
            );
            let season = term.season().unwrap();
            for course in &term.courses {
                assert!(course.is_offered_in(season), "{} not offered in {season}", course.code);
                for p in index.requirements_for(&course.code) {
                    let at = out.term_index_of(p);
                    assert!(
                        matches!(at, Some(j) if j < i),
                        "{} in {} before prerequisite {p}",
                        course.code,
                        term.name
                    );
                }
            }
        }

        let sum: f64 = out.terms.iter().map(|t| t.total_credits).sum();
        assert_eq!(out.total_credits, sum);
    }

    // ── Scenarios ─────────────────────────────────────────────────────────────

    #[test]
    fn cs_math_plan_is_valid() {
        let req = cs_math();
        let c = constraints(12.0, 18.0, "Spring 2026", false);
        let out = Planner::new(c.clone()).plan_on(&req, today());

        assert!(!out.terms.is_empty());
        assert!(out.total_credits > 0.0);
        assert_invariants(&out, &req, &c);

        let errors = validate_plan(&out, &req);
        assert!(errors.iter().all(|e| !e.contains("unmet prerequisites")));
    }

    #[test]
    fn cs_math_schedules_intro_courses_first() {
        let req = cs_math();
        let c = constraints(12.0, 18.0, "Spring 2028", false);
        let out = Planner::new(c.clone()).plan_on(&req, today());

        assert_eq!(out.terms.len(), 2);
        assert_eq!(out.terms[0].name, "Fall 2026");
        assert_eq!(codes(&out.terms[0]), vec!["MATH 151", "CS 101"]);
        assert_eq!(out.terms[0].total_credits, 7.0);
        assert_eq!(out.terms[1].name, "Spring 2027");
        assert_eq!(codes(&out.terms[1]), vec!["MATH 152", "CS 201"]);
        assert_eq!(out.total_credits, 14.0);

        // Both terms are under the 12-credit floor but are kept.
        assert_eq!(
            out.warnings,
            vec![
                "Fall 2026: Only 7 credits scheduled (minimum: 12)",
                "Spring 2027: Only 7 credits scheduled (minimum: 12)",
            ]
        );
    }

    #[test]
    fn invalid_target_returns_empty_plan_with_single_warning() {
        let req = cs_math();
        let c = constraints(12.0, 18.0, "Invalid Term", false);
        let out = Planner::new(c).plan_on(&req, today());

        assert!(out.terms.is_empty());
        assert_eq!(out.total_credits, 0.0);
        assert_eq!(out.warnings, vec!["Invalid target graduation term format"]);
    }

    #[test]
    fn summer_only_course_without_summers_is_unscheduled() {
        let req = requirements(
            vec![
                course("CS 101", 3.0, &[Fall, Spring]),
                course("FIELD 300", 6.0, &[Summer]),
            ],
            vec![],
        );
        let c = constraints(3.0, 18.0, "Spring 2028", false);
        let out = Planner::new(c.clone()).plan_on(&req, today());

        assert_invariants(&out, &req, &c);
        assert_eq!(out.term_index_of("FIELD 300"), None);
        assert!(out
            .warnings
            .contains(&"Unable to schedule 1 courses: FIELD 300".to_string()));
    }

    #[test]
    fn summer_course_is_placed_when_summers_included() {
        let req = requirements(vec![course("FIELD 300", 6.0, &[Summer])], vec![]);
        let c = constraints(3.0, 18.0, "Fall 2027", true);
        let out = Planner::new(c.clone()).plan_on(&req, today());

        assert_invariants(&out, &req, &c);
        assert_eq!(out.terms.len(), 1);
        assert_eq!(out.terms[0].name, "Summer 2027");
    }

    #[test]
    fn under_filled_term_is_kept_with_shortfall_warning() {
        let req = requirements(
            vec![
                course("ART 101", 3.0, &[Fall]),
                course("ART 102", 2.0, &[Fall]),
            ],
            vec![],
        );
        let c = constraints(12.0, 18.0, "Fall 2026", false);
        let out = Planner::new(c).plan_on(&req, today());

        assert_eq!(out.terms.len(), 1);
        assert_eq!(codes(&out.terms[0]), vec!["ART 101", "ART 102"]);
        assert_eq!(
            out.warnings[0],
            "Fall 2026: Only 5 credits scheduled (minimum: 12)"
        );
    }

    // ── Invariants ────────────────────────────────────────────────────────────

    #[test]
    fn prerequisite_in_same_term_is_not_enough() {
        let req = requirements(
            vec![
                course("A", 3.0, &[Fall, Spring]),
                course("B", 3.0, &[Fall, Spring]),
            ],
            vec![edge("B", &["A"])],
        );
        let c = constraints(3.0, 18.0, "Fall 2027", false);
        let out = Planner::new(c.clone()).plan_on(&req, today());

        assert_invariants(&out, &req, &c);
        assert_eq!(out.term_index_of("A"), Some(0));
        assert_eq!(out.term_index_of("B"), Some(1));
    }

    #[test]
    fn credit_ceiling_defers_courses_to_later_terms() {
        let req = requirements(
            vec![
                course("A", 4.0, &[Fall, Spring]),
                course("B", 4.0, &[Fall, Spring]),
                course("C", 4.0, &[Fall, Spring]),
                course("D", 3.0, &[Fall, Spring]),
            ],
            vec![],
        );
        let c = constraints(1.0, 10.0, "Fall 2028", false);
        let out = Planner::new(c.clone()).plan_on(&req, today());

        assert_invariants(&out, &req, &c);
        // A + B = 8; neither C (12) nor D (11) fits under 10.
        assert_eq!(codes(&out.terms[0]), vec!["A", "B"]);
        assert_eq!(codes(&out.terms[1]), vec!["C", "D"]);
    }

    #[test]
    fn smaller_course_fills_remaining_room() {
        let req = requirements(
            vec![
                course("BIG", 10.0, &[Fall, Spring]),
                course("MID", 6.0, &[Fall, Spring]),
                course("LAB", 1.0, &[Fall, Spring]),
            ],
            vec![],
        );
        let c = constraints(1.0, 12.0, "Fall 2027", false);
        let out = Planner::new(c).plan_on(&req, today());

        assert_eq!(codes(&out.terms[0]), vec!["BIG", "LAB"]);
        assert_eq!(codes(&out.terms[1]), vec!["MID"]);
    }

    #[test]
    fn season_mismatch_skips_term_and_drops_it() {
        let req = requirements(vec![course("SPR 100", 3.0, &[Spring])], vec![]);
        let c = constraints(1.0, 18.0, "Fall 2027", false);
        let out = Planner::new(c).plan_on(&req, today());

        // Fall 2026 has nothing eligible and is not emitted.
        assert_eq!(out.terms.len(), 1);
        assert_eq!(out.terms[0].name, "Spring 2027");
    }

    #[test]
    fn missing_prerequisite_course_blocks_scheduling() {
        let req = requirements(
            vec![course("CS 301", 3.0, &[Fall, Spring])],
            vec![edge("CS 301", &["CS 999"])],
        );
        let c = constraints(1.0, 18.0, "Fall 2027", false);
        let out = Planner::new(c).plan_on(&req, today());

        assert!(out.terms.is_empty());
        assert!(out
            .warnings
            .contains(&"Unable to schedule 1 courses: CS 301".to_string()));
    }

    #[test]
    fn repeated_catalog_entry_is_scheduled_once() {
        let req = requirements(
            vec![
                course("CS 101", 3.0, &[Fall, Spring]),
                course("CS 101", 3.0, &[Fall, Spring]),
            ],
            vec![],
        );
        let c = constraints(1.0, 3.0, "Fall 2027", false);
        let out = Planner::new(c.clone()).plan_on(&req, today());

        assert_invariants(&out, &req, &c);
        assert_eq!(out.terms.len(), 1);
        assert_eq!(codes(&out.terms[0]), vec!["CS 101"]);
        assert!(out
            .warnings
            .contains(&"Unable to schedule 1 courses: CS 101".to_string()));
    }

    #[test]
    fn repeated_catalog_entry_is_not_doubled_within_a_term() {
        let req = requirements(
            vec![
                course("CS 101", 3.0, &[Fall]),
                course("CS 101", 3.0, &[Fall]),
            ],
            vec![],
        );
        let c = constraints(1.0, 18.0, "Fall 2026", false);
        let out = Planner::new(c).plan_on(&req, today());

        assert_eq!(codes(&out.terms[0]), vec!["CS 101"]);
        assert_eq!(out.terms[0].total_credits, 3.0);
    }

    #[test]
    fn nan_credits_do_not_break_ordering() {
        let courses = (0..40)
            .map(|i| {
                let credits = if i % 5 == 0 { f64::NAN } else { 3.0 };
                course(&format!("C{i}"), credits, &[Fall, Spring])
            })
            .collect();
        let mut req = requirements(courses, vec![]);
        req.total_credits = 96.0;
        let c = constraints(1.0, 18.0, "Fall 2030", false);
        let out = Planner::new(c).plan_on(&req, today());

        // NaN never fits under the ceiling, so those eight stay unscheduled.
        assert_eq!(out.scheduled_codes().count(), 32);
        assert!(out
            .warnings
            .iter()
            .any(|w| w.starts_with("Unable to schedule 8 courses: C0, C5")));
    }

    #[test]
    fn input_courses_are_not_mutated() {
        let req = cs_math();
        let before = req.clone();
        let planner = Planner::new(constraints(12.0, 18.0, "Fall 2028", false));
        let first = planner.plan_on(&req, today());
        let second = planner.plan_on(&req, today());
        assert_eq!(req, before);
        assert_eq!(first, second);
    }

    #[test]
    fn stops_once_everything_is_scheduled() {
        let req = requirements(vec![course("A", 3.0, &[Fall, Spring])], vec![]);
        let c = constraints(1.0, 18.0, "Fall 2030", false);
        let out = Planner::new(c).plan_on(&req, today());
        assert_eq!(out.terms.len(), 1);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn below_required_credits_is_reported() {
        let mut req = cs_math();
        req.total_credits = 120.0;
        let c = constraints(1.0, 18.0, "Fall 2028", false);
        let out = Planner::new(c).plan_on(&req, today());
        assert_eq!(
            out.warnings,
            vec!["Planned credits (14) are less than required (120)"]
        );
    }

    // ── Term cap ──────────────────────────────────────────────────────────────

    /// A prerequisite chain of `n` courses forces one course per term.
    fn chain(n: usize) -> DegreeRequirements {
        let courses = (0..n)
            .map(|i| course(&format!("C{i}"), 3.0, &[Fall, Spring, Summer]))
            .collect();
        let edges = (1..n)
            .map(|i| {
                let prev = format!("C{}", i - 1);
                edge(&format!("C{i}"), &[prev.as_str()])
            })
            .collect();
        requirements(courses, edges)
    }

    #[test]
    fn plan_is_capped_at_eight_terms() {
        let req = chain(10);
        let c = constraints(1.0, 18.0, "Fall 2031", false);
        let out = Planner::new(c.clone()).plan_on(&req, today());

        assert_invariants(&out, &req, &c);
        assert_eq!(out.terms.len(), 8);
        assert_eq!(out.total_credits, 24.0);
        assert!(out.warnings.contains(
            &"Plan exceeds 8 terms - consider increasing credit load or including summers"
                .to_string()
        ));
        assert!(out
            .warnings
            .contains(&"Dropped 2 courses scheduled after term 8: C8, C9".to_string()));
    }

    #[test]
    fn sequence_limit_leaves_tail_unscheduled() {
        // 12 sequence entries, 14 chained courses: C12 and C13 never get a term.
        let req = chain(14);
        let c = constraints(1.0, 18.0, "Spring 2020", false);
        let out = Planner::new(c).plan_on(&req, today());

        assert_eq!(out.terms.len(), 8);
        assert!(out
            .warnings
            .contains(&"Unable to schedule 2 courses: C12, C13".to_string()));
        assert!(out.warnings.contains(
            &"Dropped 4 courses scheduled after term 8: C8, C9, C10, C11".to_string()
        ));
    }

    #[test]
    fn custom_term_cap_is_honoured() {
        let req = chain(5);
        let c = constraints(1.0, 18.0, "Fall 2030", false);
        let out = Planner::new(c)
            .with_max_terms(3)
            .unwrap()
            .plan_on(&req, today());
        assert_eq!(out.terms.len(), 3);
        assert!(out.warnings.iter().any(|w| w.starts_with("Plan exceeds 3 terms")));
    }

    #[test]
    fn zero_term_cap_is_rejected() {
        let planner = Planner::new(PlanningConstraints::default()).with_max_terms(0);
        assert!(matches!(planner, Err(SchedulerError::ZeroTermCap)));
    }

    #[test]
    fn term_cap_cannot_be_raised_above_eight() {
        let planner = Planner::new(PlanningConstraints::default()).with_max_terms(12);
        assert!(matches!(
            planner,
            Err(SchedulerError::TermCapAboveLimit {
                requested: 12,
                limit: MAX_PLAN_TERMS
            })
        ));

        let mut cfg = PlannerConfig::default();
        cfg.max_terms = 12;
        assert!(matches!(
            Planner::from_config(&cfg),
            Err(SchedulerError::TermCapAboveLimit { .. })
        ));

        cfg.max_terms = MAX_PLAN_TERMS;
        let req = chain(12);
        let c = constraints(1.0, 18.0, "Spring 2020", true);
        cfg.constraints = c.clone();
        let out = Planner::from_config(&cfg).unwrap().plan_on(&req, today());
        assert_invariants(&out, &req, &c);
        assert_eq!(out.terms.len(), MAX_PLAN_TERMS);
    }

    #[test]
    fn required_credit_check_counts_terms_beyond_the_cap() {
        // chain(10) schedules all 30 credits, 24 of them inside the cap.
        let mut req = chain(10);
        let c = constraints(1.0, 18.0, "Fall 2031", false);
        let out = Planner::new(c.clone()).plan_on(&req, today());
        assert_eq!(out.total_credits, 24.0);
        assert!(!out.warnings.iter().any(|w| w.starts_with("Planned credits")));

        req.total_credits = 33.0;
        let out = Planner::new(c).plan_on(&req, today());
        assert!(out
            .warnings
            .contains(&"Planned credits (30) are less than required (33)".to_string()));
    }

    // ── Heuristics ────────────────────────────────────────────────────────────

    #[test]
    fn heuristic_changes_tie_break_only() {
        let req = requirements(
            vec![
                course("A", 3.0, &[Fall]),
                course("B", 5.0, &[Fall]),
                course("C", 4.0, &[Fall]),
            ],
            vec![],
        );
        let c = constraints(1.0, 18.0, "Fall 2026", false);

        let heavy = Planner::new(c.clone())
            .with_rule(Box::new(HeaviestFirst))
            .plan_on(&req, today());
        assert_eq!(codes(&heavy.terms[0]), vec!["B", "C", "A"]);

        let catalog = Planner::new(c)
            .with_rule(Box::new(CatalogOrder))
            .plan_on(&req, today());
        assert_eq!(codes(&catalog.terms[0]), vec!["A", "B", "C"]);
    }

    #[test]
    fn from_config_resolves_heuristic() {
        let mut cfg = PlannerConfig::default();
        cfg.heuristic = "catalog_order".into();
        let planner = Planner::from_config(&cfg).unwrap();
        assert_eq!(planner.rule.name(), "catalog_order");

        cfg.heuristic = "fastest".into();
        assert!(matches!(
            Planner::from_config(&cfg),
            Err(SchedulerError::UnknownHeuristic(_))
        ));
    }

    // ── Output ────────────────────────────────────────────────────────────────

    #[test]
    fn output_serializes_with_camel_case_fields() {
        let req = cs_math();
        let out = Planner::new(constraints(1.0, 18.0, "Fall 2028", false)).plan_on(&req, today());
        let json = serde_json::to_value(&out).unwrap();
        assert!(json.get("totalCredits").is_some());
        assert!(json["terms"][0].get("totalCredits").is_some());
        assert_eq!(json["terms"][0]["name"], "Fall 2026");
    }

    #[test]
    fn term_season_comes_from_first_word() {
        let t = Term::new("Summer 2027".into());
        assert_eq!(t.season(), Some(Summer));
        assert_eq!(Term::new("Later".into()).season(), None);
    }
}
