/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Tie-break rules for ordering a term's eligible courses.
//!
//! Eligibility (season, prerequisites) and the credit ceiling are decided by
//! the scheduler; a rule only decides *which* eligible courses are offered
//! the remaining credit room first.  The scheduler sorts with a stable sort,
//! so courses a rule considers equal keep their catalog order.
//!
//! | Name | Order |
//! |---|---|
//! | `advanced_first` (default) | prerequisite count desc, then credits desc |
//! | `heaviest_first` | credits desc, then prerequisite count desc |
//! | `catalog_order` | catalog position |

use std::cmp::Ordering;
use std::fmt;

use crate::catalog::Course;

use super::error::SchedulerError;

pub const DEFAULT_HEURISTIC: &str = "advanced_first";

/// An eligible course as seen by a [`PriorityRule`].
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub course: &'a Course,
    pub prerequisites: &'a [String],
    /// Position in the requirements' course list.
    pub catalog_index: usize,
}

/// Comparator deciding the order in which eligible courses claim credits.
pub trait PriorityRule: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// `Ordering::Less` means `a` is offered room before `b`.
    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering;
}

/// Courses with more prerequisites are treated as more advanced and placed
/// first; heavier courses break ties.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdvancedFirst;

impl PriorityRule for AdvancedFirst {
    fn name(&self) -> &'static str {
        "advanced_first"
    }

    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        b.prerequisites
            .len()
            .cmp(&a.prerequisites.len())
            .then_with(|| credits_desc(a, b))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HeaviestFirst;

impl PriorityRule for HeaviestFirst {
    fn name(&self) -> &'static str {
        "heaviest_first"
    }

    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        credits_desc(a, b).then_with(|| b.prerequisites.len().cmp(&a.prerequisites.len()))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogOrder;

impl PriorityRule for CatalogOrder {
    fn name(&self) -> &'static str {
        "catalog_order"
    }

    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        a.catalog_index.cmp(&b.catalog_index)
    }
}

fn credits_desc(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.course.credits.total_cmp(&a.course.credits)
}

/// Looks up a rule by its [`PriorityRule::name`].
pub fn rule_by_name(name: &str) -> Result<Box<dyn PriorityRule>, SchedulerError> {
    match name {
        "advanced_first" => Ok(Box::new(AdvancedFirst)),
        "heaviest_first" => Ok(Box::new(HeaviestFirst)),
        "catalog_order" => Ok(Box::new(CatalogOrder)),
        other => Err(SchedulerError::UnknownHeuristic(other.to_string())),
    }
}
