/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Term labels and the term sequencer.
//!
//! A term label is `"{Season} {Year}"`, e.g. `"Fall 2026"`.  The sequencer
//! walks the season cycle from the term that contains "today" up to and
//! including the target graduation term.
//!
//! | Month | Starting season |
//! |---|---|
//! | 1–5  | Spring |
//! | 6–8  | Summer if summers are included, otherwise Fall |
//! | 9–12 | Fall |
//!
//! The cycle is Spring → Summer → Fall with summers, Spring → Fall without;
//! the year advances every time the cycle wraps past Fall.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::Season;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Upper bound on generated sequence entries.
///
/// A target that lies in the past, or a Summer target with summers excluded,
/// is never reached; the sequence then simply stops at this length.
pub const MAX_SEQUENCE_TERMS: usize = 12;

const CYCLE_WITH_SUMMERS: [Season; 3] = [Season::Spring, Season::Summer, Season::Fall];
const CYCLE_WITHOUT_SUMMERS: [Season; 2] = [Season::Spring, Season::Fall];

// ── Error type ────────────────────────────────────────────────────────────────

/// Why a string is not a valid term label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermParseError {
    #[error("'{0}' is not of the form '<Season> <Year>'")]
    Malformed(String),

    #[error("unknown season '{0}' (valid: Spring, Summer, Fall)")]
    UnknownSeason(String),

    #[error("invalid year '{0}', expected four digits")]
    InvalidYear(String),
}

// ── TermLabel ─────────────────────────────────────────────────────────────────

/// A parsed `"{Season} {Year}"` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermLabel {
    pub season: Season,
    pub year: i32,
}

impl TermLabel {
    pub fn new(season: Season, year: i32) -> Self {
        Self { season, year }
    }
}

impl fmt::Display for TermLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.season, self.year)
    }
}

impl FromStr for TermLabel {
    type Err = TermParseError;

    /// Accepts exactly a season name, one or more whitespace characters and a
    /// four-digit year.  No leading or trailing whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (season, rest) = s
            .split_once(char::is_whitespace)
            .ok_or_else(|| TermParseError::Malformed(s.to_string()))?;

        let season = Season::from_label(season)
            .ok_or_else(|| TermParseError::UnknownSeason(season.to_string()))?;

        let year = rest.trim_start_matches(char::is_whitespace);
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TermParseError::InvalidYear(year.to_string()));
        }
        let year = year
            .parse::<i32>()
            .map_err(|_| TermParseError::InvalidYear(year.to_string()))?;

        Ok(TermLabel { season, year })
    }
}

// ── Sequencer ─────────────────────────────────────────────────────────────────

/// Seasons a plan may use, in calendar order.
pub fn season_cycle(include_summers: bool) -> &'static [Season] {
    if include_summers {
        &CYCLE_WITH_SUMMERS
    } else {
        &CYCLE_WITHOUT_SUMMERS
    }
}

/// The term a plan starting on `today` begins in.
pub fn starting_term(today: NaiveDate, include_summers: bool) -> TermLabel {
    let season = match today.month() {
        1..=5 => Season::Spring,
        6..=8 if include_summers => Season::Summer,
        _ => Season::Fall,
    };
    TermLabel::new(season, today.year())
}

/// Generates the terms from the one containing `today` through `target`.
///
/// The last entry equals `target` unless the target is not reachable within
/// [`MAX_SEQUENCE_TERMS`] steps, in which case the sequence is incomplete.
pub fn term_sequence(target: TermLabel, include_summers: bool, today: NaiveDate) -> Vec<TermLabel> {
    let cycle = season_cycle(include_summers);
    let start = starting_term(today, include_summers);

    let mut idx = cycle.iter().position(|s| *s == start.season).unwrap_or(0);
    let mut year = start.year;
    let mut terms = Vec::with_capacity(MAX_SEQUENCE_TERMS);

    while terms.len() < MAX_SEQUENCE_TERMS {
        let term = TermLabel::new(cycle[idx], year);
        terms.push(term);
        if term == target {
            break;
        }

        idx += 1;
        if idx == cycle.len() {
            idx = 0;
            year += 1;
        }
    }

    if terms.last() != Some(&target) {
        warn!(
            target = %target,
            start = %start,
            generated = terms.len(),
            "target term not reached within the sequence limit"
        );
    }
    debug!(
        start = %start,
        target = %target,
        include_summers,
        terms = terms.len(),
        "term sequence generated"
    );

    terms
}

// ── Tests ─────────────────────────────────────────────────────────────────────
