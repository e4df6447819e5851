/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Prerequisite indexer: flat edges → per-course requirement lists.

use std::collections::HashMap;

use crate::catalog::Prerequisite;

/// Course code → codes that must be completed in an earlier term.
///
/// Borrowed from the requirements document; building it copies nothing.
/// When several edges target the same course the **last** one wins and the
/// course is recorded in [`duplicates`](Self::duplicates).
#[derive(Debug, Default)]
pub struct PrerequisiteIndex<'a> {
    map: HashMap<&'a str, &'a [String]>,
    duplicates: Vec<&'a str>,
}

impl<'a> PrerequisiteIndex<'a> {
    pub fn build(edges: &'a [Prerequisite]) -> Self {
        let mut index = Self::default();
        for edge in edges {
            if index
                .map
                .insert(edge.course.as_str(), edge.requires.as_slice())
                .is_some()
            {
                index.duplicates.push(edge.course.as_str());
            }
        }
        index
    }

    /// Requirements for `code`; empty for courses without an edge.
    pub fn requirements_for(&self, code: &str) -> &'a [String] {
        self.map.get(code).copied().unwrap_or(&[])
    }

    /// Courses that had more than one edge (one entry per overwrite).
    pub fn duplicates(&self) -> &[&'a str] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
