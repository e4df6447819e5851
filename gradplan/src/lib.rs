/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! gradplan – greedy degree planner
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── catalog.rs      – course, prerequisite and requirements documents
//! ├── config/         – planning constraints, YAML planner config
//! ├── term/           – term labels and the term sequencer
//! ├── scheduler/      – greedy scheduler, prerequisite index, tie-break rules
//! └── validation/     – independent plan re-check
//! ```

pub mod catalog;
pub mod config;
pub mod scheduler;
pub mod term;
pub mod validation;

pub use catalog::{Course, DegreeRequirements, Prerequisite, Season};
pub use config::PlanningConstraints;
pub use scheduler::{generate_plan, Planner, PlannerOutput, Term};
pub use validation::validate_plan;
