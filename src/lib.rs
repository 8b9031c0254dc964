//! Roughcut: Rough-Set Reduction Library
//!
//! Analyzes decision tables with classical rough-set theory: indiscernibility
//! classes, lower/upper approximations and removal of inconsistent objects
//! (qualitative method), or decision-rule mining with support, confidence and
//! weight and removal of weakest-rule objects (quantitative method).

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod service;
pub mod utils;
