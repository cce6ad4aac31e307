//! Inspection and shape checking for kvtrace trace files.
//!
//! This crate provides utilities for understanding an existing trace:
//!
//! - Count operations per kind and measure key coverage
//! - Report value widths and the trailing range scan
//! - Check a trace against the generator's output contract
//!
//! It never replays a trace against a storage engine.
//!
//! # Design Principles
//!
//! - **Read-only** - Inspection streams a trace once and never rewrites it.
//! - **Tolerant of bad shape** - A misplaced or missing `RANGE` is reported, not rejected.
//! - **Human-readable output** - Make it easy to see what a trace will ask of an engine.

mod inspect;
mod shape;

pub use inspect::{
    format_report_pretty, inspect_trace, InspectReport, KeyStats, LengthRange, RangeReport,
};
pub use shape::{check_shape, ShapeViolation};
