//! Shared CLI presentation utilities.
//!
//! Format-only: nothing here makes decisions about outcomes.
//! stdout carries results; prompts and logs go to stderr.

pub mod summary;
pub mod tables;

pub use summary::{print_summary, render_summary};
pub use tables::{format_size, print_separator, truncate_string};
