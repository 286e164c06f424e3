//! Builder API for ergonomic history construction.
//!
//! This module provides a fluent builder for configuring a history and
//! macros for declaring state and reason enums with minimal boilerplate.

mod history;
pub mod macros;

pub use history::HistoryBuilder;
