//! Kiln cooks structured data into documents: a declarative config pairs a
//! JSON data source with a template and one or more outputs, and kiln
//! expands the config into concrete render jobs, drives the template engine
//! for each, and writes the results.

/// Handles argument parsing and the `cook` subcommand.
pub mod cli;

/// Configuration types, loading, and multi-output/foreach expansion.
pub mod config;

/// Constants used across the crate.
pub mod constants;

/// Cooking orchestration and the programmatic API.
pub mod cook;

/// Data file loading and shape normalization.
pub mod data;

/// Defines custom error types.
pub mod error;

/// Path conversion helpers.
pub mod ext;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Template lookup and rendering functionality.
pub mod renderer;
