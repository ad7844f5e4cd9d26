//! todo - Personal Task Tracker Library
//!
//! Core of the `todo` CLI: two ordered task lists, one per scope, each
//! persisted to its own JSON file.
//!
//! # Core Concepts
//!
//! - **Scope**: `local` (`./tasks.json`) or `global` (`~/tasks_global.json`)
//! - **Task**: a description and an integer priority
//! - **Identifier**: 1-based position of a task within its scope
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Optional `~/.todo.toml` and task file locations
//! - `error`: Error types and result aliases
//! - `manager`: In-memory task lists and their operations
//! - `output`: Terminal rendering and JSON envelopes
//! - `storage`: JSON file load/save per scope
//! - `task`: Task and scope types

pub mod cli;
pub mod config;
pub mod error;
pub mod manager;
pub mod output;
pub mod storage;
pub mod task;

pub use error::{Error, Result};
