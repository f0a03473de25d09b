//! enumgen - Enum generator for project-defined identifiers
//!
//! Turns a project's tags, layers, sorting layers and input axes into C#
//! enums with string lookup helpers, and keeps track of where each file was
//! written so later runs can overwrite, move or delete it safely.

pub mod cli;
pub mod codegen;
pub mod config;
pub mod context;
pub mod error;
pub mod fs;
pub mod ledger;
pub mod models;
pub mod preflight;
pub mod prompt;
pub mod services;
pub mod sources;
