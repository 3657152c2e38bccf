//! # ProjectFlow Shared Library
//!
//! Shared types, business rules, and database access used across the
//! ProjectFlow API server and the bulk importer.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, projects, tasks) and dashboard
//!   aggregations
//! - `progress`: pure status/progress engine (derived percentages, overdue
//!   classification)
//! - `auth`: password hashing, JWT tokens, auth middleware, role checks
//! - `db`: connection pool and migration runner
//! - `import`: pure planner-export mapping for the bulk importer

pub mod auth;
pub mod db;
pub mod import;
pub mod models;
pub mod progress;

/// Current version of the ProjectFlow shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
