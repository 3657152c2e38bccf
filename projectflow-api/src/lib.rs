//! # ProjectFlow API Server Library
//!
//! HTTP API for the ProjectFlow dashboard: authentication, project and
//! task management, and dashboard aggregations.
//!
//! ## Module Organization
//!
//! - `app`: application state and router builder
//! - `config`: environment-based configuration
//! - `error`: unified API error type and HTTP mappings
//! - `routes`: request handlers grouped by resource

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
