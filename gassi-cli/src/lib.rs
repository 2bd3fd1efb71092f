//! Gassi CLI - command-line runner for Gassi schema migrations.
//!
//! Applies the built-in migration set to SQLite, MySQL or PostgreSQL and
//! reports bookkeeping status.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
