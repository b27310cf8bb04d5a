//! Common utilities for the Lorikeet contrast auditor.
//!
//! This crate provides shared infrastructure used by all audit components:
//! - **Warning System** - colored terminal output for ignored document features

pub mod warning;
