//! # gqlsmith Bench
//!
//! Metadata fixtures for gqlsmith performance testing.

pub mod fixtures;
