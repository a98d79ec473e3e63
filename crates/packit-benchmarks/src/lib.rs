//! packit benchmarking suite
//!
//! Benchmarks for version ordering, constraint matching, range synthesis and
//! the registry lookup service.

pub mod common;

pub use common::*;
