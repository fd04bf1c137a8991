//! Property-based tests for the separation engine.
//!
//! This suite drives the whole engine through its public API over randomly
//! generated relaxations and checks:
//! - the engine terminates and never panics
//! - identical inputs reproduce identical attempt sequences and cuts
//! - every accepted cut is violated by the solution that spawned it

#[path = "../common/mod.rs"]
mod common;

mod engine_properties;
