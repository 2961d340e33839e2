//! Crate-level tests for the simulation.
//!
//! - **Integration tests**: full simulation runs through level geometry
//! - **Determinism tests**: identical input scripts give identical states
//! - **Helpers**: level builders and input script generators
//!
//! # Test Structure
//!
//! - `integration.rs`: End-to-end movement through rooms and corridors
//! - `determinism.rs`: Replay and snapshot equality
//! - `helpers.rs`: Test setup utilities and factory functions

mod helpers;
