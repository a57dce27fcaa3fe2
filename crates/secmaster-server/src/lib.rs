//! # SecMaster Server Library
//!
//! Dependency wiring, startup utilities and the signal-driven run loop
//! of the security master cache process.

pub mod app;
pub mod di;
pub mod startup;
