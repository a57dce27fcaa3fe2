//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `security_master_service.rs`).

pub mod security_master_service_impl;

pub use security_master_service_impl::{SecurityMasterDeps, SecurityMasterServiceImpl};
