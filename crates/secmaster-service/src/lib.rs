//! # SecMaster Service
//!
//! Two-level security master cache: a mapping layer from
//! `(customer tier, asset type)` to the active physical table, and one data
//! layer per table from match-field value to client identifier.

pub mod cache;
pub mod dto;
pub mod security_master_service;
pub mod r#impl;

pub use cache::*;
pub use dto::*;
pub use r#impl::*;
pub use security_master_service::*;
