//! # SecMaster Core
//!
//! Core types, domain models, and error definitions shared by every layer
//! of the security master cache.

pub mod domain;
pub mod error;
pub mod result;
pub mod timeout;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use result::*;
pub use timeout::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
