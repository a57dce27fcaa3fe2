//! Domain models for the security master cache.
//!
//! These are read-only snapshots of configuration and reference data; none
//! of them is mutated during a load cycle.

mod asset_type;
mod security_master;
mod table_switch;

pub use asset_type::*;
pub use security_master::*;
pub use table_switch::*;
