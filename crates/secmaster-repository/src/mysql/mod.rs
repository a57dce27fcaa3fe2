//! MySQL implementations of the collaborator traits.

mod asset_type_repository;
mod business_calendar;
mod security_master_dao;
mod table_switch_repository;

pub use asset_type_repository::*;
pub use business_calendar::*;
pub use security_master_dao::*;
pub use table_switch_repository::*;
