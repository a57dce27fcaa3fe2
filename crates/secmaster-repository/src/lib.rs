//! # SecMaster Repository
//!
//! Data access for the security master cache loader.
//!
//! ```text
//! SecurityMasterService
//!   ↓  Arc<dyn AssetTypeRepository>   (enabled configuration rows)
//!   ↓  Arc<dyn TableSwitchRepository> (logical -> physical table resolution)
//!   ↓  Arc<dyn BusinessCalendar>      (current business date)
//!   ↓  Arc<dyn SecurityMasterDao>     (match field / client id projection)
//! MySql*                              (SQLx implementations)
//!   ↓
//! MySQL
//! ```

pub mod calendar;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use calendar::FixedBusinessCalendar;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
