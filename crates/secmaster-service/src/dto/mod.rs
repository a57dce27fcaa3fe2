//! Data Transfer Objects (DTOs).

mod load_summary;

pub use load_summary::*;
