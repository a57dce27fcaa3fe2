//! Result type aliases for the security master cache.

use crate::SecMasterError;

/// A specialized `Result` type for security master operations.
pub type SecMasterResult<T> = Result<T, SecMasterError>;
