//! Error handling for dictpack operations
//!
//! This module re-exports the error types used throughout the codec. The
//! enum itself lives in `common` alongside the types that produce it.

pub use crate::common::DictPackError;
pub use crate::common::Phase;
pub use crate::common::Result;
