//! The `utils` module provides the pieces shared by every other module:
//! the error type returned by the registry and the logging bootstrap used by
//! host applications.

pub mod error;
pub mod logging;

pub use error::{RegistryError, Result};
