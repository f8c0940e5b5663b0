//! drugscope-common — shared error type and sandboxed HTTP client.

pub mod error;
pub mod sandbox;

pub use error::{DrugscopeError, Result};
