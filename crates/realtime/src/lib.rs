//! # Realtime Core
//!
//! Errors and host provider traits shared by the bus mapper crates.

mod error;
mod provider;

pub use crate::error::*;
pub use crate::provider::*;
