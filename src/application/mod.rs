//! Application layer coordinating validation and the record store.
//!
//! This module holds the registry facade that every menu operation goes
//! through, and the add-student session state machine.

pub mod enrollment;
pub mod registry;

pub use enrollment::*;
pub use registry::*;
