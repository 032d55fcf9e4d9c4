//! Infrastructure layer providing the record store.
//!
//! This module contains the store capability used by the registry and its
//! in-memory and JSON file implementations.

pub mod config;
pub mod memory;
pub mod persistence;
pub mod store;

pub use config::*;
pub use memory::*;
pub use persistence::*;
pub use store::*;
