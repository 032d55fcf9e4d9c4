//! studentdb - Student Record Manager Library
//!
//! A menu-driven command-line manager for a collection of student records,
//! with field validation and create/read/update/delete operations.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
