//! Presentation layer handling line-oriented terminal I/O.
//!
//! This module prompts for input, prints outcomes and runs the numbered
//! menu loop on top of the registry.

pub mod console;
pub mod menu;

pub use console::*;
pub use menu::*;
