//! # uefappend Testkit
//!
//! Test utilities for uefappend.
//!
//! This crate provides:
//! - [`AtmBuilder`] for assembling ATM/TAP input images
//! - [`TempWorkspace`] for file-based tests
//! - [`split_chunks`] for asserting on container contents chunk by chunk
//! - Property-based test generators using proptest
//! - Hand-assembled reference containers
//!
//! It deliberately depends on no other workspace crate, so every crate
//! can use it as a dev-dependency.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod golden;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::golden::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use golden::*;
pub use vectors::*;
