//! Pure domain types with minimal dependencies
//!
//! This module contains core types used throughout the application.
//! Types here should have no rendering or I/O dependencies.

pub mod drag;
pub mod geometry;
pub mod overlay;

pub use drag::*;
pub use geometry::*;
pub use overlay::*;
