//! Photo acquisition module
//!
//! This module consolidates:
//! - Photo decoding with orientation fix-up (image.rs)
//! - Camera sources behind an async access/capture seam (camera.rs)

pub mod camera;
pub mod image;
