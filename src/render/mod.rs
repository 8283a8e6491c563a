//! Photo rendering module
//!
//! This module contains:
//! - Text metrics shared between layout and rasterizing
//! - Text layout and glyph outlines (ab_glyph)
//! - Composite rendering using tiny-skia (for saving and sharing)
//! - Color filters for the base photo

pub mod filter;
pub mod geometry;
pub mod image;
pub mod text;
