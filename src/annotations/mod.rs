//! Text overlays and their message handlers
//!
//! This module provides:
//! - The overlay manager (placement, clamped dragging, z-order)
//! - Message handlers for TextMsg

pub mod handlers;
pub mod overlays;
