//! Editing session module
//!
//! This module contains:
//! - Session state (photo, overlays, filters)
//! - Message types for session interactions

pub mod messages;
pub mod state;
