//! Core application module
//!
//! This module contains:
//! - Application entry point and command loop
//! - User notification types and presenters

pub mod app;
pub mod notice;
