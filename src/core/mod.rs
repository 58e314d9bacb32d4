//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Project and Action model with action extraction
//! - Error and warning types
//! - Configuration loading
//! - Path expansion utilities
//! - Rendering functions for different output formats

pub mod config;
pub mod error;
pub mod model;
pub mod paths;
pub mod render;
