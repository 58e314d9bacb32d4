//! Backends module - Filesystem-facing scans
//!
//! This module provides:
//! - Project source scanning (directories and project list documents)
//! - Inbox item counting

pub mod inbox;
pub mod projects;
