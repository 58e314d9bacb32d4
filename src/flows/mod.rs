//! Flows module - Higher-level workflows over scanned projects
//!
//! Available flows:
//! - report: Next actions per project, totals and inbox status

pub mod report;
