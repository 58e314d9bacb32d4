//! Outline module - Org outline documents as heading trees
//!
//! The rest of the crate only sees `OutlineNode` and the `OutlineParser`
//! capability; `OrgParser` is the shipped implementation.

pub mod parse;
