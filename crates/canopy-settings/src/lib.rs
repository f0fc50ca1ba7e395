//! Pure algorithms over settings trees.
//!
//! Currently this is the tree flattener: a depth-first conversion of a
//! nested [`canopy_types::SettingsNode`] into a flat mapping from assembled
//! [`canopy_types::SettingsPath`] to an ordered list of string payloads.

pub mod flatten;

pub use flatten::{flatten, FlatSettings};

// vim: ts=4
