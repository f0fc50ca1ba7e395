//! Shared types for the Canopy distributed configuration client.
//!
//! This crate contains the foundational pieces shared between client
//! implementations and the code that consumes them:
//!
//! - [`path::SettingsPath`] — case-insensitive, slash-delimited address
//!   into a settings tree
//! - [`node::SettingsNode`] — the settings tree itself (objects, values,
//!   arrays)
//! - [`settings_client::SettingsClient`] — the retrieval/subscription
//!   contract implemented by client adapters
//! - [`error`] — the error type and `CnResult` alias
//!
//! Keeping these in a separate crate lets adapter crates compile in
//! parallel with the code built on top of them.

pub mod error;
pub mod node;
pub mod path;
pub mod prelude;
pub mod settings_client;

pub use error::{CnResult, Error};
pub use node::SettingsNode;
pub use path::SettingsPath;
pub use settings_client::{SettingsClient, SettingsStream, VersionedSettings};

// vim: ts=4
