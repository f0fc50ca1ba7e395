//! Client contract for settings retrieval and subscription
//!
//! [`SettingsClient`] is the boundary between this crate family and the
//! machinery that actually fetches, caches, and refreshes the settings
//! tree. Implementations live in adapter crates; consumers only see a tree
//! of [`SettingsNode`]s addressed by [`SettingsPath`] prefixes and a
//! monotonically non-decreasing version tag.

use async_trait::async_trait;
use futures_core::Stream;
use std::pin::Pin;

use crate::error::CnResult;
use crate::node::SettingsNode;
use crate::path::SettingsPath;

/// A subtree paired with the version of the tree it was taken from
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedSettings {
	/// Subtree under the requested prefix; `None` when the prefix does not
	/// exist in the current tree
	pub settings: Option<SettingsNode>,
	/// Monotonically non-decreasing version of the full tree
	pub version: u64,
}

/// Reactive subscription stream. Terminates with `Err(Error::LoadFailed)`
/// when the initial load fails; a new subscription must be established to
/// retry.
pub type SettingsStream = Pin<Box<dyn Stream<Item = CnResult<VersionedSettings>> + Send>>;

/// Contract implemented by settings client adapters.
///
/// Concurrency semantics implementations must uphold:
///
/// - `get_blocking*` blocks the calling thread until the first successful
///   load, or returns `Error::LoadFailed` when that load failed and no
///   cached tree exists.
/// - `get*` suspends the calling task instead of blocking a thread, with
///   identical success/failure semantics.
/// - `subscribe` delivers an immediately-available cached value on
///   subscription when one exists, otherwise nothing until the first load
///   resolves; afterwards at most one item per observed change, in
///   non-decreasing version order. Initial-load failure terminates the
///   stream with an error; there is no implicit resubscription.
#[async_trait]
pub trait SettingsClient: Send + Sync {
	/// Subtree under `prefix`; the root prefix returns the whole tree.
	/// Blocks until the first load completes.
	fn get_blocking(&self, prefix: &SettingsPath) -> CnResult<Option<SettingsNode>>;

	/// Like [`SettingsClient::get_blocking`], with the tree version
	fn get_blocking_with_version(&self, prefix: &SettingsPath) -> CnResult<VersionedSettings>;

	/// Subtree under `prefix`, suspending until the first load completes
	async fn get(&self, prefix: &SettingsPath) -> CnResult<Option<SettingsNode>>;

	/// Like [`SettingsClient::get`], with the tree version
	async fn get_with_version(&self, prefix: &SettingsPath) -> CnResult<VersionedSettings>;

	/// Subscribe to the subtree under `prefix`
	async fn subscribe(&self, prefix: &SettingsPath) -> CnResult<SettingsStream>;
}

// vim: ts=4
