#![forbid(unsafe_code)]

//! In-memory implementation of the Canopy `SettingsClient` contract.
//!
//! There is no network here: a producer side (`publish` /
//! `fail_initial_load`) stands in for the fetch-and-refresh engine of a
//! real client, while the consumer side implements the full contract —
//! blocking and suspending first-load waits, versioned gets, and reactive
//! subscriptions with the documented ordering guarantees. Useful as a local
//! backend and as executable documentation of the contract in tests.

use async_trait::async_trait;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use canopy::prelude::*;

/// Adapter configuration options
#[derive(Debug, Clone)]
pub struct AdapterConfig {
	/// Broadcast channel capacity for change events
	pub broadcast_capacity: usize,
}

impl Default for AdapterConfig {
	fn default() -> Self {
		Self { broadcast_capacity: 64 }
	}
}

/// Loading state of the single cached tree
#[derive(Debug, Clone)]
enum LoadState {
	/// No load has completed yet
	Pending,
	Loaded { settings: Arc<SettingsNode>, version: u64 },
	/// The first load failed before anything was cached
	Failed { cause: Option<Box<str>> },
}

/// Event fanned out to subscriptions
#[derive(Debug, Clone)]
enum ChangeEvent {
	Updated { settings: Arc<SettingsNode>, version: u64 },
	LoadFailed { cause: Option<Box<str>> },
}

/// In-memory settings client.
///
/// Cloning is cheap and clones share the same cached tree and
/// subscriptions.
#[derive(Debug, Clone)]
pub struct MemorySettingsClient {
	state: Arc<(Mutex<LoadState>, Condvar)>,
	change_tx: broadcast::Sender<ChangeEvent>,
}

impl MemorySettingsClient {
	pub fn new() -> Self {
		Self::with_config(AdapterConfig::default())
	}

	pub fn with_config(config: AdapterConfig) -> Self {
		let (change_tx, _) = broadcast::channel(config.broadcast_capacity);
		Self {
			state: Arc::new((Mutex::new(LoadState::Pending), Condvar::new())),
			change_tx,
		}
	}

	/// Install a new settings tree, waking every blocked getter and pushing
	/// one update to each live subscription. Returns the new tree version;
	/// versions start at 1 and only grow.
	///
	/// Publishing after a failed initial load recovers the client for new
	/// calls and subscriptions; subscriptions already terminated by the
	/// failure stay terminated.
	pub fn publish(&self, settings: SettingsNode) -> u64 {
		let settings = Arc::new(settings);
		let (lock, cvar) = &*self.state;
		let mut state = lock.lock();
		let version = match &*state {
			LoadState::Loaded { version, .. } => version + 1,
			LoadState::Pending | LoadState::Failed { .. } => 1,
		};
		*state = LoadState::Loaded { settings: Arc::clone(&settings), version };
		cvar.notify_all();
		drop(state);

		debug!("Published settings tree, version={}", version);
		let _ = self.change_tx.send(ChangeEvent::Updated { settings, version });
		version
	}

	/// Mark the initial load as failed. Blocked getters wake with
	/// `Error::LoadFailed` and pending subscriptions terminate with the
	/// same error. Only meaningful while no tree has ever been published;
	/// returns false (and does nothing) once a cached tree exists.
	pub fn fail_initial_load(&self, cause: Option<&str>) -> bool {
		let cause: Option<Box<str>> = cause.map(Box::from);
		let (lock, cvar) = &*self.state;
		let mut state = lock.lock();
		if !matches!(&*state, LoadState::Pending) {
			return false;
		}
		*state = LoadState::Failed { cause: cause.clone() };
		cvar.notify_all();
		drop(state);

		warn!("Initial settings load marked as failed");
		let _ = self.change_tx.send(ChangeEvent::LoadFailed { cause });
		true
	}
}

impl Default for MemorySettingsClient {
	fn default() -> Self {
		Self::new()
	}
}

/// Block until the first load resolves, one way or the other
fn wait_first_load(state: &(Mutex<LoadState>, Condvar)) -> CnResult<(Arc<SettingsNode>, u64)> {
	let (lock, cvar) = state;
	let mut guard = lock.lock();
	loop {
		match &*guard {
			LoadState::Loaded { settings, version } => {
				return Ok((Arc::clone(settings), *version));
			}
			LoadState::Failed { cause } => return Err(Error::LoadFailed(cause.clone())),
			LoadState::Pending => cvar.wait(&mut guard),
		}
	}
}

fn scoped(settings: &SettingsNode, prefix: &SettingsPath, version: u64) -> VersionedSettings {
	VersionedSettings { settings: settings.scope_to(prefix).cloned(), version }
}

#[async_trait]
impl SettingsClient for MemorySettingsClient {
	fn get_blocking(&self, prefix: &SettingsPath) -> CnResult<Option<SettingsNode>> {
		Ok(self.get_blocking_with_version(prefix)?.settings)
	}

	fn get_blocking_with_version(&self, prefix: &SettingsPath) -> CnResult<VersionedSettings> {
		let (settings, version) = wait_first_load(&self.state)?;
		Ok(scoped(&settings, prefix, version))
	}

	async fn get(&self, prefix: &SettingsPath) -> CnResult<Option<SettingsNode>> {
		Ok(self.get_with_version(prefix).await?.settings)
	}

	async fn get_with_version(&self, prefix: &SettingsPath) -> CnResult<VersionedSettings> {
		let state = Arc::clone(&self.state);
		let prefix = prefix.clone();

		tokio::task::spawn_blocking(move || {
			let (settings, version) = wait_first_load(&state)?;
			Ok(scoped(&settings, &prefix, version))
		})
		.await
		.map_err(|e| Error::Internal(e.to_string().into()))?
	}

	async fn subscribe(&self, prefix: &SettingsPath) -> CnResult<SettingsStream> {
		// Register on the broadcast FIRST so no update is lost between the
		// snapshot below and the receive loop
		let mut rx = self.change_tx.subscribe();
		let initial = self.state.0.lock().clone();
		let prefix = prefix.clone();

		let stream = async_stream::stream! {
			let mut last_version = 0u64;

			match initial {
				LoadState::Loaded { settings, version } => {
					// Cached value is delivered immediately on subscribe
					last_version = version;
					yield Ok(scoped(&settings, &prefix, version));
				}
				LoadState::Failed { cause } => {
					yield Err(Error::LoadFailed(cause));
					return;
				}
				LoadState::Pending => {}
			}

			loop {
				match rx.recv().await {
					Ok(ChangeEvent::Updated { settings, version }) => {
						// An update raced with the snapshot above when
						// version <= last_version; versions never regress
						if version <= last_version {
							continue;
						}
						last_version = version;
						yield Ok(scoped(&settings, &prefix, version));
					}
					Ok(ChangeEvent::LoadFailed { cause }) => {
						yield Err(Error::LoadFailed(cause));
						break;
					}
					Err(broadcast::error::RecvError::Lagged(n)) => {
						warn!("Settings subscription lagged, missed {} updates", n);
						continue;
					}
					Err(broadcast::error::RecvError::Closed) => break,
				}
			}
		};

		Ok(Box::pin(stream))
	}
}

// vim: ts=4
