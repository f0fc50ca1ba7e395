pub use crate::error::{CnResult, Error};
pub use crate::node::SettingsNode;
pub use crate::path::SettingsPath;
pub use crate::settings_client::{SettingsClient, SettingsStream, VersionedSettings};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
