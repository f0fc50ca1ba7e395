pub type CnResult<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// The first settings load failed and no cached tree exists yet.
	/// Carries the underlying cause when the client has one to report.
	LoadFailed(Option<Box<str>>),

	/// Infrastructure failure inside a client implementation (task join,
	/// channel teardown, etc.).
	Internal(Box<str>),
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::LoadFailed(Some(cause)) => {
				write!(f, "initial settings load failed: {}", cause)
			}
			Error::LoadFailed(None) => {
				write!(f, "initial settings load failed, no cached settings available")
			}
			Error::Internal(msg) => write!(f, "internal client error: {}", msg),
		}
	}
}

impl std::error::Error for Error {}

// vim: ts=4
