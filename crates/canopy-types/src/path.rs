//! Case-insensitive hierarchical settings paths
//!
//! A [`SettingsPath`] addresses a subtree of the settings tree with a
//! slash-delimited string (`"logging/level"`). Construction never fails:
//! outer whitespace is trimmed, casing is ignored everywhere, and leading,
//! trailing, or repeated separators are insignificant for segment-based
//! operations. Two notions of sameness exist on purpose:
//!
//! - `==` (and hashing) compare the raw trimmed string, case-insensitively.
//!   `"foo//bar"` and `"foo/bar"` are *not* equal.
//! - [`SettingsPath::equivalent`] compares the segment sequences, so
//!   redundant separators do not matter. `"foo//bar"` and `"foo/bar"` *are*
//!   equivalent.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::hash::{Hash, Hasher};

/// Separator between path segments
pub const SEPARATOR: char = '/';

/// Case-insensitive, segment-delimited address into a settings tree
#[derive(Debug, Clone, Default)]
pub struct SettingsPath {
	raw: Option<Box<str>>,
}

/// Case-fold a string for comparison (Unicode simple case folding)
fn fold(s: &str) -> impl Iterator<Item = char> {
	s.chars().flat_map(char::to_lowercase)
}

/// Compare two strings, ignoring case. Used for whole raw paths and for
/// individual segments alike.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
	a == b || fold(a).eq(fold(b))
}

impl SettingsPath {
	/// Create a path from an optional raw string. The string is trimmed of
	/// outer whitespace; `None` and `""` both denote the root path.
	pub fn new<S: AsRef<str>>(raw: Option<S>) -> Self {
		Self { raw: raw.map(|s| Box::from(s.as_ref().trim())) }
	}

	/// The root (empty) path
	pub const fn root() -> Self {
		Self { raw: None }
	}

	/// The stored raw string, trimmed at construction. Root yields `""`.
	pub fn as_str(&self) -> &str {
		self.raw.as_deref().unwrap_or("")
	}

	/// Lazy iterator over the non-empty segments of the path.
	///
	/// Leading, trailing, and repeated separators collapse away, so the
	/// iterator never yields an empty segment. Each call restarts from the
	/// first segment.
	pub fn segments(&self) -> impl Iterator<Item = &str> {
		self.as_str().split(SEPARATOR).filter(|s| !s.is_empty())
	}

	/// True when the path has no segments (root, or separators only)
	pub fn is_root(&self) -> bool {
		self.segments().next().is_none()
	}

	/// Segment-wise prefix test.
	///
	/// Walks both segment sequences in lockstep and succeeds once `self` is
	/// exhausted. The relation is reflexive and the root path is a prefix of
	/// everything. Matching happens on segment boundaries only: `"foo"` is
	/// not a prefix of `"foofoo"`.
	pub fn is_prefix_of(&self, other: &SettingsPath) -> bool {
		let mut ours = self.segments();
		let mut theirs = other.segments();
		loop {
			match (ours.next(), theirs.next()) {
				(None, _) => return true,
				(Some(_), None) => return false,
				(Some(a), Some(b)) => {
					if !eq_ignore_case(a, b) {
						return false;
					}
				}
			}
		}
	}

	/// Compute this path relative to `prefix`.
	///
	/// Succeeds when every segment of `prefix` matches the corresponding
	/// segment of `self`; the result is the remaining segments of `self`
	/// rejoined with the separator. Returns `None` when `self` runs out of
	/// segments first or a segment pair differs — a mismatch is an expected
	/// outcome, not an error. The root prefix always succeeds and yields
	/// `self` rejoined in normalized form.
	pub fn scope_to(&self, prefix: &SettingsPath) -> Option<SettingsPath> {
		let mut remaining = self.segments();
		for expected in prefix.segments() {
			match remaining.next() {
				Some(actual) if eq_ignore_case(actual, expected) => {}
				_ => return None,
			}
		}
		Some(SettingsPath::from(remaining.collect::<Vec<_>>().join("/")))
	}

	/// Segment-sequence equality, ignoring redundant separators.
	///
	/// Unlike `==`, which compares the raw string, this holds for
	/// `"foo//bar"` vs `"foo/bar"`.
	pub fn equivalent(&self, other: &SettingsPath) -> bool {
		let mut ours = self.segments();
		let mut theirs = other.segments();
		loop {
			match (ours.next(), theirs.next()) {
				(None, None) => return true,
				(Some(a), Some(b)) if eq_ignore_case(a, b) => {}
				_ => return false,
			}
		}
	}

	/// Canonical string form: segments rejoined with a single separator,
	/// no leading or trailing separator. Idempotent.
	pub fn normalized(&self) -> String {
		let mut out = String::with_capacity(self.as_str().len());
		for (i, segment) in self.segments().enumerate() {
			if i > 0 {
				out.push(SEPARATOR);
			}
			out.push_str(segment);
		}
		out
	}
}

impl From<&str> for SettingsPath {
	fn from(raw: &str) -> Self {
		Self::new(Some(raw))
	}
}

impl From<String> for SettingsPath {
	fn from(raw: String) -> Self {
		Self::new(Some(raw))
	}
}

impl From<Option<&str>> for SettingsPath {
	fn from(raw: Option<&str>) -> Self {
		Self::new(raw)
	}
}

impl std::fmt::Display for SettingsPath {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Raw-string equality, case-insensitive. A path with redundant separators
/// is not equal to its normalized form (use [`SettingsPath::equivalent`]
/// for the segment-based relation).
impl PartialEq for SettingsPath {
	fn eq(&self, other: &Self) -> bool {
		eq_ignore_case(self.as_str(), other.as_str())
	}
}

impl Eq for SettingsPath {}

impl Hash for SettingsPath {
	fn hash<H: Hasher>(&self, state: &mut H) {
		for c in fold(self.as_str()) {
			state.write_u32(c as u32);
		}
	}
}

impl Serialize for SettingsPath {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for SettingsPath {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = Option::<String>::deserialize(deserializer)?;
		Ok(SettingsPath::new(raw))
	}
}


// vim: ts=4
