//! Settings tree nodes
//!
//! [`SettingsNode`] is the tree shape returned by settings clients: a closed
//! set of three variants matched exhaustively by everything that consumes
//! it. Node names may be absent or empty; both are treated as unnamed.

use serde::{Deserialize, Serialize};

use crate::path::{eq_ignore_case, SettingsPath};

/// One node of a settings tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SettingsNode {
	/// Inner node with named, ordered children
	Object { name: Option<Box<str>>, children: Vec<SettingsNode> },
	/// Leaf with a single optional string payload
	Value { name: Option<Box<str>>, value: Option<Box<str>> },
	/// Leaf-like node whose ordered children each carry a payload
	Array { name: Option<Box<str>>, children: Vec<SettingsNode> },
}

const NO_CHILDREN: &[SettingsNode] = &[];

impl SettingsNode {
	pub fn object<N: Into<Box<str>>>(name: N, children: Vec<SettingsNode>) -> Self {
		Self::Object { name: Some(name.into()), children }
	}

	pub fn leaf<N: Into<Box<str>>, V: Into<Box<str>>>(name: N, value: V) -> Self {
		Self::Value { name: Some(name.into()), value: Some(value.into()) }
	}

	/// Leaf with a name but no payload
	pub fn value_absent<N: Into<Box<str>>>(name: N) -> Self {
		Self::Value { name: Some(name.into()), value: None }
	}

	pub fn array<N: Into<Box<str>>>(name: N, children: Vec<SettingsNode>) -> Self {
		Self::Array { name: Some(name.into()), children }
	}

	/// The node's name; `None` for unnamed nodes
	pub fn name(&self) -> Option<&str> {
		match self {
			SettingsNode::Object { name, .. }
			| SettingsNode::Value { name, .. }
			| SettingsNode::Array { name, .. } => name.as_deref(),
		}
	}

	/// The payload of a Value node; `None` for other variants or an absent
	/// payload
	pub fn value(&self) -> Option<&str> {
		match self {
			SettingsNode::Value { value, .. } => value.as_deref(),
			_ => None,
		}
	}

	/// Ordered children; empty for Value nodes
	pub fn children(&self) -> &[SettingsNode] {
		match self {
			SettingsNode::Object { children, .. } | SettingsNode::Array { children, .. } => {
				children
			}
			SettingsNode::Value { .. } => NO_CHILDREN,
		}
	}

	/// Find a direct child by name, ignoring case
	pub fn child(&self, name: &str) -> Option<&SettingsNode> {
		self.children()
			.iter()
			.find(|c| c.name().is_some_and(|n| eq_ignore_case(n, name)))
	}

	/// Descend to the subtree addressed by `path`, one segment per level.
	/// Returns `None` when any segment has no matching child. The root path
	/// yields the node itself.
	pub fn scope_to(&self, path: &SettingsPath) -> Option<&SettingsNode> {
		let mut current = self;
		for segment in path.segments() {
			current = current.child(segment)?;
		}
		Some(current)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_tree() -> SettingsNode {
		SettingsNode::object(
			"root",
			vec![SettingsNode::object(
				"logging",
				vec![
					SettingsNode::leaf("level", "debug"),
					SettingsNode::array(
						"sinks",
						vec![
							SettingsNode::leaf("0", "console"),
							SettingsNode::leaf("1", "file"),
						],
					),
				],
			)],
		)
	}

	#[test]
	fn test_child_lookup_ignores_case() {
		let tree = sample_tree();
		assert!(tree.child("LOGGING").is_some());
		assert!(tree.child("nope").is_none());
	}

	#[test]
	fn test_scope_to_descends_segments() {
		let tree = sample_tree();
		let level = tree.scope_to(&SettingsPath::from("Logging/LEVEL"));
		assert_eq!(level.and_then(SettingsNode::value), Some("debug"));
	}

	#[test]
	fn test_scope_to_root_is_identity() {
		let tree = sample_tree();
		assert_eq!(tree.scope_to(&SettingsPath::root()), Some(&tree));
	}

	#[test]
	fn test_scope_to_missing_segment() {
		let tree = sample_tree();
		assert_eq!(tree.scope_to(&SettingsPath::from("logging/missing")), None);
	}

	#[test]
	fn test_value_node_has_no_children() {
		let leaf = SettingsNode::leaf("k", "v");
		assert!(leaf.children().is_empty());
		assert_eq!(leaf.value(), Some("v"));
		assert_eq!(SettingsNode::value_absent("k").value(), None);
	}
}

// vim: ts=4
