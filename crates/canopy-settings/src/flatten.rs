//! Settings tree flattening
//!
//! Converts a nested settings tree into a flat mapping from assembled path
//! to ordered payload list, one entry per leaf (Value or Array) node.
//!
//! Rules:
//! - Object nodes emit nothing themselves; their name joins the path of
//!   every leaf below them.
//! - Value nodes emit one entry holding their payload.
//! - Array nodes emit one entry holding the payloads of their children in
//!   order; array children do not get keys of their own.
//! - The name of the node passed to [`flatten`] never contributes to keys;
//!   path assembly starts at its children.
//! - Empty or absent names are skipped, so a same-level unnamed leaf
//!   directly under the queried root lands on the empty path.

use std::collections::HashMap;

use canopy_types::{SettingsNode, SettingsPath};

/// Flat view of a settings tree. Keys are unique case-insensitively (the
/// `SettingsPath` Eq/Hash contract); a well-formed tree has unique sibling
/// names, so equivalent-key collisions resolve last-write-wins.
pub type FlatSettings = HashMap<SettingsPath, Vec<Box<str>>>;

/// Flatten a settings tree into a path-keyed view. An absent root yields an
/// empty mapping. Built fresh on every call; the input is not mutated.
pub fn flatten(root: Option<&SettingsNode>) -> FlatSettings {
	let mut flat = FlatSettings::new();
	let Some(root) = root else {
		return flat;
	};

	// The root's own name is excluded from every key
	match root {
		SettingsNode::Object { children, .. } => {
			let mut scope = Vec::new();
			for child in children {
				flatten_node(child, &mut scope, &mut flat);
			}
		}
		SettingsNode::Value { value, .. } => {
			flat.insert(SettingsPath::root(), value.iter().cloned().collect());
		}
		SettingsNode::Array { children, .. } => {
			flat.insert(SettingsPath::root(), array_values(children));
		}
	}

	flat
}

fn flatten_node<'a>(
	node: &'a SettingsNode,
	scope: &mut Vec<&'a str>,
	flat: &mut FlatSettings,
) {
	match node {
		SettingsNode::Object { name, children } => {
			let pushed = match name.as_deref() {
				Some(n) if !n.is_empty() => {
					scope.push(n);
					true
				}
				_ => false,
			};
			for child in children {
				flatten_node(child, scope, flat);
			}
			if pushed {
				scope.pop();
			}
		}
		SettingsNode::Value { name, value } => {
			flat.insert(assemble_key(scope, name.as_deref()), value.iter().cloned().collect());
		}
		SettingsNode::Array { name, children } => {
			flat.insert(assemble_key(scope, name.as_deref()), array_values(children));
		}
	}
}

/// Payloads of an array's children, in child order. Children without a
/// payload are skipped.
fn array_values(children: &[SettingsNode]) -> Vec<Box<str>> {
	children.iter().filter_map(SettingsNode::value).map(Box::from).collect()
}

/// Join the surviving ancestor names and the node's own name with the
/// separator. All-empty collapses to the root path.
fn assemble_key(scope: &[&str], name: Option<&str>) -> SettingsPath {
	let mut parts: Vec<&str> = scope.to_vec();
	if let Some(name) = name.filter(|n| !n.is_empty()) {
		parts.push(name);
	}
	SettingsPath::from(parts.join("/"))
}

// vim: ts=4
