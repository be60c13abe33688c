use std::collections::HashMap;

use log::debug;

use super::NodeId;
use super::renderer::Renderer;

/// One known node and the renderer handle bound to it.
#[derive(Clone, Debug)]
pub struct Node<E> {
	pub id: NodeId,
	pub element: E,
	pub visible: bool,
	pub label: Option<String>,
	pub(crate) wired: bool,
}

impl<E> Node<E> {
	pub fn is_wired(&self) -> bool {
		self.wired
	}
}

/// Known nodes keyed by identifier. Nodes are never removed, only hidden.
#[derive(Debug)]
pub struct NodeRegistry<E> {
	nodes: HashMap<NodeId, Node<E>>,
}

impl<E> Default for NodeRegistry<E> {
	fn default() -> Self {
		Self {
			nodes: HashMap::new(),
		}
	}
}

impl<E: Clone + PartialEq> NodeRegistry<E> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates or overwrites the record for `id` as visible.
	pub fn register_node(&mut self, id: &str, element: E, label: Option<String>) {
		let wired = self
			.nodes
			.get(id)
			.is_some_and(|existing| existing.wired && existing.element == element);
		debug!("register node {id}");
		self.nodes.insert(
			id.to_string(),
			Node {
				id: id.to_string(),
				element,
				visible: true,
				label,
				wired,
			},
		);
	}

	pub fn lookup(&self, id: &str) -> Option<&Node<E>> {
		self.nodes.get(id)
	}

	pub fn is_visible(&self, id: &str) -> bool {
		self.nodes.get(id).is_some_and(|n| n.visible)
	}

	/// Shows the node. Returns whether it was hidden before.
	pub fn show<R: Renderer<Element = E>>(&mut self, id: &str, renderer: &mut R) -> bool {
		match self.nodes.get_mut(id) {
			Some(node) if !node.visible => {
				node.visible = true;
				renderer.show(&node.element);
				true
			}
			_ => false,
		}
	}

	/// Hides the node. Returns whether it was visible before.
	pub fn hide<R: Renderer<Element = E>>(&mut self, id: &str, renderer: &mut R) -> bool {
		match self.nodes.get_mut(id) {
			Some(node) if node.visible => {
				node.visible = false;
				renderer.hide(&node.element);
				true
			}
			_ => false,
		}
	}

	/// Records that the renderer has wired the node's element.
	pub(crate) fn mark_wired(&mut self, id: &str) {
		if let Some(node) = self.nodes.get_mut(id) {
			node.wired = true;
		}
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Node<E>> {
		self.nodes.values()
	}

	pub fn visible(&self) -> impl Iterator<Item = &Node<E>> {
		self.nodes.values().filter(|n| n.visible)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::explorer::testing::{Call, RecordingRenderer};

	#[test]
	fn register_creates_visible_record() {
		let mut nodes = NodeRegistry::new();
		nodes.register_node("a", 1, Some("A".into()));
		let node = nodes.lookup("a").unwrap();
		assert!(node.visible);
		assert_eq!(node.element, 1);
		assert_eq!(node.label.as_deref(), Some("A"));
		assert!(nodes.lookup("b").is_none());
	}

	#[test]
	fn register_overwrites_and_reveals() {
		let mut renderer = RecordingRenderer::default();
		let mut nodes = NodeRegistry::new();
		nodes.register_node("a", 1, None);
		nodes.hide("a", &mut renderer);
		nodes.register_node("a", 2, None);
		assert_eq!(nodes.len(), 1);
		let node = nodes.lookup("a").unwrap();
		assert!(node.visible);
		assert_eq!(node.element, 2);
	}

	#[test]
	fn rebinding_a_new_element_clears_wiring() {
		let mut nodes = NodeRegistry::new();
		nodes.register_node("a", 1, None);
		nodes.mark_wired("a");
		nodes.register_node("a", 1, None);
		assert!(nodes.lookup("a").unwrap().is_wired());
		nodes.register_node("a", 2, None);
		assert!(!nodes.lookup("a").unwrap().is_wired());
	}

	#[test]
	fn show_and_hide_are_idempotent() {
		let mut renderer = RecordingRenderer::default();
		let mut nodes = NodeRegistry::new();
		nodes.register_node("a", 1, None);

		assert!(!nodes.show("a", &mut renderer));
		assert!(nodes.hide("a", &mut renderer));
		assert!(!nodes.hide("a", &mut renderer));
		assert!(!nodes.is_visible("a"));
		assert!(nodes.show("a", &mut renderer));
		assert!(nodes.is_visible("a"));

		assert_eq!(renderer.calls, vec![Call::Hide(1), Call::Show(1)]);
	}

	#[test]
	fn unknown_ids_are_ignored() {
		let mut renderer = RecordingRenderer::default();
		let mut nodes: NodeRegistry<usize> = NodeRegistry::new();
		assert!(!nodes.show("ghost", &mut renderer));
		assert!(!nodes.hide("ghost", &mut renderer));
		assert!(renderer.calls.is_empty());
	}

	#[test]
	fn visible_filters_hidden_nodes() {
		let mut renderer = RecordingRenderer::default();
		let mut nodes = NodeRegistry::new();
		nodes.register_node("a", 1, None);
		nodes.register_node("b", 2, None);
		nodes.hide("b", &mut renderer);
		let visible: Vec<_> = nodes.visible().map(|n| n.id.as_str()).collect();
		assert_eq!(visible, vec!["a"]);
	}
}
