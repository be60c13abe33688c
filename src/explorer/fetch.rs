use std::collections::HashMap;
use std::future::{self, Future};
use std::rc::Rc;

use serde::Deserialize;

use super::NodeId;
use super::error::FetchError;

/// Display information for one node.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NodeSummary {
	pub id: NodeId,
	#[serde(default)]
	pub label: Option<String>,
}

/// A `(source, destination, name)` relationship observation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LinkTriple {
	pub source: NodeId,
	pub destination: NodeId,
	pub name: String,
}

impl LinkTriple {
	pub fn new(
		source: impl Into<NodeId>,
		destination: impl Into<NodeId>,
		name: impl Into<String>,
	) -> Self {
		Self {
			source: source.into(),
			destination: destination.into(),
			name: name.into(),
		}
	}
}

/// What a fetch returns: the node itself plus every relationship it declares.
///
/// Attaching a fragment registers the node and all of its links.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Fragment {
	pub node: NodeSummary,
	#[serde(default)]
	pub links: Vec<LinkTriple>,
}

impl Fragment {
	pub fn new(id: impl Into<NodeId>) -> Self {
		Self {
			node: NodeSummary {
				id: id.into(),
				label: None,
			},
			links: Vec::new(),
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.node.label = Some(label.into());
		self
	}

	pub fn with_link(
		mut self,
		source: impl Into<NodeId>,
		destination: impl Into<NodeId>,
		name: impl Into<String>,
	) -> Self {
		self.links.push(LinkTriple::new(source, destination, name));
		self
	}

	pub fn id(&self) -> &str {
		&self.node.id
	}

	pub fn from_json(json: &str) -> Result<Self, FetchError> {
		Ok(serde_json::from_str(json)?)
	}
}

/// Source of node fragments.
pub trait DataFetcher {
	fn fetch(&self, id: &str) -> impl Future<Output = Result<Fragment, FetchError>> + 'static;
}

/// Serves fragments from an in-memory dataset.
#[derive(Clone, Debug, Default)]
pub struct StaticFetcher {
	fragments: Rc<HashMap<NodeId, Fragment>>,
}

impl StaticFetcher {
	pub fn new(fragments: impl IntoIterator<Item = Fragment>) -> Self {
		let fragments = fragments
			.into_iter()
			.map(|f| (f.node.id.clone(), f))
			.collect();
		Self {
			fragments: Rc::new(fragments),
		}
	}

	/// Synchronous lookup, used to seed the root node.
	pub fn get(&self, id: &str) -> Option<&Fragment> {
		self.fragments.get(id)
	}
}

impl DataFetcher for StaticFetcher {
	fn fetch(&self, id: &str) -> impl Future<Output = Result<Fragment, FetchError>> + 'static {
		let result = self
			.fragments
			.get(id)
			.cloned()
			.ok_or_else(|| FetchError::NotFound(id.to_string()));
		future::ready(result)
	}
}
