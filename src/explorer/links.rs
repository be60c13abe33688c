use std::collections::{BTreeMap, HashMap};

use log::debug;

use super::NodeId;

/// All relationships observed from `source` to `destination`.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
	pub source: NodeId,
	pub destination: NodeId,
	/// Relationship names in first-seen order, without duplicates.
	pub names: Vec<String>,
	pub visible: bool,
}

impl Link {
	/// Connector label: every name, comma separated.
	pub fn label(&self) -> String {
		self.names.join(",")
	}

	pub fn is_self_loop(&self) -> bool {
		self.source == self.destination
	}
}

type LinkIdx = usize;

/// Directed links keyed by ordered node pair, with a reverse index so inbound
/// neighbors can be listed without scanning every link.
#[derive(Debug, Default)]
pub struct LinkRegistry {
	links: Vec<Link>,
	forward: HashMap<NodeId, BTreeMap<NodeId, LinkIdx>>,
	reverse: HashMap<NodeId, BTreeMap<NodeId, LinkIdx>>,
}

impl LinkRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records `name` for the ordered pair. Returns whether the name was new.
	pub fn register(&mut self, source: &str, destination: &str, name: &str) -> bool {
		if let Some(idx) = self.index(source, destination) {
			let link = &mut self.links[idx];
			if link.names.iter().any(|n| n == name) {
				return false;
			}
			link.names.push(name.to_string());
			debug!("link {source} -> {destination} now {:?}", link.names);
			return true;
		}

		let idx = self.links.len();
		self.links.push(Link {
			source: source.to_string(),
			destination: destination.to_string(),
			names: vec![name.to_string()],
			visible: false,
		});
		self.forward
			.entry(source.to_string())
			.or_default()
			.insert(destination.to_string(), idx);
		self.reverse
			.entry(destination.to_string())
			.or_default()
			.insert(source.to_string(), idx);
		debug!("link {source} -> {destination} registered as {name:?}");
		true
	}

	fn index(&self, source: &str, destination: &str) -> Option<LinkIdx> {
		self.forward.get(source)?.get(destination).copied()
	}

	pub fn get(&self, source: &str, destination: &str) -> Option<&Link> {
		self.index(source, destination).map(|idx| &self.links[idx])
	}

	pub fn is_visible(&self, source: &str, destination: &str) -> bool {
		self.get(source, destination).is_some_and(|l| l.visible)
	}

	/// Links leaving `id`, ordered by destination.
	pub fn outbound(&self, id: &str) -> impl Iterator<Item = (&str, &Link)> {
		self.forward
			.get(id)
			.into_iter()
			.flatten()
			.map(|(dst, &idx)| (dst.as_str(), &self.links[idx]))
	}

	/// Links arriving at `id`, ordered by source.
	pub fn inbound(&self, id: &str) -> impl Iterator<Item = (&str, &Link)> {
		self.reverse
			.get(id)
			.into_iter()
			.flatten()
			.map(|(src, &idx)| (src.as_str(), &self.links[idx]))
	}

	/// Marks the link visible. Returns `true` only on an invisible to visible
	/// transition, meaning the caller must draw the connector now.
	pub fn connect(&mut self, source: &str, destination: &str) -> bool {
		let Some(idx) = self.index(source, destination) else {
			return false;
		};
		let link = &mut self.links[idx];
		if link.visible {
			return false;
		}
		link.visible = true;
		true
	}

	/// Marks every link touching `id` invisible, in both directions.
	/// Returns how many links changed.
	pub fn disconnect_all(&mut self, id: &str) -> usize {
		let incident: Vec<LinkIdx> = self
			.forward
			.get(id)
			.into_iter()
			.chain(self.reverse.get(id))
			.flat_map(|m| m.values().copied())
			.collect();
		let mut changed = 0;
		for idx in incident {
			let link = &mut self.links[idx];
			if link.visible {
				link.visible = false;
				changed += 1;
			}
		}
		changed
	}

	pub fn visible_links(&self) -> impl Iterator<Item = &Link> {
		self.links.iter().filter(|l| l.visible)
	}

	pub fn len(&self) -> usize {
		self.links.len()
	}

	pub fn is_empty(&self) -> bool {
		self.links.is_empty()
	}
}
