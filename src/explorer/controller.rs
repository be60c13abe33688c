//! Expand and collapse orchestration.
//!
//! Expanding a node walks its links in one direction and, per neighbor,
//! either issues a [`FetchTicket`] (unknown node), reveals a hidden node, or
//! just materializes the connector. Fetches are driven by the caller; their
//! results come back through [`GraphController::complete_fetch`], which is the
//! only place a fetched node enters the registries.

use std::collections::HashMap;

use log::{debug, info, warn};

use super::NodeId;
use super::config::ExplorerConfig;
use super::error::{ExplorerError, FetchError};
use super::fetch::Fragment;
use super::layout::{LayoutEngine, LayoutFrame, LayoutRun};
use super::links::{Link, LinkRegistry};
use super::nodes::NodeRegistry;
use super::placement::Scatter;
use super::renderer::{Offset, Renderer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
	Outbound,
	Inbound,
}

impl Direction {
	/// Orders `(anchor, neighbor)` as `(source, destination)`.
	fn orient<'a>(self, anchor: &'a str, neighbor: &'a str) -> (&'a str, &'a str) {
		match self {
			Direction::Outbound => (anchor, neighbor),
			Direction::Inbound => (neighbor, anchor),
		}
	}
}

/// Handle for one in-flight fetch. Redeem it with
/// [`GraphController::complete_fetch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
	node: NodeId,
	serial: u64,
}

impl FetchTicket {
	pub fn node(&self) -> &str {
		&self.node
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Waiter {
	anchor: NodeId,
	direction: Direction,
}

#[derive(Debug)]
struct PendingFetch {
	serial: u64,
	waiters: Vec<Waiter>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
	/// The node was attached; `connected` connectors were drawn.
	Attached { connected: usize },
	/// The fetch failed; the error is available from `fetch_failure`.
	Failed,
	/// The ticket no longer matches a pending fetch.
	Stale,
}

/// Owns the explorer state and the renderer it drives.
pub struct GraphController<R: Renderer> {
	nodes: NodeRegistry<R::Element>,
	links: LinkRegistry,
	renderer: R,
	layout: LayoutEngine,
	scatter: Scatter,
	pending: HashMap<NodeId, PendingFetch>,
	failures: HashMap<NodeId, ExplorerError>,
	next_serial: u64,
}

impl<R: Renderer> GraphController<R> {
	pub fn new(renderer: R, config: ExplorerConfig) -> Self {
		Self {
			nodes: NodeRegistry::new(),
			links: LinkRegistry::new(),
			renderer,
			layout: LayoutEngine::new(config.layout),
			scatter: Scatter::new(config.seed, config.placement_radius),
			pending: HashMap::new(),
			failures: HashMap::new(),
			next_serial: 0,
		}
	}

	pub fn nodes(&self) -> &NodeRegistry<R::Element> {
		&self.nodes
	}

	pub fn links(&self) -> &LinkRegistry {
		&self.links
	}

	pub fn renderer(&self) -> &R {
		&self.renderer
	}

	pub fn renderer_mut(&mut self) -> &mut R {
		&mut self.renderer
	}

	pub fn is_pending(&self, id: &str) -> bool {
		self.pending.contains_key(id)
	}

	pub fn pending_count(&self) -> usize {
		self.pending.len()
	}

	pub fn fetch_failure(&self, id: &str) -> Option<&ExplorerError> {
		self.failures.get(id)
	}

	pub fn failures(&self) -> impl Iterator<Item = &ExplorerError> {
		self.failures.values()
	}

	/// Attaches the starting node at the center of the surface.
	pub fn open_root(&mut self, fragment: Fragment) -> R::Element {
		let id = fragment.node.id.clone();
		let element = self.attach(fragment);
		self.nodes.show(&id, &mut self.renderer);
		let (width, height) = self.renderer.surface_size();
		self.renderer
			.set_offset(&element, Offset::new(width / 2.0, height / 2.0));
		self.renderer.repaint(&element);
		info!("opened graph at {id}");
		element
	}

	/// Registers the fragment's node and links, creating the element only if
	/// the node is not known yet, then wires it.
	fn attach(&mut self, fragment: Fragment) -> R::Element {
		let id = fragment.node.id.clone();
		let element = match self.nodes.lookup(&id) {
			Some(existing) => existing.element.clone(),
			None => {
				let element = self.renderer.create_element(&fragment.node);
				self.nodes
					.register_node(&id, element.clone(), fragment.node.label.clone());
				element
			}
		};
		for link in &fragment.links {
			self.links
				.register(&link.source, &link.destination, &link.name);
		}
		if self.nodes.lookup(&id).is_some_and(|n| !n.wired) {
			self.renderer.bind(&id, &element);
			self.nodes.mark_wired(&id);
		}
		element
	}

	/// Expands `node` in `direction`. Returns the fetches the caller must run.
	///
	/// Expanding an unknown or hidden node does nothing.
	pub fn expand(&mut self, node: &str, direction: Direction) -> Vec<FetchTicket> {
		if !self.nodes.is_visible(node) {
			debug!("ignoring expand of {node}: not shown");
			return Vec::new();
		}
		let neighbors: Vec<NodeId> = match direction {
			Direction::Outbound => self.links.outbound(node).map(|(n, _)| n.to_string()).collect(),
			Direction::Inbound => self.links.inbound(node).map(|(n, _)| n.to_string()).collect(),
		};

		let mut tickets = Vec::new();
		for neighbor in neighbors {
			match self.nodes.lookup(&neighbor).map(|n| n.visible) {
				None => tickets.extend(self.request(&neighbor, node, direction)),
				Some(false) => {
					self.nodes.show(&neighbor, &mut self.renderer);
					self.materialize(node, &neighbor, direction);
				}
				Some(true) => {
					self.materialize(node, &neighbor, direction);
				}
			}
		}
		tickets
	}

	/// Issues a ticket for `neighbor`, or joins the fetch already in flight.
	fn request(
		&mut self,
		neighbor: &str,
		anchor: &str,
		direction: Direction,
	) -> Option<FetchTicket> {
		self.failures.remove(neighbor);
		let waiter = Waiter {
			anchor: anchor.to_string(),
			direction,
		};
		if let Some(pending) = self.pending.get_mut(neighbor) {
			debug!("fetch for {neighbor} already in flight");
			if !pending.waiters.contains(&waiter) {
				pending.waiters.push(waiter);
			}
			return None;
		}

		self.next_serial += 1;
		self.pending.insert(
			neighbor.to_string(),
			PendingFetch {
				serial: self.next_serial,
				waiters: vec![waiter],
			},
		);
		debug!("fetching {neighbor}");
		Some(FetchTicket {
			node: neighbor.to_string(),
			serial: self.next_serial,
		})
	}

	fn materialize(&mut self, anchor: &str, neighbor: &str, direction: Direction) -> bool {
		let (source, destination) = direction.orient(anchor, neighbor);
		self.connect(source, destination)
	}

	/// Draws the connector for `source -> destination` if both ends are shown
	/// and it is not drawn already.
	fn connect(&mut self, source: &str, destination: &str) -> bool {
		if !(self.nodes.is_visible(source) && self.nodes.is_visible(destination)) {
			return false;
		}
		if !self.links.connect(source, destination) {
			return false;
		}
		let (Some(src), Some(dst)) = (self.nodes.lookup(source), self.nodes.lookup(destination))
		else {
			return false;
		};
		let label = self
			.links
			.get(source, destination)
			.map(Link::label)
			.unwrap_or_default();
		debug!("connect {source} -> {destination} [{label}]");
		self.renderer
			.draw_connection(&src.element, &dst.element, &label);
		true
	}

	/// Applies the result of a fetch issued by [`expand`](Self::expand).
	pub fn complete_fetch(
		&mut self,
		ticket: FetchTicket,
		result: Result<Fragment, FetchError>,
	) -> FetchOutcome {
		let pending = match self.pending.remove(&ticket.node) {
			Some(p) if p.serial == ticket.serial => p,
			Some(p) => {
				self.pending.insert(ticket.node.clone(), p);
				return FetchOutcome::Stale;
			}
			None => return FetchOutcome::Stale,
		};
		let id = ticket.node;

		let fragment = match result {
			Ok(fragment) if fragment.id() == id => fragment,
			Ok(fragment) => {
				warn!("asked for {id}, got {}", fragment.id());
				let err = ExplorerError::FragmentMismatch {
					requested: id.clone(),
					received: fragment.id().to_string(),
				};
				self.failures.insert(id, err);
				return FetchOutcome::Failed;
			}
			Err(source) => {
				warn!("fetch for {id} failed: {source}");
				self.failures
					.insert(id.clone(), ExplorerError::Fetch { id, source });
				return FetchOutcome::Failed;
			}
		};

		// The world may have moved on while the fetch was in flight.
		let fresh = self.nodes.lookup(&id).is_none();
		let element = self.attach(fragment);
		let anchor = pending
			.waiters
			.iter()
			.find(|w| self.nodes.is_visible(&w.anchor))
			.and_then(|w| self.nodes.lookup(&w.anchor))
			.map(|n| n.element.clone());

		let Some(anchor) = anchor else {
			debug!("{id} arrived after its anchors were closed");
			// A node registered by another path while this fetch was in flight
			// keeps its visibility and connectors.
			if fresh {
				self.nodes.hide(&id, &mut self.renderer);
			}
			return FetchOutcome::Attached { connected: 0 };
		};
		if fresh {
			let at = self.scatter.around(self.renderer.offset(&anchor));
			self.renderer.set_offset(&element, at);
			self.renderer.repaint(&element);
		}
		self.nodes.show(&id, &mut self.renderer);

		let connected = pending
			.waiters
			.iter()
			.filter(|w| self.materialize(&w.anchor, &id, w.direction))
			.count();
		FetchOutcome::Attached { connected }
	}

	/// Hides `node` and removes all of its connectors in one batch.
	pub fn collapse(&mut self, node: &str) -> bool {
		let Some(element) = self.nodes.lookup(node).map(|n| n.element.clone()) else {
			debug!("ignoring collapse of unknown node {node}");
			return false;
		};
		let dropped = self.links.disconnect_all(node);
		self.renderer.remove_all_connections(&element);
		self.nodes.hide(node, &mut self.renderer);
		debug!("collapsed {node}, {dropped} connectors removed");
		true
	}

	/// Starts a layout over whatever is visible now, cancelling any earlier run.
	pub fn run_layout(&self) -> LayoutRun<R::Element> {
		self.layout.run(&self.nodes, &self.links, &self.renderer)
	}

	pub fn cancel_layout(&self) {
		self.layout.cancel();
	}

	/// Pushes a frame's placements to the renderer. Nodes hidden since the run
	/// started are skipped. Returns how many nodes moved.
	pub fn apply_frame(&mut self, frame: &LayoutFrame<R::Element>) -> usize {
		let mut moved = 0;
		for placement in &frame.placements {
			if !self.nodes.is_visible(&placement.id) {
				continue;
			}
			self.renderer
				.set_offset(&placement.element, placement.offset);
			self.renderer.repaint(&placement.element);
			moved += 1;
		}
		moved
	}
}

#[cfg(test)]
mod tests {
	use std::future::Future;
	use std::pin::pin;
	use std::task::{Context, Poll, Waker};

	use super::*;
	use crate::explorer::config::LayoutConfig;
	use crate::explorer::fetch::{DataFetcher, StaticFetcher};
	use crate::explorer::testing::{Call, RecordingRenderer};

	fn controller() -> GraphController<RecordingRenderer> {
		GraphController::new(RecordingRenderer::default(), ExplorerConfig::default())
	}

	fn resolve<F: Future>(future: F) -> F::Output {
		let mut future = pin!(future);
		let mut cx = Context::from_waker(Waker::noop());
		match future.as_mut().poll(&mut cx) {
			Poll::Ready(output) => output,
			Poll::Pending => panic!("fetch did not resolve immediately"),
		}
	}

	fn root() -> Fragment {
		Fragment::new("a")
			.with_label("A")
			.with_link("a", "b", "knows")
			.with_link("a", "b", "friendOf")
			.with_link("c", "a", "likes")
	}

	#[test]
	fn root_is_centered_and_wired() {
		let mut graph = controller();
		let element = graph.open_root(root());
		assert_eq!(element, 0);
		assert!(graph.nodes().is_visible("a"));
		assert_eq!(graph.renderer().offsets[&0], Offset::new(400.0, 300.0));
		assert_eq!(graph.renderer().count(|c| matches!(c, Call::Bind(..))), 1);
		assert_eq!(graph.links().len(), 2);
	}

	#[test]
	fn unknown_neighbor_is_fetched_once() {
		let mut graph = controller();
		graph.open_root(root());

		let tickets = graph.expand("a", Direction::Outbound);
		assert_eq!(tickets.len(), 1);
		assert_eq!(tickets[0].node(), "b");
		assert!(graph.is_pending("b"));

		// expanding again before the fetch resolves joins the pending fetch
		assert!(graph.expand("a", Direction::Outbound).is_empty());
		assert_eq!(graph.pending_count(), 1);
	}

	#[test]
	fn completion_places_and_connects_with_merged_label() {
		let mut graph = controller();
		graph.open_root(root());
		let ticket = graph.expand("a", Direction::Outbound).remove(0);

		let fragment = Fragment::new("b").with_link("a", "b", "knows");
		let outcome = graph.complete_fetch(ticket, Ok(fragment));
		assert_eq!(outcome, FetchOutcome::Attached { connected: 1 });
		assert!(!graph.is_pending("b"));
		assert_eq!(graph.renderer().drawn(), vec![(0, 1, "knows,friendOf".to_string())]);

		let at = graph.renderer().offsets[&1];
		let d = ((at.x - 400.0).powi(2) + (at.y - 300.0).powi(2)).sqrt();
		assert!((d - 180.0).abs() < 1e-6);
	}

	#[test]
	fn coalesced_waiters_all_connect() {
		let mut graph = controller();
		graph.open_root(
			Fragment::new("a")
				.with_link("a", "b", "knows")
				.with_link("b", "a", "knownBy"),
		);
		let mut tickets = graph.expand("a", Direction::Outbound);
		assert!(graph.expand("a", Direction::Inbound).is_empty());

		let outcome = graph.complete_fetch(tickets.remove(0), Ok(Fragment::new("b")));
		assert_eq!(outcome, FetchOutcome::Attached { connected: 2 });
		assert_eq!(
			graph.renderer().drawn(),
			vec![(0, 1, "knows".to_string()), (1, 0, "knownBy".to_string())]
		);
	}

	#[test]
	fn placement_follows_the_configured_radius() {
		let config = ExplorerConfig::default()
			.with_placement_radius(60.0)
			.with_seed(7)
			.with_layout(LayoutConfig::default().with_max_iterations(4));
		let mut graph = GraphController::new(RecordingRenderer::default(), config);
		graph.open_root(root());
		let ticket = graph.expand("a", Direction::Outbound).remove(0);
		graph.complete_fetch(ticket, Ok(Fragment::new("b")));

		let at = graph.renderer().offsets[&1];
		let d = ((at.x - 400.0).powi(2) + (at.y - 300.0).powi(2)).sqrt();
		assert!((d - 60.0).abs() < 1e-6);
		assert_eq!(graph.run_layout().count(), 4);
	}

	#[test]
	fn inbound_expansion_connects_neighbor_to_node() {
		let mut graph = controller();
		graph.open_root(root());
		let ticket = graph.expand("a", Direction::Inbound).remove(0);
		assert_eq!(ticket.node(), "c");
		graph.complete_fetch(ticket, Ok(Fragment::new("c")));
		assert_eq!(graph.renderer().drawn(), vec![(1, 0, "likes".to_string())]);
		assert!(graph.links().is_visible("c", "a"));
		assert!(!graph.links().is_visible("a", "b"));
	}

	#[test]
	fn reexpanding_draws_no_duplicate_connector() {
		let mut graph = controller();
		graph.open_root(root());
		let ticket = graph.expand("a", Direction::Outbound).remove(0);
		graph.complete_fetch(ticket, Ok(Fragment::new("b")));

		assert!(graph.expand("a", Direction::Outbound).is_empty());
		assert_eq!(graph.renderer().drawn().len(), 1);
	}

	#[test]
	fn collapse_removes_connectors_in_one_batch() {
		let mut graph = controller();
		graph.open_root(root());
		let ticket = graph.expand("a", Direction::Outbound).remove(0);
		graph.complete_fetch(ticket, Ok(Fragment::new("b")));
		let ticket = graph.expand("a", Direction::Inbound).remove(0);
		graph.complete_fetch(ticket, Ok(Fragment::new("c")));

		assert!(graph.collapse("a"));
		assert_eq!(graph.renderer().count(|c| matches!(c, Call::RemoveAll(_))), 1);
		assert!(graph.renderer().calls.contains(&Call::Hide(0)));
		assert!(!graph.nodes().is_visible("a"));
		assert!(!graph.links().is_visible("a", "b"));
		assert!(!graph.links().is_visible("c", "a"));
	}

	#[test]
	fn revealing_a_hidden_node_only_restores_the_expanded_link() {
		let mut graph = controller();
		graph.open_root(root());
		let ticket = graph.expand("a", Direction::Outbound).remove(0);
		graph.complete_fetch(ticket, Ok(Fragment::new("b")));
		let ticket = graph.expand("a", Direction::Inbound).remove(0);
		graph.complete_fetch(ticket, Ok(Fragment::new("c")));
		graph.collapse("a");

		// reveal a again from its inbound neighbor
		assert!(graph.expand("c", Direction::Outbound).is_empty());
		assert!(graph.nodes().is_visible("a"));
		assert!(graph.links().is_visible("c", "a"));
		assert!(!graph.links().is_visible("a", "b"));
		assert_eq!(graph.renderer().count(|c| matches!(c, Call::Create(_))), 3);
	}

	#[test]
	fn unknown_nodes_are_soft_no_ops() {
		let mut graph = controller();
		assert!(!graph.collapse("ghost"));
		assert!(graph.expand("ghost", Direction::Outbound).is_empty());
		assert!(graph.renderer().calls.is_empty());
	}

	#[test]
	fn fetch_failure_is_recorded_and_retry_clears_it() {
		let mut graph = controller();
		graph.open_root(root());
		let ticket = graph.expand("a", Direction::Outbound).remove(0);

		let outcome = graph.complete_fetch(ticket, Err(FetchError::Status(503)));
		assert_eq!(outcome, FetchOutcome::Failed);
		assert!(graph.nodes().lookup("b").is_none());
		assert!(matches!(
			graph.fetch_failure("b"),
			Some(ExplorerError::Fetch { source: FetchError::Status(503), .. })
		));

		let retry = graph.expand("a", Direction::Outbound);
		assert_eq!(retry.len(), 1);
		assert!(graph.fetch_failure("b").is_none());
	}

	#[test]
	fn mismatched_fragment_is_rejected() {
		let mut graph = controller();
		graph.open_root(root());
		let ticket = graph.expand("a", Direction::Outbound).remove(0);
		let outcome = graph.complete_fetch(ticket, Ok(Fragment::new("z")));
		assert_eq!(outcome, FetchOutcome::Failed);
		assert!(graph.nodes().lookup("z").is_none());
		assert!(matches!(
			graph.fetch_failure("b"),
			Some(ExplorerError::FragmentMismatch { .. })
		));
	}

	#[test]
	fn completing_a_ticket_twice_is_stale() {
		let mut graph = controller();
		graph.open_root(root());
		let ticket = graph.expand("a", Direction::Outbound).remove(0);
		graph.complete_fetch(ticket.clone(), Ok(Fragment::new("b")));
		assert_eq!(graph.complete_fetch(ticket, Ok(Fragment::new("b"))), FetchOutcome::Stale);
		assert_eq!(graph.renderer().count(|c| matches!(c, Call::Create(_))), 2);
	}

	#[test]
	fn old_ticket_does_not_redeem_a_newer_fetch() {
		let mut graph = controller();
		graph.open_root(root());
		let first = graph.expand("a", Direction::Outbound).remove(0);
		graph.complete_fetch(first.clone(), Err(FetchError::Network("offline".into())));
		let second = graph.expand("a", Direction::Outbound).remove(0);

		assert_eq!(graph.complete_fetch(first, Ok(Fragment::new("b"))), FetchOutcome::Stale);
		assert!(graph.is_pending("b"));
		assert!(matches!(
			graph.complete_fetch(second, Ok(Fragment::new("b"))),
			FetchOutcome::Attached { connected: 1 }
		));
	}

	#[test]
	fn node_arriving_after_its_anchor_closed_stays_hidden() {
		let mut graph = controller();
		graph.open_root(root());
		let ticket = graph.expand("a", Direction::Outbound).remove(0);
		graph.collapse("a");

		let outcome = graph.complete_fetch(ticket, Ok(Fragment::new("b")));
		assert_eq!(outcome, FetchOutcome::Attached { connected: 0 });
		assert!(graph.nodes().lookup("b").is_some());
		assert!(!graph.nodes().is_visible("b"));
		assert!(graph.renderer().drawn().is_empty());
	}

	#[test]
	fn node_registered_while_fetching_keeps_its_element_and_place() {
		let mut graph = controller();
		graph.open_root(root());
		let ticket = graph.expand("a", Direction::Outbound).remove(0);
		// b is opened directly before its fetch comes back
		graph.open_root(Fragment::new("b").with_link("b", "d", "next"));
		graph.renderer_mut().set_offset(&1, Offset::new(10.0, 20.0));

		let outcome = graph.complete_fetch(ticket, Ok(Fragment::new("b")));
		assert_eq!(outcome, FetchOutcome::Attached { connected: 1 });
		assert_eq!(graph.renderer().count(|c| matches!(c, Call::Create(_))), 2);
		assert_eq!(graph.renderer().count(|c| matches!(c, Call::Bind(id, _) if id == "b")), 1);
		assert_eq!(graph.renderer().offsets[&1], Offset::new(10.0, 20.0));
		assert_eq!(graph.renderer().drawn(), vec![(0, 1, "knows,friendOf".to_string())]);
	}

	#[test]
	fn shown_node_survives_its_anchor_closing_mid_fetch() {
		let mut graph = controller();
		graph.open_root(root());
		let ticket = graph.expand("a", Direction::Outbound).remove(0);
		graph.open_root(Fragment::new("b").with_link("b", "d", "next"));
		let next = graph.expand("b", Direction::Outbound).remove(0);
		graph.complete_fetch(next, Ok(Fragment::new("d")));
		graph.collapse("a");

		let outcome = graph.complete_fetch(ticket, Ok(Fragment::new("b")));
		assert_eq!(outcome, FetchOutcome::Attached { connected: 0 });
		assert!(graph.nodes().is_visible("b"));
		assert!(graph.links().is_visible("b", "d"));
		assert!(!graph.renderer().calls.contains(&Call::Hide(1)));
		for link in graph.links().visible_links() {
			assert!(graph.nodes().is_visible(&link.source), "{link:?}");
			assert!(graph.nodes().is_visible(&link.destination), "{link:?}");
		}
	}

	#[test]
	fn self_loops_and_repeated_triples_are_harmless() {
		let mut graph = controller();
		graph.open_root(
			Fragment::new("a")
				.with_link("a", "a", "sameAs")
				.with_link("a", "a", "sameAs"),
		);
		assert!(graph.expand("a", Direction::Outbound).is_empty());
		assert!(graph.expand("a", Direction::Inbound).is_empty());
		assert_eq!(graph.renderer().drawn(), vec![(0, 0, "sameAs".to_string())]);
		assert!(graph.collapse("a"));
	}

	#[test]
	fn fragments_from_the_fetcher_drive_expansion() {
		let fetcher = StaticFetcher::new([
			Fragment::new("b").with_link("b", "d", "next"),
			Fragment::new("d"),
		]);
		let mut graph = controller();
		graph.open_root(root());

		let mut queue = graph.expand("a", Direction::Outbound);
		while let Some(ticket) = queue.pop() {
			let result = resolve(fetcher.fetch(ticket.node()));
			let id = ticket.node().to_string();
			graph.complete_fetch(ticket, result);
			queue.extend(graph.expand(&id, Direction::Outbound));
		}
		assert!(graph.nodes().is_visible("d"));
		assert!(graph.links().is_visible("b", "d"));

		let ticket = graph.expand("a", Direction::Inbound).remove(0);
		let result = resolve(fetcher.fetch(ticket.node()));
		assert_eq!(graph.complete_fetch(ticket, result), FetchOutcome::Failed);
		assert!(matches!(
			graph.fetch_failure("c"),
			Some(ExplorerError::Fetch { source: FetchError::NotFound(_), .. })
		));
	}

	#[test]
	fn layout_frames_move_only_visible_nodes() {
		let mut graph = controller();
		graph.open_root(root());
		let ticket = graph.expand("a", Direction::Outbound).remove(0);
		graph.complete_fetch(ticket, Ok(Fragment::new("b")));

		let run = graph.run_layout();
		assert_eq!(run.node_count(), 2);
		assert_eq!(run.edge_count(), 1);
		graph.collapse("b");

		let mut moved = 0;
		for frame in run {
			moved += graph.apply_frame(&frame);
		}
		assert!(moved > 0);
		// only the repaint from its initial placement
		let repaints_of_b = graph.renderer().count(|c| matches!(c, Call::Repaint(1)));
		assert_eq!(repaints_of_b, 1);
	}

	#[test]
	fn starting_a_layout_cancels_the_previous_run() {
		let mut graph = controller();
		graph.open_root(root());
		let mut first = graph.run_layout();
		let mut second = graph.run_layout();
		assert!(first.next().is_none());
		assert!(second.next().is_some());
		graph.cancel_layout();
		assert!(second.next().is_none());
	}
}
