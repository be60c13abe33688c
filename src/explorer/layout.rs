//! Force-directed layout over the visible subgraph.
//!
//! A [`LayoutRun`] is an iterator of simulation ticks. Each tick advances the
//! physics, eases the displayed bounding box toward the simulation's true
//! bounding box, and (on every Nth tick) maps simulation coordinates onto the
//! drawing surface. A run stops after a fixed number of ticks, or as soon as a
//! newer run is started on the same engine.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use force_graph::{EdgeData, ForceGraph, NodeData};
use log::{debug, info};

use super::NodeId;
use super::config::LayoutConfig;
use super::links::LinkRegistry;
use super::nodes::NodeRegistry;
use super::renderer::{Offset, Renderer};

/// Where one node should be drawn after a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement<E> {
	pub id: NodeId,
	pub element: E,
	pub offset: Offset,
}

/// Result of a single simulation tick.
#[derive(Clone, Debug)]
pub struct LayoutFrame<E> {
	/// 1-based tick number.
	pub iteration: usize,
	/// Empty on throttled ticks.
	pub placements: Vec<Placement<E>>,
}

impl<E> LayoutFrame<E> {
	pub fn is_idle(&self) -> bool {
		self.placements.is_empty()
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Bounds {
	min_x: f64,
	min_y: f64,
	max_x: f64,
	max_y: f64,
}

impl Bounds {
	fn of(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
		points
			.into_iter()
			.filter(|(x, y)| x.is_finite() && y.is_finite())
			.fold(None, |acc: Option<Self>, (x, y)| {
				Some(match acc {
					None => Self {
						min_x: x,
						min_y: y,
						max_x: x,
						max_y: y,
					},
					Some(b) => Self {
						min_x: b.min_x.min(x),
						min_y: b.min_y.min(y),
						max_x: b.max_x.max(x),
						max_y: b.max_y.max(y),
					},
				})
			})
	}

	/// Moves `fraction` of the remaining distance toward `target`.
	fn ease_toward(self, target: Self, fraction: f64) -> Self {
		let step = |from: f64, to: f64| from + (to - from) * fraction;
		Self {
			min_x: step(self.min_x, target.min_x),
			min_y: step(self.min_y, target.min_y),
			max_x: step(self.max_x, target.max_x),
			max_y: step(self.max_y, target.max_y),
		}
	}

	fn center(&self) -> (f64, f64) {
		(
			(self.min_x + self.max_x) / 2.0,
			(self.min_y + self.max_y) / 2.0,
		)
	}
}

/// Maps simulation space onto the surface so that `bounds` fits inside the
/// margins, centered and with the aspect ratio kept.
#[derive(Clone, Copy, Debug)]
struct Viewport {
	bounds: Bounds,
	width: f64,
	height: f64,
	margin: f64,
}

impl Viewport {
	fn to_screen(&self, x: f64, y: f64) -> Offset {
		let avail_w = (self.width - 2.0 * self.margin).max(1.0);
		let avail_h = (self.height - 2.0 * self.margin).max(1.0);
		let bw = (self.bounds.max_x - self.bounds.min_x).max(1.0);
		let bh = (self.bounds.max_y - self.bounds.min_y).max(1.0);
		let scale = (avail_w / bw).min(avail_h / bh);
		let (cx, cy) = self.bounds.center();
		Offset::new(
			self.width / 2.0 + (x - cx) * scale,
			self.height / 2.0 + (y - cy) * scale,
		)
	}
}

/// Starts layout runs and invalidates stale ones.
#[derive(Debug)]
pub struct LayoutEngine {
	config: LayoutConfig,
	generation: Rc<Cell<u64>>,
}

impl LayoutEngine {
	pub fn new(config: LayoutConfig) -> Self {
		Self {
			config,
			generation: Rc::new(Cell::new(0)),
		}
	}

	/// Stops any run started earlier.
	pub fn cancel(&self) {
		self.generation.set(self.generation.get() + 1);
	}

	/// Snapshots the visible subgraph and returns a run over it.
	///
	/// Visibility is read once here; nodes hidden or shown afterwards do not
	/// affect the returned run.
	pub fn run<R: Renderer>(
		&self,
		nodes: &NodeRegistry<R::Element>,
		links: &LinkRegistry,
		renderer: &R,
	) -> LayoutRun<R::Element> {
		self.cancel();
		let generation = self.generation.get();

		let mut visible: Vec<_> = nodes.visible().collect();
		visible.sort_by(|a, b| a.id.cmp(&b.id));

		let mut graph = ForceGraph::new(self.config.simulation_parameters());
		let mut members = Vec::with_capacity(visible.len());
		let mut index = HashMap::new();
		for (i, node) in visible.iter().enumerate() {
			let start = renderer.offset(&node.element);
			let (jx, jy) = jitter(i);
			let idx = graph.add_node(NodeData {
				x: (start.x + jx) as f32,
				y: (start.y + jy) as f32,
				mass: self.config.node_mass,
				is_anchor: false,
				user_data: i,
			});
			index.insert(node.id.as_str(), idx);
			members.push((node.id.clone(), node.element.clone()));
		}

		let mut edges = 0;
		for link in links.visible_links().filter(|l| !l.is_self_loop()) {
			if let (Some(&src), Some(&dst)) = (
				index.get(link.source.as_str()),
				index.get(link.destination.as_str()),
			) {
				graph.add_edge(src, dst, EdgeData::default());
				edges += 1;
			}
		}

		debug!(
			"layout run {generation}: {} nodes, {edges} springs",
			members.len()
		);
		let (width, height) = renderer.surface_size();
		LayoutRun {
			graph,
			members,
			edges,
			config: self.config.clone(),
			width,
			height,
			displayed: None,
			iteration: 0,
			generation,
			current: Rc::clone(&self.generation),
			finished: false,
		}
	}
}

impl Default for LayoutEngine {
	fn default() -> Self {
		Self::new(LayoutConfig::default())
	}
}

/// Small deterministic spread so nodes sharing a position do not sit on top
/// of each other when the simulation starts.
fn jitter(i: usize) -> (f64, f64) {
	let angle = i as f64 * 2.399_963;
	(angle.cos(), angle.sin())
}

/// One bounded layout animation.
pub struct LayoutRun<E> {
	graph: ForceGraph<usize, ()>,
	members: Vec<(NodeId, E)>,
	edges: usize,
	config: LayoutConfig,
	width: f64,
	height: f64,
	displayed: Option<Bounds>,
	iteration: usize,
	generation: u64,
	current: Rc<Cell<u64>>,
	finished: bool,
}

impl<E: Clone> LayoutRun<E> {
	pub fn iteration(&self) -> usize {
		self.iteration
	}

	pub fn node_count(&self) -> usize {
		self.members.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges
	}

	/// Whether a newer run or an explicit cancel has superseded this one.
	pub fn is_cancelled(&self) -> bool {
		self.current.get() != self.generation
	}

	pub fn is_finished(&self) -> bool {
		self.is_cancelled() || self.iteration >= self.config.max_iterations
	}

	fn positions(&self) -> Vec<(usize, f64, f64)> {
		let mut out = Vec::with_capacity(self.members.len());
		self.graph.visit_nodes(|node| {
			out.push((node.data.user_data, node.x() as f64, node.y() as f64));
		});
		out
	}

	fn placements(&self, positions: &[(usize, f64, f64)]) -> Vec<Placement<E>> {
		let Some(bounds) = self.displayed else {
			return Vec::new();
		};
		let viewport = Viewport {
			bounds,
			width: self.width,
			height: self.height,
			margin: self.config.margin,
		};
		positions
			.iter()
			.filter(|(_, x, y)| x.is_finite() && y.is_finite())
			.map(|&(i, x, y)| {
				let (id, element) = &self.members[i];
				Placement {
					id: id.clone(),
					element: element.clone(),
					offset: viewport.to_screen(x, y),
				}
			})
			.collect()
	}
}

impl<E: Clone> Iterator for LayoutRun<E> {
	type Item = LayoutFrame<E>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.is_finished() {
			if !self.finished {
				self.finished = true;
				info!(
					"layout run {} stopped after {} ticks",
					self.generation, self.iteration
				);
			}
			return None;
		}

		self.iteration += 1;
		self.graph.update(self.config.time_step);

		let positions = self.positions();
		if let Some(target) = Bounds::of(positions.iter().map(|&(_, x, y)| (x, y))) {
			self.displayed = Some(match self.displayed {
				None => target,
				Some(shown) => shown.ease_toward(target, self.config.ease),
			});
		}

		let last = self.iteration == self.config.max_iterations;
		let placements = if last || self.iteration % self.config.repaint_every.max(1) == 0 {
			self.placements(&positions)
		} else {
			Vec::new()
		};

		Some(LayoutFrame {
			iteration: self.iteration,
			placements,
		})
	}
}
