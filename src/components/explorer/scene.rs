use crate::explorer::{NodeId, NodeSummary, Offset, Renderer};

pub const NODE_RADIUS: f64 = 8.0;
pub const HIT_RADIUS: f64 = 14.0;

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

#[derive(Clone, Debug)]
pub struct SceneNode {
	pub id: NodeId,
	pub label: Option<String>,
	pub color: &'static str,
	pub x: f64,
	pub y: f64,
	pub visible: bool,
	pub wired: bool,
}

impl SceneNode {
	pub fn caption(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.id)
	}
}

#[derive(Clone, Debug)]
pub struct Connector {
	pub source: usize,
	pub target: usize,
	pub label: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Canvas-backed display surface. Elements are indices into `nodes`.
#[derive(Debug)]
pub struct CanvasScene {
	pub nodes: Vec<SceneNode>,
	pub connectors: Vec<Connector>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	dirty: bool,
}

impl CanvasScene {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			nodes: Vec::new(),
			connectors: Vec::new(),
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			dirty: true,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost shown, wired node under the pointer.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.nodes
			.iter()
			.enumerate()
			.rev()
			.filter(|(_, n)| n.visible && n.wired)
			.find(|(_, n)| {
				let (dx, dy) = (n.x - gx, n.y - gy);
				(dx * dx + dy * dy).sqrt() < HIT_RADIUS
			})
			.map(|(i, _)| i)
	}

	pub fn node(&self, element: usize) -> Option<&SceneNode> {
		self.nodes.get(element)
	}

	pub fn move_node(&mut self, element: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(element) {
			node.x = x;
			node.y = y;
			self.dirty = true;
		}
	}

	/// Drops any pan and zoom so graph space lines up with the canvas again.
	pub fn reset_view(&mut self) {
		self.transform = ViewTransform {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		};
		self.dirty = true;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.dirty = true;
	}

	/// Returns whether anything changed since the last call.
	pub fn take_dirty(&mut self) -> bool {
		std::mem::take(&mut self.dirty)
	}

	pub fn mark_dirty(&mut self) {
		self.dirty = true;
	}
}

impl Renderer for CanvasScene {
	type Element = usize;

	fn create_element(&mut self, node: &NodeSummary) -> usize {
		let element = self.nodes.len();
		self.nodes.push(SceneNode {
			id: node.id.clone(),
			label: node.label.clone(),
			color: COLORS[element % COLORS.len()],
			x: self.width / 2.0,
			y: self.height / 2.0,
			visible: true,
			wired: false,
		});
		self.dirty = true;
		element
	}

	fn bind(&mut self, _id: &str, element: &usize) {
		if let Some(node) = self.nodes.get_mut(*element) {
			node.wired = true;
		}
	}

	fn show(&mut self, element: &usize) {
		if let Some(node) = self.nodes.get_mut(*element) {
			node.visible = true;
			self.dirty = true;
		}
	}

	fn hide(&mut self, element: &usize) {
		if let Some(node) = self.nodes.get_mut(*element) {
			node.visible = false;
			self.dirty = true;
		}
	}

	fn draw_connection(&mut self, source: &usize, target: &usize, label: &str) {
		self.connectors.push(Connector {
			source: *source,
			target: *target,
			label: label.to_string(),
		});
		self.dirty = true;
	}

	fn remove_all_connections(&mut self, element: &usize) {
		self.connectors
			.retain(|c| c.source != *element && c.target != *element);
		self.dirty = true;
	}

	fn offset(&self, element: &usize) -> Offset {
		self.nodes
			.get(*element)
			.map(|n| Offset::new(n.x, n.y))
			.unwrap_or_default()
	}

	fn set_offset(&mut self, element: &usize, offset: Offset) {
		self.move_node(*element, offset.x, offset.y);
	}

	fn repaint(&mut self, _element: &usize) {
		self.dirty = true;
	}

	fn surface_size(&self) -> (f64, f64) {
		(self.width, self.height)
	}
}
