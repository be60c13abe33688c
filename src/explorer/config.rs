use force_graph::SimulationParameters;

/// Tuning for a single layout run.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
	/// Ticks a run performs before it stops, whether or not it settled.
	pub max_iterations: usize,
	/// Fraction of the remaining distance the displayed bounding box moves per tick.
	pub ease: f64,
	/// Only every Nth tick carries placements.
	pub repaint_every: usize,
	/// Simulation time step per tick, in seconds.
	pub time_step: f32,
	/// Screen-space padding around the laid out graph.
	pub margin: f64,
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
	pub node_mass: f32,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			max_iterations: 200,
			ease: 0.1,
			repaint_every: 2,
			time_step: 0.016,
			margin: 40.0,
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
		}
	}
}

impl LayoutConfig {
	pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
		self.max_iterations = max_iterations;
		self
	}

	pub fn with_ease(mut self, ease: f64) -> Self {
		self.ease = ease.clamp(0.0, 1.0);
		self
	}

	pub fn with_repaint_every(mut self, repaint_every: usize) -> Self {
		self.repaint_every = repaint_every.max(1);
		self
	}

	pub(crate) fn simulation_parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

/// Top level settings for an explorer session.
#[derive(Clone, Debug)]
pub struct ExplorerConfig {
	pub layout: LayoutConfig,
	/// Distance from the anchor at which freshly fetched nodes are dropped.
	pub placement_radius: f64,
	/// Endpoint that serves node fragments, queried as `{base}?uri={id}`.
	pub fetch_base_url: String,
	/// Seed for the placement scatter.
	pub seed: u64,
}

impl Default for ExplorerConfig {
	fn default() -> Self {
		Self {
			layout: LayoutConfig::default(),
			placement_radius: 180.0,
			fetch_base_url: "/ui/dataset-browse-element".into(),
			seed: 49297,
		}
	}
}

impl ExplorerConfig {
	pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
		self.layout = layout;
		self
	}

	pub fn with_placement_radius(mut self, radius: f64) -> Self {
		self.placement_radius = radius;
		self
	}

	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = seed;
		self
	}
}
