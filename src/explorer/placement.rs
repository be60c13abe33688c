use std::f64::consts::PI;

use super::renderer::Offset;

/// Drops new nodes at a random angle and fixed distance from their anchor.
///
/// Purely cosmetic; the layout engine starts from wherever nodes end up.
#[derive(Clone, Debug)]
pub struct Scatter {
	state: u64,
	radius: f64,
}

impl Scatter {
	pub fn new(seed: u64, radius: f64) -> Self {
		Self {
			state: seed,
			radius,
		}
	}

	/// Linear congruential step, uniform in `[0, 1)`.
	fn next_unit(&mut self) -> f64 {
		self.state = (self.state.wrapping_add(1).wrapping_mul(9301).wrapping_add(49297)) % 233280;
		self.state as f64 / 233280.0
	}

	pub fn around(&mut self, anchor: Offset) -> Offset {
		let angle = self.next_unit() * 2.0 * PI;
		Offset::new(
			anchor.x + self.radius * angle.cos(),
			anchor.y + self.radius * angle.sin(),
		)
	}
}
