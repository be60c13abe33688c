use super::fetch::NodeSummary;

/// Screen-space position of an element's origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
	pub x: f64,
	pub y: f64,
}

impl Offset {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Everything the explorer asks of a display surface.
///
/// The explorer never touches presentation beyond these calls. Elements are
/// cheap handles owned by the renderer; the registries only keep copies.
pub trait Renderer {
	type Element: Clone + PartialEq + std::fmt::Debug;

	/// Attaches a freshly fetched fragment to the surface and returns its handle.
	fn create_element(&mut self, node: &NodeSummary) -> Self::Element;

	/// Wires interaction handlers for `id` onto `element`.
	///
	/// Must be idempotent: binding an already wired element again must not
	/// cause handlers to fire twice.
	fn bind(&mut self, id: &str, element: &Self::Element);

	fn show(&mut self, element: &Self::Element);

	fn hide(&mut self, element: &Self::Element);

	/// Draws one directed connector labeled with `label`.
	fn draw_connection(&mut self, source: &Self::Element, target: &Self::Element, label: &str);

	/// Removes every connector touching `element` in a single batch.
	fn remove_all_connections(&mut self, element: &Self::Element);

	fn offset(&self, element: &Self::Element) -> Offset;

	fn set_offset(&mut self, element: &Self::Element, offset: Offset);

	fn repaint(&mut self, element: &Self::Element);

	/// Width and height of the drawing surface.
	fn surface_size(&self) -> (f64, f64);
}
