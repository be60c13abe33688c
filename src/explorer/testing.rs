//! Recording renderer shared by the explorer's unit tests.

use std::collections::HashMap;

use super::fetch::NodeSummary;
use super::renderer::{Offset, Renderer};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
	Create(String),
	Bind(String, usize),
	Show(usize),
	Hide(usize),
	Draw(usize, usize, String),
	RemoveAll(usize),
	SetOffset(usize, Offset),
	Repaint(usize),
}

#[derive(Debug)]
pub struct RecordingRenderer {
	pub calls: Vec<Call>,
	pub offsets: HashMap<usize, Offset>,
	pub size: (f64, f64),
	next: usize,
}

impl Default for RecordingRenderer {
	fn default() -> Self {
		Self {
			calls: Vec::new(),
			offsets: HashMap::new(),
			size: (800.0, 600.0),
			next: 0,
		}
	}
}

impl RecordingRenderer {
	pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
		self.calls.iter().filter(|c| pred(c)).count()
	}

	pub fn drawn(&self) -> Vec<(usize, usize, String)> {
		self.calls
			.iter()
			.filter_map(|c| match c {
				Call::Draw(s, t, label) => Some((*s, *t, label.clone())),
				_ => None,
			})
			.collect()
	}
}

impl Renderer for RecordingRenderer {
	type Element = usize;

	fn create_element(&mut self, node: &NodeSummary) -> usize {
		let element = self.next;
		self.next += 1;
		self.calls.push(Call::Create(node.id.clone()));
		element
	}

	fn bind(&mut self, id: &str, element: &usize) {
		self.calls.push(Call::Bind(id.to_string(), *element));
	}

	fn show(&mut self, element: &usize) {
		self.calls.push(Call::Show(*element));
	}

	fn hide(&mut self, element: &usize) {
		self.calls.push(Call::Hide(*element));
	}

	fn draw_connection(&mut self, source: &usize, target: &usize, label: &str) {
		self.calls
			.push(Call::Draw(*source, *target, label.to_string()));
	}

	fn remove_all_connections(&mut self, element: &usize) {
		self.calls.push(Call::RemoveAll(*element));
	}

	fn offset(&self, element: &usize) -> Offset {
		self.offsets.get(element).copied().unwrap_or_default()
	}

	fn set_offset(&mut self, element: &usize, offset: Offset) {
		self.offsets.insert(*element, offset);
		self.calls.push(Call::SetOffset(*element, offset));
	}

	fn repaint(&mut self, element: &usize) {
		self.calls.push(Call::Repaint(*element));
	}

	fn surface_size(&self) -> (f64, f64) {
		self.size
	}
}
