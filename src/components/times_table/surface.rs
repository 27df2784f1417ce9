use log::debug;
use web_sys::{Document, Element};

use super::error::SurfaceError;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Something the diagram can be drawn onto.
pub trait DrawingSurface {
	/// Handle to an emitted point marker, used to attach a label to it.
	type Marker;

	fn size(&self) -> (f64, f64);
	fn clear(&mut self);
	fn add_point(&mut self, x: f64, y: f64, radius: f64) -> Self::Marker;
	fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
	fn add_label(&mut self, marker: &Self::Marker, text: &str);
	fn add_text(&mut self, x: f64, y: f64, text: &str);
}

/// An `<svg>` element in the live document.
pub struct SvgSurface {
	document: Document,
	root: Element,
	width: f64,
	height: f64,
}

impl SvgSurface {
	pub fn find(document: &Document, id: &str) -> Result<Self, SurfaceError> {
		let root = document
			.get_element_by_id(id)
			.ok_or_else(|| SurfaceError::NotFound(id.to_string()))?;
		let width = root.client_width() as f64;
		let height = root.client_height() as f64;
		debug!("Found surface #{} ({}x{})", id, width, height);
		Ok(Self {
			document: document.clone(),
			root,
			width,
			height,
		})
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		let _ = self.root.set_attribute("width", &width.to_string());
		let _ = self.root.set_attribute("height", &height.to_string());
		let _ = self
			.root
			.set_attribute("viewBox", &format!("0 0 {} {}", width, height));
	}

	fn create(&self, tag: &str) -> Option<Element> {
		self.document.create_element_ns(Some(SVG_NS), tag).ok()
	}

	fn append(&self, elem: &Element) {
		let _ = self.root.append_child(elem);
	}
}

impl DrawingSurface for SvgSurface {
	type Marker = Option<Element>;

	fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	fn clear(&mut self) {
		let _ = self.root.replace_children_with_node_0();
	}

	fn add_point(&mut self, x: f64, y: f64, radius: f64) -> Self::Marker {
		let elem = self.create("circle")?;
		let _ = elem.set_attribute("cx", &x.to_string());
		let _ = elem.set_attribute("cy", &y.to_string());
		let _ = elem.set_attribute("r", &radius.to_string());
		self.append(&elem);
		Some(elem)
	}

	fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
		let Some(elem) = self.create("line") else {
			return;
		};
		let _ = elem.set_attribute("x1", &x1.to_string());
		let _ = elem.set_attribute("y1", &y1.to_string());
		let _ = elem.set_attribute("x2", &x2.to_string());
		let _ = elem.set_attribute("y2", &y2.to_string());
		let _ = elem.set_attribute("stroke", "black");
		self.append(&elem);
	}

	fn add_label(&mut self, marker: &Self::Marker, text: &str) {
		let (Some(parent), Some(title)) = (marker, self.create("title")) else {
			return;
		};
		title.set_text_content(Some(text));
		let _ = parent.append_child(&title);
	}

	fn add_text(&mut self, x: f64, y: f64, text: &str) {
		let Some(elem) = self.create("text") else {
			return;
		};
		let _ = elem.set_attribute("x", &x.to_string());
		let _ = elem.set_attribute("y", &y.to_string());
		elem.set_text_content(Some(text));
		self.append(&elem);
	}
}

/// In-memory surface that records what was drawn since the last clear.
#[cfg(test)]
pub mod recording {
	use super::DrawingSurface;

	#[derive(Clone, Debug, PartialEq)]
	pub enum Shape {
		Point { x: f64, y: f64, radius: f64 },
		Line { x1: f64, y1: f64, x2: f64, y2: f64 },
		Label { marker: usize, text: String },
		Text { x: f64, y: f64, text: String },
	}

	#[derive(Debug, Default)]
	pub struct RecordingSurface {
		pub width: f64,
		pub height: f64,
		pub shapes: Vec<Shape>,
		pub clears: usize,
	}

	impl RecordingSurface {
		pub fn new(width: f64, height: f64) -> Self {
			Self {
				width,
				height,
				..Self::default()
			}
		}

		pub fn points(&self) -> Vec<(f64, f64, f64)> {
			self.shapes
				.iter()
				.filter_map(|s| match *s {
					Shape::Point { x, y, radius } => Some((x, y, radius)),
					_ => None,
				})
				.collect()
		}

		pub fn lines(&self) -> Vec<(f64, f64, f64, f64)> {
			self.shapes
				.iter()
				.filter_map(|s| match *s {
					Shape::Line { x1, y1, x2, y2 } => Some((x1, y1, x2, y2)),
					_ => None,
				})
				.collect()
		}

		pub fn labels(&self) -> Vec<&str> {
			self.shapes
				.iter()
				.filter_map(|s| match s {
					Shape::Label { text, .. } => Some(text.as_str()),
					_ => None,
				})
				.collect()
		}
	}

	impl DrawingSurface for RecordingSurface {
		type Marker = usize;

		fn size(&self) -> (f64, f64) {
			(self.width, self.height)
		}

		fn clear(&mut self) {
			self.shapes.clear();
			self.clears += 1;
		}

		fn add_point(&mut self, x: f64, y: f64, radius: f64) -> usize {
			self.shapes.push(Shape::Point { x, y, radius });
			self.shapes.len() - 1
		}

		fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
			self.shapes.push(Shape::Line { x1, y1, x2, y2 });
		}

		fn add_label(&mut self, marker: &usize, text: &str) {
			self.shapes.push(Shape::Label {
				marker: *marker,
				text: text.to_string(),
			});
		}

		fn add_text(&mut self, x: f64, y: f64, text: &str) {
			self.shapes.push(Shape::Text {
				x,
				y,
				text: text.to_string(),
			});
		}
	}
}
