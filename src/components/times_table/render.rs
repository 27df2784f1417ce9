use log::trace;

use super::geometry::Connection;
use super::state::TimesTableState;
use super::surface::DrawingSurface;

const READOUT_LEN: usize = 6;

/// Circle placement for a surface of a given size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
	pub cx: f64,
	pub cy: f64,
	pub radius: f64,
}

impl Layout {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			cx: width / 2.0,
			cy: height / 2.0,
			radius: (3.0 * height) / 8.0,
		}
	}

	/// Angle zero sits on the left and angles grow clockwise on screen.
	pub fn position(&self, angle: f64) -> (f64, f64) {
		(
			self.cx - self.radius * angle.cos(),
			self.cy - self.radius * angle.sin(),
		)
	}
}

/// Debug formatting keeps a trailing `.0` on whole numbers.
fn readout(multiplier: f64) -> String {
	format!("{:?}", multiplier).chars().take(READOUT_LEN).collect()
}

fn label(c: &Connection) -> String {
	let mut text = format!(
		"Mod number: {}\nConnected to mod number: {}",
		c.source_mod_number, c.next_mod_number
	);
	if let Some(resolved) = c.resolved_mod_number {
		if resolved as f64 != c.next_mod_number {
			text.push_str(&format!("\nSnapped to mod number: {}", resolved));
		}
	}
	text
}

/// Clear the surface and draw the whole diagram again.
pub fn render<S: DrawingSurface>(state: &TimesTableState, surface: &mut S) {
	surface.clear();
	if state.connections().is_empty() {
		return;
	}

	let (width, height) = surface.size();
	let layout = Layout::new(width, height);
	let config = &state.config;

	surface.add_text(
		(9.0 * width) / 10.0,
		(9.0 * height) / 10.0,
		&readout(state.multiplier()),
	);

	for c in state.connections() {
		let (x, y) = layout.position(c.source_angle);
		let (nx, ny) = layout.position(c.target_angle);

		let marker = surface.add_point(x, y, config.major_vertex_size);
		if config.labels {
			surface.add_label(&marker, &label(c));
		}
		surface.add_point(nx, ny, config.minor_vertex_size);
		surface.add_line(x, y, nx, ny);
	}
	trace!(
		"Rendered {} connections on {}x{}",
		state.connections().len(),
		width,
		height
	);
}
