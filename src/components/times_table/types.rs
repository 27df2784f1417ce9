use std::fmt;
use std::str::FromStr;

use log::warn;

use super::error::ParsePolicyError;

/// Upper bound on vertices; every tick rebuilds all of them.
pub const MAX_VERTEX_COUNT: u32 = 10_000;

/// One point on the circle. Rebuilt wholesale whenever the vertex count or
/// the multiplier changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
	pub mod_number: u32,
	pub angle: f64,
	pub next_mod_number: f64,
}

/// How a vertex picks the point its line runs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionPolicy {
	/// Snap to the vertex whose mod number is closest to the target.
	ExactOrNearest,
	/// Draw straight to the target's angle, fractional or not.
	#[default]
	DirectAngle,
}

impl FromStr for ConnectionPolicy {
	type Err = ParsePolicyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"nearest" | "exact-or-nearest" => Ok(Self::ExactOrNearest),
			"direct" | "direct-angle" => Ok(Self::DirectAngle),
			_ => Err(ParsePolicyError(s.to_string())),
		}
	}
}

impl fmt::Display for ConnectionPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::ExactOrNearest => f.write_str("exact-or-nearest"),
			Self::DirectAngle => f.write_str("direct-angle"),
		}
	}
}

/// The mutable part of a diagram: vertex count, multiplier and policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiagramParams {
	pub vertex_count: u32,
	pub multiplier: f64,
	pub policy: ConnectionPolicy,
}

/// Everything the diagram can be configured with.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagramConfig {
	pub vertex_count: u32,
	pub initial_multiplier: f64,
	pub multiplier_increment: f64,
	pub fps: u32,
	pub policy: ConnectionPolicy,
	pub major_vertex_size: f64,
	pub minor_vertex_size: f64,
	pub labels: bool,
}

impl Default for DiagramConfig {
	fn default() -> Self {
		Self {
			vertex_count: 100,
			initial_multiplier: 2.0,
			multiplier_increment: 0.05,
			fps: 15,
			policy: ConnectionPolicy::default(),
			major_vertex_size: 2.5,
			minor_vertex_size: 1.5,
			labels: true,
		}
	}
}

impl DiagramConfig {
	/// Build a config from string parameters (`n`, `m`, `step`, `fps`,
	/// `policy`), keeping the default for anything missing or unparseable.
	pub fn from_params(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let mut config = Self::default();
		if let Some(n) = parse_param::<u32>(&lookup, "n") {
			if n > MAX_VERTEX_COUNT {
				warn!("Clamping n={} to {}", n, MAX_VERTEX_COUNT);
			}
			config.vertex_count = n.min(MAX_VERTEX_COUNT);
		}
		if let Some(m) = parse_param::<f64>(&lookup, "m").filter(|m| m.is_finite()) {
			config.initial_multiplier = m;
		}
		if let Some(step) = parse_param::<f64>(&lookup, "step").filter(|s| s.is_finite()) {
			config.multiplier_increment = step;
		}
		if let Some(fps) = parse_param::<u32>(&lookup, "fps") {
			config.fps = fps.max(1);
		}
		if let Some(policy) = parse_param(&lookup, "policy") {
			config.policy = policy;
		}
		config
	}

	/// Timer period for the animation, never below one millisecond.
	pub fn tick_interval_ms(&self) -> i32 {
		(1000 / self.fps.max(1)).max(1) as i32
	}

	pub fn params(&self) -> DiagramParams {
		DiagramParams {
			vertex_count: self.vertex_count,
			multiplier: self.initial_multiplier,
			policy: self.policy,
		}
	}
}

fn parse_param<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
	T: FromStr,
	T::Err: fmt::Display,
{
	let raw = lookup(key)?;
	match raw.parse() {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("Ignoring parameter {}={:?}: {}", key, raw, e);
			None
		}
	}
}
