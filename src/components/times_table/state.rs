use log::{debug, trace};

use super::geometry::{self, Connection};
use super::types::{ConnectionPolicy, DiagramConfig, DiagramParams, Vertex};

pub struct TimesTableState {
	pub config: DiagramConfig,
	params: DiagramParams,
	vertices: Vec<Vertex>,
	connections: Vec<Connection>,
}

impl TimesTableState {
	pub fn new(config: DiagramConfig) -> Self {
		let params = config.params();
		let mut state = Self {
			config,
			params,
			vertices: Vec::new(),
			connections: Vec::new(),
		};
		state.reevaluate();
		state
	}

	/// Rebuild vertices and connections from the current params.
	fn reevaluate(&mut self) {
		self.vertices = geometry::build_vertices(&self.params);
		self.connections = geometry::connections(&self.params, &self.vertices);
		trace!(
			"Reevaluated {} vertices at multiplier {}",
			self.vertices.len(),
			self.params.multiplier
		);
	}

	/// Take on a new config, rebuilding only what changed. The tick rate is
	/// fixed once the timer is running.
	pub fn apply(&mut self, config: DiagramConfig) {
		if config.vertex_count != self.params.vertex_count {
			self.set_vertex_count(config.vertex_count);
		}
		if config.policy != self.params.policy {
			self.set_policy(config.policy);
		}
		if config.initial_multiplier != self.config.initial_multiplier {
			self.set_multiplier(config.initial_multiplier);
		}
		self.config = config;
	}

	/// Advance the multiplier by one animation step.
	pub fn tick(&mut self) {
		self.params.multiplier += self.config.multiplier_increment;
		self.reevaluate();
	}

	pub fn set_multiplier(&mut self, multiplier: f64) {
		self.params.multiplier = multiplier;
		self.reevaluate();
	}

	pub fn set_vertex_count(&mut self, vertex_count: u32) {
		debug!("Vertex count {} -> {}", self.params.vertex_count, vertex_count);
		self.params.vertex_count = vertex_count;
		self.reevaluate();
	}

	pub fn set_policy(&mut self, policy: ConnectionPolicy) {
		debug!("Connection policy {} -> {}", self.params.policy, policy);
		self.params.policy = policy;
		self.reevaluate();
	}

	pub fn multiplier(&self) -> f64 {
		self.params.multiplier
	}

	pub fn connections(&self) -> &[Connection] {
		&self.connections
	}
}
