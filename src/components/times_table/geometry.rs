use std::f64::consts::TAU;

use super::types::{ConnectionPolicy, DiagramParams, Vertex};

/// Below this many vertices a plain scan is as quick as a binary search.
const LINEAR_SCAN_LIMIT: usize = 64;

/// A resolved line from one vertex to wherever its multiple lands.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
	pub source_mod_number: u32,
	pub source_angle: f64,
	/// Raw `m * k mod n`, possibly fractional.
	pub next_mod_number: f64,
	/// Vertex snapped to under [`ConnectionPolicy::ExactOrNearest`].
	pub resolved_mod_number: Option<u32>,
	pub target_angle: f64,
}

/// Angular width of one vertex slot.
pub fn slice(vertex_count: u32) -> f64 {
	TAU / vertex_count as f64
}

pub fn angle(mod_number: f64, vertex_count: u32) -> f64 {
	mod_number * slice(vertex_count)
}

/// `multiplier * mod_number` reduced into `[0, vertex_count)`.
pub fn target(mod_number: u32, multiplier: f64, vertex_count: u32) -> f64 {
	let n = vertex_count as f64;
	// reduce first so huge multipliers cannot overflow to inf
	let reduced = (multiplier.rem_euclid(n) * mod_number as f64).rem_euclid(n);
	// rem_euclid may round a tiny negative up to n itself
	if reduced < n { reduced } else { 0.0 }
}

pub fn build_vertices(params: &DiagramParams) -> Vec<Vertex> {
	(0..params.vertex_count)
		.map(|k| Vertex {
			mod_number: k,
			angle: angle(k as f64, params.vertex_count),
			next_mod_number: target(k, params.multiplier, params.vertex_count),
		})
		.collect()
}

/// Linear scan for the vertex closest to `target`. Ties keep the vertex seen
/// first, so with ascending input the lower mod number wins.
pub fn nearest_vertex(vertices: &[Vertex], target: f64) -> Option<&Vertex> {
	let mut closest = vertices.first()?;
	let mut closest_diff = (closest.mod_number as f64 - target).abs();
	for vertex in vertices {
		let diff = (vertex.mod_number as f64 - target).abs();
		if diff == 0.0 {
			return Some(vertex);
		}
		if diff < closest_diff {
			closest = vertex;
			closest_diff = diff;
		}
	}
	Some(closest)
}

/// Same answer as [`nearest_vertex`] for vertices sorted by ascending mod
/// number, found by binary search instead of a full scan.
pub fn nearest_vertex_sorted(vertices: &[Vertex], target: f64) -> Option<&Vertex> {
	let first = vertices.first()?;
	let idx = vertices.partition_point(|v| (v.mod_number as f64) < target);
	let Some(above) = vertices.get(idx) else {
		return vertices.last();
	};
	if idx == 0 {
		// NaN lands here too, matching the scan's fallback to the first vertex
		return Some(first);
	}
	let below = &vertices[idx - 1];
	let (below_diff, above_diff) = (
		(below.mod_number as f64 - target).abs(),
		(above.mod_number as f64 - target).abs(),
	);
	if above_diff < below_diff {
		Some(above)
	} else {
		Some(below)
	}
}

/// Resolve every vertex's line under the selected policy. Vertices must be
/// in ascending mod-number order, as [`build_vertices`] returns them.
pub fn connections(params: &DiagramParams, vertices: &[Vertex]) -> Vec<Connection> {
	vertices
		.iter()
		.map(|vertex| {
			let (resolved_mod_number, target_angle) = match params.policy {
				ConnectionPolicy::DirectAngle => {
					(None, angle(vertex.next_mod_number, params.vertex_count))
				}
				ConnectionPolicy::ExactOrNearest => {
					let lookup: fn(&[Vertex], f64) -> Option<&Vertex> =
						if vertices.len() <= LINEAR_SCAN_LIMIT {
							nearest_vertex
						} else {
							nearest_vertex_sorted
						};
					match lookup(vertices, vertex.next_mod_number) {
						Some(v) => (Some(v.mod_number), v.angle),
						None => (None, angle(vertex.next_mod_number, params.vertex_count)),
					}
				}
			};
			Connection {
				source_mod_number: vertex.mod_number,
				source_angle: vertex.angle,
				next_mod_number: vertex.next_mod_number,
				resolved_mod_number,
				target_angle,
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPS: f64 = 1e-9;

	fn params(vertex_count: u32, multiplier: f64, policy: ConnectionPolicy) -> DiagramParams {
		DiagramParams {
			vertex_count,
			multiplier,
			policy,
		}
	}

	#[test]
	fn angles_increase_within_one_turn() {
		for n in [1, 2, 7, 100, 360] {
			let vertices = build_vertices(&params(n, 2.0, ConnectionPolicy::DirectAngle));
			assert_eq!(vertices.len(), n as usize);
			for (k, pair) in vertices.windows(2).enumerate() {
				assert!(pair[0].angle < pair[1].angle, "n={} k={}", n, k);
			}
			for v in &vertices {
				assert!((v.angle - v.mod_number as f64 * TAU / n as f64).abs() < EPS);
				assert!(v.angle >= 0.0 && v.angle < TAU);
			}
		}
	}

	#[test]
	fn targets_stay_in_range() {
		for n in [1u32, 3, 10, 100] {
			for m in [-1e308, -7.3, -2.0, 0.0, 0.5, 2.0, 2.5, 99.99, 250.0, 1e308] {
				for k in 0..n {
					let t = target(k, m, n);
					assert!((0.0..n as f64).contains(&t), "n={} m={} k={} t={}", n, m, k, t);
				}
			}
		}
	}

	#[test]
	fn huge_multiplier_keeps_angles_finite() {
		let p = params(10, 1e308, ConnectionPolicy::DirectAngle);
		let vertices = build_vertices(&p);
		for c in connections(&p, &vertices) {
			assert!(c.target_angle.is_finite(), "k={}", c.source_mod_number);
			assert!((0.0..10.0).contains(&c.next_mod_number));
		}
	}

	#[test]
	fn negative_multiplier_wraps_forward() {
		assert!((target(3, -1.0, 10) - 7.0).abs() < EPS);
	}

	#[test]
	fn exact_match_is_not_approximated() {
		let p = params(100, 2.0, ConnectionPolicy::ExactOrNearest);
		let vertices = build_vertices(&p);
		assert_eq!(vertices[1].next_mod_number, 2.0);
		let hit = nearest_vertex(&vertices, vertices[1].next_mod_number).unwrap();
		assert_eq!(hit.mod_number, 2);

		for c in connections(&p, &vertices) {
			let expected = (2 * c.source_mod_number) % 100;
			assert_eq!(c.resolved_mod_number, Some(expected));
			assert!((c.target_angle - angle(expected as f64, 100)).abs() < EPS);
		}
	}

	#[test]
	fn halfway_target_prefers_lower_mod_number() {
		let vertices = build_vertices(&params(10, 1.0, ConnectionPolicy::ExactOrNearest));
		assert_eq!(nearest_vertex(&vertices, 3.5).unwrap().mod_number, 3);
		assert_eq!(nearest_vertex_sorted(&vertices, 3.5).unwrap().mod_number, 3);
		assert_eq!(nearest_vertex(&vertices, 3.6).unwrap().mod_number, 4);
	}

	#[test]
	fn sorted_lookup_agrees_with_scan() {
		let vertices = build_vertices(&params(10, 1.0, ConnectionPolicy::ExactOrNearest));
		let mut t = -1.5;
		while t < 11.5 {
			assert_eq!(
				nearest_vertex(&vertices, t).map(|v| v.mod_number),
				nearest_vertex_sorted(&vertices, t).map(|v| v.mod_number),
				"target {}",
				t
			);
			t += 0.25;
		}
	}

	#[test]
	fn no_vertices_means_no_match() {
		assert!(nearest_vertex(&[], 1.0).is_none());
		assert!(nearest_vertex_sorted(&[], 1.0).is_none());

		let p = params(0, 2.0, ConnectionPolicy::ExactOrNearest);
		let vertices = build_vertices(&p);
		assert!(vertices.is_empty());
		assert!(connections(&p, &vertices).is_empty());
	}

	#[test]
	fn direct_angle_uses_fractional_target() {
		let p = params(100, 2.5, ConnectionPolicy::DirectAngle);
		let vertices = build_vertices(&p);
		let c = &connections(&p, &vertices)[4];
		assert!((c.next_mod_number - 10.0).abs() < EPS);
		assert!((c.target_angle - 10.0 * TAU / 100.0).abs() < EPS);
		assert_eq!(c.resolved_mod_number, None);

		let c = &connections(&p, &vertices)[3];
		assert!((c.target_angle - 7.5 * TAU / 100.0).abs() < EPS);
	}

	#[test]
	fn policies_agree_on_integer_multipliers() {
		let direct = params(36, 5.0, ConnectionPolicy::DirectAngle);
		let nearest = params(36, 5.0, ConnectionPolicy::ExactOrNearest);
		let vertices = build_vertices(&direct);
		let a = connections(&direct, &vertices);
		let b = connections(&nearest, &vertices);
		for (x, y) in a.iter().zip(&b) {
			assert!((x.target_angle - y.target_angle).abs() < EPS);
		}
	}
}
