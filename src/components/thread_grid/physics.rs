//! Damped-spring relaxation of thread control points.
//!
//! Each frame a thread's control offset is pulled toward a target made of a
//! constant gravity sag plus whatever repulsion the real and virtual pointers
//! exert on its midpoint. Damping below 1 makes every thread settle once the
//! pointers move away.

use super::pointer::PointerTracker;
use super::types::{Connector, Point};

/// Below this distance the push direction is undefined; push straight up.
const MIN_DISTANCE: f64 = 1.0;

pub mod presets {
	use super::SpringParams;

	/// Background grid threads.
	pub const GRID_THREADS: SpringParams = SpringParams {
		gravity: 20.0,
		repulsion_radius: 200.0,
		repulsion_strength: 40.0,
		virtual_strength: 20.0,
		spring_strength: 0.05,
		damping: 0.95,
		sag_midpoint: true,
	};

	/// Threads inside the call-to-action button. Horizontal only, no gravity.
	pub const BUTTON_THREADS: SpringParams = SpringParams {
		gravity: 0.0,
		repulsion_radius: 50.0,
		repulsion_strength: 12.0,
		virtual_strength: 0.0,
		spring_strength: 0.1,
		damping: 0.9,
		sag_midpoint: false,
	};
}

/// Constants of one visual context's spring model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
	/// Constant downward sag added to every Y target.
	pub gravity: f64,
	/// Pointers further than this from a midpoint exert nothing.
	pub repulsion_radius: f64,
	/// Peak push from the real pointer.
	pub repulsion_strength: f64,
	/// Peak push from the virtual pointer.
	pub virtual_strength: f64,
	pub spring_strength: f64,
	/// Velocity retained per frame, must stay below 1.
	pub damping: f64,
	/// Shift the repelled midpoint down by half the gravity so repulsion acts
	/// where the sagging curve actually hangs.
	pub sag_midpoint: bool,
}

/// Push exerted by `source` on `target`: `(1 - dist / radius) * strength`
/// directed away from the source, zero outside the radius or when either point
/// is not finite.
pub fn repulsion(source: Point, target: Point, radius: f64, strength: f64) -> Point {
	if !(source.is_finite() && target.is_finite() && radius > 0.0) {
		return Point::ZERO;
	}
	let away = target - source;
	let dist = away.length();
	if dist >= radius {
		return Point::ZERO;
	}
	let magnitude = (1.0 - dist / radius) * strength;
	let direction = if dist < MIN_DISTANCE {
		Point::new(0.0, -1.0)
	} else {
		away * (1.0 / dist)
	};
	direction * magnitude
}

/// One spring-damper step. Returns the new `(current, velocity)`; a step that
/// would leave the finite range keeps `current` and stops. A `current` that is
/// already non-finite snaps to `target` (or the origin) with zero velocity.
pub fn spring_step(
	current: Point,
	velocity: Point,
	target: Point,
	params: &SpringParams,
) -> (Point, Point) {
	if !current.is_finite() {
		let reset = if target.is_finite() { target } else { Point::ZERO };
		return (reset, Point::ZERO);
	}
	let force = (target - current) * params.spring_strength;
	let velocity = (velocity + force) * params.damping;
	let next = current + velocity;
	if next.is_finite() && velocity.is_finite() {
		(next, velocity)
	} else {
		(current, Point::ZERO)
	}
}

/// Resting offset of a connector with no pointers nearby.
pub fn rest_offset(connector: &Connector, params: &SpringParams) -> Point {
	Point::new(0.0, params.gravity + connector.base_sag)
}

/// Offset the connector is pulled toward this frame.
pub fn target_offset(
	connector: &Connector,
	pointer: &PointerTracker,
	params: &SpringParams,
) -> Point {
	let mut midpoint = connector.midpoint();
	if params.sag_midpoint {
		midpoint.y += params.gravity / 2.0;
	}
	rest_offset(connector, params)
		+ repulsion(
			pointer.real(),
			midpoint,
			params.repulsion_radius,
			params.repulsion_strength,
		)
		+ repulsion(
			pointer.virtual_position(),
			midpoint,
			params.repulsion_radius,
			params.virtual_strength,
		)
}

/// Advances every connector by one frame. `velocities` is resized to match the
/// connector set first.
pub fn step_connectors(
	connectors: &mut [Connector],
	velocities: &mut Vec<Point>,
	pointer: &PointerTracker,
	params: &SpringParams,
) {
	velocities.resize(connectors.len(), Point::ZERO);
	for (connector, velocity) in connectors.iter_mut().zip(velocities.iter_mut()) {
		let target = target_offset(connector, pointer, params);
		let (offset, v) = spring_step(connector.control_offset, *velocity, target, params);
		connector.control_offset = offset;
		*velocity = v;
	}
}

/// 1-D variant for the call-to-action button: every thread bends sideways only,
/// and only while the button is hovered.
#[derive(Debug, Clone)]
pub struct ButtonThreads {
	anchors: Vec<f64>,
	offsets: Vec<f64>,
	velocities: Vec<f64>,
	hovered: bool,
	pointer_x: f64,
	params: SpringParams,
}

impl ButtonThreads {
	/// `count` threads spread evenly across `width`, none on the borders.
	pub fn new(count: usize, width: f64, params: SpringParams) -> Self {
		let spacing = width / (count + 1) as f64;
		let anchors = (1..=count).map(|i| i as f64 * spacing).collect();
		Self {
			anchors,
			offsets: vec![0.0; count],
			velocities: vec![0.0; count],
			hovered: false,
			pointer_x: f64::NAN,
			params,
		}
	}

	pub fn anchors(&self) -> &[f64] {
		&self.anchors
	}

	pub fn offsets(&self) -> &[f64] {
		&self.offsets
	}

	#[cfg(test)]
	pub fn velocities(&self) -> &[f64] {
		&self.velocities
	}

	#[cfg(test)]
	pub fn is_hovered(&self) -> bool {
		self.hovered
	}

	/// Leaving the hover state snaps every thread back to rest immediately.
	pub fn set_hovered(&mut self, hovered: bool) {
		self.hovered = hovered;
		if !hovered {
			self.offsets.fill(0.0);
			self.velocities.fill(0.0);
			self.pointer_x = f64::NAN;
		}
	}

	/// Pointer x relative to the button's left edge.
	pub fn set_pointer_x(&mut self, x: f64) {
		self.pointer_x = if x.is_finite() { x } else { f64::NAN };
	}

	fn target(&self, anchor: f64) -> f64 {
		if !self.hovered || !self.pointer_x.is_finite() {
			return 0.0;
		}
		let radius = self.params.repulsion_radius;
		let away = anchor - self.pointer_x;
		let dist = away.abs();
		if dist >= radius {
			return 0.0;
		}
		let direction = if dist < MIN_DISTANCE { 1.0 } else { away.signum() };
		direction * (1.0 - dist / radius) * self.params.repulsion_strength
	}

	pub fn step(&mut self) {
		if !self.hovered {
			return;
		}
		for i in 0..self.anchors.len() {
			let target = self.target(self.anchors[i]);
			if !self.offsets[i].is_finite() {
				self.offsets[i] = target;
				self.velocities[i] = 0.0;
				continue;
			}
			let force = (target - self.offsets[i]) * self.params.spring_strength;
			let velocity = (self.velocities[i] + force) * self.params.damping;
			let next = self.offsets[i] + velocity;
			if next.is_finite() && velocity.is_finite() {
				self.offsets[i] = next;
				self.velocities[i] = velocity;
			} else {
				self.velocities[i] = 0.0;
			}
		}
	}
}
