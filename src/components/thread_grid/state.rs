use rand::Rng;

use super::config::ThreadGridConfig;
use super::connectors::ConnectorSynthesizer;
use super::grid::{DotGrid, GridLayout};
use super::physics;
#[cfg(test)]
use super::physics::SpringParams;
use super::pointer::{PARKED, PointerTracker, Sweep, SweepChannel};
use super::types::{Connector, Dot, Point};

/// Pointer distance to a rendered thread that counts as hovering it.
pub const HIT_RADIUS: f64 = 6.0;
const HIT_SAMPLES: usize = 16;

/// Everything one mounted thread grid owns: the fixed dots, the animated
/// connectors with their velocities, and both pointer channels.
pub struct ThreadGridState {
	pub dots: Vec<Dot>,
	pub connectors: Vec<Connector>,
	velocities: Vec<Point>,
	pub pointer: PointerTracker,
	sweeps: SweepChannel,
	pub config: ThreadGridConfig,
	pub width: f64,
	pub height: f64,
}

impl ThreadGridState {
	pub fn new<R: Rng + ?Sized>(
		config: ThreadGridConfig,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		let layout = GridLayout {
			width,
			height,
			dot_diameter: config.dot_diameter,
			gap: config.gap,
			overscan: config.overscan,
		};
		let grid = DotGrid::generate(&layout, config.dot_colors, rng);
		let mut synth = ConnectorSynthesizer::new(config.thread_colors);
		let connectors: Vec<Connector> = config
			.policies
			.iter()
			.flat_map(|policy| synth.synthesize(&grid, policy, &mut *rng))
			.collect();

		Self {
			velocities: vec![Point::ZERO; connectors.len()],
			dots: grid.dots,
			connectors,
			pointer: PointerTracker::default(),
			sweeps: SweepChannel::new(config.sweep.overlap),
			config,
			width,
			height,
		}
	}

	#[cfg(test)]
	pub fn params(&self) -> &SpringParams {
		&self.config.physics
	}

	#[cfg(test)]
	pub fn velocities(&self) -> &[Point] {
		&self.velocities
	}

	/// Replaces the connector set and resizes the velocities to match.
	#[cfg(test)]
	pub fn set_connectors(&mut self, connectors: Vec<Connector>) {
		self.connectors = connectors;
		self.velocities.resize(self.connectors.len(), Point::ZERO);
		self.set_hover(None);
	}

	pub fn has_connectors(&self) -> bool {
		!self.connectors.is_empty()
	}

	/// One physics frame over every connector. Hover follows the threads as
	/// they move under a still pointer.
	pub fn tick(&mut self) {
		physics::step_connectors(
			&mut self.connectors,
			&mut self.velocities,
			&self.pointer,
			&self.config.physics,
		);
		let hit = self.connector_at_position(self.pointer.real());
		self.set_hover(hit);
	}

	/// Pointer moved; `origin` is the container's top-left in client space.
	pub fn pointer_moved(&mut self, client: Point, origin: Point) {
		self.pointer.set_client(client, origin);
		let local = self.pointer.real();
		let hit = self.connector_at_position(local);
		self.set_hover(hit);
	}

	pub fn pointer_left(&mut self) {
		self.pointer.park_real();
		self.set_hover(None);
	}

	/// Queues a virtual sweep. Returns `true` if a sweep task should be
	/// (re)started.
	pub fn trigger_sweep(&mut self) -> bool {
		let sweep = Sweep::across(&self.config.sweep, self.width, self.height);
		self.sweeps.trigger(sweep)
	}

	/// Moves the virtual pointer for the frame at `now_ms`. Returns `false`
	/// once no sweep remains.
	pub fn advance_sweep(&mut self, now_ms: f64) -> bool {
		self.sweeps.advance(now_ms, &mut self.pointer)
	}

	/// Id of the connector whose rendered curve passes nearest `p`, within
	/// [`HIT_RADIUS`].
	pub fn connector_at_position(&self, p: Point) -> Option<usize> {
		if !p.is_finite() || p == PARKED {
			return None;
		}
		self.connectors
			.iter()
			.filter_map(|c| {
				let d = (0..=HIT_SAMPLES)
					.map(|s| c.curve_point(s as f64 / HIT_SAMPLES as f64).distance(p))
					.fold(f64::INFINITY, f64::min);
				(d < HIT_RADIUS).then_some((c.id, d))
			})
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(id, _)| id)
	}

	/// Marks the connector with `id` as hovered and clears every other one.
	pub fn set_hover(&mut self, id: Option<usize>) {
		for c in &mut self.connectors {
			c.hovered = Some(c.id) == id;
		}
	}

	#[cfg(test)]
	pub fn hovered(&self) -> Option<usize> {
		self.connectors.iter().find(|c| c.hovered).map(|c| c.id)
	}
}
