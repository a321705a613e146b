use super::config::{SweepConfig, SweepOverlap};
use super::types::Point;

/// Where an inactive pointer rests: far enough off-canvas to exert nothing.
pub const PARKED: Point = Point::new(-1000.0, -1000.0);

pub fn ease_out_quart(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(4)
}

/// The two repulsion sources, in container-local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerTracker {
	real: Point,
	virtual_position: Point,
}

impl Default for PointerTracker {
	fn default() -> Self {
		Self {
			real: PARKED,
			virtual_position: PARKED,
		}
	}
}

impl PointerTracker {
	pub fn real(&self) -> Point {
		self.real
	}

	pub fn virtual_position(&self) -> Point {
		self.virtual_position
	}

	/// Records a pointer move given in client coordinates and the container's
	/// top-left corner in the same space.
	pub fn set_client(&mut self, client: Point, container_origin: Point) {
		self.set_local(client - container_origin);
	}

	/// Non-finite input (an unmeasured container) parks the pointer.
	pub fn set_local(&mut self, local: Point) {
		self.real = if local.is_finite() { local } else { PARKED };
	}

	pub fn park_real(&mut self) {
		self.real = PARKED;
	}

	pub fn set_virtual(&mut self, position: Point) {
		self.virtual_position = if position.is_finite() { position } else { PARKED };
	}

	pub fn park_virtual(&mut self) {
		self.virtual_position = PARKED;
	}
}

/// A one-shot tween moving the virtual pointer from `from` to `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sweep {
	from: Point,
	to: Point,
	duration_ms: f64,
	started_at: Option<f64>,
}

impl Sweep {
	/// A sweep across a `width` x `height` container as laid out by `config`.
	/// The clock starts on the first [`Sweep::advance`].
	pub fn across(config: &SweepConfig, width: f64, height: f64) -> Self {
		let scale = |p: Point| Point::new(p.x * width, p.y * height);
		Self {
			from: scale(config.from),
			to: scale(config.to),
			duration_ms: config.duration_ms,
			started_at: None,
		}
	}

	/// Moves the virtual pointer to its position at `now_ms`. Returns `false`
	/// once the sweep has finished, after parking the pointer.
	pub fn advance(&mut self, now_ms: f64, pointer: &mut PointerTracker) -> bool {
		let started_at = *self.started_at.get_or_insert(now_ms);
		let progress = if self.duration_ms > 0.0 {
			((now_ms - started_at) / self.duration_ms).clamp(0.0, 1.0)
		} else {
			1.0
		};
		if progress >= 1.0 || !progress.is_finite() {
			pointer.park_virtual();
			return false;
		}
		pointer.set_virtual(self.from.lerp(self.to, ease_out_quart(progress)));
		true
	}
}

/// Owns the in-flight sweep, if any, and applies the overlap policy.
#[derive(Clone, Debug, Default)]
pub struct SweepChannel {
	active: Option<Sweep>,
	overlap: SweepOverlap,
}

impl SweepChannel {
	pub fn new(overlap: SweepOverlap) -> Self {
		Self {
			active: None,
			overlap,
		}
	}

	#[cfg(test)]
	pub fn is_running(&self) -> bool {
		self.active.is_some()
	}

	/// Returns `true` when `sweep` was accepted and a frame task should run.
	pub fn trigger(&mut self, sweep: Sweep) -> bool {
		match (&self.active, self.overlap) {
			(Some(_), SweepOverlap::Ignore) => false,
			_ => {
				self.active = Some(sweep);
				true
			}
		}
	}

	/// Returns `false` when no sweep remains.
	pub fn advance(&mut self, now_ms: f64, pointer: &mut PointerTracker) -> bool {
		let Some(sweep) = self.active.as_mut() else {
			return false;
		};
		if sweep.advance(now_ms, pointer) {
			return true;
		}
		self.active = None;
		false
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config(overlap: SweepOverlap) -> SweepConfig {
		SweepConfig {
			from: Point::new(0.0, 0.5),
			to: Point::new(1.0, 0.5),
			duration_ms: 1000.0,
			overlap,
		}
	}

	#[test]
	fn easing_endpoints_and_shape() {
		assert_eq!(ease_out_quart(0.0), 0.0);
		assert_eq!(ease_out_quart(1.0), 1.0);
		assert!((ease_out_quart(0.5) - 0.9375).abs() < 1e-12);
	}

	#[test]
	fn client_coordinates_become_local() {
		let mut pointer = PointerTracker::default();
		pointer.set_client(Point::new(310.0, 125.0), Point::new(300.0, 100.0));
		assert_eq!(pointer.real(), Point::new(10.0, 25.0));

		pointer.set_client(Point::new(10.0, 10.0), Point::new(f64::NAN, 0.0));
		assert_eq!(pointer.real(), PARKED);
	}

	#[test]
	fn sweep_eases_then_parks() {
		let mut pointer = PointerTracker::default();
		let mut sweep = Sweep::across(&config(SweepOverlap::Ignore), 400.0, 200.0);

		assert!(sweep.advance(5000.0, &mut pointer));
		assert_eq!(pointer.virtual_position(), Point::new(0.0, 100.0));

		assert!(sweep.advance(5500.0, &mut pointer));
		assert!((pointer.virtual_position().x - 400.0 * 0.9375).abs() < 1e-9);
		assert_eq!(pointer.real(), PARKED);

		assert!(!sweep.advance(6000.0, &mut pointer));
		assert_eq!(pointer.virtual_position(), PARKED);
	}

	#[test]
	fn ignore_policy_drops_overlapping_trigger() {
		let mut pointer = PointerTracker::default();
		let cfg = config(SweepOverlap::Ignore);
		let mut channel = SweepChannel::new(cfg.overlap);
		assert!(channel.trigger(Sweep::across(&cfg, 100.0, 100.0)));
		channel.advance(0.0, &mut pointer);
		channel.advance(600.0, &mut pointer);
		assert!(!channel.trigger(Sweep::across(&cfg, 100.0, 100.0)));

		assert!(!channel.advance(1000.0, &mut pointer));
		assert!(!channel.is_running());
		assert!(channel.trigger(Sweep::across(&cfg, 100.0, 100.0)));
	}

	#[test]
	fn restart_policy_replaces_running_sweep() {
		let mut pointer = PointerTracker::default();
		let cfg = config(SweepOverlap::Restart);
		let mut channel = SweepChannel::new(cfg.overlap);
		channel.trigger(Sweep::across(&cfg, 100.0, 100.0));
		channel.advance(0.0, &mut pointer);
		channel.advance(900.0, &mut pointer);

		assert!(channel.trigger(Sweep::across(&cfg, 100.0, 100.0)));
		assert!(channel.advance(950.0, &mut pointer));
		assert_eq!(pointer.virtual_position(), Point::new(0.0, 50.0));
	}

	#[test]
	fn zero_duration_finishes_immediately() {
		let mut pointer = PointerTracker::default();
		let mut cfg = config(SweepOverlap::Ignore);
		cfg.duration_ms = 0.0;
		let mut sweep = Sweep::across(&cfg, 100.0, 100.0);
		assert!(!sweep.advance(1.0, &mut pointer));
		assert_eq!(pointer.virtual_position(), PARKED);
	}
}
