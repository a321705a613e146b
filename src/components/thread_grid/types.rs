use std::ops::{Add, AddAssign, Mul, Sub};

/// A 2D coordinate in container-local pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal position, growing rightwards.
	pub x: f64,
	/// Vertical position, growing downwards.
	pub y: f64,
}

impl Point {
	/// The origin, also the zero vector.
	pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

	/// Creates a point.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Point halfway between `self` and `other`.
	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		(other - self).length()
	}

	/// Vector length.
	pub fn length(self) -> f64 {
		self.x.hypot(self.y)
	}

	/// Linear interpolation, `t = 0` yields `self`.
	pub fn lerp(self, other: Point, t: f64) -> Point {
		self + (other - self) * t
	}

	/// Both components are neither NaN nor infinite.
	pub fn is_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl AddAssign for Point {
	fn add_assign(&mut self, rhs: Point) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Point {
	type Output = Point;

	fn mul(self, rhs: f64) -> Point {
		Point::new(self.x * rhs, self.y * rhs)
	}
}

/// A fixed decorative point in the background lattice.
#[derive(Clone, Debug, PartialEq)]
pub struct Dot {
	/// Unique within one generated grid.
	pub id: usize,
	/// Center x.
	pub x: f64,
	/// Center y.
	pub y: f64,
	/// Lattice column, 0 is the leftmost overscan column.
	pub column: usize,
	/// Lattice row, 0 is the topmost overscan row.
	pub row: usize,
	/// CSS color.
	pub color: &'static str,
	/// Circle radius.
	pub radius: f64,
}

impl Dot {
	/// Center of the dot.
	pub fn position(&self) -> Point {
		Point::new(self.x, self.y)
	}
}

/// A curved thread between two fixed anchors. Only `control_offset` and
/// `hovered` change after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
	/// Sequential id, never reused within a synthesizer.
	pub id: usize,
	/// First anchor.
	pub start: Point,
	/// Second anchor.
	pub end: Point,
	/// Per-connector bias added to the gravity sag.
	pub base_sag: f64,
	/// Displacement of the curve control point from the straight-line midpoint.
	pub control_offset: Point,
	/// CSS color.
	pub color: &'static str,
	/// The pointer is over the rendered path.
	pub hovered: bool,
}

impl Connector {
	/// Midpoint of the straight segment between the anchors.
	pub fn midpoint(&self) -> Point {
		self.start.midpoint(self.end)
	}

	/// Control point of the rendered quadratic curve.
	pub fn control_point(&self) -> Point {
		self.midpoint() + self.control_offset
	}

	/// Evaluates the rendered quadratic Bézier at `t` in `[0, 1]`.
	pub fn curve_point(&self, t: f64) -> Point {
		let control = self.control_point();
		let u = 1.0 - t;
		self.start * (u * u) + control * (2.0 * u * t) + self.end * (t * t)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn connector(start: Point, end: Point, offset: Point) -> Connector {
		Connector {
			id: 0,
			start,
			end,
			base_sag: 0.0,
			control_offset: offset,
			color: "#fff",
			hovered: false,
		}
	}

	#[test]
	fn control_point_is_midpoint_plus_offset() {
		let c = connector(
			Point::new(0.0, 0.0),
			Point::new(100.0, 40.0),
			Point::new(5.0, -10.0),
		);
		assert_eq!(c.control_point(), Point::new(55.0, 10.0));
	}

	#[test]
	fn curve_passes_through_anchors() {
		let c = connector(
			Point::new(10.0, 20.0),
			Point::new(30.0, 80.0),
			Point::new(40.0, 0.0),
		);
		assert_eq!(c.curve_point(0.0), c.start);
		assert_eq!(c.curve_point(1.0), c.end);
	}

	#[test]
	fn curve_apex_moves_half_the_offset() {
		let c = connector(
			Point::new(0.0, 0.0),
			Point::new(0.0, 100.0),
			Point::new(20.0, 0.0),
		);
		let apex = c.curve_point(0.5);
		assert!((apex.x - 10.0).abs() < 1e-9);
		assert!((apex.y - 50.0).abs() < 1e-9);
	}

	#[test]
	fn non_finite_points_are_detected() {
		assert!(Point::new(1.0, 2.0).is_finite());
		assert!(!Point::new(f64::NAN, 2.0).is_finite());
		assert!(!Point::new(0.0, f64::INFINITY).is_finite());
	}
}
