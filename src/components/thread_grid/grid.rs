use std::collections::HashMap;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::config::GapMode;
use super::types::{Dot, Point};

const FALLBACK_COLOR: &str = "#ffffff";
const MIN_OVERSCAN: usize = 1;
const MAX_OVERSCAN: usize = 2;

/// Lattice settings the generator needs. `overscan` is clamped to `1..=2`
/// cells so the outermost dots always sit past the container edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
	pub width: f64,
	pub height: f64,
	pub dot_diameter: f64,
	pub gap: GapMode,
	pub overscan: usize,
}

/// A generated dot lattice with lookup by lattice coordinate.
#[derive(Clone, Debug, Default)]
pub struct DotGrid {
	pub dots: Vec<Dot>,
	columns: usize,
	rows: usize,
	average_pitch: f64,
	index: HashMap<(usize, usize), usize>,
}

impl DotGrid {
	/// Lays out a lattice covering `[0, width] x [0, height]` plus `overscan`
	/// cells on every side. Zero or non-finite area gives an empty grid.
	pub fn generate<R: Rng + ?Sized>(
		layout: &GridLayout,
		palette: &[&'static str],
		rng: &mut R,
	) -> Self {
		let GridLayout {
			width,
			height,
			dot_diameter,
			gap,
			overscan,
		} = *layout;
		let overscan = overscan.clamp(MIN_OVERSCAN, MAX_OVERSCAN);
		if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
			return Self::default();
		}

		let xs = axis_positions(width, dot_diameter, gap, overscan, rng);
		let ys = axis_positions(height, dot_diameter, gap, overscan, rng);
		if xs.is_empty() || ys.is_empty() {
			return Self::default();
		}

		let radius = dot_diameter / 2.0;
		let mut dots = Vec::with_capacity(xs.len() * ys.len());
		for (row, &y) in ys.iter().enumerate() {
			for (column, &x) in xs.iter().enumerate() {
				dots.push(Dot {
					id: dots.len(),
					x,
					y,
					column,
					row,
					color: palette.choose(rng).copied().unwrap_or(FALLBACK_COLOR),
					radius,
				});
			}
		}

		let index = dots.iter().map(|d| ((d.column, d.row), d.id)).collect();
		Self {
			columns: xs.len(),
			rows: ys.len(),
			average_pitch: average_step(&xs, &ys),
			dots,
			index,
		}
	}

	/// The dot at a lattice coordinate, if the lattice has one there.
	pub fn dot_at(&self, column: usize, row: usize) -> Option<&Dot> {
		if column >= self.columns || row >= self.rows {
			return None;
		}
		self.index.get(&(column, row)).map(|&i| &self.dots[i])
	}

	/// Mean spacing between neighbouring centers across both axes.
	pub fn average_pitch(&self) -> f64 {
		self.average_pitch
	}

	#[cfg(test)]
	pub fn is_empty(&self) -> bool {
		self.dots.is_empty()
	}

	/// Smallest box holding every dot center, as (top-left, bottom-right).
	#[cfg(test)]
	pub fn bounds(&self) -> Option<(Point, Point)> {
		let first = self.dots.first()?;
		let last = self.dots.last()?;
		Some((first.position(), last.position()))
	}
}

/// Cell centers along one axis. Starts `overscan` cells before 0 and keeps
/// going until `overscan` further cells lie at or past `extent`.
fn axis_positions<R: Rng + ?Sized>(
	extent: f64,
	diameter: f64,
	gap: GapMode,
	overscan: usize,
	rng: &mut R,
) -> Vec<f64> {
	match gap {
		GapMode::Fixed(gap) => {
			let pitch = diameter + gap;
			if !(pitch > 0.0 && pitch.is_finite()) {
				return Vec::new();
			}
			let inner = (extent / pitch).ceil() as usize + 1;
			(0..inner + 2 * overscan)
				.map(|i| (i as f64 - overscan as f64) * pitch)
				.collect()
		}
		GapMode::Jittered { min, max } => {
			let (min, max) = if min <= max { (min, max) } else { (max, min) };
			if !(diameter + min > 0.0 && (diameter + max).is_finite()) {
				return Vec::new();
			}
			let mut positions = Vec::new();
			let mut x = -(overscan as f64) * (diameter + max);
			let mut past_edge = 0;
			loop {
				positions.push(x);
				if x >= extent {
					past_edge += 1;
					if past_edge > overscan {
						break;
					}
				}
				x += diameter + rng.random_range(min..=max);
			}
			positions
		}
	}
}

fn average_step(xs: &[f64], ys: &[f64]) -> f64 {
	let steps = xs.windows(2).chain(ys.windows(2)).map(|w| w[1] - w[0]);
	let (sum, count) = steps.fold((0.0, 0usize), |(s, n), d| (s + d, n + 1));
	if count == 0 { 0.0 } else { sum / count as f64 }
}
