use std::ops::RangeInclusive;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::config::{ConnectionPolicy, GridRegion};
use super::grid::DotGrid;
use super::types::{Connector, Dot, Point};

const FALLBACK_COLOR: &str = "#ffffff";

/// One edge-drop policy, unpacked.
struct HangingSpan {
	row: usize,
	columns: RangeInclusive<usize>,
	interpolation: usize,
	drop_length: f64,
	sag_jitter: f64,
}

/// Builds connectors from a dot grid. Ids keep counting across calls, so
/// several policies applied through one synthesizer never share an id.
#[derive(Debug)]
pub struct ConnectorSynthesizer {
	next_id: usize,
	palette: &'static [&'static str],
}

impl ConnectorSynthesizer {
	pub fn new(palette: &'static [&'static str]) -> Self {
		Self { next_id: 0, palette }
	}

	pub fn synthesize<R: Rng + ?Sized>(
		&mut self,
		grid: &DotGrid,
		policy: &ConnectionPolicy,
		rng: &mut R,
	) -> Vec<Connector> {
		match *policy {
			ConnectionPolicy::EdgeDrop {
				row,
				first_column,
				last_column,
				interpolation,
				drop_length,
				sag_jitter,
			} => {
				let span = HangingSpan {
					row,
					columns: first_column..=last_column,
					interpolation,
					drop_length,
					sag_jitter,
				};
				self.edge_drop(grid, span, rng)
			}
			ConnectionPolicy::NearestNeighbor {
				count,
				min_cells,
				max_cells,
			} => self.nearest_neighbor(grid, count, min_cells, max_cells, rng),
			ConnectionPolicy::RegionBoundary { upper, lower } => {
				self.region_boundary(grid, &upper, &lower, rng)
			}
		}
	}

	fn connector<R: Rng + ?Sized>(
		&mut self,
		start: Point,
		end: Point,
		base_sag: f64,
		control_offset: Point,
		rng: &mut R,
	) -> Connector {
		let id = self.next_id;
		self.next_id += 1;
		Connector {
			id,
			start,
			end,
			base_sag,
			control_offset,
			color: self.palette.choose(rng).copied().unwrap_or(FALLBACK_COLOR),
			hovered: false,
		}
	}

	/// Threads hanging straight down from `interpolation` evenly spaced points
	/// on each segment between horizontally adjacent source dots, plus one
	/// from the last source dot. Each starts flat: its control point sits on
	/// its start anchor. A non-finite drop length yields nothing.
	fn edge_drop<R: Rng + ?Sized>(
		&mut self,
		grid: &DotGrid,
		span: HangingSpan,
		rng: &mut R,
	) -> Vec<Connector> {
		let HangingSpan {
			row,
			columns,
			interpolation,
			drop_length,
			sag_jitter,
		} = span;
		if !drop_length.is_finite() {
			return Vec::new();
		}
		let sources: Vec<&Dot> = columns.filter_map(|c| grid.dot_at(c, row)).collect();
		let jitter = if sag_jitter.is_finite() { sag_jitter.abs() } else { 0.0 };
		let mut anchors = Vec::new();
		for pair in sources.windows(2) {
			let (a, b) = (pair[0], pair[1]);
			if b.column != a.column + 1 {
				continue;
			}
			for i in 0..interpolation {
				let t = i as f64 / interpolation as f64;
				anchors.push(a.position().lerp(b.position(), t));
			}
		}
		if let Some(last) = sources.last() {
			anchors.push(last.position());
		}

		anchors
			.into_iter()
			.map(|start| {
				let end = Point::new(start.x, start.y + drop_length);
				let base_sag = if jitter > 0.0 {
					rng.random_range(-jitter..=jitter)
				} else {
					0.0
				};
				let flat = Point::new(0.0, start.y - start.midpoint(end).y);
				self.connector(start, end, base_sag, flat, &mut *rng)
			})
			.collect()
	}

	fn nearest_neighbor<R: Rng + ?Sized>(
		&mut self,
		grid: &DotGrid,
		count: usize,
		min_cells: f64,
		max_cells: f64,
		rng: &mut R,
	) -> Vec<Connector> {
		let pitch = grid.average_pitch();
		if !(pitch > 0.0) {
			return Vec::new();
		}
		let mut connectors = Vec::new();
		for _ in 0..count {
			let Some(source) = grid.dots.choose(rng) else {
				break;
			};
			let eligible: Vec<&Dot> = grid
				.dots
				.iter()
				.filter(|d| d.id != source.id)
				.filter(|d| {
					let cells = source.position().distance(d.position()) / pitch;
					cells >= min_cells && cells <= max_cells
				})
				.collect();
			let Some(target) = eligible.choose(rng) else {
				continue;
			};
			let (start, end) = (source.position(), target.position());
			connectors.push(self.connector(start, end, 0.0, Point::ZERO, rng));
		}
		connectors
	}

	fn region_boundary<R: Rng + ?Sized>(
		&mut self,
		grid: &DotGrid,
		upper: &GridRegion,
		lower: &GridRegion,
		rng: &mut R,
	) -> Vec<Connector> {
		let first = upper.first_column.max(lower.first_column);
		let last = upper.last_column.min(lower.last_column);
		let mut connectors = Vec::new();
		for column in first..=last {
			let (Some(top), Some(bottom)) = (
				grid.dot_at(column, upper.last_row),
				grid.dot_at(column, lower.first_row),
			) else {
				continue;
			};
			let (start, end) = (top.position(), bottom.position());
			connectors.push(self.connector(start, end, 0.0, Point::ZERO, rng));
		}
		connectors
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::components::thread_grid::config::GapMode;
	use crate::components::thread_grid::grid::GridLayout;

	const THREADS: &[&str] = &["#123", "#456"];

	fn grid(rng: &mut SmallRng) -> DotGrid {
		let layout = GridLayout {
			width: 500.0,
			height: 500.0,
			dot_diameter: 4.0,
			gap: GapMode::Fixed(46.0),
			overscan: 1,
		};
		DotGrid::generate(&layout, &["#d1", "#d2"], rng)
	}

	fn edge_drop(first_column: usize, last_column: usize) -> ConnectionPolicy {
		ConnectionPolicy::EdgeDrop {
			row: 2,
			first_column,
			last_column,
			interpolation: 9,
			drop_length: 120.0,
			sag_jitter: 10.0,
		}
	}

	#[test]
	fn edge_drop_two_sources_gives_ten() {
		let mut rng = SmallRng::seed_from_u64(1);
		let grid = grid(&mut rng);
		let mut synth = ConnectorSynthesizer::new(THREADS);
		let connectors = synth.synthesize(&grid, &edge_drop(0, 1), &mut rng);
		assert_eq!(connectors.len(), 10);

		let a = grid.dot_at(0, 2).unwrap().position();
		let b = grid.dot_at(1, 2).unwrap().position();
		assert_eq!(connectors[0].start, a);
		assert_eq!(connectors[9].start, b);
		for c in &connectors {
			assert_eq!(c.end, Point::new(c.start.x, c.start.y + 120.0));
			assert_eq!(c.control_point(), c.start);
			assert!(c.base_sag.abs() <= 10.0);
			assert!(THREADS.contains(&c.color));
		}
	}

	#[test]
	fn edge_drop_structure_is_repeatable() {
		let mut rng = SmallRng::seed_from_u64(2);
		let grid = grid(&mut rng);
		let policy = edge_drop(3, 7);
		let run = |seed| {
			ConnectorSynthesizer::new(THREADS).synthesize(
				&grid,
				&policy,
				&mut SmallRng::seed_from_u64(seed),
			)
		};
		let (first, second) = (run(10), run(99));
		assert_eq!(first.len(), 4 * 9 + 1);
		assert_eq!(first.len(), second.len());
		for (a, b) in first.iter().zip(&second) {
			assert_eq!((a.start, a.end), (b.start, b.end));
		}
	}

	#[test]
	fn edge_drop_outside_grid_is_empty() {
		let mut rng = SmallRng::seed_from_u64(3);
		let grid = grid(&mut rng);
		let policy = ConnectionPolicy::EdgeDrop {
			row: 500,
			first_column: 0,
			last_column: 4,
			interpolation: 9,
			drop_length: 50.0,
			sag_jitter: 0.0,
		};
		let connectors = ConnectorSynthesizer::new(THREADS).synthesize(&grid, &policy, &mut rng);
		assert!(connectors.is_empty());
	}

	#[test]
	fn edge_drop_with_unbounded_length_is_empty() {
		let mut rng = SmallRng::seed_from_u64(8);
		let grid = grid(&mut rng);
		for drop_length in [f64::INFINITY, f64::NAN] {
			let policy = ConnectionPolicy::EdgeDrop {
				row: 2,
				first_column: 0,
				last_column: 3,
				interpolation: 9,
				drop_length,
				sag_jitter: 10.0,
			};
			let connectors =
				ConnectorSynthesizer::new(THREADS).synthesize(&grid, &policy, &mut rng);
			assert!(connectors.is_empty());
		}
	}

	#[test]
	fn nearest_neighbor_respects_band() {
		let mut rng = SmallRng::seed_from_u64(4);
		let grid = grid(&mut rng);
		let policy = ConnectionPolicy::NearestNeighbor {
			count: 40,
			min_cells: 2.0,
			max_cells: 3.0,
		};
		let connectors = ConnectorSynthesizer::new(THREADS).synthesize(&grid, &policy, &mut rng);
		assert_eq!(connectors.len(), 40);
		for c in &connectors {
			let cells = c.start.distance(c.end) / grid.average_pitch();
			assert!((2.0..=3.0).contains(&cells), "{cells}");
			assert_eq!(c.control_offset, Point::ZERO);
		}
	}

	#[test]
	fn nearest_neighbor_skips_impossible_band() {
		let mut rng = SmallRng::seed_from_u64(5);
		let grid = grid(&mut rng);
		let policy = ConnectionPolicy::NearestNeighbor {
			count: 10,
			min_cells: 500.0,
			max_cells: 600.0,
		};
		let connectors = ConnectorSynthesizer::new(THREADS).synthesize(&grid, &policy, &mut rng);
		assert!(connectors.is_empty());

		let empty = DotGrid::default();
		let policy = ConnectionPolicy::NearestNeighbor {
			count: 10,
			min_cells: 1.0,
			max_cells: 2.0,
		};
		assert!(ConnectorSynthesizer::new(THREADS).synthesize(&empty, &policy, &mut rng).is_empty());
	}

	#[test]
	fn region_boundary_joins_shared_columns() {
		let mut rng = SmallRng::seed_from_u64(6);
		let grid = grid(&mut rng);
		let upper = GridRegion {
			first_column: 2,
			last_column: 6,
			first_row: 1,
			last_row: 3,
		};
		let lower = GridRegion {
			first_column: 4,
			last_column: 9,
			first_row: 7,
			last_row: 9,
		};
		let policy = ConnectionPolicy::RegionBoundary { upper, lower };
		let connectors = ConnectorSynthesizer::new(THREADS).synthesize(&grid, &policy, &mut rng);
		assert_eq!(connectors.len(), 3);
		for (c, column) in connectors.iter().zip(4..) {
			assert_eq!(c.start, grid.dot_at(column, 3).unwrap().position());
			assert_eq!(c.end, grid.dot_at(column, 7).unwrap().position());
		}
	}

	#[test]
	fn ids_are_sequential_across_policies() {
		let mut rng = SmallRng::seed_from_u64(7);
		let grid = grid(&mut rng);
		let mut synth = ConnectorSynthesizer::new(THREADS);
		let mut all = synth.synthesize(&grid, &edge_drop(0, 2), &mut rng);
		all.extend(synth.synthesize(
			&grid,
			&ConnectionPolicy::NearestNeighbor {
				count: 5,
				min_cells: 1.0,
				max_cells: 2.0,
			},
			&mut rng,
		));
		let ids: Vec<usize> = all.iter().map(|c| c.id).collect();
		assert_eq!(ids, (0..all.len()).collect::<Vec<_>>());
		assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
	}
}
