use super::physics::{SpringParams, presets};
use super::types::Point;

/// Warm and cool dots, mixed at random.
pub const DOT_COLORS: &[&str] = &["rgba(255, 255, 255, 0.18)", "rgba(167, 139, 250, 0.35)"];

/// Threads use their own palette so they read apart from the dots.
pub const THREAD_COLORS: &[&str] = &[
	"rgba(129, 140, 248, 0.55)",
	"rgba(236, 72, 153, 0.45)",
	"rgba(45, 212, 191, 0.45)",
];

/// Spacing between lattice cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GapMode {
	/// Every cell is `diameter + gap` apart.
	Fixed(f64),
	/// Each column (and each row) draws its own gap from `[min, max]`, so
	/// positions are cumulative rather than `index * pitch`.
	Jittered { min: f64, max: f64 },
}

/// Axis-aligned block of lattice cells, bounds inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridRegion {
	pub first_column: usize,
	pub last_column: usize,
	pub first_row: usize,
	pub last_row: usize,
}

/// How connectors are derived from the dot lattice.
#[derive(Clone, Debug, PartialEq)]
pub enum ConnectionPolicy {
	/// Vertical threads hanging from the segments between adjacent dots of
	/// one row.
	EdgeDrop {
		row: usize,
		first_column: usize,
		last_column: usize,
		/// Threads per source segment.
		interpolation: usize,
		drop_length: f64,
		/// Sag bias is drawn from `[-sag_jitter, sag_jitter]`.
		sag_jitter: f64,
	},
	/// Random pairs whose distance, in average cell pitches, lies in
	/// `[min_cells, max_cells]`.
	NearestNeighbor {
		count: usize,
		min_cells: f64,
		max_cells: f64,
	},
	/// One thread per shared column, from the bottom edge of `upper` to the
	/// top edge of `lower`.
	RegionBoundary { upper: GridRegion, lower: GridRegion },
}

/// What a sweep trigger does while a previous sweep is still running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SweepOverlap {
	/// Drop the new trigger.
	#[default]
	Ignore,
	/// Start over from the beginning.
	Restart,
}

/// Virtual pointer sweep. `from`/`to` are fractions of the container size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepConfig {
	pub from: Point,
	pub to: Point,
	pub duration_ms: f64,
	pub overlap: SweepOverlap,
}

impl Default for SweepConfig {
	fn default() -> Self {
		Self {
			from: Point::new(-0.1, 0.55),
			to: Point::new(1.1, 0.35),
			duration_ms: 1200.0,
			overlap: SweepOverlap::Ignore,
		}
	}
}

/// Everything that shapes one mounted thread grid. Fixed for the lifetime of
/// the mount.
#[derive(Clone, Debug, PartialEq)]
pub struct ThreadGridConfig {
	pub dot_diameter: f64,
	pub gap: GapMode,
	/// Extra lattice cells beyond each container edge.
	pub overscan: usize,
	pub dot_colors: &'static [&'static str],
	pub thread_colors: &'static [&'static str],
	pub policies: Vec<ConnectionPolicy>,
	pub physics: SpringParams,
	pub sweep: SweepConfig,
	pub thread_width: f64,
}

impl Default for ThreadGridConfig {
	fn default() -> Self {
		Self {
			dot_diameter: 4.0,
			gap: GapMode::Fixed(36.0),
			overscan: 2,
			dot_colors: DOT_COLORS,
			thread_colors: THREAD_COLORS,
			policies: vec![
				ConnectionPolicy::EdgeDrop {
					row: 4,
					first_column: 6,
					last_column: 9,
					interpolation: 9,
					drop_length: 120.0,
					sag_jitter: 10.0,
				},
				ConnectionPolicy::NearestNeighbor {
					count: 24,
					min_cells: 2.0,
					max_cells: 4.0,
				},
				ConnectionPolicy::RegionBoundary {
					upper: GridRegion {
						first_column: 14,
						last_column: 19,
						first_row: 3,
						last_row: 5,
					},
					lower: GridRegion {
						first_column: 15,
						last_column: 21,
						first_row: 9,
						last_row: 12,
					},
				},
			],
			physics: presets::GRID_THREADS,
			sweep: SweepConfig::default(),
			thread_width: 1.2,
		}
	}
}
