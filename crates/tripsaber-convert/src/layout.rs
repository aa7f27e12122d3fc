//! Lane-to-position mapping.
//!
//! Beat Saber notes sit on a fixed 4x3 lattice. The lattice is rescaled into
//! Audio Trip space so that the outermost column centres are `x_range` apart
//! and the outermost row centres are `y_range` apart, centred on `x = 0` and
//! resting on `y_min`.

use tripsaber_format::{MappingConfig, Position};

use crate::error::ConvertError;
use crate::rng::JitterSample;

/// Number of lane columns in the source lattice.
pub const LANE_COLUMNS: usize = 4;

/// Number of lane rows in the source lattice.
pub const LANE_ROWS: usize = 3;

/// Source distance between the leftmost and rightmost column centres.
pub const SOURCE_X_SPAN: f64 = 3.0;

/// Source distance between the bottom and top row centres.
pub const SOURCE_Y_SPAN: f64 = 2.0;

/// Precomputed destination cell centres plus jitter amplitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneLayout {
    /// `cells[row][column]`, row 0 is the bottom row.
    cells: [[(f64, f64); LANE_COLUMNS]; LANE_ROWS],
    x_wobble: f64,
    y_wobble: f64,
}

impl LaneLayout {
    /// Builds the cell table for a config.
    pub fn new(config: &MappingConfig) -> Self {
        let x_scale = config.x_range / SOURCE_X_SPAN;
        let y_scale = config.y_range / SOURCE_Y_SPAN;

        let mut cells = [[(0.0, 0.0); LANE_COLUMNS]; LANE_ROWS];
        for (row, cells_row) in cells.iter_mut().enumerate() {
            // Beat Saber row 0 is the bottom layer, so row order is kept
            // as-is and y grows upward from the floor.
            let y = config.y_min + y_scale * (row as f64 + 0.5);
            for (column, cell) in cells_row.iter_mut().enumerate() {
                let x = x_scale * (column as f64 - 1.5);
                *cell = (x, y);
            }
        }

        Self {
            cells,
            x_wobble: x_scale * config.x_wobble_factor,
            y_wobble: y_scale * config.y_wobble_factor,
        }
    }

    /// Centre of a lattice cell, without jitter.
    pub fn cell_centre(&self, column: i64, row: i64) -> Result<(f64, f64), ConvertError> {
        let out_of_range = || ConvertError::OutOfRange { column, row };
        let c = usize::try_from(column).map_err(|_| out_of_range())?;
        let r = usize::try_from(row).map_err(|_| out_of_range())?;
        self.cells
            .get(r)
            .and_then(|cells_row| cells_row.get(c))
            .copied()
            .ok_or_else(out_of_range)
    }

    /// Maps a lane to a destination position and applies jitter.
    ///
    /// # Errors
    /// `OutOfRange` if `column` is outside `0..=3` or `row` outside `0..=2`.
    pub fn position(
        &self,
        column: i64,
        row: i64,
        jitter: JitterSample,
    ) -> Result<Position, ConvertError> {
        let (x, y) = self.cell_centre(column, row)?;
        Ok(Position {
            x: x + self.x_wobble * jitter.x,
            y: y + self.y_wobble * jitter.y,
            z: 0.0,
        })
    }
}
