//! The lawn grid: maps discrete (row, col) cells to fixed pixel rectangles.

use crate::config::SimConfig;
use crate::types::{Point, Rect};
use thiserror::Error;

/// Grid query errors.
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum GridError {
    #[error("cell index ({row}, {col}) out of grid bounds")]
    InvalidIndex { row: usize, col: usize },
}

/// Immutable cell layout. The cells tile a `rows x cols` region starting at
/// the configured offset, with no gaps or overlaps.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cell_size: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Grid {
    pub fn new(config: &SimConfig) -> Self {
        Grid {
            rows: config.grid_rows,
            cols: config.grid_cols,
            cell_size: config.cell_size,
            offset_x: config.grid_offset_x,
            offset_y: config.grid_offset_y,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Bounding rect of the whole tiled region.
    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.offset_x,
            y: self.offset_y,
            width: self.cols as f64 * self.cell_size,
            height: self.rows as f64 * self.cell_size,
        }
    }

    /// Returns the cell enclosing `point`, or `None` when the point lies
    /// outside the tiled region.
    pub fn cell_at(&self, point: Point) -> Option<(usize, usize)> {
        if !self.bounds().contains(point) {
            return None;
        }
        let col = ((point.x - self.offset_x) / self.cell_size) as usize;
        let row = ((point.y - self.offset_y) / self.cell_size) as usize;
        Some((row, col))
    }

    /// Pixel rect of the given cell. Out-of-range indices are an error,
    /// never clamped.
    pub fn rect_of(&self, row: usize, col: usize) -> Result<Rect, GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::InvalidIndex { row, col });
        }
        Ok(Rect {
            x: self.offset_x + col as f64 * self.cell_size,
            y: self.offset_y + row as f64 * self.cell_size,
            width: self.cell_size,
            height: self.cell_size,
        })
    }

    /// Center point of the given cell. Used for defender placement and
    /// adversary spawn rows.
    pub fn center_of(&self, row: usize, col: usize) -> Result<Point, GridError> {
        Ok(self.rect_of(row, col)?.center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(&SimConfig::default())
    }

    #[test]
    fn test_cell_at_inside() {
        // Grid(rows=5, cols=9, cell_size=80, offset=(50,50)):
        // (90, 90) falls in the first cell.
        let g = grid();
        assert_eq!(g.cell_at(Point { x: 90.0, y: 90.0 }), Some((0, 0)));
        assert_eq!(g.cell_at(Point { x: 130.0, y: 90.0 }), Some((0, 1)));
        assert_eq!(g.cell_at(Point { x: 90.0, y: 130.0 }), Some((1, 0)));
    }

    #[test]
    fn test_cell_at_outside() {
        let g = grid();
        assert_eq!(g.cell_at(Point { x: 10.0, y: 10.0 }), None);
        assert_eq!(g.cell_at(Point { x: 49.9, y: 90.0 }), None);
        // One past the right edge of the tiled region.
        assert_eq!(g.cell_at(Point { x: 50.0 + 9.0 * 80.0, y: 90.0 }), None);
    }

    #[test]
    fn test_center_of_bounds_check() {
        let g = grid();
        assert!(g.center_of(4, 8).is_ok());
        assert_eq!(
            g.center_of(5, 0),
            Err(GridError::InvalidIndex { row: 5, col: 0 })
        );
        assert_eq!(
            g.center_of(0, 9),
            Err(GridError::InvalidIndex { row: 0, col: 9 })
        );
    }

    #[test]
    fn test_tiling_round_trip() {
        // Every cell center maps back to its own cell.
        let g = grid();
        for row in 0..g.rows() {
            for col in 0..g.cols() {
                let center = g.center_of(row, col).unwrap();
                assert_eq!(g.cell_at(center), Some((row, col)));
            }
        }
    }

    #[test]
    fn test_cells_tile_without_overlap() {
        // Adjacent cells share edges exactly.
        let g = grid();
        let a = g.rect_of(2, 3).unwrap();
        let b = g.rect_of(2, 4).unwrap();
        let below = g.rect_of(3, 3).unwrap();
        assert_eq!(a.right(), b.left());
        assert_eq!(a.bottom(), below.top());
        assert!(!a.intersects(&b));
    }
}
