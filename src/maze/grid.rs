use thiserror::Error;

/// Reasons a cell list cannot become an [`OccupancyGrid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    #[error("expected {expected} cells for the grid, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("cell {index} has value {value}, expected 0 or 1")]
    InvalidCell { index: usize, value: u8 },
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Immutable wall layout of the level.
///
/// Cells are stored row-major. A cell holds `1` for a wall and `0` for open
/// floor; construction rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl OccupancyGrid {
    /// Validates and wraps a flat, row-major cell list.
    pub fn new(width: usize, height: usize, cells: Vec<u8>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                actual: cells.len(),
            });
        }
        if let Some((index, &value)) = cells.iter().enumerate().find(|(_, v)| **v > 1) {
            return Err(GridError::InvalidCell { index, value });
        }
        Ok(Self::from_trusted(width, height, cells))
    }

    /// Builds a grid from text rows, one character per cell.
    ///
    /// `#` and `1` are walls; every other character is open floor.
    ///
    /// # Example
    /// ```
    /// use mazewalk::maze::OccupancyGrid;
    ///
    /// let grid = OccupancyGrid::from_rows(&["###", "#.#", "###"]).unwrap();
    /// assert!(grid.is_wall(0, 0));
    /// assert!(!grid.is_wall(1, 1));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
            cells.extend(line.chars().map(|c| u8::from(c == '#' || c == '1')));
        }
        Self::new(width, rows.len(), cells)
    }

    pub(crate) fn from_trusted(width: usize, height: usize, cells: Vec<u8>) -> Self {
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Whether `(col, row)` is a wall. Cells outside the grid count as open.
    pub fn is_wall(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height && self.cells[row * self.width + col] == 1
    }

    /// Iterates over the `(col, row)` coordinates of every wall cell in
    /// row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == 1)
            .map(|(i, _)| (i % self.width, i / self.width))
    }

    /// Converts player ground coordinates into fractional grid coordinates.
    ///
    /// `y` points north, so it grows toward row `0`.
    pub fn world_to_grid(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.width as f32 / 2.0 + x / 2.0,
            self.height as f32 / 2.0 - y / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_dimensions() {
        assert_eq!(
            OccupancyGrid::new(0, 3, vec![]),
            Err(GridError::ZeroDimension {
                width: 0,
                height: 3
            })
        );
    }

    #[test]
    fn new_rejects_length_mismatch() {
        assert_eq!(
            OccupancyGrid::new(2, 2, vec![0, 1, 0]),
            Err(GridError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn new_rejects_values_other_than_zero_and_one() {
        assert_eq!(
            OccupancyGrid::new(2, 1, vec![1, 2]),
            Err(GridError::InvalidCell { index: 1, value: 2 })
        );
    }

    #[test]
    fn from_rows_reads_walls_and_floor() {
        let grid = OccupancyGrid::from_rows(&["#1.", " 0#"]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.cells(), &[1, 1, 0, 0, 0, 1]);
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        assert_eq!(
            OccupancyGrid::from_rows(&["##", "#"]),
            Err(GridError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn from_rows_rejects_empty_input() {
        assert!(matches!(
            OccupancyGrid::from_rows(&[]),
            Err(GridError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn occupied_lists_walls_in_row_major_order() {
        let grid = OccupancyGrid::from_rows(&[".#", "#."]).unwrap();
        let walls: Vec<_> = grid.occupied().collect();
        assert_eq!(walls, vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn is_wall_treats_outside_as_open() {
        let grid = OccupancyGrid::from_rows(&["#"]).unwrap();
        assert!(grid.is_wall(0, 0));
        assert!(!grid.is_wall(1, 0));
        assert!(!grid.is_wall(0, 1));
    }

    #[test]
    fn world_to_grid_centres_the_origin() {
        let grid = OccupancyGrid::new(16, 16, vec![0; 256]).unwrap();
        assert_eq!(grid.world_to_grid(0.0, 0.0), (8.0, 8.0));
        assert_eq!(grid.world_to_grid(2.0, 2.0), (9.0, 7.0));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = GridError::InvalidCell { index: 4, value: 7 };
        assert_eq!(err.to_string(), "cell 4 has value 7, expected 0 or 1");
    }
}
