//! Seat grid model
//!
//! A flat, row-major sequence of cells. Rows and columns are 1-based to match
//! the labels shown to the user; [`Grid::index`] maps them onto the backing
//! vector as `(row - 1) * cols + (col - 1)`.

use serde::{Deserialize, Serialize};

use super::naming::Naming;

/// Upper bound for rows/cols accepted from the config inputs
pub const MAX_DIMENSION: usize = 1000;

/// What a cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    #[default]
    Seat,
    Empty,
}

/// A single grid cell
///
/// Serialized as `{row, col, type, code}` to stay compatible with stored
/// projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    #[serde(rename = "type")]
    pub kind: CellKind,
    #[serde(rename = "code", default)]
    pub label: String,
}

impl Cell {
    pub fn is_seat(&self) -> bool {
        self.kind == CellKind::Seat
    }
}

/// Error building a grid from stored cells
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions must be positive (got {rows}x{cols})")]
    EmptyDimensions { rows: usize, cols: usize },
    #[error("expected {expected} cells for the grid, found {found}")]
    CellCount { expected: usize, found: usize },
    #[error("cell at index {index} is ({row}, {col}), out of order")]
    OutOfOrder { index: usize, row: usize, col: usize },
}

/// rows × cols cells in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid where every cell is a seat labelled by `naming`.
    ///
    /// Dimensions are clamped to `1..=MAX_DIMENSION`.
    pub fn new(rows: usize, cols: usize, naming: &Naming) -> Self {
        let rows = rows.clamp(1, MAX_DIMENSION);
        let cols = cols.clamp(1, MAX_DIMENSION);
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 1..=rows {
            for col in 1..=cols {
                cells.push(Cell {
                    row,
                    col,
                    kind: CellKind::Seat,
                    label: naming.seat_code(row, col),
                });
            }
        }
        Self { rows, cols, cells }
    }

    /// Rebuild a grid from stored cells, verifying the row-major layout.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyDimensions { rows, cols });
        }
        if cells.len() != rows * cols {
            return Err(GridError::CellCount {
                expected: rows * cols,
                found: cells.len(),
            });
        }
        for (index, cell) in cells.iter().enumerate() {
            let expected = (index / cols + 1, index % cols + 1);
            if (cell.row, cell.col) != expected {
                return Err(GridError::OutOfOrder {
                    index,
                    row: cell.row,
                    col: cell.col,
                });
            }
        }
        Ok(Self { rows, cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index for 1-based (`row`, `col`), or `None` outside the grid
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row == 0 || col == 0 || row > self.rows || col > self.cols {
            return None;
        }
        Some((row - 1) * self.cols + (col - 1))
    }

    /// Inverse of [`Grid::index`]
    #[inline]
    pub fn position(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.cells.len() {
            return None;
        }
        Some((index / self.cols + 1, index % self.cols + 1))
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).and_then(|i| self.cells.get(i))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Seat cells in row-major order
    pub fn seats(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.is_seat())
    }

    pub fn seat_count(&self) -> usize {
        self.seats().count()
    }

    pub fn has_seats(&self) -> bool {
        self.cells.iter().any(Cell::is_seat)
    }

    /// Set a single cell's kind. Returns true if the cell changed.
    pub fn set_kind(&mut self, index: usize, kind: CellKind) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) if cell.kind != kind => {
                cell.kind = kind;
                true
            }
            _ => false,
        }
    }

    /// Set every cell's kind
    pub fn set_all(&mut self, kind: CellKind) {
        for cell in &mut self.cells {
            cell.kind = kind;
        }
    }

    /// Change dimensions, keeping kind and label of every (row, col) that
    /// exists both before and after. New cells are seats labelled by `naming`,
    /// which must describe the new dimensions.
    pub fn resize(&mut self, rows: usize, cols: usize, naming: &Naming) {
        let rows = rows.clamp(1, MAX_DIMENSION);
        let cols = cols.clamp(1, MAX_DIMENSION);
        if rows == self.rows && cols == self.cols {
            return;
        }

        let mut old: Vec<Option<Cell>> = std::mem::take(&mut self.cells)
            .into_iter()
            .map(Some)
            .collect();
        let old_cols = self.cols;
        let old_rows = self.rows;

        let mut cells = Vec::with_capacity(rows * cols);
        for row in 1..=rows {
            for col in 1..=cols {
                let kept = if row <= old_rows && col <= old_cols {
                    old[(row - 1) * old_cols + (col - 1)].take()
                } else {
                    None
                };
                cells.push(kept.unwrap_or_else(|| Cell {
                    row,
                    col,
                    kind: CellKind::Seat,
                    label: naming.seat_code(row, col),
                }));
            }
        }

        tracing::debug!(
            "Resized grid {}x{} -> {}x{}",
            old_rows,
            old_cols,
            rows,
            cols
        );

        self.rows = rows;
        self.cols = cols;
        self.cells = cells;
    }

    /// Regenerate every label from `naming`
    pub fn relabel(&mut self, naming: &Naming) {
        for cell in &mut self.cells {
            cell.label = naming.seat_code(cell.row, cell.col);
        }
    }

    /// Short human-readable size, e.g. `10x15 Grid`
    pub fn size_label(&self) -> String {
        format!("{}x{} Grid", self.rows, self.cols)
    }

    /// Debug-build invariant check: every flat index resolves to the cell
    /// whose coordinates produce it.
    pub fn assert_invariants(&self) {
        debug_assert_eq!(self.cells.len(), self.rows * self.cols);
        for (i, cell) in self.cells.iter().enumerate() {
            debug_assert_eq!(self.index(cell.row, cell.col), Some(i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::naming::{RowOverrides, SectionConfig};

    fn grid(rows: usize, cols: usize) -> Grid {
        let config = SectionConfig::default();
        let overrides = RowOverrides::new();
        Grid::new(rows, cols, &Naming::new(&config, &overrides, rows, cols))
    }

    fn resize(g: &mut Grid, rows: usize, cols: usize) {
        let config = SectionConfig::default();
        let overrides = RowOverrides::new();
        g.resize(rows, cols, &Naming::new(&config, &overrides, rows, cols));
    }

    #[test]
    fn test_index_is_bijection() {
        for (rows, cols) in [(1, 1), (1, 7), (7, 1), (10, 15), (13, 4)] {
            let g = grid(rows, cols);
            let mut seen = vec![false; rows * cols];
            for row in 1..=rows {
                for col in 1..=cols {
                    let idx = g.index(row, col).unwrap();
                    assert!(idx < rows * cols);
                    assert!(!seen[idx], "index {} hit twice", idx);
                    seen[idx] = true;
                    assert_eq!(g.position(idx), Some((row, col)));
                    let cell = g.get(idx).unwrap();
                    assert_eq!((cell.row, cell.col), (row, col));
                }
            }
            assert!(seen.into_iter().all(|s| s));
        }
    }

    #[test]
    fn test_index_out_of_range() {
        let g = grid(3, 4);
        assert_eq!(g.index(0, 1), None);
        assert_eq!(g.index(1, 0), None);
        assert_eq!(g.index(4, 1), None);
        assert_eq!(g.index(1, 5), None);
        assert_eq!(g.position(12), None);
    }

    #[test]
    fn test_new_grid_is_all_seats_with_codes() {
        let g = grid(2, 3);
        assert_eq!(g.seat_count(), 6);
        assert_eq!(g.cell(2, 3).unwrap().label, "2-3");
    }

    #[test]
    fn test_resize_preserves_kind_and_label() {
        let mut g = grid(3, 3);
        let idx = g.index(2, 2).unwrap();
        g.set_kind(idx, CellKind::Empty);
        g.get_mut(g.index(1, 3).unwrap()).unwrap().label = "CUSTOM".into();

        resize(&mut g, 4, 5);
        assert_eq!(g.len(), 20);
        assert_eq!(g.cell(2, 2).unwrap().kind, CellKind::Empty);
        assert_eq!(g.cell(1, 3).unwrap().label, "CUSTOM");
        let new_cell = g.cell(4, 5).unwrap();
        assert_eq!(new_cell.kind, CellKind::Seat);
        assert_eq!(new_cell.label, "4-5");
        g.assert_invariants();

        resize(&mut g, 2, 2);
        assert_eq!(g.len(), 4);
        assert_eq!(g.cell(2, 2).unwrap().kind, CellKind::Empty);
        g.assert_invariants();
    }

    #[test]
    fn test_dimensions_are_clamped() {
        let g = grid(0, 0);
        assert_eq!((g.rows(), g.cols()), (1, 1));
    }

    #[test]
    fn test_set_all_and_counts() {
        let mut g = grid(2, 2);
        g.set_all(CellKind::Empty);
        assert!(!g.has_seats());
        assert!(g.set_kind(0, CellKind::Seat));
        assert!(!g.set_kind(0, CellKind::Seat));
        assert_eq!(g.seat_count(), 1);
        assert_eq!(g.size_label(), "2x2 Grid");
    }

    #[test]
    fn test_from_cells_validates_layout() {
        let cells = grid(2, 2).into_cells();
        assert!(Grid::from_cells(2, 2, cells.clone()).is_ok());
        assert!(matches!(
            Grid::from_cells(2, 3, cells.clone()),
            Err(GridError::CellCount { .. })
        ));
        let mut swapped = cells;
        swapped.swap(0, 1);
        assert!(matches!(
            Grid::from_cells(2, 2, swapped),
            Err(GridError::OutOfOrder { index: 0, .. })
        ));
    }

    #[test]
    fn test_cell_serializes_with_stored_keys() {
        let cell = Cell {
            row: 1,
            col: 2,
            kind: CellKind::Empty,
            label: "1-2".into(),
        };
        let json = serde_json::to_string(&cell).unwrap();
        assert_eq!(json, r#"{"row":1,"col":2,"type":"empty","code":"1-2"}"#);
    }
}
