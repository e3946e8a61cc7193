use thiserror::Error;

use crate::math::{Cell, Dimensions};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("grid data length {len} does not match dimensions {dims}")]
    ShapeMismatch { dims: Dimensions, len: usize },
}

/// A row-major rectangular grid.
pub struct Grid<T> {
    data: Vec<T>,
    dims: Dimensions,
}

impl<T> Grid<T> {
    pub const fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn try_from_vec(dims: Dimensions, data: Vec<T>) -> Result<Self, GridError> {
        if data.len() != dims.width() * dims.height() {
            return Err(GridError::ShapeMismatch { dims, len: data.len() });
        }
        Ok(Grid { data, dims })
    }

    pub fn get(&self, cell: Cell) -> Option<&T> {
        if !self.dims.contains(cell) {
            return None;
        }
        let i = cell.x as usize + (cell.y as usize * self.dims.width());
        Some(&self.data[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn enumerate(&self) -> impl Iterator<Item = (Cell, &T)> {
        self.dims.iter_within().zip(self.data.iter())
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        debug_assert_eq!(self.data.len() % self.dims.width().max(1), 0);
        self.data.chunks_exact(self.dims.width().max(1))
    }
}

impl Grid<Option<char>> {
    /// Builds a character grid from raw text. Lines become rows; ragged
    /// short lines are padded with `None`, which never matches a stencil.
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let dims = Dimensions::new(width, lines.len());

        let mut data = Vec::with_capacity(width * lines.len());
        for line in &lines {
            let mut row: Vec<Option<char>> = line.chars().map(Some).collect();
            row.resize(width, None);
            data.extend(row);
        }
        Grid { data, dims }
    }

    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let joined = rows.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("\n");
        Self::from_text(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_pads_ragged_rows() {
        let grid = Grid::from_text("ab\ncdef\n-");
        assert_eq!(grid.dims(), Dimensions::new(4, 3));
        assert_eq!(grid.get(Cell::new(1, 1)), Some(&Some('d')));
        assert_eq!(grid.get(Cell::new(2, 0)), Some(&None));
        assert_eq!(grid.get(Cell::new(4, 0)), None);
    }

    #[test]
    fn from_text_empty_input() {
        let grid = Grid::from_text("");
        assert!(grid.dims().empty());
        assert_eq!(grid.iter().count(), 0);
    }

    #[test]
    fn try_from_vec_rejects_bad_shape() {
        let result = Grid::try_from_vec(Dimensions::new(2, 2), vec![0u8; 3]);
        assert_eq!(
            result.err(),
            Some(GridError::ShapeMismatch { dims: Dimensions::new(2, 2), len: 3 })
        );
    }
}
