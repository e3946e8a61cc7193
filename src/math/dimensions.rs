use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::math::Cell;

/// 2D dimensions of a character grid, in cells.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub const fn new(width: usize, height: usize) -> Self {
        Dimensions { width, height }
    }

    pub const fn width(self) -> usize {
        self.width
    }

    pub const fn height(self) -> usize {
        self.height
    }

    pub const fn contains(self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.x < self.width as isize
            && cell.y >= 0
            && cell.y < self.height as isize
    }

    /// Iterates cells within this rectangle in row-major order.
    /// For yielded cells, `0 <= x < self.width` and `0 <= y < self.height`.
    pub const fn iter_within(self) -> DimensionsIter {
        DimensionsIter::new(self)
    }

    pub const fn empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Iterates exclusively - yielded values are never equal to the x or y of
/// `dims`
pub struct DimensionsIter {
    dims: Dimensions,
    current: Cell,
}

impl DimensionsIter {
    pub const fn new(dims: Dimensions) -> Self {
        DimensionsIter { dims, current: Cell::new(0, 0) }
    }
}

impl Iterator for DimensionsIter {
    type Item = Cell;
    fn next(&mut self) -> Option<Self::Item> {
        // Note: iterates exclusively!
        if self.dims.empty() || self.current.y >= self.dims.height as isize {
            return None;
        }
        let val = self.current;

        // Step x, step y and reset x if out of bounds
        self.current.x += 1;
        if self.current.x >= self.dims.width as isize {
            self.current.x = 0;
            self.current.y += 1;
        }

        Some(val)
    }
}

#[cfg(test)]
mod tests {
    use assertables::{assert_all, assert_len_eq_x};

    use super::*;

    #[test]
    fn iter_dims() {
        let dims = Dimensions::new(7, 9);
        let cells = dims.iter_within().collect::<Vec<_>>();

        assert_len_eq_x!(cells.clone(), 7 * 9);
        assert_all!(cells.iter(), |c: &Cell| dims.contains(*c))
    }

    #[test]
    fn empty_dims_iterate_nothing() {
        assert_eq!(Dimensions::new(0, 4).iter_within().count(), 0);
        assert_eq!(Dimensions::new(4, 0).iter_within().count(), 0);
    }
}
