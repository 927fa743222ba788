//! Grid coordinates and fixed-size 2D storage
//!
//! All engines share one convention: `x` grows to the right, `y` grows
//! downward, both 0-indexed. Storage is row-major.

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Integer cell position
///
/// Signed so that a shape's origin may sit outside the board while its filled
/// cells are still inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Wrap onto a `width x height` torus
    pub fn wrapped(self, width: usize, height: usize) -> Self {
        Self {
            x: self.x.rem_euclid(width as i32),
            y: self.y.rem_euclid(height as i32),
        }
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Fixed-size 2D array, `height` rows of `width` columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid<T>")]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// Unchecked wire form of a `Grid`
#[derive(Deserialize)]
struct RawGrid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = GridError;

    fn try_from(raw: RawGrid<T>) -> Result<Self, GridError> {
        if raw.width.checked_mul(raw.height) != Some(raw.cells.len()) {
            return Err(GridError::Size { width: raw.width, height: raw.height, cells: raw.cells.len() });
        }
        Ok(Self { width: raw.width, height: raw.height, cells: raw.cells })
    }
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `fill`
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Build a grid from nested rows, rejecting empty or ragged input
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(GridError::Empty);
        }

        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(GridError::Ragged { row, expected: width, actual: values.len() });
            }
            cells.extend(values);
        }

        Ok(Self { width, height, cells })
    }

    /// Rotate 90 degrees clockwise: `new[i][j] = old[rows - 1 - j][i]`
    pub fn rotate_clockwise(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for i in 0..self.width {
            for j in 0..self.height {
                cells.push(self.cells[(self.height - 1 - j) * self.width + i].clone());
            }
        }

        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Remove every row matching `pred` in a single pass and insert the same
    /// number of `fill` rows at the top. Remaining rows keep their order.
    ///
    /// Returns the number of rows removed.
    pub fn clear_rows_where<F>(&mut self, mut pred: F, fill: T) -> usize
    where
        F: FnMut(&[T]) -> bool,
    {
        let mut kept = Vec::with_capacity(self.cells.len());
        let mut removed = 0;
        for row in self.cells.chunks(self.width.max(1)) {
            if pred(row) {
                removed += 1;
            } else {
                kept.extend_from_slice(row);
            }
        }

        if removed > 0 {
            let mut cells = vec![fill; removed * self.width];
            cells.append(&mut kept);
            self.cells = cells;
        }
        removed
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        self.index(at).is_some()
    }

    pub fn get(&self, at: Coordinate) -> Option<&T> {
        self.index(at).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, at: Coordinate) -> Option<&mut T> {
        self.index(at).map(move |i| &mut self.cells[i])
    }

    /// Overwrite a cell; returns false when `at` is off the grid
    pub fn set(&mut self, at: Coordinate, value: T) -> bool {
        match self.get_mut(at) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    pub fn row(&self, y: usize) -> Option<&[T]> {
        (y < self.height).then(|| &self.cells[y * self.width..(y + 1) * self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Same-shaped grid with every cell transformed
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Every cell together with its coordinate, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &T)> {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(i, cell)| {
            (Coordinate::new((i % width) as i32, (i / width) as i32), cell)
        })
    }

    fn index(&self, at: Coordinate) -> Option<usize> {
        if at.x < 0 || at.y < 0 {
            return None;
        }
        let (x, y) = (at.x as usize, at.y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}
