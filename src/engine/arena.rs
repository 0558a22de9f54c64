//! The arena: occupancy grid of locked cells, plus the collision, merge and
//! sweep operations the engine runs against it.

use super::matrix::{Cell, EMPTY, Matrix, Position};

/// Fixed-size grid, row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arena {
    width: usize,
    rows: Vec<Vec<Cell>>,
}

impl Arena {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![vec![EMPTY; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cells flattened row-major.
    pub fn to_flat(&self) -> Vec<Cell> {
        self.rows.iter().flatten().copied().collect()
    }

    /// `None` when `(x, y)` lies outside the grid, so callers can tell an
    /// empty in-range cell from an out-of-range one.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Writes a cell; out-of-range writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, value: Cell) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = value;
        }
    }

    pub fn clear(&mut self) {
        self.rows.iter_mut().for_each(|row| row.fill(EMPTY));
    }

    pub fn is_clear(&self) -> bool {
        self.rows.iter().flatten().all(|&c| c == EMPTY)
    }

    /// True when any non-empty cell of `piece` placed at `pos` lands outside
    /// the grid or on an occupied cell. Walls and floor block exactly like
    /// locked cells do.
    pub fn collides(&self, piece: &Matrix, pos: Position) -> bool {
        piece.occupied().any(|(x, y, _)| {
            let gx = pos.x + x as i32;
            let gy = pos.y + y as i32;
            self.get(gx, gy).is_none_or(|cell| cell != EMPTY)
        })
    }

    /// Copy the non-empty cells of `piece` into the grid at `pos`.
    pub fn merge(&mut self, piece: &Matrix, pos: Position) {
        for (x, y, value) in piece.occupied() {
            self.set(pos.x + x as i32, pos.y + y as i32, value);
        }
    }

    /// Remove every complete row, shifting the rows above down and inserting
    /// empty rows at the top. Returns the number of rows removed.
    pub fn sweep(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.rows.len();
        while y > 0 {
            let row = y - 1;
            if self.rows[row].iter().all(|&c| c != EMPTY) {
                self.rows.remove(row);
                self.rows.insert(0, vec![EMPTY; self.width]);
                cleared += 1;
                // the row that slid into `row` gets examined next
                continue;
            }
            y -= 1;
        }
        cleared
    }
}
