//! Piece matrices and the transpose + reverse rotation.

/// Cell value: 0 is empty, 1–7 identify the shape that left it (and its color).
pub type Cell = u8;

pub const EMPTY: Cell = 0;

/// Offset of a matrix's top-left cell inside the arena. May be negative or
/// past the edges; the collision check decides whether that is legal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Quarter-turn direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

impl Turn {
    /// Positive directions turn clockwise, negative ones counter-clockwise and
    /// zero is not a rotation at all.
    pub fn from_direction(direction: i32) -> Option<Self> {
        match direction.signum() {
            1 => Some(Turn::Clockwise),
            -1 => Some(Turn::CounterClockwise),
            _ => None,
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
        }
    }
}

/// Rectangular grid of cells, row-major, row 0 at the top.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: Vec<Vec<Cell>>,
}

impl Matrix {
    /// Build from rows. All rows are expected to share one width.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        debug_assert!(
            rows.windows(2).all(|w| w[0].len() == w[1].len()),
            "ragged matrix rows"
        );
        Self { rows }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Non-empty cells as `(x, y, value)` in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v != EMPTY)
                .map(move |(x, &v)| (x, y, v))
        })
    }

    /// Cells flattened row-major.
    pub fn to_flat(&self) -> Vec<Cell> {
        self.rows.iter().flatten().copied().collect()
    }

    /// Transpose over the full extent (h×w becomes w×h).
    pub fn transposed(&self) -> Matrix {
        let (w, h) = (self.width(), self.height());
        let rows = (0..w)
            .map(|x| (0..h).map(|y| self.rows[y][x]).collect())
            .collect();
        Matrix { rows }
    }

    /// Quarter turn: transpose, then reverse each row (clockwise) or the row
    /// order (counter-clockwise).
    pub fn rotated(&self, turn: Turn) -> Matrix {
        let mut out = self.transposed();
        match turn {
            Turn::Clockwise => out.rows.iter_mut().for_each(|row| row.reverse()),
            Turn::CounterClockwise => out.rows.reverse(),
        }
        out
    }
}
