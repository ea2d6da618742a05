use crate::Cell;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Offset of one cell in this direction, in cell units. Rows grow downwards.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// The playing field: a `width` x `height` pixel area tiled by square cells.
/// Cells are addressed by the pixel coordinates of their top-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cell_size: i32,
}

impl Grid {
    pub const fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Grid { width, height, cell_size }
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        (self.columns() * self.rows()) as usize
    }

    pub fn cell_at(&self, column: i32, row: i32) -> Cell {
        (column * self.cell_size, row * self.cell_size)
    }

    /// (column, row) of a cell.
    pub fn index_of(&self, cell: Cell) -> (i32, i32) {
        (cell.0 / self.cell_size, cell.1 / self.cell_size)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let grid = *self;
        (0..grid.rows()).flat_map(move |row| (0..grid.columns()).map(move |col| grid.cell_at(col, row)))
    }

    /// Brings a coordinate that left the field back in through the opposite edge.
    pub fn wrap(&self, cell: Cell) -> Cell {
        let (w, h) = (self.columns() * self.cell_size, self.rows() * self.cell_size);
        (cell.0.rem_euclid(w), cell.1.rem_euclid(h))
    }

    pub fn neighbour(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.offset();
        self.wrap((cell.0 + dx * self.cell_size, cell.1 + dy * self.cell_size))
    }

    /// Direction leading from `from` to the adjacent cell `to`, taking wraparound into account.
    pub fn direction_between(&self, from: Cell, to: Cell) -> Option<Direction> {
        Direction::ALL.iter().copied().find(|dir| self.neighbour(from, *dir) == to)
    }
}
