use crate::Cell;
use crate::grid::{Direction::{*, self}, Grid};

/// Body segments, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Cell>,
    direction: Direction,
}

impl Snake {
    /// Builds a straight snake with its head at `head`, trailing behind it
    /// opposite to `direction`.
    pub fn new(head: Cell, size: usize, direction: Direction, grid: &Grid) -> Self {
        let behind = direction.opposite();
        let mut body = Vec::with_capacity(size);
        let mut pos = head;

        for _ in 0..size.max(1) {
            body.push(pos);
            pos = grid.neighbour(pos, behind);
        }

        Snake { body, direction }
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Adopts `new_direction` unless it would reverse the snake onto itself.
    /// Returns whether the direction was accepted.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        match (&new_direction, &self.direction) {
            (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right) => false,
            _ => {
                self.direction = new_direction;
                true
            }
        }
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    /// Where the head lands after one step in the current direction.
    pub fn next_head(&self, grid: &Grid) -> Cell {
        grid.neighbour(self.head(), self.direction)
    }

    /// Whether `cell` is part of the body once it has shifted forward. The
    /// tail leaves its cell during the shift, so it is not an obstacle.
    pub fn collides_with(&self, cell: Cell) -> bool {
        self.body[..self.body.len() - 1].contains(&cell)
    }

    /// Shifts every segment into its predecessor's cell and puts the head at `new_head`.
    pub fn step(&mut self, new_head: Cell) {
        self.body.pop();
        self.body.insert(0, new_head);
    }

    /// Adds a segment on top of the current tail, so the snake is one longer
    /// once it next moves and no gap shows up in between.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push(tail);
    }
}
