use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};
use tracing::debug;

use crate::Cell;
use crate::grid::Grid;
use crate::snake::Snake;

/// Random draws tried before falling back to picking among the free cells.
const MAX_RANDOM_DRAWS: usize = 64;

/// Picks a random cell not covered by the snake, or `None` once the snake
/// fills the whole board.
pub fn place_food<R: Rng>(rng: &mut R, grid: &Grid, snake: &Snake) -> Option<Cell> {
    let covered: HashSet<&Cell> = snake.body().iter().collect();
    if covered.len() >= grid.cell_count() {
        debug!(covered = covered.len(), "board full, no food placed");
        return None;
    }

    for _ in 0..MAX_RANDOM_DRAWS {
        let cell = grid.cell_at(rng.gen_range(0..grid.columns()), rng.gen_range(0..grid.rows()));
        if !snake.occupies(cell) {
            return Some(cell);
        }
    }

    // Crowded board, only look at what's left
    let choices: Vec<Cell> = grid.cells().filter(|cell| !snake.occupies(*cell)).collect();
    debug!(free = choices.len(), "food placement fell back to free cell scan");
    choices.choose(rng).copied()
}
