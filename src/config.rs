use std::{cmp::max, time::Duration};

use crate::Cell;
use crate::grid::{Direction, Grid};
use crate::snake::Snake;

pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 480;
pub const CELL_SIZE: i32 = 40;
pub const INITIAL_SNAKE_LENGTH: usize = 3;

const BASE_DELAY_MS: u64 = 200;
const SPEEDUP_PER_POINT_MS: u64 = 5;
const MIN_DELAY_MS: u64 = 50;

/// Fixed rules of the game. Everything that shapes a session lives here so
/// tests can build sessions on other boards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub grid: Grid,
    pub initial_length: usize,
    pub initial_head: Cell,
    pub initial_direction: Direction,
    pub base_delay: Duration,
    pub speedup_per_point: Duration,
    pub min_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            grid: Grid::new(SCREEN_WIDTH, SCREEN_HEIGHT, CELL_SIZE),
            initial_length: INITIAL_SNAKE_LENGTH,
            initial_head: (SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2),
            initial_direction: Direction::Right,
            base_delay: Duration::from_millis(BASE_DELAY_MS),
            speedup_per_point: Duration::from_millis(SPEEDUP_PER_POINT_MS),
            min_delay: Duration::from_millis(MIN_DELAY_MS),
        }
    }
}

impl Settings {
    pub fn initial_snake(&self) -> Snake {
        Snake::new(self.initial_head, self.initial_length, self.initial_direction, &self.grid)
    }

    /// Time between two game steps. Speeds up with higher scores.
    pub fn tick_interval(&self, score: u32) -> Duration {
        self.speedup_per_point
            .checked_mul(score)
            .and_then(|speedup| self.base_delay.checked_sub(speedup))
            .map_or(self.min_delay, |delay| max(delay, self.min_delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_snake_is_centered() {
        let snake = Settings::default().initial_snake();
        assert_eq!(snake.body(), &[(320, 240), (280, 240), (240, 240)]);
    }

    #[test]
    fn interval_shrinks_with_score_down_to_floor() {
        let settings = Settings::default();
        assert_eq!(settings.tick_interval(0), Duration::from_millis(200));
        assert_eq!(settings.tick_interval(4), Duration::from_millis(180));
        assert_eq!(settings.tick_interval(30), Duration::from_millis(50));
        assert_eq!(settings.tick_interval(31), Duration::from_millis(50));
        assert_eq!(settings.tick_interval(u32::MAX), Duration::from_millis(50));
    }
}
