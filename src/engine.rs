use rand::Rng;
use tracing::{debug, info};

use crate::food::place_food;
use crate::grid::Direction;
use crate::session::Session;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    /// The head would have run into the body. Nothing was moved.
    Collided,
    /// The snake ate and covers every cell, there is nowhere left for food.
    BoardFilled,
}

/// Advances the session's snake by one cell, turning first if `input` allows it.
pub fn tick<R: Rng>(session: &mut Session<R>, input: Option<Direction>) -> TickOutcome {
    if let Some(dir) = input {
        session.snake.set_direction(dir);
    }

    let grid = session.settings.grid;
    let new_head = session.snake.next_head(&grid);

    if session.snake.collides_with(new_head) {
        debug!(?new_head, length = session.snake.len(), "snake ran into itself");
        return TickOutcome::Collided;
    }

    session.snake.step(new_head);

    if session.food != Some(new_head) {
        return TickOutcome::Moved;
    }

    session.snake.grow();
    session.score += 1;
    session.food = place_food(&mut session.rng, &grid, &session.snake);
    debug!(score = session.score, food = ?session.food, "food eaten");

    match session.food {
        Some(_) => TickOutcome::Ate,
        None => {
            info!(score = session.score, "snake filled the board");
            TickOutcome::BoardFilled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::grid::{Direction::*, Grid};
    use crate::snake::Snake;
    use rand::{SeedableRng, rngs::StdRng};

    fn session() -> Session<StdRng> {
        let mut session = Session::with_rng(Settings::default(), StdRng::seed_from_u64(3));
        session.food = Some((0, 0));
        session
    }

    #[test]
    fn plain_move_from_center() {
        let mut session = session();

        assert_eq!(tick(&mut session, None), TickOutcome::Moved);
        assert_eq!(session.snake.body(), &[(360, 240), (320, 240), (280, 240)]);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn reversing_is_ignored() {
        let mut session = session();

        tick(&mut session, Some(Left));
        assert_eq!(session.snake.head(), (360, 240));
        assert_eq!(session.snake.get_direction(), Right);

        tick(&mut session, Some(Up));
        assert_eq!(session.snake.head(), (360, 200));
    }

    #[test]
    fn eating_grows_and_scores() {
        let mut session = session();
        session.food = Some((360, 240));

        assert_eq!(tick(&mut session, None), TickOutcome::Ate);
        assert_eq!(session.snake.len(), 4);
        assert_eq!(session.score, 1);
        let food = session.food.unwrap();
        assert!(!session.snake.occupies(food));

        session.food = Some((0, 0));
        assert_eq!(tick(&mut session, Some(Down)), TickOutcome::Moved);
        assert_eq!(session.snake.body(), &[(360, 280), (360, 240), (320, 240), (280, 240)]);
    }

    #[test]
    fn wraps_instead_of_dying() {
        let mut session = session();
        session.snake = Snake::new((600, 240), 3, Right, &session.settings.grid);

        assert_eq!(tick(&mut session, None), TickOutcome::Moved);
        assert_eq!(session.snake.head(), (0, 240));

        session.snake = Snake::new((320, 0), 3, Up, &session.settings.grid);
        assert_eq!(tick(&mut session, None), TickOutcome::Moved);
        assert_eq!(session.snake.head(), (320, 440));
    }

    #[test]
    fn collision_leaves_snake_untouched() {
        let mut session = session();
        let grid = session.settings.grid;
        // Hook shape: head at (80,80) heading up, body curls back to its left
        let mut snake = Snake::new((40, 120), 5, Down, &grid);
        for dir in [Right, Up].iter() {
            snake.set_direction(*dir);
            snake.step(snake.next_head(&grid));
        }
        assert_eq!(snake.body(), &[(80, 80), (80, 120), (40, 120), (40, 80), (40, 40)]);
        session.snake = snake.clone();

        assert_eq!(tick(&mut session, Some(Left)), TickOutcome::Collided);
        assert_eq!(session.snake.body(), snake.body());
        assert_eq!(session.score, 0);
    }

    #[test]
    fn last_food_fills_the_board() {
        let settings = Settings {
            grid: Grid::new(4, 1, 1),
            initial_head: (2, 0),
            ..Settings::default()
        };
        let mut session = Session::with_rng(settings, StdRng::seed_from_u64(5));
        assert_eq!(session.food, Some((3, 0)));

        // The grown tail still shares a cell, so one more cell is free
        assert_eq!(tick(&mut session, None), TickOutcome::Ate);
        assert_eq!(session.food, Some((0, 0)));

        assert_eq!(tick(&mut session, None), TickOutcome::BoardFilled);
        assert_eq!(session.snake.len(), 5);
        assert_eq!(session.score, 2);
        assert_eq!(session.food, None);
    }
}
