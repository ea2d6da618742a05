use std::time::Duration;

use rand::{Rng, rngs::ThreadRng};
use tracing::info;

use crate::Cell;
use crate::config::Settings;
use crate::engine::{self, TickOutcome};
use crate::food::place_food;
use crate::grid::Direction;
use crate::snake::Snake;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    StartScreen,
    Running,
    /// `won` is set when the snake filled the whole board.
    GameOver { won: bool },
}

/// What the player asked for, independent of the key that was pressed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Turn(Direction),
    Confirm,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything one game needs: the snake, its food, the score and which
/// screen is showing. Survives across games, `reset` starts over.
pub struct Session<R = ThreadRng> {
    pub(crate) settings: Settings,
    pub(crate) rng: R,
    pub(crate) snake: Snake,
    pub(crate) food: Option<Cell>,
    pub(crate) score: u32,
    pending_turn: Option<Direction>,
    screen: Screen,
}

impl Session<ThreadRng> {
    pub fn new(settings: Settings) -> Self {
        Session::with_rng(settings, rand::thread_rng())
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(settings: Settings, rng: R) -> Self {
        let mut session = Session {
            snake: settings.initial_snake(),
            settings,
            rng,
            food: None,
            score: 0,
            pending_turn: None,
            screen: Screen::StartScreen,
        };
        session.food = place_food(&mut session.rng, &session.settings.grid, &session.snake);
        session
    }

    /// Feeds one player input to the handler of the current screen.
    pub fn handle_input(&mut self, input: Input) -> Flow {
        if input == Input::Quit {
            return Flow::Quit;
        }

        match (self.screen, input) {
            (Screen::StartScreen, Input::Confirm) => {
                info!("game started");
                self.screen = Screen::Running;
            },
            (Screen::Running, Input::Turn(dir)) => {
                // Later turns in the same tick win, as long as they don't reverse the snake
                if dir != self.snake.get_direction().opposite() {
                    self.pending_turn = Some(dir);
                }
            },
            (Screen::GameOver { .. }, Input::Confirm) => self.reset(),
            _ => {}
        }

        Flow::Continue
    }

    /// Runs one game step if a game is in progress.
    pub fn update(&mut self) -> Option<TickOutcome> {
        if self.screen != Screen::Running {
            return None;
        }

        let turn = self.pending_turn.take();
        let outcome = engine::tick(self, turn);

        match outcome {
            TickOutcome::Collided => self.game_over(false),
            TickOutcome::BoardFilled => self.game_over(true),
            TickOutcome::Moved | TickOutcome::Ate => {}
        }

        Some(outcome)
    }

    pub fn reset(&mut self) {
        self.snake = self.settings.initial_snake();
        self.score = 0;
        self.pending_turn = None;
        self.food = place_food(&mut self.rng, &self.settings.grid, &self.snake);
        self.screen = Screen::StartScreen;
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self, won: bool) {
        info!(score = self.score, length = self.snake.len(), won, "game over");
        self.screen = Screen::GameOver { won };
    }
}

impl<R> Session<R> {
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// How long to wait before the next loop iteration.
    pub fn tick_interval(&self) -> Duration {
        match self.screen {
            Screen::Running => self.settings.tick_interval(self.score),
            _ => self.settings.base_delay,
        }
    }
}
