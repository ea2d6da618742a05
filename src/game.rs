use std::thread::sleep;

use anyhow::Result;
use rand::Rng;
use tracing::info;

use crate::engine::TickOutcome;
use crate::session::{Flow, Input, Screen, Session};

/// Draws whatever screen the session is on. Owns its own resources, the
/// session only gets borrowed for the duration of a call.
pub trait Presenter {
    fn render_start(&mut self) -> Result<()>;
    fn render_running<R>(&mut self, session: &Session<R>) -> Result<()>;
    fn render_game_over<R>(&mut self, session: &Session<R>) -> Result<()>;
    /// Fire and forget, must not block the loop.
    fn play_eat_sound(&mut self);
}

pub trait InputSource {
    /// Every input queued since the previous call.
    fn drain_inputs(&mut self) -> Result<Vec<Input>>;
}

pub struct SnakeGame<F, R> {
    session: Session<R>,
    frontend: F,
}

impl<F: Presenter + InputSource, R: Rng> SnakeGame<F, R> {
    pub fn new(session: Session<R>, frontend: F) -> Self {
        SnakeGame { session, frontend }
    }

    /// Runs until the player quits.
    pub fn play(&mut self) -> Result<()> {
        self.render()?;

        loop {
            sleep(self.session.tick_interval());

            if self.step()? == Flow::Quit {
                info!(score = self.session.score(), "player quit");
                return Ok(());
            }
        }
    }

    /// One loop iteration: drain input, update, draw.
    pub fn step(&mut self) -> Result<Flow> {
        for input in self.frontend.drain_inputs()? {
            if self.session.handle_input(input) == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }

        match self.session.update() {
            Some(TickOutcome::Ate) | Some(TickOutcome::BoardFilled) => self.frontend.play_eat_sound(),
            _ => {}
        }

        self.render()?;
        Ok(Flow::Continue)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn render(&mut self) -> Result<()> {
        match self.session.screen() {
            Screen::StartScreen => self.frontend.render_start(),
            Screen::Running => self.frontend.render_running(&self.session),
            Screen::GameOver { .. } => self.frontend.render_game_over(&self.session),
        }
    }
}
