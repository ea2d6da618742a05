use std::io::{Write, stderr};
use std::thread;

use anyhow::{Context, Result};
use tracing::debug;

use crate::Cell;
use crate::game::{InputSource, Presenter};
use crate::grid::{Direction::{*, self}, Grid};
use crate::session::{Input, Screen, Session};
use crate::sprite::{Rotation, Sprite, SpriteKind, TURN_BASE_EDGES, snake_sprites, transformed_edges};
use crate::term::{TermManager, TermPos};

const FOOD_GLYPH: [char; 2] = ['O', ' '];
const DEAD_SNAKE_GLYPH: [char; 2] = ['X', ' '];
const EMPTY_GLYPH: [char; 2] = [' ', ' '];
/// Fills the right half of a cell whose sprite connects to the cell on its right.
const RIGHT_LINK: char = '━';

/// Draws the game into the terminal. Each grid cell takes two columns, so
/// cells come out roughly square.
pub struct TermPresenter {
    term: TermManager,
    grid: Grid,
    shown: Option<Screen>,
}

impl TermPresenter {
    pub fn new(grid: Grid) -> Result<Self> {
        let mut term = TermManager::new()?;
        let (width, height) = field_size(&grid);
        term.require_size(width, height)?;
        term.setup()?;
        Ok(TermPresenter { term, grid, shown: None })
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Clears the terminal the first time a screen is drawn. Returns whether it did.
    fn enter(&mut self, screen: Screen) -> Result<bool> {
        if self.shown == Some(screen) {
            return Ok(false);
        }

        debug!(?screen, "switching screen");
        self.shown = Some(screen);
        self.term.clear()?;
        let (width, height) = field_size(&self.grid);
        self.term.draw_borders(width, height)?;
        Ok(true)
    }

    fn draw_field<R>(&mut self, session: &Session<R>, dead: bool) -> Result<()> {
        for cell in self.grid.cells() {
            self.draw_cell(cell, EMPTY_GLYPH)?;
        }

        if let Some(food) = session.food() {
            self.draw_cell(food, FOOD_GLYPH)?;
        }

        for sprite in snake_sprites(session.snake(), &self.grid) {
            let glyph = if dead { DEAD_SNAKE_GLYPH } else { sprite_glyph(&sprite) };
            self.draw_cell(sprite.cell, glyph)?;
        }

        self.term.print_str_at((2, 0), &format!(" Score: {} ", session.score()))?;
        Ok(())
    }

    fn draw_cell(&mut self, cell: Cell, glyph: [char; 2]) -> Result<()> {
        let (x, y) = cell_position(&self.grid, cell);
        self.term.print_at((x, y), glyph[0])?;
        self.term.print_at((x + 1, y), glyph[1])
    }

    fn message_center(&self) -> TermPos {
        let (width, height) = field_size(&self.grid);
        (width / 2, height / 2)
    }
}

impl Presenter for TermPresenter {
    fn render_start(&mut self) -> Result<()> {
        if !self.enter(Screen::StartScreen)? {
            return Ok(());
        }

        let center = self.message_center();
        self.term.show_message(center, &[
            "SNAKE",
            "",
            "Arrow keys or WASD to move",
            "Esc or Q to quit",
            "",
            "Press Enter to Start",
        ])
    }

    fn render_running<R>(&mut self, session: &Session<R>) -> Result<()> {
        self.enter(Screen::Running)?;
        self.draw_field(session, false)?;
        self.term.flush()
    }

    fn render_game_over<R>(&mut self, session: &Session<R>) -> Result<()> {
        let won = match session.screen() {
            Screen::GameOver { won } => won,
            _ => false,
        };
        if !self.enter(Screen::GameOver { won })? {
            return Ok(());
        }

        self.draw_field(session, !won)?;
        let center = self.message_center();
        let score = format!("Score: {}", session.score());
        self.term.show_message(center, &[
            if won { "You won!" } else { "Game Over!" },
            score.as_str(),
            "",
            "Press Enter to Restart",
            "or Esc to quit",
        ])
    }

    fn play_eat_sound(&mut self) {
        // The terminal bell stands in for the chomp. Nobody waits on it.
        thread::spawn(|| {
            let mut out = stderr();
            if let Err(err) = out.write_all(b"\x07").and_then(|_| out.flush()) {
                debug!(error = %err, "bell not rung");
            }
        });
    }
}

impl InputSource for TermPresenter {
    fn drain_inputs(&mut self) -> Result<Vec<Input>> {
        self.term.read_inputs_queue().context("Error reading input")
    }
}

/// Terminal columns and rows taken by the field, border included.
fn field_size(grid: &Grid) -> (u16, u16) {
    ((grid.columns() * 2 + 2) as u16, (grid.rows() + 2) as u16)
}

fn cell_position(grid: &Grid, cell: Cell) -> TermPos {
    let (col, row) = grid.index_of(cell);
    ((1 + col * 2) as u16, (1 + row) as u16)
}

/// The two characters that draw a segment, picked from the sprite's kind and transform.
fn sprite_glyph(sprite: &Sprite) -> [char; 2] {
    match sprite.kind {
        SpriteKind::Head => match sprite.rotation {
            Rotation::R0 => ['>', ' '],
            Rotation::R90 => ['v', ' '],
            Rotation::R180 => ['<', RIGHT_LINK],
            Rotation::R270 => ['^', ' '],
        },
        SpriteKind::Body => match sprite.rotation {
            Rotation::R0 | Rotation::R180 => [RIGHT_LINK, RIGHT_LINK],
            Rotation::R90 | Rotation::R270 => ['┃', ' '],
        },
        SpriteKind::Tail => match sprite.rotation.apply(Right) {
            Right => ['╺', RIGHT_LINK],
            Left => ['╸', ' '],
            Up => ['╹', ' '],
            Down => ['╻', ' '],
        },
        SpriteKind::Turn => {
            let edges = transformed_edges(TURN_BASE_EDGES, sprite.rotation, sprite.mirror);
            let joins = |dir: Direction| edges.contains(&dir);
            let corner = match (joins(Left), joins(Up)) {
                (true, true) => '┛',
                (true, false) => '┓',
                (false, true) => '┗',
                (false, false) => '┏',
            };
            [corner, if joins(Right) { RIGHT_LINK } else { ' ' }]
        },
    }
}
