use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{Context, Result, bail};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, read, poll};
use tracing::{debug, warn};

use crate::grid::Direction;
use crate::session::Input;

/// Terminal position, column first.
pub type TermPos = (u16, u16);

pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        Ok(TermManager { width, height, stdout: stdout(), active: false })
    }

    /// Fails if the terminal can't fit a `width` x `height` area.
    pub fn require_size(&self, width: u16, height: u16) -> Result<()> {
        if self.width < width || self.height < height {
            bail!("Terminal is {}x{}, the game needs at least {}x{}", self.width, self.height, width, height);
        }
        Ok(())
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        self.active = true;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("Error hiding cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode().context("Error unsetting raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    /// Everything the player typed since the last call, translated into game inputs.
    pub fn read_inputs_queue(&self) -> Result<Vec<Input>> {
        let mut inputs = vec![];

        while poll(Duration::ZERO).context("Error polling terminal events")? {
            if let Event::Key(ev) = read().context("Error reading terminal event")? {
                if let Some(input) = input_from_key(&ev) {
                    inputs.push(input);
                }
            }
        }

        if !inputs.is_empty() {
            debug!(?inputs, "inputs drained");
        }
        Ok(inputs)
    }

    pub fn draw_borders(&mut self, width: u16, height: u16) -> Result<()> {
        let end_x = width - 1;
        let end_y = height - 1;

        for x in 0..width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((x, 0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in 1..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    /// Draws `lines` in a blank box centered on `center`.
    pub fn show_message(&mut self, center: TermPos, lines: &[&str]) -> Result<()> {
        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as u16;
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        let blank = " ".repeat(msg_width as usize);
        self.print_str_at(top_left, &blank)?;
        self.print_str_at((top_left.0, top_left.1 + msg_height - 1), &blank)?;

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            self.print_str_at((top_left.0, top_left.1 + i as u16 + 1), &padded_line)?;
        }

        self.flush()
    }

    pub fn print_at(&mut self, pos: TermPos, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    pub fn print_str_at(&mut self, pos: TermPos, s: &str) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(s))?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(error = %err, "terminal not restored");
        }
    }
}

/// Maps a key press to a game input. Key repeats and releases are ignored.
pub fn input_from_key(ev: &KeyEvent) -> Option<Input> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }
    if ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Input::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Input::Turn(Direction::Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Input::Turn(Direction::Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Input::Turn(Direction::Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Input::Turn(Direction::Right)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Input::Confirm),
        KeyCode::Esc | KeyCode::Char('q') => Some(Input::Quit),
        _ => None,
    }
}
