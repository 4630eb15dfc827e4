use std::io::{BufRead, Write};

use sweeper_core::{GamePhase, LayoutGenerator, Minesweeper};
use web_time::Instant;

use crate::command::{Command, HELP};
use crate::render::render;
use crate::ticker::Ticker;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drives one engine from line-based input, acting as its host.
pub struct Session<G> {
    game: Minesweeper<G>,
    ticker: Ticker,
    json: bool,
}

impl<G: LayoutGenerator> Session<G> {
    pub fn new(game: Minesweeper<G>, json: bool) -> Self {
        Self {
            game,
            ticker: Ticker::new(Instant::now()),
            json,
        }
    }

    pub fn game(&self) -> &Minesweeper<G> {
        &self.game
    }

    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> anyhow::Result<()> {
        self.show(&mut out)?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    writeln!(out, "{err}")?;
                    continue;
                }
            };

            if self.apply(command, Instant::now()) == Flow::Quit {
                break;
            }
            if command == Command::Help {
                writeln!(out, "{HELP}")?;
            } else {
                self.show(&mut out)?;
            }
        }

        log::debug!("Session closed in phase {:?}", self.game.phase());
        Ok(())
    }

    /// Delivers pending clock ticks, then applies `command` to the game.
    pub fn apply(&mut self, command: Command, now: Instant) -> Flow {
        for _ in 0..self.ticker.poll(now) {
            self.game.tick();
        }

        let phase_before = self.game.phase();
        match command {
            Command::Reveal(coords) => {
                let outcome = self.game.reveal(coords);
                log::debug!("reveal {:?}: {:?}", coords, outcome);
            }
            Command::Flag(coords) => {
                let outcome = self.game.toggle_flag(coords);
                log::debug!("flag {:?}: {:?}", coords, outcome);
            }
            Command::Chord(coords) => {
                let outcome = self.game.chord_reveal(coords);
                log::debug!("chord {:?}: {:?}", coords, outcome);
            }
            Command::New => self.game.reset(),
            Command::Help => {}
            Command::Quit => return Flow::Quit,
        }

        if phase_before == GamePhase::NotStarted && self.game.phase() != GamePhase::NotStarted {
            self.ticker.restart(now);
        }
        Flow::Continue
    }

    fn show(&self, out: &mut impl Write) -> anyhow::Result<()> {
        write!(out, "{}", render(&self.game))?;
        if self.json {
            serde_json::to_writer(&mut *out, &self.game.snapshot())?;
            writeln!(out)?;
        }
        Ok(())
    }
}
