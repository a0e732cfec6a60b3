use crate::command::Command;
use crate::game::{Direction, Ending, Game, Input};
use crossterm::event::{poll, read, Event};
use log::info;
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

/// Drives a [`Game`]: waits out the tick interval while handling key presses,
/// then advances the game and redraws.
#[derive(Clone, Debug)]
pub(crate) struct App<R> {
    game: Game<R>,

    /// When the next tick is due.  `None` while the game is not running and
    /// right after a tick, so that the next wait uses the interval in effect
    /// at that time.
    next_tick: Option<Instant>,

    /// Whether the terminal reports key releases.  If it doesn't, each press
    /// of the boost key switches boost on or off.
    key_releases: bool,

    /// Highest score reached by any finished run
    best: Option<u32>,

    quitting: bool,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(game: Game<R>, key_releases: bool) -> App<R> {
        App {
            game,
            next_tick: None,
            key_releases,
            best: None,
            quitting: false,
        }
    }

    /// Run until the user quits, and return the best score of the session
    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<Option<u32>> {
        while !self.quitting {
            terminal.draw(|frame| frame.render_widget(self.game.snapshot(), frame.area()))?;
            self.process_input()?;
        }
        Ok(self.best)
    }

    fn process_input(&mut self) -> io::Result<()> {
        if self.game.running() {
            let interval = self.game.interval();
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + interval);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.tick();
            } else {
                self.handle_event(read()?);
            }
        } else {
            self.next_tick = None;
            self.handle_event(read()?);
        }
        Ok(())
    }

    fn tick(&mut self) {
        self.next_tick = None;
        if let Some(ending) = self.game.tick() {
            self.record(ending);
        }
    }

    fn record(&mut self, ending: Ending) {
        info!("Run over with score {}: {}", ending.score, ending.cause);
        if self.best.is_none_or(|b| ending.score > b) {
            self.best = Some(ending.score);
        }
    }

    fn handle_event(&mut self, event: Event) {
        let Some(cmd) = event.as_key_event().and_then(Command::from_key_event) else {
            return;
        };
        let input = match cmd {
            Command::Quit => {
                self.quitting = true;
                return;
            }
            Command::Up => Input::Turn(Direction::North),
            Command::Down => Input::Turn(Direction::South),
            Command::Left => Input::Turn(Direction::West),
            Command::Right => Input::Turn(Direction::East),
            Command::Pause => Input::TogglePause,
            Command::Autopilot => Input::ToggleAutopilot,
            Command::Reset => {
                self.next_tick = None;
                Input::Reset
            }
            Command::BoostPress if !self.key_releases && self.game.boosted() => Input::Release,
            Command::BoostPress => Input::Boost,
            Command::BoostRelease => Input::Release,
        };
        self.game.apply(input);
    }
}
