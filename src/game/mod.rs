mod collision;
mod direction;
mod food;
mod grid;
mod pathfind;
mod render;
mod snake;
mod speed;
pub(crate) use self::collision::Collision;
use self::collision::Outcome;
pub(crate) use self::direction::Direction;
pub(crate) use self::grid::{Cell, Grid};
use self::pathfind::{Path, Pathfinder};
use self::snake::Snake;
use self::speed::Speed;
pub(crate) use self::speed::SpeedPolicy;
use crate::consts;
use log::{debug, info, trace};
use rand::{rngs::StdRng, Rng};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// Everything a run is built from.  A reset starts over from these.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Settings {
    pub(crate) grid: Grid,
    pub(crate) speed: SpeedPolicy,

    /// Whether the autopilot is engaged when a run starts
    pub(crate) autopilot: bool,

    /// Lookahead depth of the pathfinder's fallback search
    pub(crate) horizon: u32,
}

/// A discrete input event from the player
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Input {
    Turn(Direction),
    TogglePause,
    ToggleAutopilot,
    Reset,
    Boost,
    Release,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum State {
    Running,
    Paused,
    GameOver(EndCause),
}

/// Why a run ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EndCause {
    Collision(Collision),
    /// The snake covers every cell, so there is nowhere left for food
    BoardFilled,
}

impl fmt::Display for EndCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndCause::Collision(c) => write!(f, "the snake {c}"),
            EndCause::BoardFilled => write!(f, "the board is full"),
        }
    }
}

/// Emitted once, by the tick that ends a run
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Ending {
    pub(crate) score: u32,
    pub(crate) cause: EndCause,
}

/// A route from the pathfinder along with the state it was planned for
#[derive(Clone, Debug, Eq, PartialEq)]
struct Plan {
    path: Path,
    /// The food cell the route leads to
    food: Cell,
    /// Where the head should be when the next move is taken
    head: Cell,
}

/// One game session: the board, the snake, the food, and everything that
/// decides how they change from tick to tick.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = StdRng> {
    rng: R,
    settings: Settings,
    pathfinder: Pathfinder,
    snake: Snake,
    food: Cell,
    score: u32,
    speed: Speed,
    state: State,
    autopilot: bool,

    /// The most recent direction key pressed since the last tick
    steer: Option<Direction>,

    plan: Option<Plan>,
}

impl<R: Rng> Game<R> {
    pub(crate) fn new(settings: Settings, rng: R) -> Game<R> {
        let snake = Snake::new(settings.grid.center(), consts::START_HEADING);
        let mut game = Game {
            rng,
            settings,
            pathfinder: Pathfinder::new(settings.horizon),
            food: snake.head(),
            snake,
            score: 0,
            speed: Speed::new(settings.speed),
            state: State::Running,
            autopilot: settings.autopilot,
            steer: None,
            plan: None,
        };
        game.reset();
        game
    }

    /// Throw away the current run and start a new one from the settings.  The
    /// random number generator carries on where it was.
    pub(crate) fn reset(&mut self) {
        let grid = self.settings.grid;
        self.snake = Snake::new(grid.center(), consts::START_HEADING);
        self.food = food::spawn(&mut self.rng, grid, &self.snake);
        self.score = 0;
        self.speed = Speed::new(self.settings.speed);
        self.state = State::Running;
        self.autopilot = self.settings.autopilot;
        self.steer = None;
        self.plan = None;
        info!(
            "Starting run on {}x{} board with autopilot {}",
            grid.width(),
            grid.height(),
            if self.autopilot { "on" } else { "off" }
        );
    }

    /// Advance the game by one step.  Returns `Some` if this step ended the
    /// run.  Does nothing unless the game is running.
    pub(crate) fn tick(&mut self) -> Option<Ending> {
        if self.state != State::Running {
            return None;
        }
        let direction = self.next_direction();
        self.snake.advance(direction);
        trace!("Snake moved {direction} to {}", self.snake.head());
        let grid = self.settings.grid;
        if self.snake.head() == self.food {
            self.snake.grow();
            self.score += 1;
            debug!("Ate food at {}; score is now {}", self.food, self.score);
            if self.speed.on_score(self.score) {
                debug!("Tick interval is now {:?}", self.speed.interval());
            }
            if self.snake.len() >= grid.len() {
                return Some(self.end(EndCause::BoardFilled));
            }
            self.food = food::spawn(&mut self.rng, grid, &self.snake);
        }
        match collision::check(&self.snake, grid) {
            Outcome::Alive => None,
            Outcome::Collided(c) => Some(self.end(EndCause::Collision(c))),
        }
    }

    /// Act on an input event.  Direction keys only count while the autopilot
    /// is off, and the last one before a tick wins.
    pub(crate) fn apply(&mut self, input: Input) {
        match input {
            Input::Turn(d) => {
                if !self.autopilot && !self.game_over() {
                    self.steer = Some(d);
                }
            }
            Input::TogglePause => match self.state {
                State::Running => {
                    debug!("Paused");
                    self.state = State::Paused;
                }
                State::Paused => {
                    debug!("Resumed");
                    self.state = State::Running;
                }
                State::GameOver(_) => (),
            },
            Input::ToggleAutopilot => {
                if !self.game_over() {
                    self.autopilot = !self.autopilot;
                    self.steer = None;
                    self.plan = None;
                    info!(
                        "Autopilot switched {}",
                        if self.autopilot { "on" } else { "off" }
                    );
                }
            }
            Input::Reset => self.reset(),
            Input::Boost => self.speed.boost(),
            Input::Release => self.speed.release(),
        }
    }

    fn next_direction(&mut self) -> Direction {
        let heading = self.snake.heading();
        if !self.autopilot {
            return self.steer.take().unwrap_or(heading);
        }
        let head = self.snake.head();
        let mut plan = match self.plan.take() {
            Some(plan) if plan.food == self.food && plan.head == head && !plan.path.is_empty() => {
                plan
            }
            stale => {
                if stale.is_some() {
                    debug!("Dropping route planned for a different board");
                }
                Plan {
                    path: self
                        .pathfinder
                        .find(self.settings.grid, &self.snake, self.food),
                    food: self.food,
                    head,
                }
            }
        };
        let Some(d) = plan.path.next_move() else {
            debug!("No safe move from {head}; carrying on {heading}");
            return heading;
        };
        if !plan.path.is_empty() {
            plan.head = d.step(head);
            self.plan = Some(plan);
        }
        d
    }

    fn end(&mut self, cause: EndCause) -> Ending {
        self.state = State::GameOver(cause);
        self.plan = None;
        Ending {
            score: self.score,
            cause,
        }
    }
}

impl<R> Game<R> {
    /// The time to wait before the next tick
    pub(crate) fn interval(&self) -> Duration {
        self.speed.interval()
    }

    pub(crate) fn state(&self) -> State {
        self.state
    }

    pub(crate) fn running(&self) -> bool {
        self.state == State::Running
    }

    pub(crate) fn boosted(&self) -> bool {
        self.speed.boosted()
    }

    fn game_over(&self) -> bool {
        matches!(self.state, State::GameOver(_))
    }

    /// A read-only view of everything needed to draw the game
    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.settings.grid,
            body: self.snake.body(),
            heading: self.snake.heading(),
            food: self.food,
            score: self.score,
            interval: self.speed.interval(),
            boosted: self.speed.boosted(),
            autopilot: self.autopilot,
            state: self.state,
        }
    }
}

/// A read-only view of a [`Game`] for drawing
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot<'a> {
    pub(crate) grid: Grid,
    /// The snake's cells, head first
    pub(crate) body: &'a VecDeque<Cell>,
    pub(crate) heading: Direction,
    pub(crate) food: Cell,
    pub(crate) score: u32,
    pub(crate) interval: Duration,
    pub(crate) boosted: bool,
    pub(crate) autopilot: bool,
    pub(crate) state: State,
}
