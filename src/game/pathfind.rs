//! Route planning for the autopilot.
//!
//! Planning works on an [`Occupancy`] snapshot copied out of the snake when
//! the search starts, never on the live snake.  There are two tiers:
//!
//! 1. A breadth-first search from the head to the food over the snapshot,
//!    treating the whole body as a wall.  This gives a shortest route whenever
//!    one exists.
//! 2. When there is no such route, a depth-limited search that simulates the
//!    body actually moving (so the tail frees up cells as it goes) and picks
//!    the line of moves that reaches the food or, failing that, stays alive
//!    longest.
use super::direction::Direction;
use super::grid::{Cell, Grid};
use super::snake::Snake;
use log::{debug, trace};
use std::collections::{hash_map::Entry, HashMap, VecDeque};

/// Score for a line that reaches the food, before subtracting its length
const FOOD_SCORE: i64 = 1_000_000;

/// Score for a line that ends with no legal move, before adding its length
const TRAPPED_SCORE: i64 = -1_000_000;

/// A planned sequence of moves.
///
/// The plan is owned by whoever asked for it and is used up one move at a
/// time; once a move has been taken it cannot be taken again.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct Path {
    /// The moves, last move first, so that the next move is always at the end
    moves: Vec<Direction>,
}

impl Path {
    /// Build a path from moves listed in the order they are to be taken
    #[cfg(test)]
    pub(super) fn from_moves<I>(moves: I) -> Path
    where
        I: IntoIterator<Item = Direction>,
        I::IntoIter: DoubleEndedIterator,
    {
        Path {
            moves: moves.into_iter().rev().collect(),
        }
    }

    /// Remove and return the next move to take
    pub(super) fn next_move(&mut self) -> Option<Direction> {
        self.moves.pop()
    }

    /// Iterate over the remaining moves in the order they will be taken
    pub(super) fn moves(&self) -> impl Iterator<Item = Direction> + '_ {
        self.moves.iter().rev().copied()
    }

    pub(super) fn len(&self) -> usize {
        self.moves.len()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Plans routes from the snake's head to the food
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Pathfinder {
    /// How many moves ahead the fallback search looks
    horizon: u32,
}

impl Pathfinder {
    pub(super) fn new(horizon: u32) -> Pathfinder {
        Pathfinder { horizon }
    }

    /// Plan a route for `snake` to `food`.  Returns an empty path only if the
    /// snake has no move at all that doesn't kill it immediately.
    pub(super) fn find(&self, grid: Grid, snake: &Snake, food: Cell) -> Path {
        let occupancy = Occupancy::new(grid, snake);
        if let Some(path) = shortest_path(&occupancy, food) {
            debug!(
                "Found {}-move route from {} to food at {food}",
                path.len(),
                snake.head()
            );
            return path;
        }
        let path = survival_path(occupancy, food, self.horizon);
        debug!(
            "No route from {} to food at {food}; falling back to {}-move survival line",
            snake.head(),
            path.len()
        );
        path
    }
}

/// Breadth-first search from the head to `goal`, with every body cell
/// (including the tail) treated as blocked.  Returns `None` if `goal` can't
/// be reached.
fn shortest_path(occupancy: &Occupancy, goal: Cell) -> Option<Path> {
    let start = occupancy.head();
    let mut parents = HashMap::<Cell, (Cell, Direction)>::new();
    let mut queue = VecDeque::from([start]);
    let mut found = false;
    while let Some(cell) = queue.pop_front() {
        if cell == goal {
            found = true;
            break;
        }
        for d in Direction::iter() {
            let next = d.step(cell);
            if !occupancy.is_free(next) {
                continue;
            }
            if let Entry::Vacant(e) = parents.entry(next) {
                e.insert((cell, d));
                queue.push_back(next);
            }
        }
    }
    if !found {
        return None;
    }
    let mut moves = Vec::new();
    let mut cell = goal;
    while let Some(&(prev, d)) = parents.get(&cell) {
        moves.push(d);
        cell = prev;
    }
    Some(Path { moves })
}

/// Look up to `horizon` moves ahead, moving the body as the game would, and
/// return the best line found.  Lines that reach the food beat lines that
/// survive the whole horizon, which beat lines that get trapped; among
/// trapped lines, longer is better.  Ties go to the line whose moves come
/// first in neighbor order.
fn survival_path(mut occupancy: Occupancy, food: Cell, horizon: u32) -> Path {
    let line = explore(&mut occupancy, food, 0, horizon);
    trace!("Survival line scored {}", line.score);
    Path { moves: line.moves }
}

/// The best line found below one node of the fallback search
#[derive(Clone, Debug, Eq, PartialEq)]
struct Line {
    score: i64,
    /// Moves, last move first
    moves: Vec<Direction>,
}

fn explore(occupancy: &mut Occupancy, food: Cell, depth: u32, horizon: u32) -> Line {
    if depth >= horizon {
        return Line {
            score: i64::from(depth),
            moves: Vec::new(),
        };
    }
    let mut best: Option<Line> = None;
    for d in Direction::iter() {
        let Some(undo) = occupancy.shift(d) else {
            continue;
        };
        let ate = occupancy.head() == food;
        let mut line = if ate {
            Line {
                score: FOOD_SCORE - i64::from(depth + 1),
                moves: Vec::new(),
            }
        } else {
            explore(occupancy, food, depth + 1, horizon)
        };
        occupancy.unshift(undo);
        line.moves.push(d);
        if best.as_ref().is_none_or(|b| line.score > b.score) {
            best = Some(line);
        }
        // Nothing below this node can beat eating on the very next move
        if ate {
            break;
        }
    }
    best.unwrap_or(Line {
        score: TRAPPED_SCORE + i64::from(depth),
        moves: Vec::new(),
    })
}

/// A private copy of the snake's body plus a per-cell occupancy table, so
/// that searches can look up and move cells without touching the real snake
#[derive(Clone, Debug, Eq, PartialEq)]
struct Occupancy {
    grid: Grid,
    occupied: Vec<bool>,
    body: VecDeque<Cell>,
    heading: Direction,
}

/// What [`Occupancy::shift()`] needs to put back to undo a move
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Undo {
    tail: Cell,
    heading: Direction,
}

impl Occupancy {
    fn new(grid: Grid, snake: &Snake) -> Occupancy {
        let mut occupancy = Occupancy {
            grid,
            occupied: vec![false; grid.len()],
            body: snake.body().clone(),
            heading: snake.heading(),
        };
        for &cell in snake.body() {
            occupancy.set(cell, true);
        }
        occupancy
    }

    fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body should never be empty")
    }

    /// Is `cell` on the board and not covered by the body?
    fn is_free(&self, cell: Cell) -> bool {
        self.grid
            .index(cell)
            .and_then(|i| self.occupied.get(i))
            .is_some_and(|&occ| !occ)
    }

    fn set(&mut self, cell: Cell, value: bool) {
        if let Some(slot) = self.grid.index(cell).and_then(|i| self.occupied.get_mut(i)) {
            *slot = value;
        }
    }

    /// Move the body one cell in direction `d` if that wouldn't be an
    /// immediate collision or a turn back into the neck.  The tail cell counts
    /// as free, since it moves out of the way in the same step.
    fn shift(&mut self, d: Direction) -> Option<Undo> {
        if self.body.len() > 1 && d == self.heading.reverse() {
            return None;
        }
        let head = d.step(self.head());
        let tail = *self.body.back()?;
        if head != tail && !self.is_free(head) {
            return None;
        }
        let _ = self.body.pop_back();
        self.set(tail, false);
        self.body.push_front(head);
        self.set(head, true);
        let undo = Undo {
            tail,
            heading: self.heading,
        };
        self.heading = d;
        Some(undo)
    }

    /// Reverse the most recent successful `shift()`
    fn unshift(&mut self, undo: Undo) {
        if let Some(head) = self.body.pop_front() {
            self.set(head, false);
        }
        self.body.push_back(undo.tail);
        self.set(undo.tail, true);
        self.heading = undo.heading;
    }
}
