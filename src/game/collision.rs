use super::grid::Grid;
use super::snake::Snake;
use std::fmt;

/// Result of checking the snake after a move
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Outcome {
    Alive,
    Collided(Collision),
}

/// What the snake ran into
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    /// The head left the board
    Wall,
    /// The head landed on another body segment
    Body,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collision::Wall => write!(f, "hit the wall"),
            Collision::Body => write!(f, "bit itself"),
        }
    }
}

/// Check the snake's head against the board edges and the rest of its body.
/// Must be called after the move that produced the current head.
pub(super) fn check(snake: &Snake, grid: Grid) -> Outcome {
    let head = snake.head();
    if !grid.in_bounds(head) {
        Outcome::Collided(Collision::Wall)
    } else if snake.body().iter().skip(1).any(|&c| c == head) {
        Outcome::Collided(Collision::Body)
    } else {
        Outcome::Alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use crate::game::grid::Cell;

    #[test]
    fn alive_in_open_space() {
        let mut snake = Snake::new(Cell::new(2, 2), Direction::East);
        snake.advance(Direction::East);
        assert_eq!(check(&snake, Grid::new(5, 5)), Outcome::Alive);
    }

    #[test]
    fn wall() {
        let mut snake = Snake::new(Cell::new(4, 1), Direction::East);
        snake.advance(Direction::East);
        assert_eq!(check(&snake, Grid::new(5, 5)), Outcome::Collided(Collision::Wall));
    }

    #[test]
    fn self_bite() {
        // A ring of seven with the head about to turn right into its own side
        let mut snake = Snake::from_cells(
            [
                Cell::new(2, 2),
                Cell::new(2, 1),
                Cell::new(1, 1),
                Cell::new(1, 2),
                Cell::new(1, 3),
                Cell::new(2, 3),
                Cell::new(3, 3),
            ],
            Direction::South,
        )
        .unwrap();
        snake.advance(Direction::West);
        assert_eq!(snake.head(), Cell::new(1, 2));
        assert_eq!(check(&snake, Grid::new(6, 6)), Outcome::Collided(Collision::Body));
    }

    #[test]
    fn chasing_own_tail_is_safe() {
        let mut snake = Snake::from_cells(
            [
                Cell::new(1, 1),
                Cell::new(2, 1),
                Cell::new(2, 2),
                Cell::new(1, 2),
            ],
            Direction::West,
        )
        .unwrap();
        snake.advance(Direction::South);
        assert_eq!(snake.head(), Cell::new(1, 2));
        assert_eq!(check(&snake, Grid::new(4, 4)), Outcome::Alive);
    }
}
