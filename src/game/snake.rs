use super::direction::Direction;
use super::grid::Cell;
use std::collections::VecDeque;

/// The snake: its body and the way it is facing.
///
/// The body is stored head-first and is never empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The cells covered by the snake, with the head at the front
    body: VecDeque<Cell>,

    /// The direction in which the snake is currently facing
    heading: Direction,

    /// The tail cell given up by the most recent `advance()`, kept so that
    /// `grow()` can put it back
    vacated: Option<Cell>,
}

impl Snake {
    /// Create a one-cell snake at `head` facing in `heading`
    pub(super) fn new(head: Cell, heading: Direction) -> Snake {
        Snake {
            body: VecDeque::from([head]),
            heading,
            vacated: None,
        }
    }

    /// Create a snake from explicit body cells, head first.  Returns `None` if
    /// `cells` is empty.
    #[cfg(test)]
    pub(super) fn from_cells<I: IntoIterator<Item = Cell>>(
        cells: I,
        heading: Direction,
    ) -> Option<Snake> {
        let body = cells.into_iter().collect::<VecDeque<_>>();
        (!body.is_empty()).then_some(Snake {
            body,
            heading,
            vacated: None,
        })
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body should never be empty")
    }

    /// Return the cells of the snake's body, head first
    pub(super) fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub(super) fn heading(&self) -> Direction {
        self.heading
    }

    pub(super) fn len(&self) -> usize {
        self.body.len()
    }

    pub(super) fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Move the snake one cell.  A request to turn straight back into the
    /// second segment is ignored and the snake keeps its current heading.  A
    /// one-cell snake has no second segment and may turn around freely.
    ///
    /// The new head is not checked against anything; that's the collision
    /// detector's job.
    pub(super) fn advance(&mut self, direction: Direction) {
        if direction != self.heading.reverse() || self.body.len() == 1 {
            self.heading = direction;
        }
        let head = self.heading.step(self.head());
        self.vacated = self.body.pop_back();
        self.body.push_front(head);
    }

    /// Re-attach the tail cell vacated by the last `advance()`.  Calling this
    /// twice for the same move has no further effect.
    pub(super) fn grow(&mut self) {
        if let Some(cell) = self.vacated.take() {
            self.body.push_back(cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hook() -> Snake {
        Snake::from_cells(
            [
                Cell::new(4, 2),
                Cell::new(3, 2),
                Cell::new(2, 2),
                Cell::new(2, 3),
            ],
            Direction::East,
        )
        .unwrap()
    }

    #[test]
    fn advance_moves_head_and_drops_tail() {
        let mut snake = hook();
        snake.advance(Direction::East);
        assert_eq!(
            snake.body(),
            &VecDeque::from([
                Cell::new(5, 2),
                Cell::new(4, 2),
                Cell::new(3, 2),
                Cell::new(2, 2)
            ])
        );
        assert_eq!(snake.heading(), Direction::East);
    }

    #[test]
    fn advance_then_grow_keeps_old_tail() {
        let mut snake = hook();
        let before = snake.body().clone();
        snake.advance(Direction::South);
        snake.grow();
        assert_eq!(snake.len(), before.len() + 1);
        assert_eq!(snake.head(), Cell::new(4, 3));
        assert!(snake.body().iter().skip(1).eq(before.iter()));
    }

    #[test]
    fn grow_twice_adds_one() {
        let mut snake = Snake::new(Cell::new(1, 1), Direction::East);
        snake.advance(Direction::East);
        snake.grow();
        snake.grow();
        assert_eq!(snake.len(), 2);
        assert_eq!(
            snake.body(),
            &VecDeque::from([Cell::new(2, 1), Cell::new(1, 1)])
        );
    }

    #[test]
    fn reversal_is_ignored() {
        let mut reversed = hook();
        let mut straight = hook();
        reversed.advance(Direction::West);
        straight.advance(Direction::East);
        assert_eq!(reversed, straight);
        assert_eq!(reversed.heading(), Direction::East);
    }

    #[test]
    fn one_cell_snake_may_turn_around() {
        let mut snake = Snake::new(Cell::new(3, 3), Direction::East);
        snake.advance(Direction::West);
        assert_eq!(snake.head(), Cell::new(2, 3));
        assert_eq!(snake.heading(), Direction::West);
    }

    #[test]
    fn occupies() {
        let snake = hook();
        assert!(snake.occupies(Cell::new(4, 2)));
        assert!(snake.occupies(Cell::new(2, 3)));
        assert!(!snake.occupies(Cell::new(3, 3)));
    }
}
