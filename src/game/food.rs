use super::grid::{Cell, Grid};
use super::snake::Snake;
use rand::Rng;

/// Pick a uniformly random cell not covered by `snake`.
///
/// Cells are drawn from the whole board and redrawn until a free one comes up.
/// The caller must make sure at least one free cell exists, or this never
/// returns.
pub(super) fn spawn<R: Rng + ?Sized>(rng: &mut R, grid: Grid, snake: &Snake) -> Cell {
    debug_assert!(snake.len() < grid.len(), "no free cell left for food");
    loop {
        let cell = Cell::new(
            rng.random_range(0..i32::from(grid.width())),
            rng.random_range(0..i32::from(grid.height())),
        );
        if !snake.occupies(cell) {
            return cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[test]
    fn never_lands_on_snake() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(8, 6);
        let snake = Snake::from_cells(
            [Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)],
            Direction::West,
        )
        .unwrap();
        for _ in 0..200 {
            let cell = spawn(&mut rng, grid, &snake);
            assert!(grid.in_bounds(cell));
            assert!(!snake.occupies(cell));
        }
    }

    #[test]
    fn finds_last_free_cell() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(2, 2);
        let snake = Snake::from_cells(
            [Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)],
            Direction::North,
        )
        .unwrap();
        assert_eq!(spawn(&mut rng, grid, &snake), Cell::new(0, 1));
    }

    #[test]
    fn same_seed_same_cell() {
        let grid = Grid::new(20, 10);
        let snake = Snake::new(grid.center(), Direction::East);
        let a = spawn(&mut ChaCha12Rng::seed_from_u64(RNG_SEED), grid, &snake);
        let b = spawn(&mut ChaCha12Rng::seed_from_u64(RNG_SEED), grid, &snake);
        assert_eq!(a, b);
    }
}
