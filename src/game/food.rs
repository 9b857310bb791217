use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{Position, Snake};

/// Random draws tried before falling back to listing the free cells
const MAX_SAMPLES: usize = 64;

/// Pick a random free cell for the next food item.
///
/// Samples uniformly over the whole board and retries until the cell is not
/// covered by the snake. A crowded board falls back to choosing among the
/// free cells directly. Returns `None` once the snake covers every cell.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    board_size: usize,
    occupied: &Snake,
) -> Option<Position> {
    if board_size == 0 {
        return None;
    }

    for _ in 0..MAX_SAMPLES {
        let x = rng.gen_range(0..board_size) as i32;
        let y = rng.gen_range(0..board_size) as i32;
        let pos = Position::new(x, y);

        if !occupied.occupies(pos) {
            return Some(pos);
        }
    }

    let size = board_size as i32;
    let free: Vec<Position> = (0..size)
        .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
        .filter(|pos| !occupied.occupies(*pos))
        .collect();

    free.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_food_lands_on_board() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::new(Position::new(10, 10));

        for _ in 0..200 {
            let food = place_food(&mut rng, 20, &snake).unwrap();
            assert!(food.is_on_board(20));
            assert_ne!(food, Position::new(10, 10));
        }
    }

    #[test]
    fn test_food_avoids_nearly_full_board() {
        let mut rng = StdRng::seed_from_u64(42);

        // Cover every cell of a 3x3 board except (2, 2)
        let mut cells = Vec::new();
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) != (2, 2) {
                    cells.push(Position::new(x, y));
                }
            }
        }
        let snake = Snake::from_segments(cells).unwrap();

        for _ in 0..20 {
            assert_eq!(place_food(&mut rng, 3, &snake), Some(Position::new(2, 2)));
        }
    }

    #[test]
    fn test_full_board_has_no_food_cell() {
        let mut rng = StdRng::seed_from_u64(5);

        let mut cells = Vec::new();
        for y in 0..4 {
            for x in 0..4 {
                cells.push(Position::new(x, y));
            }
        }
        let snake = Snake::from_segments(cells).unwrap();

        assert_eq!(place_food(&mut rng, 4, &snake), None);
    }
}
