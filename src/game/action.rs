/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        let (x, y) = self.delta();
        let (dx, dy) = other.delta();
        (dx != 0 && dx == -x) || (dy != 0 && dy == -y)
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Apply the reversal guard to a requested turn.
    ///
    /// `current` is `None` before the snake has started moving, in which case
    /// any direction is accepted. Otherwise a request pointing straight back
    /// into the neck is rejected and the current direction is kept.
    pub fn guard_turn(current: Option<Direction>, requested: Direction) -> Direction {
        match current {
            Some(current) if current.is_opposite(requested) => current,
            _ => requested,
        }
    }
}

/// Player intent, independent of which key or button produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Request a new heading (also starts a fresh game)
    Turn(Direction),
    /// Start a fresh game, or restart after a game over
    Confirm,
    /// Pause or resume a running game
    TogglePause,
    /// Throw away the current game and go back to the start screen
    Reset,
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Turn(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_guard_rejects_reversal() {
        let kept = Direction::guard_turn(Some(Direction::Right), Direction::Left);
        assert_eq!(kept, Direction::Right);

        let turned = Direction::guard_turn(Some(Direction::Right), Direction::Down);
        assert_eq!(turned, Direction::Down);
    }

    #[test]
    fn test_guard_accepts_anything_before_start() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(Direction::guard_turn(None, dir), dir);
        }
    }

    #[test]
    fn test_action_from_direction() {
        assert_eq!(Action::from(Direction::Up), Action::Turn(Direction::Up));
    }
}
