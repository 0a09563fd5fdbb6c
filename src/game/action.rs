/// Direction the snake can move
///
/// The declaration order is the ordinal used by policies and by the
/// turn-relative lookups: Right = 0, Down = 1, Left = 2, Up = 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// All directions in ordinal order
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
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

    /// Ordinal of this direction
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Direction for a policy action index; `None` outside `0..4`
    pub fn from_action_index(idx: usize) -> Option<Direction> {
        Self::ALL.get(idx).copied()
    }

    /// Heading after a clockwise quarter turn, `(d + 1) mod 4`
    pub fn turned_right(&self) -> Direction {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// Heading after a counter-clockwise quarter turn, `(d - 1) mod 4`
    pub fn turned_left(&self) -> Direction {
        Self::ALL[(self.index() + 3) % 4]
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
    fn test_ordinals() {
        assert_eq!(Direction::Right.index(), 0);
        assert_eq!(Direction::Down.index(), 1);
        assert_eq!(Direction::Left.index(), 2);
        assert_eq!(Direction::Up.index(), 3);
    }

    #[test]
    fn test_action_index_mapping() {
        assert_eq!(Direction::from_action_index(0), Some(Direction::Right));
        assert_eq!(Direction::from_action_index(1), Some(Direction::Down));
        assert_eq!(Direction::from_action_index(2), Some(Direction::Left));
        assert_eq!(Direction::from_action_index(3), Some(Direction::Up));
        assert_eq!(Direction::from_action_index(4), None);
    }

    #[test]
    fn test_relative_turns() {
        assert_eq!(Direction::Right.turned_right(), Direction::Down);
        assert_eq!(Direction::Up.turned_right(), Direction::Right);
        assert_eq!(Direction::Right.turned_left(), Direction::Up);
        assert_eq!(Direction::Down.turned_left(), Direction::Right);

        for dir in Direction::ALL {
            assert_eq!(dir.turned_right().turned_left(), dir);
        }
    }
}
