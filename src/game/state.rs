use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current heading
    pub direction: Direction,
    /// Requested heading, resolved at the start of the next step
    pub pending_direction: Direction,
    pub is_alive: bool,
    /// Set only on the tick the snake ate
    pub has_grown: bool,
    /// Cell vacated by the tail on the last move
    pub prev_tail: Position,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        let prev_tail = body[body.len() - 1];

        Self {
            body,
            direction,
            pending_direction: direction,
            is_alive: true,
            has_grown: false,
            prev_tail,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Check if moving onto `pos` would hit the body
    ///
    /// The current tail is excluded: it vacates the cell on the same tick.
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body[..self.body.len() - 1].contains(&pos)
    }

    /// Queue a heading change for the next step
    pub fn request_direction(&mut self, direction: Direction) {
        self.pending_direction = direction;
    }

    /// Apply the pending heading unless it reverses the current one
    pub fn resolve_direction(&mut self) {
        if !self.direction.is_opposite(self.pending_direction) {
            self.direction = self.pending_direction;
        }
    }

    /// Move the head to `new_head` and drop the tail, remembering where it was
    pub fn advance(&mut self, new_head: Position) {
        self.body.insert(0, new_head);
        if let Some(tail) = self.body.pop() {
            self.prev_tail = tail;
        }
    }

    /// Grow by one segment at the cell vacated on the last move
    pub fn grow(&mut self) {
        self.body.push(self.prev_tail);
        self.has_grown = true;
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Snake left the grid
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake went too long without eating
    Starvation,
}

/// Complete game state
///
/// This is the read-only view handed to encoders and renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub fruit: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    /// Fruit eaten so far
    pub score: u32,
    pub steps_since_eating: usize,
    /// Ticks stepped, including the one that ended the game
    pub steps: u32,
    pub is_alive: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, fruit: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            fruit,
            grid_width,
            grid_height,
            score: 0,
            steps_since_eating: 0,
            steps: 0,
            is_alive: true,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }

    /// Classify a one-cell move of the head onto `pos`
    ///
    /// Returns `None` when the move is safe.
    pub fn collision_at(&self, pos: Position) -> Option<DeathCause> {
        if !self.is_in_bounds(pos) {
            Some(DeathCause::Wall)
        } else if self.snake.collides_with_body(pos) {
            Some(DeathCause::SelfCollision)
        } else {
            None
        }
    }

    /// Check whether the head may move onto `pos` without dying
    pub fn is_safe_move(&self, pos: Position) -> bool {
        self.collision_at(pos).is_none()
    }

    /// Starvation bound for the current body length
    pub fn starvation_limit(&self, allowance: usize) -> usize {
        self.snake.len() + allowance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_state() -> GameState {
        GameState::new(
            Snake::new(Position::new(10, 5), Direction::Right, 4),
            Position::new(0, 0),
            15,
            15,
        )
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(10, 5), Direction::Right, 4);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(10, 5));
        assert_eq!(
            snake.body,
            vec![
                Position::new(10, 5),
                Position::new(9, 5),
                Position::new(8, 5),
                Position::new(7, 5)
            ]
        );
        assert_eq!(snake.pending_direction, Direction::Right);
        assert!(snake.is_alive);
        assert!(!snake.has_grown);
    }

    #[test]
    fn test_advance_records_prev_tail() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        snake.advance(Position::new(6, 5));

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));
        assert_eq!(snake.prev_tail, Position::new(3, 5));

        snake.grow();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(3, 5));
        assert!(snake.has_grown);
    }

    #[test]
    fn test_resolve_direction_rejects_reversal() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        snake.request_direction(Direction::Left);
        snake.resolve_direction();
        assert_eq!(snake.direction, Direction::Right);

        snake.request_direction(Direction::Up);
        snake.resolve_direction();
        assert_eq!(snake.direction, Direction::Up);
    }

    #[test]
    fn test_collision_detection_excludes_tail() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 4);
        assert!(snake.collides_with_body(Position::new(4, 5)));
        assert!(snake.collides_with_body(Position::new(3, 5)));
        assert!(!snake.collides_with_body(Position::new(2, 5))); // tail
        assert!(!snake.collides_with_body(Position::new(10, 10)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = start_state();

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(14, 14)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(15, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 15)));
    }

    #[test]
    fn test_collision_classification() {
        let state = start_state();
        assert_eq!(state.collision_at(Position::new(11, 5)), None);
        assert_eq!(
            state.collision_at(Position::new(9, 5)),
            Some(DeathCause::SelfCollision)
        );
        assert_eq!(
            state.collision_at(Position::new(15, 5)),
            Some(DeathCause::Wall)
        );
        assert!(state.is_safe_move(Position::new(10, 4)));
        assert_eq!(state.starvation_limit(30), 34);
    }
}
