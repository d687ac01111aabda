use std::collections::VecDeque;

use super::action::Direction;
use super::food::FreeCells;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

/// Size of the playing field in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: usize,
    pub height: usize,
}

impl Bounds {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Check if a position is within the grid
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

/// Result of moving the snake one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The tail stayed in place, length grew by one
    Grew,
    /// The tail moved off `vacated`
    Moved { vacated: Position },
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
    /// Direction of the last movement
    heading: Direction,
    /// Turn requested for the next movement
    pending: Option<Direction>,
}

impl Snake {
    /// Create a snake with its head at `head`, body trailing behind it
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.opposite().delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(dx * i, dy * i))
            .collect();

        Self {
            body,
            heading: direction,
            pending: None,
        }
    }

    /// Build a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty body.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Option<Self> {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            heading: direction,
            pending: None,
        })
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn segments(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true for a constructed snake)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Direction the snake last moved in
    pub fn direction(&self) -> Direction {
        self.heading
    }

    /// Direction of the next movement
    pub fn next_direction(&self) -> Direction {
        self.pending.unwrap_or(self.heading)
    }

    /// Request a turn for the next movement.
    ///
    /// A reversal of the current heading is ignored and returns false.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.heading.is_opposite(direction) {
            return false;
        }
        self.pending = Some(direction);
        true
    }

    /// Where the head lands on the next advance
    pub fn next_head(&self) -> Position {
        self.head().moved_in_direction(self.next_direction())
    }

    /// Move one cell, keeping the tail when `grow` is set
    pub fn advance(&mut self, grow: bool) -> AdvanceOutcome {
        let new_head = self.next_head();
        if let Some(direction) = self.pending.take() {
            self.heading = direction;
        }
        self.body.push_front(new_head);

        if grow {
            return AdvanceOutcome::Grew;
        }
        match self.body.pop_back() {
            Some(vacated) => AdvanceOutcome::Moved { vacated },
            None => AdvanceOutcome::Grew,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// True if the head sits on any other segment
    pub fn head_collides_with_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&segment| segment == head)
    }

    /// Whether moving the head onto `next` would hit a segment still present
    /// after the move. The tail is vacated unless the snake grows.
    pub fn would_bite_itself(&self, next: Position, grow: bool) -> bool {
        let remaining = if grow {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body.iter().take(remaining).any(|&segment| segment == next)
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCause {
    Collision(CollisionType),
    /// The snake covers every cell
    BoardFull,
}

impl EndCause {
    pub fn describe(&self) -> &'static str {
        match self {
            EndCause::Collision(CollisionType::Wall) => "hit the wall",
            EndCause::Collision(CollisionType::SelfCollision) => "bit itself",
            EndCause::BoardFull => "filled the board",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver(EndCause),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    snake: Snake,
    food: Option<Position>,
    free: FreeCells,
    phase: Phase,
    bounds: Bounds,
    pub score: u32,
    pub high_score: u32,
    pub steps: u32,
}

impl GameState {
    /// Create a running game with no food placed yet
    pub fn new(snake: Snake, bounds: Bounds) -> Self {
        let free = FreeCells::excluding(bounds, snake.segments());
        Self {
            snake,
            food: None,
            free,
            phase: Phase::Running,
            bounds,
            score: 0,
            high_score: 0,
            steps: 0,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn free_cells(&self) -> &FreeCells {
        &self.free
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_alive(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Cause of the game over, if the round has ended
    pub fn end_cause(&self) -> Option<EndCause> {
        match self.phase {
            Phase::Running => None,
            Phase::GameOver(cause) => Some(cause),
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.bounds.contains(pos)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        !self.free.contains(pos) && self.bounds.contains(pos)
    }

    /// Put food on a specific free cell. Returns false if the cell is taken.
    pub fn place_food(&mut self, pos: Position) -> bool {
        if !self.free.contains(pos) {
            return false;
        }
        self.food = Some(pos);
        true
    }

    pub(crate) fn clear_food(&mut self) {
        self.food = None;
    }

    pub(crate) fn turn(&mut self, direction: Direction) -> bool {
        self.snake.turn(direction)
    }

    /// Advance the snake, keeping the free cells in step with the body
    pub(crate) fn advance_snake(&mut self, grow: bool) -> AdvanceOutcome {
        let outcome = self.snake.advance(grow);
        // Release first: the new head may sit on the cell the tail just left
        if let AdvanceOutcome::Moved { vacated } = outcome {
            self.free.release(vacated);
        }
        self.free.occupy(self.snake.head());
        outcome
    }

    /// End the round. Returns true if the score beats the high score,
    /// which is updated in that case.
    pub(crate) fn finish(&mut self, cause: EndCause) -> bool {
        self.phase = Phase::GameOver(cause);
        if self.score > self.high_score {
            self.high_score = self.score;
            return true;
        }
        false
    }
}
