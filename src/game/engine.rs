use log::{debug, info};
use rand::Rng;
use rand::rngs::ThreadRng;

use super::{
    action::{Action, Direction},
    config::GameConfig,
    food,
    state::{CollisionType, EndCause, GameState, Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Why the round ended, if it ended this step
    pub end_cause: Option<EndCause>,
    /// Whether the final score of this round beat the high score
    pub new_high_score: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn running(ate_food: bool) -> Self {
        Self {
            terminated: false,
            info: StepInfo {
                ate_food,
                end_cause: None,
                new_high_score: false,
            },
        }
    }

    fn ended(ate_food: bool, cause: EndCause, new_high_score: bool) -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                ate_food,
                end_cause: Some(cause),
                new_high_score,
            },
        }
    }

    fn idle() -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                ate_food: false,
                end_cause: None,
                new_high_score: false,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh round with no high score carried over
    pub fn reset(&mut self) -> GameState {
        self.new_round(0)
    }

    /// Fresh round: centered snake facing right, food on a free cell,
    /// score zero, `high_score` kept.
    pub fn new_round(&mut self, high_score: u32) -> GameState {
        let bounds = self.config.bounds();
        let snake = Snake::new(
            bounds.center(),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let mut state = GameState::new(snake, bounds);
        state.high_score = high_score;
        if let Some(pos) = food::respawn(state.free_cells(), &mut self.rng) {
            state.place_food(pos);
        }

        info!(
            "New round on a {}x{} grid, snake length {}",
            bounds.width,
            bounds.height,
            state.snake().len()
        );
        state
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_alive() {
            return StepResult::idle();
        }

        if let Action::Turn(direction) = action {
            if !state.turn(direction) {
                debug!(
                    "Ignoring reversal from {:?} to {:?}",
                    state.snake().direction(),
                    direction
                );
            }
        }

        state.steps += 1;

        let next_head = state.snake().next_head();
        let ate_food = state.food() == Some(next_head);

        if let Some(collision) = self.check_collision(state, next_head, ate_food) {
            return self.end_round(state, EndCause::Collision(collision), false);
        }

        state.advance_snake(ate_food);

        if !ate_food {
            return StepResult::running(false);
        }

        state.score += self.config.food_reward;
        debug!("Food eaten at {:?}, score {}", next_head, state.score);

        match food::respawn(state.free_cells(), &mut self.rng) {
            Some(pos) => {
                state.place_food(pos);
                StepResult::running(true)
            }
            None => {
                state.clear_food();
                self.end_round(state, EndCause::BoardFull, true)
            }
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(
        &self,
        state: &GameState,
        next_head: Position,
        grows: bool,
    ) -> Option<CollisionType> {
        if !state.is_in_bounds(next_head) {
            return Some(CollisionType::Wall);
        }

        if state.snake().would_bite_itself(next_head, grows) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn end_round(&self, state: &mut GameState, cause: EndCause, ate_food: bool) -> StepResult {
        let new_high_score = state.finish(cause);
        info!(
            "Game over: snake {} after {} steps, score {}{}",
            cause.describe(),
            state.steps,
            state.score,
            if new_high_score { " (new high score)" } else { "" }
        );
        StepResult::ended(ate_food, cause, new_high_score)
    }
}
