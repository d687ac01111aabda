//! The interactive turn loop.
//!
//! Each tick draws the current frame, takes at most one key press from the
//! console, advances the game if it is running and not paused, and then
//! sleeps for the configured tick interval.

use anyhow::Result;
use crossterm::event::KeyEvent;
use log::{debug, info, warn};
use rand::Rng;
use rand::rngs::ThreadRng;

use crate::console::Console;
use crate::game::{Action, Direction, GameConfig, GameEngine, GameState, StepResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::persistence::HighScoreStore;
use crate::render::FrameView;

pub struct HumanMode<C, R = ThreadRng> {
    engine: GameEngine<R>,
    state: GameState,
    metrics: GameMetrics,
    input_handler: InputHandler,
    console: C,
    high_scores: Option<HighScoreStore>,
    paused: bool,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl<C: Console> HumanMode<C, ThreadRng> {
    pub fn new(config: GameConfig, console: C, high_scores: Option<HighScoreStore>) -> Self {
        Self::with_engine(GameEngine::new(config), console, high_scores)
    }
}

impl<C: Console, R: Rng> HumanMode<C, R> {
    pub fn with_engine(
        mut engine: GameEngine<R>,
        console: C,
        high_scores: Option<HighScoreStore>,
    ) -> Self {
        let high_score = high_scores.as_ref().map_or(0, load_high_score);
        let state = engine.new_round(high_score);

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            input_handler: InputHandler::new(),
            console,
            high_scores,
            paused: false,
            should_quit: false,
            pending_direction: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run until the player quits
    pub fn run(&mut self) -> Result<()> {
        let tick = self.engine.config().tick_interval();
        info!("Starting turn loop, tick every {:?}", tick);

        loop {
            self.metrics.update();
            self.console.render(&FrameView {
                state: &self.state,
                metrics: &self.metrics,
                paused: self.paused,
            })?;

            // A restart on this tick shows the fresh round before moving it
            let was_alive = self.state.is_alive();
            if let Some(key) = self.console.poll_key()? {
                self.handle_key(key);
            }

            if self.should_quit {
                break;
            }

            if was_alive {
                self.update_game();
            }
            self.console.sleep(tick);
        }

        info!(
            "Quitting after {} rounds, best score {}",
            self.metrics.rounds_played, self.metrics.best_score
        );
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                if self.state.is_alive() && !self.paused {
                    self.pending_direction = Some(direction);
                }
            }
            KeyAction::Restart => {
                if !self.state.is_alive() {
                    self.reset_game();
                }
            }
            KeyAction::TogglePause => {
                if self.state.is_alive() {
                    self.toggle_pause();
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {
                debug!("Ignoring key {:?}", key.code);
            }
        }
    }

    fn update_game(&mut self) {
        if !self.state.is_alive() || self.paused {
            return;
        }

        let action = Action::from(self.pending_direction.take());
        let result = self.engine.step(&mut self.state, action);

        if result.terminated {
            self.on_game_over(&result);
        }
    }

    fn on_game_over(&mut self, result: &StepResult) {
        self.metrics.on_game_over(self.state.score);

        if !result.info.new_high_score {
            return;
        }
        if let Some(store) = &self.high_scores {
            if let Err(e) = store.save(self.state.high_score) {
                warn!("Keeping high score in memory only: {:#}", e);
            }
        }
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            self.metrics.on_pause();
        } else {
            self.metrics.on_resume();
        }
        debug!("Paused: {}", self.paused);
    }

    fn reset_game(&mut self) {
        self.state = self.engine.new_round(self.state.high_score);
        self.metrics.on_game_start();
        self.pending_direction = None;
        self.paused = false;
    }
}

fn load_high_score(store: &HighScoreStore) -> u32 {
    store.load().unwrap_or_else(|e| {
        warn!("Starting without a high score: {:#}", e);
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Phase, Position};
    use crossterm::event::{KeyCode, KeyModifiers};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tempfile::TempDir;

    /// What a rendered frame showed
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Frame {
        phase: Phase,
        score: u32,
        paused: bool,
        head: Position,
        steps: u32,
    }

    /// Plays back a fixed list of polls, then presses `q`
    #[derive(Default)]
    struct ScriptedConsole {
        keys: VecDeque<Option<KeyEvent>>,
        frames: Vec<Frame>,
        sleeps: Vec<Duration>,
    }

    impl ScriptedConsole {
        fn new(keys: Vec<Option<KeyCode>>) -> Self {
            Self {
                keys: keys
                    .into_iter()
                    .map(|code| code.map(|c| KeyEvent::new(c, KeyModifiers::NONE)))
                    .collect(),
                ..Default::default()
            }
        }
    }

    impl Console for ScriptedConsole {
        fn render(&mut self, view: &FrameView) -> Result<()> {
            self.frames.push(Frame {
                phase: view.state.phase(),
                score: view.state.score,
                paused: view.paused,
                head: view.state.snake().head(),
                steps: view.state.steps,
            });
            Ok(())
        }

        fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
            Ok(self
                .keys
                .pop_front()
                .unwrap_or_else(|| Some(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE))))
        }

        fn sleep(&mut self, duration: Duration) {
            self.sleeps.push(duration);
        }
    }

    fn mode(
        keys: Vec<Option<KeyCode>>,
        store: Option<HighScoreStore>,
    ) -> HumanMode<ScriptedConsole, StdRng> {
        let engine = GameEngine::with_rng(GameConfig::small(), StdRng::seed_from_u64(5));
        let mut mode = HumanMode::with_engine(engine, ScriptedConsole::new(keys), store);
        // Keep food out of the snake's straight path
        assert!(mode.state.place_food(Position::new(0, 0)));
        mode
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode(vec![], None);
        assert!(mode.state.is_alive());
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.high_score, 0);
        assert!(!mode.paused);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode(vec![], None);
        mode.state.score = 10;
        mode.state.high_score = 40;
        mode.reset_game();
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.high_score, 40);
        assert!(mode.state.is_alive());
    }

    #[test]
    fn test_quit_before_first_tick() {
        let mut mode = mode(vec![Some(KeyCode::Char('q'))], None);
        mode.run().unwrap();

        assert_eq!(mode.console.frames.len(), 1);
        assert!(mode.console.sleeps.is_empty());
        assert_eq!(mode.state.steps, 0);
    }

    #[test]
    fn test_ticks_sleep_for_configured_interval() {
        let mut mode = mode(vec![None, None], None);
        mode.run().unwrap();

        assert_eq!(mode.state.steps, 2);
        assert_eq!(mode.state.snake().head(), Position::new(7, 5));
        assert_eq!(mode.console.sleeps, vec![Duration::from_millis(100); 2]);
    }

    #[test]
    fn test_turn_is_applied_on_next_tick() {
        let mut mode = mode(vec![Some(KeyCode::Up)], None);
        mode.run().unwrap();

        assert_eq!(mode.state.snake().head(), Position::new(5, 4));
        assert_eq!(mode.state.snake().direction(), Direction::Up);
    }

    #[test]
    fn test_reverse_key_is_ignored() {
        let mut mode = mode(vec![Some(KeyCode::Left)], None);
        mode.run().unwrap();

        assert_eq!(mode.state.snake().head(), Position::new(6, 5));
        assert_eq!(mode.state.snake().direction(), Direction::Right);
    }

    #[test]
    fn test_wall_ends_round_and_restart_begins_new_one() {
        // Head starts at (5, 5) facing right on a 10x10 grid: the fifth tick hits the wall
        let mut keys = vec![None; 5];
        keys.push(Some(KeyCode::Char('w'))); // turns are ignored after game over
        keys.push(Some(KeyCode::Char('p'))); // so is pause
        keys.push(None);
        keys.push(Some(KeyCode::Char('r')));

        let mut mode = mode(keys, None);
        mode.run().unwrap();

        let phases: Vec<Phase> = mode.console.frames.iter().map(|f| f.phase).collect();
        assert_eq!(phases.len(), 10);
        assert!(phases[..5].iter().all(|p| *p == Phase::Running));
        assert!(phases[5..9].iter().all(|p| matches!(p, Phase::GameOver(_))));
        assert_eq!(phases[9], Phase::Running);
        assert!(mode.console.frames.iter().all(|f| !f.paused));

        // The new round is drawn at its starting position before it moves
        let first = mode.console.frames[9];
        assert_eq!(first.head, Position::new(5, 5));
        assert_eq!(first.steps, 0);
        assert_eq!(first.score, 0);

        assert_eq!(mode.metrics.rounds_played, 1);
        assert!(mode.state.is_alive());
        assert_eq!(mode.state.steps, 0);
        assert_eq!(mode.state.snake().head(), Position::new(5, 5));
    }

    #[test]
    fn test_new_round_moves_on_the_tick_after_restart() {
        let mut keys = vec![None; 5];
        keys.push(Some(KeyCode::Char('r')));
        keys.push(None);

        let mut mode = mode(keys, None);
        mode.run().unwrap();

        let frames = &mode.console.frames;
        assert_eq!(frames.len(), 8);
        assert!(matches!(frames[5].phase, Phase::GameOver(_)));
        assert_eq!((frames[6].head, frames[6].steps), (Position::new(5, 5), 0));
        assert_eq!((frames[7].head, frames[7].steps), (Position::new(6, 5), 1));
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut mode = mode(vec![Some(KeyCode::Char('r'))], None);
        mode.run().unwrap();

        assert_eq!(mode.state.steps, 1);
        assert_eq!(mode.metrics.rounds_played, 0);
    }

    #[test]
    fn test_pause_stops_ticks() {
        let keys = vec![
            Some(KeyCode::Char('p')),
            None,
            Some(KeyCode::Up), // dropped while paused
            Some(KeyCode::Char('p')),
        ];
        let mut mode = mode(keys, None);
        mode.run().unwrap();

        let paused: Vec<bool> = mode.console.frames.iter().map(|f| f.paused).collect();
        assert_eq!(paused, vec![false, true, true, true, false]);
        assert_eq!(mode.state.steps, 1);
        assert_eq!(mode.state.snake().direction(), Direction::Right);
    }

    #[test]
    fn test_high_score_loaded_and_saved() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("highscore.txt"));
        store.save(5).unwrap();

        let mut keys = vec![None; 4];
        keys.push(Some(KeyCode::Up));
        keys.extend(vec![None; 6]);
        let mut mode = mode(keys, Some(store.clone()));
        assert_eq!(mode.state.high_score, 5);

        // Food right in front of the head
        assert!(mode.state.place_food(Position::new(6, 5)));
        mode.run().unwrap();

        assert!(!mode.state.is_alive());
        assert!(mode.state.score >= 10);
        assert_eq!(mode.state.high_score, mode.state.score);
        assert_eq!(store.load().unwrap(), mode.state.score);
    }

    #[test]
    fn test_lower_score_does_not_overwrite_high_score() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("highscore.txt"));
        store.save(500).unwrap();

        let mut mode = mode(vec![None; 6], Some(store.clone()));
        mode.run().unwrap();

        assert!(!mode.state.is_alive());
        assert_eq!(store.load().unwrap(), 500);
        assert_eq!(mode.state.high_score, 500);
    }
}
