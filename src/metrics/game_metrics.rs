use std::time::{Duration, Instant};

/// Per-session statistics shown in the header
pub struct GameMetrics {
    round_start: Instant,
    /// Time spent paused in the current round
    paused_for: Duration,
    paused_since: Option<Instant>,
    /// Elapsed playing time as of the last update
    pub elapsed_time: Duration,
    /// Best score of this session
    pub best_score: u32,
    pub rounds_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            paused_for: Duration::ZERO,
            paused_since: None,
            elapsed_time: Duration::ZERO,
            best_score: 0,
            rounds_played: 0,
        }
    }

    /// Refresh the elapsed time. Frozen while the round is paused or over.
    pub fn update(&mut self) {
        if self.paused_since.is_some() {
            return;
        }
        self.elapsed_time = self
            .round_start
            .elapsed()
            .saturating_sub(self.paused_for);
    }

    pub fn on_game_start(&mut self) {
        self.round_start = Instant::now();
        self.paused_for = Duration::ZERO;
        self.paused_since = None;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_pause(&mut self) {
        self.update();
        if self.paused_since.is_none() {
            self.paused_since = Some(Instant::now());
        }
    }

    pub fn on_resume(&mut self) {
        if let Some(since) = self.paused_since.take() {
            self.paused_for += since.elapsed();
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.on_pause();
        self.rounds_played += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
