use std::time::{Duration, Instant};

/// In-memory stats for one sitting; nothing is written to disk
#[derive(Debug)]
pub struct GameMetrics {
    running_since: Option<Instant>,
    banked: Duration,
    high_score: u32,
    games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            running_since: None,
            banked: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Restart the play clock for a fresh game
    pub fn on_game_start(&mut self) {
        self.banked = Duration::ZERO;
        self.running_since = Some(Instant::now());
    }

    pub fn on_pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += since.elapsed();
        }
    }

    pub fn on_resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    /// Stop the clock and fold the result into the session stats
    pub fn on_game_over(&mut self, final_score: u32) {
        self.on_pause();
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    /// Play time of the current game, pauses excluded
    pub fn elapsed(&self) -> Duration {
        self.banked
            + self
                .running_since
                .map(|since| since.elapsed())
                .unwrap_or(Duration::ZERO)
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed())
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
