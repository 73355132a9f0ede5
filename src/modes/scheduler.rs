use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Fixed-delay tick source that can be switched on and off.
///
/// While stopped, `tick` never resolves, so a `select!` branch on it simply
/// stays quiet. Stopping drops the timer, so a tick that was already due is
/// discarded.
pub struct TickScheduler {
    period: Duration,
    timer: Option<Interval>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            timer: None,
        }
    }

    /// Begin ticking; the first tick lands one period from now
    pub fn start(&mut self) {
        let mut timer = interval_at(Instant::now() + self.period, self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
    }

    pub fn stop(&mut self) {
        self.timer = None;
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Start or stop to match whether the game wants ticks
    pub fn follow(&mut self, wanted: bool) {
        match (wanted, self.is_running()) {
            (true, false) => self.start(),
            (false, true) => self.stop(),
            _ => {}
        }
    }

    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
