//! Deferred computer turns.

use crate::controller::ComputerTurn;
use tokio::time::{Duration, Instant, sleep_until};
use tracing::{debug, instrument};

/// Holds at most one computer turn until its thinking delay has passed.
///
/// Scheduling a new turn replaces the old one. The scheduler never judges
/// whether a turn is still wanted; the controller checks the ticket when
/// it fires.
#[derive(Debug)]
pub struct ThinkingScheduler {
    delay: Duration,
    pending: Option<(Instant, ComputerTurn)>,
}

impl ThinkingScheduler {
    /// Creates an idle scheduler.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Arms `turn` to fire one delay from now.
    #[instrument(skip(self), fields(delay_ms = self.delay.as_millis() as u64))]
    pub fn schedule(&mut self, turn: ComputerTurn) {
        debug!("Computer is thinking");
        self.pending = Some((Instant::now() + self.delay, turn));
    }

    /// The armed turn, if any.
    pub fn pending(&self) -> Option<ComputerTurn> {
        self.pending.map(|(_, turn)| turn)
    }

    /// Waits for the armed turn and disarms it.
    ///
    /// Never completes while idle, so it can sit in a `select!` next to
    /// the input channel.
    pub async fn due(&mut self) -> ComputerTurn {
        match self.pending {
            Some((deadline, turn)) => {
                sleep_until(deadline).await;
                self.pending = None;
                turn
            }
            None => std::future::pending().await,
        }
    }
}
