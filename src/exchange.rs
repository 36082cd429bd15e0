//! The "Exchange" panel lets a visitor leave their details on the card. No
//! network call is made; sending is simulated with two timed transitions:
//!
//! `Idle --submit--> Sending --1000ms--> Success --1500ms--> closed + Idle`
//!
//! The panel owns at most one pending deadline and the event loop drives it
//! through `tick`. Closing the panel drops the deadline, so a timer armed
//! before a close can never act on a reopened panel.

use std::time::{Duration, Instant};

use tracing::debug;

/// Simulated latency between submitting and showing success.
pub const SEND_DELAY: Duration = Duration::from_millis(1000);
/// How long the success message stays up before the panel closes.
pub const CLOSE_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeStatus {
    #[default]
    Idle,
    Sending,
    Success,
}

/// Transition reported by `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeEvent {
    Sent,
    Closed,
}

#[derive(Debug, Default)]
pub struct ExchangePanel {
    open: bool,
    status: ExchangeStatus,
    deadline: Option<Instant>,
}

impl ExchangePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn status(&self) -> ExchangeStatus {
        self.status
    }

    /// Deadline of the pending transition, if one is armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the panel, cancelling any pending transition.
    pub fn close(&mut self) {
        if self.deadline.take().is_some() {
            debug!(status = ?self.status, "cancelled pending exchange transition");
        }
        self.open = false;
        self.status = ExchangeStatus::Idle;
    }

    /// Start sending. Ignored unless the panel is open and idle.
    pub fn submit(&mut self, now: Instant) -> bool {
        if !self.open || self.status != ExchangeStatus::Idle {
            return false;
        }
        self.status = ExchangeStatus::Sending;
        self.deadline = Some(now + SEND_DELAY);
        true
    }

    /// Fire every transition whose deadline has passed, returning the last one.
    pub fn tick(&mut self, now: Instant) -> Option<ExchangeEvent> {
        let mut fired = None;
        while let Some(deadline) = self.deadline {
            if now < deadline {
                break;
            }
            match self.status {
                ExchangeStatus::Sending => {
                    self.status = ExchangeStatus::Success;
                    self.deadline = Some(deadline + CLOSE_DELAY);
                    fired = Some(ExchangeEvent::Sent);
                }
                ExchangeStatus::Success => {
                    self.deadline = None;
                    self.open = false;
                    self.status = ExchangeStatus::Idle;
                    fired = Some(ExchangeEvent::Closed);
                }
                ExchangeStatus::Idle => {
                    self.deadline = None;
                }
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_follows_both_delays() {
        let start = Instant::now();
        let mut panel = ExchangePanel::new();
        panel.open();
        assert!(panel.submit(start));
        assert_eq!(panel.status(), ExchangeStatus::Sending);

        assert_eq!(panel.tick(start + Duration::from_millis(999)), None);
        assert_eq!(panel.tick(start + SEND_DELAY), Some(ExchangeEvent::Sent));
        assert_eq!(panel.status(), ExchangeStatus::Success);
        assert!(panel.is_open());

        let close_at = start + SEND_DELAY + CLOSE_DELAY;
        assert_eq!(panel.tick(close_at - Duration::from_millis(1)), None);
        assert_eq!(panel.tick(close_at), Some(ExchangeEvent::Closed));
        assert!(!panel.is_open());
        assert_eq!(panel.status(), ExchangeStatus::Idle);
        assert_eq!(panel.deadline(), None);
    }

    #[test]
    fn late_tick_runs_both_transitions() {
        let start = Instant::now();
        let mut panel = ExchangePanel::new();
        panel.open();
        panel.submit(start);
        assert_eq!(
            panel.tick(start + Duration::from_secs(10)),
            Some(ExchangeEvent::Closed)
        );
        assert!(!panel.is_open());
    }

    #[test]
    fn closing_cancels_pending_timer() {
        let start = Instant::now();
        let mut panel = ExchangePanel::new();
        panel.open();
        panel.submit(start);
        panel.close();
        panel.open();

        assert_eq!(panel.tick(start + Duration::from_secs(5)), None);
        assert!(panel.is_open());
        assert_eq!(panel.status(), ExchangeStatus::Idle);
    }

    #[test]
    fn submit_requires_open_idle_panel() {
        let now = Instant::now();
        let mut panel = ExchangePanel::new();
        assert!(!panel.submit(now));

        panel.open();
        assert!(panel.submit(now));
        assert!(!panel.submit(now));
    }
}
