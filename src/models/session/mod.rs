// Session module
// Practice timer state machine and the record it produces

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::event_template::MAX_DURATION_MINUTES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    Preparing,
    InProgress,
    Paused,
    Completed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("Cannot {action} a timer that is {from:?}")]
    InvalidTransition { from: TimerState, action: &'static str },

    #[error("Timer has not been started")]
    NotStarted,
}

/// Countdown for one sitting.
///
/// Time is always supplied by the caller, so the timer never reads the
/// clock itself. Paused time does not count towards the planned duration.
#[derive(Debug, Clone)]
pub struct MeditationTimer {
    planned: Duration,
    preparation: Duration,
    state: Option<TimerState>,
    started_at: Option<DateTime<Utc>>,
    /// Start of the current in-progress stretch.
    running_since: Option<DateTime<Utc>>,
    /// Meditated time banked from earlier stretches.
    banked: Duration,
    completed_at: Option<DateTime<Utc>>,
}

impl MeditationTimer {
    pub fn new(planned: Duration, preparation: Duration) -> Self {
        Self {
            planned,
            preparation: preparation.max(Duration::zero()),
            state: None,
            started_at: None,
            running_since: None,
            banked: Duration::zero(),
            completed_at: None,
        }
    }

    pub fn state(&self) -> Option<TimerState> {
        self.state
    }

    pub fn planned(&self) -> Duration {
        self.planned
    }

    /// Begin the preparation countdown, or the sitting itself when there is none.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<TimerState, TimerError> {
        if let Some(from) = self.state {
            return Err(TimerError::InvalidTransition { from, action: "start" });
        }

        self.started_at = Some(now);
        if self.preparation.is_zero() {
            self.running_since = Some(now);
            self.state = Some(TimerState::InProgress);
        } else {
            self.state = Some(TimerState::Preparing);
        }
        Ok(self.tick(now))
    }

    /// Apply time-driven transitions and return the resulting state.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TimerState {
        let Some(state) = self.state else {
            return TimerState::Preparing;
        };

        if state == TimerState::Preparing {
            if let Some(started) = self.started_at {
                let ready_at = started + self.preparation;
                if now >= ready_at {
                    self.running_since = Some(ready_at);
                    self.state = Some(TimerState::InProgress);
                }
            }
        }

        if self.state == Some(TimerState::InProgress) && self.meditated(now) >= self.planned {
            let finished_at = self
                .running_since
                .map(|since| since + (self.planned - self.banked))
                .unwrap_or(now);
            self.banked = self.planned;
            self.running_since = None;
            self.completed_at = Some(finished_at);
            self.state = Some(TimerState::Completed);
        }

        self.state.unwrap_or(TimerState::Preparing)
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), TimerError> {
        match self.tick_started(now)? {
            TimerState::InProgress => {
                self.banked = self.meditated(now);
                self.running_since = None;
                self.state = Some(TimerState::Paused);
                Ok(())
            }
            from => Err(TimerError::InvalidTransition { from, action: "pause" }),
        }
    }

    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<(), TimerError> {
        match self.tick_started(now)? {
            TimerState::Paused => {
                self.running_since = Some(now);
                self.state = Some(TimerState::InProgress);
                Ok(())
            }
            from => Err(TimerError::InvalidTransition { from, action: "resume" }),
        }
    }

    /// End the sitting early. Finishing during preparation counts no time.
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<(), TimerError> {
        match self.tick_started(now)? {
            TimerState::Completed => Err(TimerError::InvalidTransition {
                from: TimerState::Completed,
                action: "finish",
            }),
            _ => {
                self.banked = self.meditated(now);
                self.running_since = None;
                self.completed_at = Some(now);
                self.state = Some(TimerState::Completed);
                Ok(())
            }
        }
    }

    /// Meditated time so far, excluding preparation and pauses.
    pub fn meditated(&self, now: DateTime<Utc>) -> Duration {
        let running = self
            .running_since
            .map(|since| (now - since).max(Duration::zero()))
            .unwrap_or_else(Duration::zero);
        (self.banked + running).min(self.planned)
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        self.planned - self.meditated(now)
    }

    /// Record of a completed sitting; `None` until the timer completes.
    pub fn into_session(self, template_id: Option<String>) -> Option<PracticeSession> {
        if self.state != Some(TimerState::Completed) {
            return None;
        }

        Some(PracticeSession {
            id: None,
            template_id,
            started_at: self.started_at?,
            duration_seconds: self.banked.num_seconds(),
            completed: self.banked >= self.planned,
            notes: None,
        })
    }

    fn tick_started(&mut self, now: DateTime<Utc>) -> Result<TimerState, TimerError> {
        if self.state.is_none() {
            return Err(TimerError::NotStarted);
        }
        Ok(self.tick(now))
    }
}

/// One entry of a user's practice history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeSession {
    pub id: Option<i64>,
    /// Event the sitting belonged to, if any.
    pub template_id: Option<String>,
    pub started_at: DateTime<Utc>,
    pub duration_seconds: i64,
    /// Whether the full planned duration was reached.
    pub completed: bool,
    pub notes: Option<String>,
}

impl PracticeSession {
    /// Manually logged sitting of `minutes` minutes.
    pub fn logged(started_at: DateTime<Utc>, minutes: i64) -> Result<Self, String> {
        if minutes < 1 {
            return Err("A practice session must last at least 1 minute".to_string());
        }
        if minutes > MAX_DURATION_MINUTES {
            return Err("A practice session cannot exceed 24 hours".to_string());
        }

        Ok(Self {
            id: None,
            template_id: None,
            started_at,
            duration_seconds: minutes * 60,
            completed: true,
            notes: None,
        })
    }

    pub fn minutes(&self) -> i64 {
        self.duration_seconds / 60
    }
}
