use std::time::{Duration, Instant};

use crate::core::errors::{Result, TrailError};

/// Wall-clock budget for one fetch-and-process operation.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    expires_at: Instant,
    budget: Duration,
}

impl Deadline {
    /// Start a budget that expires `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
            budget,
        }
    }

    /// Time left, or `OperationTimeout` once the budget is spent.
    pub fn remaining(&self) -> Result<Duration> {
        let left = self.expires_at.saturating_duration_since(Instant::now());
        if left.is_zero() {
            return Err(self.timeout_error());
        }
        Ok(left)
    }

    /// The error reported when this deadline is exceeded.
    pub fn timeout_error(&self) -> TrailError {
        TrailError::OperationTimeout {
            seconds: self.budget.as_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_deadline_has_time_left() {
        let deadline = Deadline::after(Duration::from_secs(60));
        let left = deadline.remaining().unwrap();
        assert!(left <= Duration::from_secs(60));
        assert!(left > Duration::from_secs(59));
    }

    #[test]
    fn spent_deadline_times_out() {
        let deadline = Deadline::after(Duration::ZERO);
        let err = deadline.remaining().unwrap_err();
        assert!(matches!(err, TrailError::OperationTimeout { seconds: 0 }));
    }
}
