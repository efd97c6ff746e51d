use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIORITY: i64 = 0;
pub const DEFAULT_PERIOD: i64 = 100;
pub const DEFAULT_DEADLINE: i64 = 100;
pub const DEFAULT_PHASE: i64 = 0;

/// Real-time scheduling attributes shared by every schedulable entity.
///
/// Composed into `Flow` as plain data; the scheduler-facing collaborators
/// read these values, independent of a flow's chain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulableAttributes {
    pub priority: i64,
    pub period: i64,
    pub deadline: i64,
    pub phase: i64,
}

impl Default for SchedulableAttributes {
    fn default() -> Self {
        SchedulableAttributes {
            priority: DEFAULT_PRIORITY,
            period: DEFAULT_PERIOD,
            deadline: DEFAULT_DEADLINE,
            phase: DEFAULT_PHASE,
        }
    }
}

impl SchedulableAttributes {
    /// Next release time at or after `current_time`.
    ///
    /// Releases occur at `phase + k * period` for k = 0, 1, 2, ...
    pub fn next_release_at(&self, current_time: i64) -> i64 {
        if current_time <= self.phase {
            return self.phase;
        }
        let elapsed = current_time - self.phase;
        let complete_periods = (elapsed + self.period - 1) / self.period;
        self.phase + complete_periods * self.period
    }

    /// Absolute deadline of the instance released at or after `current_time`.
    pub fn next_absolute_deadline(&self, current_time: i64) -> i64 {
        self.next_release_at(current_time) + self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_times_step_by_period() {
        let attributes = SchedulableAttributes { priority: 0, period: 10, deadline: 10, phase: 0 };
        assert_eq!(attributes.next_release_at(0), 0);
        assert_eq!(attributes.next_release_at(1), 10);
        assert_eq!(attributes.next_release_at(10), 10);
        assert_eq!(attributes.next_release_at(11), 20);
    }

    #[test]
    fn phase_shifts_the_release_pattern() {
        let attributes = SchedulableAttributes { priority: 0, period: 10, deadline: 5, phase: 3 };
        assert_eq!(attributes.next_release_at(0), 3);
        assert_eq!(attributes.next_release_at(4), 13);
        assert_eq!(attributes.next_absolute_deadline(4), 18);
    }
}
