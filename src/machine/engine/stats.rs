//! Execution statistics and limit checking.
//!
//! Memory growth is bounded by [`crate::machine::Memory`] itself; this module
//! only covers the instruction budget.

use crate::machine::{Fault, MachineLimits};

/// Counters maintained while a program executes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Number of instructions executed.
    pub instructions_executed: u64,

    /// Number of values consumed by INPUT instructions.
    pub inputs_consumed: u64,

    /// Number of values produced by OUTPUT instructions.
    pub outputs_produced: u64,
}

impl ExecutionStats {
    /// Creates zeroed statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the instruction counter.
    pub fn increment_instructions(&mut self) {
        self.instructions_executed += 1;
    }

    /// Checks if the instruction limit has been reached.
    #[must_use]
    pub fn instruction_limit_exceeded(&self, limits: &MachineLimits) -> bool {
        limits.max_instructions != 0 && self.instructions_executed >= limits.max_instructions
    }

    /// Returns the limit fault to raise before the next instruction, if any.
    #[must_use]
    pub fn check_limits(&self, limits: &MachineLimits) -> Option<Fault> {
        if self.instruction_limit_exceeded(limits) {
            Some(Fault::InstructionLimit {
                executed: self.instructions_executed,
                limit: limits.max_instructions,
            })
        } else {
            None
        }
    }

    /// Resets the statistics for a new execution.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_limit_check() {
        let limits = MachineLimits::new().with_max_instructions(100);
        let mut stats = ExecutionStats::new();

        assert!(stats.check_limits(&limits).is_none());

        for _ in 0..100 {
            stats.increment_instructions();
        }

        assert_eq!(
            stats.check_limits(&limits),
            Some(Fault::InstructionLimit {
                executed: 100,
                limit: 100
            })
        );
    }

    #[test]
    fn test_zero_limit_is_unlimited() {
        let limits = MachineLimits::unbounded();
        let stats = ExecutionStats {
            instructions_executed: u64::MAX,
            ..ExecutionStats::default()
        };

        assert!(!stats.instruction_limit_exceeded(&limits));
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = ExecutionStats::new();
        stats.increment_instructions();
        stats.inputs_consumed = 3;
        stats.outputs_produced = 2;

        stats.reset();

        assert_eq!(stats, ExecutionStats::new());
    }
}
