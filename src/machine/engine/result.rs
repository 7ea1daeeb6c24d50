//! Step result and execution state types.

use crate::machine::Fault;

/// Lifecycle stage of a machine.
///
/// ```text
/// Ready --step/run--> Running --HALT--> Halted
///                        |
///                        +----fault---> Faulted
/// ```
///
/// `Halted` and `Faulted` are terminal until the next
/// [`Machine::load`](crate::Machine::load).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ExecutionState {
    /// A program is loaded and no instruction has executed yet.
    #[default]
    Ready,
    /// Instructions are being executed.
    Running,
    /// The program executed HALT.
    Halted,
    /// Execution stopped on a fault.
    Faulted,
}

impl ExecutionState {
    /// Returns `true` for `Halted` and `Faulted`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, ExecutionState::Halted | ExecutionState::Faulted)
    }
}

/// Result of executing a single instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// Continue at the next sequential instruction.
    Continue,

    /// A jump was taken.
    Branch {
        /// The new program counter.
        target: usize,
    },

    /// A value was appended to the output queue.
    Output {
        /// The produced value.
        value: i64,
    },

    /// The machine halted.
    Halt,

    /// The machine faulted.
    Fault(Fault),

    /// The machine was already halted or faulted; nothing executed.
    Inactive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!ExecutionState::Ready.is_terminal());
        assert!(!ExecutionState::Running.is_terminal());
        assert!(ExecutionState::Halted.is_terminal());
        assert!(ExecutionState::Faulted.is_terminal());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ExecutionState::Ready.to_string(), "ready");
        assert_eq!(ExecutionState::Faulted.to_string(), "faulted");
    }
}
