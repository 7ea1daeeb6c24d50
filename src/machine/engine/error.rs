//! Machine fault types.
//!
//! Every way an instruction can fail is a [`Fault`]. Faults are terminal: the
//! engine records the fault, moves to
//! [`ExecutionState::Faulted`](crate::machine::ExecutionState::Faulted) and
//! never executes another instruction until the next load.

use thiserror::Error;

/// Errors that stop machine execution.
///
/// This enum covers all failure modes during execution, from undecodable
/// instruction words to caller-side input discipline violations.
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Fault {
    /// The opcode of the fetched word is not in the instruction set.
    #[error("unknown opcode {opcode} at pc {pc}")]
    Decode {
        /// The low two decimal digits of the fetched word.
        opcode: i64,
        /// Address of the fetched word.
        pc: usize,
    },

    /// A parameter mode digit is not 0, 1 or 2.
    #[error("invalid parameter mode {mode} at pc {pc}")]
    InvalidMode {
        /// The offending mode digit.
        mode: i64,
        /// Address of the instruction.
        pc: usize,
    },

    /// A read or write targeted a negative address.
    #[error("negative address {address}")]
    Bounds {
        /// The requested address.
        address: i64,
    },

    /// The program counter points past the end of memory at fetch time.
    #[error("program counter {pc} is past the end of memory ({length} cells)")]
    OutOfProgram {
        /// The program counter.
        pc: usize,
        /// Memory length at fetch time.
        length: usize,
    },

    /// A taken jump targeted a negative address.
    #[error("jump to negative target {target} at pc {pc}")]
    InvalidJump {
        /// Address of the jump instruction.
        pc: usize,
        /// The requested target.
        target: i64,
    },

    /// An immediate-mode parameter was used as a write target.
    #[error("parameter {param} of the instruction at pc {pc} is an immediate write target")]
    WriteMode {
        /// Address of the instruction.
        pc: usize,
        /// One-based parameter index.
        param: usize,
    },

    /// An input instruction executed while the input queue was empty.
    #[error("input queue empty at pc {pc}")]
    InputUnderflow {
        /// Address of the input instruction.
        pc: usize,
    },

    /// An addition, multiplication or relative address computation overflowed.
    #[error("arithmetic overflow at pc {pc}")]
    ArithmeticOverflow {
        /// Address of the instruction.
        pc: usize,
    },

    /// The configured instruction budget was exhausted.
    #[error("instruction limit exceeded: {executed} (limit: {limit})")]
    InstructionLimit {
        /// Instructions executed so far.
        executed: u64,
        /// Configured maximum.
        limit: u64,
    },

    /// Memory growth could not be allocated.
    #[error("cannot allocate memory for {requested} cells")]
    AllocationFailure {
        /// Memory length the write would have required.
        requested: usize,
    },

    /// A write would grow memory past the configured cell limit.
    #[error("memory limit exceeded: {requested} cells (limit: {limit})")]
    MemoryLimit {
        /// Memory length the write would have required.
        requested: usize,
        /// Configured maximum.
        limit: usize,
    },
}

/// Coarse classification of a [`Fault`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FaultKind {
    /// Unknown opcode or parameter mode.
    DecodeFault,
    /// Negative address, negative jump target or fetch past the end of memory.
    BoundsFault,
    /// Immediate-mode write target.
    WriteModeFault,
    /// Input instruction with an empty input queue.
    InputUnderflow,
    /// Value overflow.
    ArithmeticFault,
    /// Instruction limit, memory limit or failed memory allocation.
    LimitFault,
}

impl Fault {
    /// Returns the classification of this fault.
    #[must_use]
    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::Decode { .. } | Fault::InvalidMode { .. } => FaultKind::DecodeFault,
            Fault::Bounds { .. } | Fault::OutOfProgram { .. } | Fault::InvalidJump { .. } => {
                FaultKind::BoundsFault
            }
            Fault::WriteMode { .. } => FaultKind::WriteModeFault,
            Fault::InputUnderflow { .. } => FaultKind::InputUnderflow,
            Fault::ArithmeticOverflow { .. } => FaultKind::ArithmeticFault,
            Fault::InstructionLimit { .. }
            | Fault::MemoryLimit { .. }
            | Fault::AllocationFailure { .. } => FaultKind::LimitFault,
        }
    }
}
