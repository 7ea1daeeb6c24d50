//! Intcode virtual machine.
//!
//! This module provides a deterministic interpreter for Intcode programs: a
//! flat vector of signed 64-bit integers that is both the program and its
//! data. Execution is self-modifying; instructions may overwrite any cell,
//! including code that has not run yet.
//!
//! # Architecture
//!
//! The machine is organized into several sub-modules:
//!
//! - Growable, zero-filled memory with an optional size limit
//! - Opcode table and instruction decoding
//! - Parameter resolution for position, immediate and relative modes
//! - FIFO input and output queues
//! - Limits and tracing configuration
//! - The fetch-decode-execute engine with faults, statistics and tracing
//!
//! # Key Components
//!
//! ## Execution Engine
//! - [`crate::machine::Machine`] - The interpreter and all of its state
//! - [`crate::machine::StepResult`] - Result of executing a single instruction
//! - [`crate::machine::ExecutionState`] - Lifecycle stage of a machine
//! - [`crate::machine::Fault`] - Terminal execution errors
//!
//! ## Memory and I/O
//! - [`crate::machine::Memory`] - Program and data cells
//! - [`crate::machine::IoChannel`] - Input and output queues
//!
//! ## Decoding
//! - [`crate::machine::Opcode`] - The closed instruction set
//! - [`crate::machine::OPCODES`] - Static per-opcode metadata
//! - [`crate::machine::Instruction`] - A decoded opcode with its modes
//! - [`crate::machine::ParamResolver`] - Resolves parameters against memory
//!
//! ## Configuration
//! - [`crate::machine::MachineConfig`] - Limits and tracing, with presets
//! - [`crate::machine::MachineLimits`] - Instruction and memory budgets
//! - [`crate::machine::TracingConfig`] - In-memory trace settings
//!
//! # Usage Examples
//!
//! ```rust
//! use intcode::machine::{ExecutionState, Machine, MachineConfig};
//!
//! // Output 1 if the input equals 8, else 0
//! let program = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];
//!
//! let mut machine = Machine::with_config(MachineConfig::sandboxed());
//! machine.load(&program);
//! machine.push_input(8);
//!
//! assert_eq!(machine.run(), ExecutionState::Halted);
//! assert_eq!(machine.drain_outputs(), vec![1]);
//! ```

mod config;
mod engine;
mod io;
mod memory;
mod opcode;
mod operand;

pub use config::{MachineConfig, MachineLimits, TracingConfig};
pub use engine::{
    ExecutionState, ExecutionStats, Fault, FaultKind, Machine, StepResult, TraceBuffer,
    TraceEvent, TracedParam,
};
pub use io::IoChannel;
pub use memory::{Memory, DEFAULT_MAX_MEMORY};
pub use opcode::{Opcode, OpcodeInfo, MAX_PARAMS, OPCODES};
pub use operand::{Instruction, Mode, ParamResolver};
