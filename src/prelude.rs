//! # intcode Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! intcode library. Import this module to get quick access to everything needed to load,
//! drive and inspect a machine.
//!
//! ```rust
//! use intcode::prelude::*;
//!
//! let program: Program = "104,42,99".parse()?;
//! let mut machine = Machine::with_config(MachineConfig::sandboxed());
//! machine.load(&program);
//!
//! assert_eq!(machine.run(), ExecutionState::Halted);
//! assert_eq!(machine.drain_outputs(), vec![42]);
//! # Ok::<(), Error>(())
//! ```

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all intcode operations
pub use crate::Error;

/// The result type used throughout intcode
pub use crate::Result;

/// Parsed program text
pub use crate::Program;

// ================================================================================================
// Execution Engine
// ================================================================================================

/// The machine and its observable execution results
pub use crate::machine::{ExecutionState, ExecutionStats, Machine, StepResult};

/// Terminal execution errors
pub use crate::machine::{Fault, FaultKind};

// ================================================================================================
// Configuration
// ================================================================================================

/// Execution limits and tracing
pub use crate::machine::{MachineConfig, MachineLimits, TracingConfig};

// ================================================================================================
// Tracing
// ================================================================================================

/// Recorded trace events
pub use crate::machine::{TraceBuffer, TraceEvent, TracedParam};

// ================================================================================================
// Low-Level Components
// ================================================================================================

/// Memory, queues and instruction decoding
pub use crate::machine::{Instruction, IoChannel, Memory, Mode, Opcode, ParamResolver};
