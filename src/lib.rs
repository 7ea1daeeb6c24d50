// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # intcode
//!
//! A deterministic, embeddable interpreter for Intcode: a small stored-program
//! integer machine whose program and data share one flat, growable memory of
//! signed 64-bit cells.
//!
//! ## Features
//!
//! - **Self-modifying execution** - instructions may overwrite any cell, including code
//! - **Three addressing modes** - position, immediate and relative to a movable base
//! - **FIFO I/O queues** - feed inputs ahead of time or interactively between runs
//! - **Faults as state** - decode, bounds, write-mode, underflow and overflow faults stop the
//!   machine and are recorded on it instead of panicking
//! - **Cheap speculation** - a machine is a plain value; `clone()` yields a fully independent
//!   continuation for breadth-first exploration
//! - **Limits and tracing** - optional instruction and memory budgets, and an in-memory trace
//!   of every executed instruction
//!
//! ## Quick Start
//!
//! ```rust
//! use intcode::prelude::*;
//!
//! // Day-2 style program: mem[0] = mem[9] + mem[10]; mem[0] *= mem[11]
//! let program = Program::parse("1,9,10,3,2,3,11,0,99,30,40,50")?;
//!
//! let mut machine = Machine::new();
//! machine.load(&program);
//!
//! assert_eq!(machine.run(), ExecutionState::Halted);
//! assert_eq!(machine.peek(0), 3500);
//! # Ok::<(), Error>(())
//! ```
//!
//! ### Interactive Drivers
//!
//! Outputs are consumed in production order, inputs in the order they were pushed. A driver can
//! run until the machine needs input, read what it produced and resume:
//!
//! ```rust
//! use intcode::{ExecutionState, Machine};
//!
//! // Reads inputs forever and outputs the running sum after each one.
//! let mut machine = Machine::with_program(&[3, 100, 1, 100, 101, 101, 4, 101, 1105, 1, 0]);
//!
//! for (input, expected) in [(1, 1), (2, 3), (3, 6)] {
//!     machine.push_input(input);
//!     assert_eq!(machine.run_until_blocked(), ExecutionState::Running);
//!     assert_eq!(machine.drain_outputs(), vec![expected]);
//! }
//! ```
//!
//! ### Handling Faults
//!
//! ```rust
//! use intcode::{ExecutionState, Fault, Machine};
//!
//! let mut machine = Machine::with_program(&[3, 0, 99]);
//! assert_eq!(machine.run(), ExecutionState::Faulted);
//! assert_eq!(machine.fault(), Some(&Fault::InputUnderflow { pc: 0 }));
//! assert!(machine.check().is_err());
//! ```
//!
//! ## Architecture
//!
//! - [`program`] - Parsing of comma-separated program text
//! - [`machine`] - Memory, decoding, parameter resolution, I/O queues and the engine
//! - [`error`] - The crate error type
//! - [`prelude`] - Convenient re-exports of the commonly used types

pub mod error;
pub mod machine;
pub mod prelude;
pub mod program;

/// `intcode` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `intcode` Error type
///
/// The main error type for fallible library operations: reading and parsing program text, and
/// lifting a recorded machine fault via [`Machine::check`].
pub use error::Error;

/// The interpreter and the types most callers touch when driving it.
///
/// See [`machine::Machine`] for loading, stepping, I/O and cloning.
pub use machine::{ExecutionState, Fault, Machine, MachineConfig, StepResult};

/// Parsed program text.
pub use program::Program;
