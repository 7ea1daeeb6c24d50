//! Machine configuration types.
//!
//! Configuration is organized into two structures:
//!
//! - [`MachineLimits`] - Execution limits (instructions, memory cells)
//! - [`TracingConfig`] - Instruction-level trace recording
//!
//! Both are aggregated by [`MachineConfig`], which is passed to
//! [`Machine::with_config`](crate::Machine::with_config) and copied into every
//! clone of that machine.
//!
//! # Example
//!
//! ```rust
//! use intcode::machine::{MachineConfig, MachineLimits, TracingConfig};
//!
//! // Use a preset
//! let config = MachineConfig::sandboxed();
//!
//! // Or customize
//! let config = MachineConfig {
//!     limits: MachineLimits::new().with_max_instructions(1_000_000),
//!     tracing: TracingConfig::memory(10_000),
//! };
//! ```

use crate::machine::memory::DEFAULT_MAX_MEMORY;

/// Top-level machine configuration.
///
/// The default configuration runs without an instruction limit, caps memory
/// growth at [`DEFAULT_MAX_MEMORY`] cells and records no trace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MachineConfig {
    /// Execution limits controlling resource usage.
    pub limits: MachineLimits,
    /// Trace recording options.
    pub tracing: TracingConfig,
}

impl MachineConfig {
    /// Configuration with no limits at all.
    #[must_use]
    pub fn unbounded() -> Self {
        MachineConfig {
            limits: MachineLimits::unbounded(),
            tracing: TracingConfig::disabled(),
        }
    }

    /// Configuration for running untrusted programs.
    ///
    /// - 10 million instruction limit
    /// - 1 Mi cell memory limit
    #[must_use]
    pub fn sandboxed() -> Self {
        MachineConfig {
            limits: MachineLimits::new()
                .with_max_instructions(10_000_000)
                .with_max_memory(1024 * 1024),
            tracing: TracingConfig::disabled(),
        }
    }

    /// Replaces the limits.
    #[must_use]
    pub fn with_limits(mut self, limits: MachineLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replaces the tracing options.
    #[must_use]
    pub fn with_tracing(mut self, tracing: TracingConfig) -> Self {
        self.tracing = tracing;
        self
    }
}

/// Execution limits.
///
/// A value of 0 disables the corresponding limit. Exceeding a limit is a
/// terminal fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MachineLimits {
    /// Maximum number of instructions executed per load.
    pub max_instructions: u64,
    /// Maximum memory length in cells that writes may grow to.
    pub max_memory: usize,
}

impl Default for MachineLimits {
    fn default() -> Self {
        MachineLimits {
            max_instructions: 0,
            max_memory: DEFAULT_MAX_MEMORY,
        }
    }
}

impl MachineLimits {
    /// Creates the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits with every check disabled.
    #[must_use]
    pub fn unbounded() -> Self {
        MachineLimits {
            max_instructions: 0,
            max_memory: 0,
        }
    }

    /// Sets the instruction limit.
    #[must_use]
    pub fn with_max_instructions(mut self, max_instructions: u64) -> Self {
        self.max_instructions = max_instructions;
        self
    }

    /// Sets the memory limit in cells.
    #[must_use]
    pub fn with_max_memory(mut self, max_memory: usize) -> Self {
        self.max_memory = max_memory;
        self
    }
}

/// Trace recording options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TracingConfig {
    /// Whether trace events are recorded.
    pub enabled: bool,
    /// Maximum retained events (0 = unlimited); the oldest are dropped first.
    pub max_entries: usize,
}

impl TracingConfig {
    /// Tracing switched off.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// In-memory tracing retaining at most `max_entries` events.
    #[must_use]
    pub fn memory(max_entries: usize) -> Self {
        TracingConfig {
            enabled: true,
            max_entries,
        }
    }
}
