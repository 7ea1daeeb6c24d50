//! Fetch-decode-execute engine.
//!
//! This module provides [`Machine`], the interpreter that owns memory, the
//! program counter, the relative base and the I/O queues, and drives them one
//! instruction at a time.
//!
//! # Architecture
//!
//! The engine module is organized into several sub-modules:
//!
//! - [`error`] - [`Fault`] types raised by instructions
//! - [`result`] - [`StepResult`] and [`ExecutionState`]
//! - [`stats`] - Execution statistics and instruction limit checks
//! - [`trace`] - Instruction-level trace events
//! - `handlers` - One handler per opcode
//!
//! # Execution Model
//!
//! A caller loads a program, optionally queues input, then calls
//! [`Machine::step`] or [`Machine::run`] and inspects the state afterwards.
//! Faults never surface as panics or `Err` from `step`/`run`; they are
//! recorded on the machine and the state becomes
//! [`ExecutionState::Faulted`].
//!
//! # Speculative Execution
//!
//! [`Machine`] is an ordinary value. `clone()` copies memory, registers,
//! queues, statistics and trace into a machine that shares nothing with its
//! source, so a breadth-first search can hold one machine per frontier node.
//!
//! ```rust
//! use intcode::{ExecutionState, Machine};
//!
//! // Echo each input back, forever.
//! let program = [3, 100, 4, 100, 1105, 1, 0];
//! let mut root = Machine::new();
//! root.load(&program);
//!
//! let mut left = root.fork(&[1]);
//! let mut right = root.fork(&[2]);
//! assert_eq!(left.run_until_output(), Some(1));
//! assert_eq!(right.run_until_output(), Some(2));
//! assert_eq!(root.state(), ExecutionState::Ready);
//! ```

pub mod error;
mod handlers;
pub mod result;
pub mod stats;
pub mod trace;


use crate::{
    machine::{
        io::IoChannel,
        memory::Memory,
        opcode::Opcode,
        operand::{Instruction, ParamResolver},
        MachineConfig,
    },
    Error, Result,
};

pub use error::{Fault, FaultKind};
pub use result::{ExecutionState, StepResult};
pub use stats::ExecutionStats;
pub use trace::{TraceBuffer, TraceEvent, TracedParam};

/// A stored-program integer machine.
///
/// # Example
///
/// ```rust
/// use intcode::{ExecutionState, Machine};
///
/// let mut machine = Machine::new();
/// machine.load(&[1002, 4, 3, 4, 33]);
/// machine.step();
///
/// assert_eq!(machine.memory().as_slice(), &[1002, 4, 3, 4, 99]);
/// assert_eq!(machine.run(), ExecutionState::Halted);
/// ```
#[derive(Clone, Debug)]
pub struct Machine {
    /// Program and data memory.
    memory: Memory,

    /// Address of the next instruction to fetch.
    pc: usize,

    /// Offset added to relative-mode parameters.
    relative_base: i64,

    /// Current lifecycle stage.
    state: ExecutionState,

    /// The fault that stopped execution, once faulted.
    fault: Option<Fault>,

    /// Input and output queues.
    io: IoChannel,

    /// Execution counters.
    stats: ExecutionStats,

    /// Recorded trace events.
    trace: TraceBuffer,

    /// Limits and tracing options.
    config: MachineConfig,
}

impl Machine {
    /// Creates a machine with the default configuration and empty memory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    /// Creates a machine with the given configuration and empty memory.
    #[must_use]
    pub fn with_config(config: MachineConfig) -> Self {
        Machine {
            memory: Memory::with_limit(config.limits.max_memory),
            pc: 0,
            relative_base: 0,
            state: ExecutionState::Ready,
            fault: None,
            io: IoChannel::new(),
            stats: ExecutionStats::new(),
            trace: TraceBuffer::new(&config.tracing),
            config,
        }
    }

    /// Creates a default machine with `program` loaded.
    #[must_use]
    pub fn with_program(program: &[i64]) -> Self {
        let mut machine = Self::new();
        machine.load(program);
        machine
    }

    /// Installs `program` and resets every register, queue and counter.
    ///
    /// After loading, the program counter and relative base are 0, the state
    /// is [`ExecutionState::Ready`], both queues are empty and memory holds
    /// exactly the program cells.
    pub fn load(&mut self, program: &[i64]) {
        self.memory.load(program);
        self.pc = 0;
        self.relative_base = 0;
        self.state = ExecutionState::Ready;
        self.fault = None;
        self.io.clear();
        self.stats.reset();
        self.trace.clear();
        log::debug!("loaded program of {} cells", program.len());
    }

    /// Executes exactly one instruction.
    ///
    /// A `Ready` machine becomes `Running` first. A halted or faulted machine
    /// executes nothing and returns [`StepResult::Inactive`].
    ///
    /// # Returns
    ///
    /// - `Continue` - a non-jumping instruction completed
    /// - `Branch { target }` - a jump was taken
    /// - `Output { value }` - a value was appended to the output queue
    /// - `Halt` - the machine halted
    /// - `Fault(fault)` - the instruction faulted; the machine is now faulted
    /// - `Inactive` - the machine was already halted or faulted
    pub fn step(&mut self) -> StepResult {
        match self.state {
            ExecutionState::Halted | ExecutionState::Faulted => return StepResult::Inactive,
            ExecutionState::Ready => {
                log::debug!("machine started");
                self.state = ExecutionState::Running;
            }
            ExecutionState::Running => {}
        }

        if let Some(fault) = self.stats.check_limits(&self.config.limits) {
            return self.record_fault(fault);
        }

        let Some(word) = self.memory.fetch(self.pc) else {
            return self.record_fault(Fault::OutOfProgram {
                pc: self.pc,
                length: self.memory.len(),
            });
        };

        let instruction = match Instruction::decode(word, self.pc) {
            Ok(instruction) => instruction,
            Err(fault) => return self.record_fault(fault),
        };

        self.stats.increment_instructions();
        if self.trace.is_enabled() {
            self.trace_instruction(&instruction);
        }
        log::trace!("[{:>4}] {}", self.pc, instruction.opcode);

        match self.dispatch(&instruction) {
            Ok(StepResult::Branch { target }) => {
                self.pc = target;
                StepResult::Branch { target }
            }
            Ok(StepResult::Halt) => {
                log::debug!(
                    "machine halted at pc {} after {} instructions",
                    self.pc,
                    self.stats.instructions_executed
                );
                self.state = ExecutionState::Halted;
                StepResult::Halt
            }
            Ok(result) => {
                self.pc += instruction.width();
                result
            }
            Err(fault) => self.record_fault(fault),
        }
    }

    /// Executes instructions until the machine halts or faults.
    ///
    /// Returns the final state. Calling `run` on a halted or faulted machine
    /// does nothing.
    pub fn run(&mut self) -> ExecutionState {
        while !self.state.is_terminal() {
            self.step();
        }
        self.state
    }

    /// Steps until the output queue holds a value or the machine stops.
    ///
    /// Returns the oldest unconsumed output, removing it from the queue, or
    /// `None` if the machine halted or faulted without producing one. If an
    /// earlier output is still queued it is returned without stepping.
    pub fn run_until_output(&mut self) -> Option<i64> {
        while self.io.outputs_pending() == 0 && !self.state.is_terminal() {
            self.step();
        }
        self.io.pop_output()
    }

    /// Steps until the machine stops or needs input that has not been supplied.
    ///
    /// Interactive drivers use this to run one round, read the outputs, push
    /// the next input and resume, without ever triggering an input underflow.
    pub fn run_until_blocked(&mut self) -> ExecutionState {
        while !self.state.is_terminal() && !self.awaiting_input() {
            self.step();
        }
        self.state
    }

    /// Returns `true` if the next instruction is INPUT and no input is queued.
    #[must_use]
    pub fn awaiting_input(&self) -> bool {
        !self.state.is_terminal()
            && self.io.inputs_pending() == 0
            && self
                .memory
                .fetch(self.pc)
                .and_then(|word| Instruction::decode(word, self.pc).ok())
                .is_some_and(|instruction| instruction.opcode == Opcode::Input)
    }

    /// Returns an independent copy of this machine with `inputs` queued.
    #[must_use]
    pub fn fork(&self, inputs: &[i64]) -> Self {
        let mut machine = self.clone();
        machine.io.extend_input(inputs.iter().copied());
        machine
    }

    /// Reads a memory cell without side effects; cells past the end read as 0.
    #[must_use]
    pub fn peek(&self, address: usize) -> i64 {
        self.memory.get(address)
    }

    /// Writes a memory cell directly, growing memory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::MemoryLimit`] if growth would exceed the limit.
    pub fn patch(&mut self, address: usize, value: i64) -> std::result::Result<(), Fault> {
        self.memory.set(address, value)
    }

    /// Writes the conventional noun and verb cells (addresses 1 and 2).
    ///
    /// # Errors
    ///
    /// Returns [`Fault::MemoryLimit`] if growth would exceed the limit.
    pub fn set_noun_verb(&mut self, noun: i64, verb: i64) -> std::result::Result<(), Fault> {
        self.patch(1, noun)?;
        self.patch(2, verb)
    }

    /// Appends a value to the input queue.
    pub fn push_input(&mut self, value: i64) {
        self.io.push_input(value);
    }

    /// Appends several values to the input queue, in order.
    pub fn extend_input<I: IntoIterator<Item = i64>>(&mut self, values: I) {
        self.io.extend_input(values);
    }

    /// Replaces the input queue with `values`.
    pub fn set_input<I: IntoIterator<Item = i64>>(&mut self, values: I) {
        self.io.set_input(values);
    }

    /// Removes the oldest produced value.
    pub fn pop_output(&mut self) -> Option<i64> {
        self.io.pop_output()
    }

    /// Removes and returns all produced values, oldest first.
    pub fn drain_outputs(&mut self) -> Vec<i64> {
        self.io.drain_outputs()
    }

    /// Returns the number of queued, unconsumed inputs.
    #[must_use]
    pub fn inputs_pending(&self) -> usize {
        self.io.inputs_pending()
    }

    /// Iterates over produced values without consuming them, oldest first.
    pub fn outputs(&self) -> std::collections::vec_deque::Iter<'_, i64> {
        self.io.outputs()
    }

    /// Returns the current lifecycle stage.
    #[must_use]
    pub fn state(&self) -> ExecutionState {
        self.state
    }

    /// Returns the fault that stopped execution, if any.
    #[must_use]
    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    /// Converts a recorded fault into an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fault`] if the machine is faulted.
    pub fn check(&self) -> Result<()> {
        match &self.fault {
            Some(fault) => Err(Error::Fault(fault.clone())),
            None => Ok(()),
        }
    }

    /// Returns the program counter.
    #[must_use]
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Returns the relative base.
    #[must_use]
    pub fn relative_base(&self) -> i64 {
        self.relative_base
    }

    /// Returns the machine memory.
    #[must_use]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Returns the I/O queues.
    #[must_use]
    pub fn io(&self) -> &IoChannel {
        &self.io
    }

    /// Returns the execution statistics.
    #[must_use]
    pub fn stats(&self) -> &ExecutionStats {
        &self.stats
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Returns the trace buffer.
    #[must_use]
    pub fn trace(&self) -> &TraceBuffer {
        &self.trace
    }

    /// Takes the recorded trace events, leaving the buffer empty.
    pub fn take_trace(&mut self) -> Vec<TraceEvent> {
        self.trace.take()
    }

    fn params(&self, instruction: &Instruction) -> ParamResolver<'_> {
        ParamResolver::new(&self.memory, self.pc, self.relative_base, *instruction)
    }

    fn trace_instruction(&mut self, instruction: &Instruction) {
        let info = instruction.opcode.info();
        let params = self.params(instruction);
        let traced = (0..info.params)
            .map(|index| {
                TracedParam::capture(
                    &params,
                    instruction.mode(index),
                    index,
                    info.write_param == Some(index),
                )
            })
            .collect();
        self.trace.record(TraceEvent::Instruction {
            pc: self.pc,
            opcode: instruction.opcode,
            params: traced,
        });
    }

    fn record_fault(&mut self, fault: Fault) -> StepResult {
        log::warn!("machine faulted at pc {}: {fault}", self.pc);
        self.trace.record(TraceEvent::Fault {
            pc: self.pc,
            fault: fault.clone(),
        });
        self.state = ExecutionState::Faulted;
        self.fault = Some(fault.clone());
        StepResult::Fault(fault)
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
