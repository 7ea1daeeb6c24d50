//! Handler methods for the machine's instructions.
//!
//! [`Machine::dispatch`] matches exhaustively over [`Opcode`] and delegates to
//! one handler per instruction family. Handlers resolve their parameters
//! through a [`ParamResolver`](crate::machine::operand::ParamResolver),
//! perform their effect and report how the program counter should move. A
//! handler that returns `Err` has not written memory.

use crate::machine::{
    engine::{Machine, StepResult, TraceEvent},
    opcode::Opcode,
    operand::Instruction,
    Fault,
};

impl Machine {
    /// Executes a decoded instruction at the current program counter.
    pub(super) fn dispatch(&mut self, instruction: &Instruction) -> Result<StepResult, Fault> {
        match instruction.opcode {
            Opcode::Add => self.arithmetic(instruction, i64::checked_add),
            Opcode::Mul => self.arithmetic(instruction, i64::checked_mul),
            Opcode::Input => self.input(instruction),
            Opcode::Output => self.output(instruction),
            Opcode::JumpIfTrue => self.jump_if(instruction, |value| value != 0),
            Opcode::JumpIfFalse => self.jump_if(instruction, |value| value == 0),
            Opcode::LessThan => self.compare(instruction, |a, b| a < b),
            Opcode::Equals => self.compare(instruction, |a, b| a == b),
            Opcode::AdjustRelativeBase => self.adjust_relative_base(instruction),
            Opcode::Halt => {
                self.trace.record(TraceEvent::Halt { pc: self.pc });
                Ok(StepResult::Halt)
            }
        }
    }

    /// `mem[c] = op(a, b)` for ADD and MUL.
    fn arithmetic(
        &mut self,
        instruction: &Instruction,
        op: fn(i64, i64) -> Option<i64>,
    ) -> Result<StepResult, Fault> {
        let params = self.params(instruction);
        let a = params.value(0)?;
        let b = params.value(1)?;
        let target = params.address(2)?;

        let result = op(a, b).ok_or(Fault::ArithmeticOverflow { pc: self.pc })?;
        self.memory.write(target, result)?;
        Ok(StepResult::Continue)
    }

    /// `mem[c] = cmp(a, b) as i64` for LT and EQ.
    fn compare(
        &mut self,
        instruction: &Instruction,
        cmp: fn(i64, i64) -> bool,
    ) -> Result<StepResult, Fault> {
        let params = self.params(instruction);
        let a = params.value(0)?;
        let b = params.value(1)?;
        let target = params.address(2)?;

        self.memory.write(target, i64::from(cmp(a, b)))?;
        Ok(StepResult::Continue)
    }

    /// Pops the head of the input queue into `mem[a]`.
    ///
    /// The target is resolved before the queue is touched so that a write-mode
    /// fault leaves the input untouched.
    fn input(&mut self, instruction: &Instruction) -> Result<StepResult, Fault> {
        let target = self.params(instruction).address(0)?;
        let value = self
            .io
            .pop_input()
            .ok_or(Fault::InputUnderflow { pc: self.pc })?;

        self.memory.write(target, value)?;
        self.stats.inputs_consumed += 1;
        self.trace.record(TraceEvent::Input {
            pc: self.pc,
            address: target,
            value,
        });
        Ok(StepResult::Continue)
    }

    /// Appends `a` to the output queue.
    fn output(&mut self, instruction: &Instruction) -> Result<StepResult, Fault> {
        let value = self.params(instruction).value(0)?;

        self.io.push_output(value);
        self.stats.outputs_produced += 1;
        self.trace.record(TraceEvent::Output { pc: self.pc, value });
        Ok(StepResult::Output { value })
    }

    /// Sets the program counter to `b` when `cond(a)` holds.
    ///
    /// The target parameter is only resolved when the jump is taken.
    fn jump_if(
        &mut self,
        instruction: &Instruction,
        cond: fn(i64) -> bool,
    ) -> Result<StepResult, Fault> {
        let params = self.params(instruction);
        let result = if cond(params.value(0)?) {
            let target = params.value(1)?;
            let target = usize::try_from(target).map_err(|_| Fault::InvalidJump {
                pc: self.pc,
                target,
            })?;
            StepResult::Branch { target }
        } else {
            StepResult::Continue
        };

        let target = match result {
            StepResult::Branch { target } => Some(target),
            _ => None,
        };
        self.trace.record(TraceEvent::Branch {
            pc: self.pc,
            target,
        });
        Ok(result)
    }

    /// `relative_base += a`.
    fn adjust_relative_base(&mut self, instruction: &Instruction) -> Result<StepResult, Fault> {
        let offset = self.params(instruction).value(0)?;

        self.relative_base = self
            .relative_base
            .checked_add(offset)
            .ok_or(Fault::ArithmeticOverflow { pc: self.pc })?;
        self.trace.record(TraceEvent::RelativeBase {
            pc: self.pc,
            base: self.relative_base,
        });
        Ok(StepResult::Continue)
    }
}
