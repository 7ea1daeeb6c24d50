//! Instruction decoding and parameter resolution.
//!
//! An instruction word packs the opcode into its low two decimal digits and
//! the addressing mode of each parameter into the following digits, read
//! least-significant first:
//!
//! ```text
//!   1002  ->  opcode 02 (MUL), modes [Position, Immediate, Position]
//!   ^^        mode digits "10" read right to left; missing digits are Position
//! ```
//!
//! [`Instruction::decode`] performs that split. [`ParamResolver`] then turns
//! each parameter into a value (for reads) or an address (for writes)
//! according to its [`Mode`].

use std::fmt;

use crate::machine::{
    opcode::{Opcode, MAX_PARAMS},
    Fault, Memory,
};

/// Parameter addressing mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum Mode {
    /// The parameter is the address of the value.
    #[default]
    Position,
    /// The parameter is the value itself. Never a write target.
    Immediate,
    /// The parameter plus the relative base is the address of the value.
    Relative,
}

impl Mode {
    /// Maps a mode digit to its mode.
    #[must_use]
    pub fn from_digit(digit: i64) -> Option<Self> {
        match digit {
            0 => Some(Mode::Position),
            1 => Some(Mode::Immediate),
            2 => Some(Mode::Relative),
            _ => None,
        }
    }

    /// Returns the mode digit.
    #[must_use]
    pub fn digit(self) -> u8 {
        match self {
            Mode::Position => 0,
            Mode::Immediate => 1,
            Mode::Relative => 2,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Position => f.write_str("position"),
            Mode::Immediate => f.write_str("immediate"),
            Mode::Relative => f.write_str("relative"),
        }
    }
}

/// A decoded instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// The instruction's opcode.
    pub opcode: Opcode,
    /// Modes of parameters 1..=3; entries past the parameter count are `Position`.
    pub modes: [Mode; MAX_PARAMS],
}

impl Instruction {
    /// Splits an instruction word into its opcode and parameter modes.
    ///
    /// Mode digits beyond the opcode's parameter count are ignored.
    ///
    /// # Arguments
    ///
    /// * `word` - The fetched instruction word.
    /// * `pc` - Address the word was fetched from, used for fault reporting.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::Decode`] for an unknown opcode and
    /// [`Fault::InvalidMode`] for a mode digit other than 0, 1 or 2.
    pub fn decode(word: i64, pc: usize) -> Result<Self, Fault> {
        let code = word % 100;
        let opcode = Opcode::from_code(code).ok_or(Fault::Decode { opcode: code, pc })?;

        let mut modes = [Mode::Position; MAX_PARAMS];
        let mut digits = word / 100;
        for mode in modes.iter_mut().take(opcode.param_count()) {
            let digit = digits % 10;
            *mode = Mode::from_digit(digit).ok_or(Fault::InvalidMode { mode: digit, pc })?;
            digits /= 10;
        }

        Ok(Instruction { opcode, modes })
    }

    /// Returns the mode of the zero-based parameter `index`.
    #[must_use]
    pub fn mode(&self, index: usize) -> Mode {
        self.modes.get(index).copied().unwrap_or_default()
    }

    /// Returns the instruction width in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.opcode.width()
    }
}

/// Resolves the parameters of one instruction against machine state.
///
/// Resolution is lazy: each parameter is read only when a handler asks for
/// it, so a jump whose condition fails never touches its target operand.
pub struct ParamResolver<'a> {
    memory: &'a Memory,
    pc: usize,
    relative_base: i64,
    instruction: Instruction,
}

impl<'a> ParamResolver<'a> {
    /// Creates a resolver for `instruction` located at `pc`.
    #[must_use]
    pub fn new(
        memory: &'a Memory,
        pc: usize,
        relative_base: i64,
        instruction: Instruction,
    ) -> Self {
        ParamResolver {
            memory,
            pc,
            relative_base,
            instruction,
        }
    }

    /// Returns the raw cell of the zero-based parameter `index`.
    #[must_use]
    pub fn raw(&self, index: usize) -> i64 {
        self.memory.get(self.pc + 1 + index)
    }

    /// Resolves parameter `index` to the value it denotes.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::Bounds`] if the parameter addresses a negative cell and
    /// [`Fault::ArithmeticOverflow`] if a relative address overflows.
    pub fn value(&self, index: usize) -> Result<i64, Fault> {
        let raw = self.raw(index);
        match self.instruction.mode(index) {
            Mode::Position => self.memory.read(raw),
            Mode::Immediate => Ok(raw),
            Mode::Relative => self.memory.read(self.relative(raw)?),
        }
    }

    /// Resolves parameter `index` to the address it writes to.
    ///
    /// The returned address may be negative; the write itself reports that.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::WriteMode`] if the parameter is in immediate mode and
    /// [`Fault::ArithmeticOverflow`] if a relative address overflows.
    pub fn address(&self, index: usize) -> Result<i64, Fault> {
        let raw = self.raw(index);
        match self.instruction.mode(index) {
            Mode::Position => Ok(raw),
            Mode::Immediate => Err(Fault::WriteMode {
                pc: self.pc,
                param: index + 1,
            }),
            Mode::Relative => self.relative(raw),
        }
    }

    fn relative(&self, raw: i64) -> Result<i64, Fault> {
        self.relative_base
            .checked_add(raw)
            .ok_or(Fault::ArithmeticOverflow { pc: self.pc })
    }
}
