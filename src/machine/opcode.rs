//! Instruction set definition.
//!
//! [`Opcode`] is the closed set of instructions the machine understands. The
//! static [`OPCODES`] table carries the per-opcode properties the decoder and
//! the engine need (mnemonic, parameter count, which parameter is written, and
//! whether the instruction may branch). It is immutable and shared by every
//! machine instance.
//!
//! | Code | Mnemonic  | Params | Effect                              |
//! |------|-----------|--------|-------------------------------------|
//! | 1    | `ADD`     | 3      | `mem[c] = a + b`                    |
//! | 2    | `MUL`     | 3      | `mem[c] = a * b`                    |
//! | 3    | `INPUT`   | 1      | `mem[a] = input.pop_front()`        |
//! | 4    | `OUTPUT`  | 1      | `output.push_back(a)`               |
//! | 5    | `JNZ`     | 2      | `pc = b` if `a != 0`                |
//! | 6    | `JZ`      | 2      | `pc = b` if `a == 0`                |
//! | 7    | `LT`      | 3      | `mem[c] = (a < b) as i64`           |
//! | 8    | `EQ`      | 3      | `mem[c] = (a == b) as i64`          |
//! | 9    | `RELBASE` | 1      | `relative_base += a`                |
//! | 99   | `HALT`    | 0      | stop                                |

use std::fmt;

use strum::{EnumCount, EnumIter, FromRepr};

/// Largest parameter count of any instruction.
pub const MAX_PARAMS: usize = 3;

/// Machine instruction identifiers.
///
/// The discriminant of each variant is its numeric code, the low two decimal
/// digits of an instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount, FromRepr)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "snake_case")
)]
#[repr(u8)]
pub enum Opcode {
    /// Addition.
    Add = 1,
    /// Multiplication.
    Mul = 2,
    /// Read one value from the input queue.
    Input = 3,
    /// Append one value to the output queue.
    Output = 4,
    /// Jump if the first parameter is non-zero.
    JumpIfTrue = 5,
    /// Jump if the first parameter is zero.
    JumpIfFalse = 6,
    /// Store 1 if the first parameter is less than the second, else 0.
    LessThan = 7,
    /// Store 1 if both parameters are equal, else 0.
    Equals = 8,
    /// Add the first parameter to the relative base.
    AdjustRelativeBase = 9,
    /// Stop execution.
    Halt = 99,
}

/// Static properties of an opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpcodeInfo {
    /// The opcode these properties describe.
    pub opcode: Opcode,
    /// Upper-case mnemonic used in traces.
    pub mnemonic: &'static str,
    /// Number of parameters following the instruction word.
    pub params: usize,
    /// Zero-based index of the parameter that is a write target, if any.
    pub write_param: Option<usize>,
    /// Whether the instruction may set the program counter.
    pub branches: bool,
}

/// Properties of every opcode, in [`Opcode`] declaration order.
pub static OPCODES: [OpcodeInfo; Opcode::COUNT] = [
    OpcodeInfo {
        opcode: Opcode::Add,
        mnemonic: "ADD",
        params: 3,
        write_param: Some(2),
        branches: false,
    },
    OpcodeInfo {
        opcode: Opcode::Mul,
        mnemonic: "MUL",
        params: 3,
        write_param: Some(2),
        branches: false,
    },
    OpcodeInfo {
        opcode: Opcode::Input,
        mnemonic: "INPUT",
        params: 1,
        write_param: Some(0),
        branches: false,
    },
    OpcodeInfo {
        opcode: Opcode::Output,
        mnemonic: "OUTPUT",
        params: 1,
        write_param: None,
        branches: false,
    },
    OpcodeInfo {
        opcode: Opcode::JumpIfTrue,
        mnemonic: "JNZ",
        params: 2,
        write_param: None,
        branches: true,
    },
    OpcodeInfo {
        opcode: Opcode::JumpIfFalse,
        mnemonic: "JZ",
        params: 2,
        write_param: None,
        branches: true,
    },
    OpcodeInfo {
        opcode: Opcode::LessThan,
        mnemonic: "LT",
        params: 3,
        write_param: Some(2),
        branches: false,
    },
    OpcodeInfo {
        opcode: Opcode::Equals,
        mnemonic: "EQ",
        params: 3,
        write_param: Some(2),
        branches: false,
    },
    OpcodeInfo {
        opcode: Opcode::AdjustRelativeBase,
        mnemonic: "RELBASE",
        params: 1,
        write_param: None,
        branches: false,
    },
    OpcodeInfo {
        opcode: Opcode::Halt,
        mnemonic: "HALT",
        params: 0,
        write_param: None,
        branches: false,
    },
];

impl Opcode {
    /// Looks up the opcode for a numeric code.
    ///
    /// Returns `None` for codes outside the instruction set, including
    /// negative codes.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        u8::try_from(code).ok().and_then(Self::from_repr)
    }

    /// Returns the numeric code.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the static properties of this opcode.
    #[must_use]
    pub fn info(self) -> &'static OpcodeInfo {
        let index = match self {
            Opcode::Add => 0,
            Opcode::Mul => 1,
            Opcode::Input => 2,
            Opcode::Output => 3,
            Opcode::JumpIfTrue => 4,
            Opcode::JumpIfFalse => 5,
            Opcode::LessThan => 6,
            Opcode::Equals => 7,
            Opcode::AdjustRelativeBase => 8,
            Opcode::Halt => 9,
        };
        &OPCODES[index]
    }

    /// Returns the mnemonic.
    #[must_use]
    pub fn mnemonic(self) -> &'static str {
        self.info().mnemonic
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn param_count(self) -> usize {
        self.info().params
    }

    /// Returns the instruction width in cells (word plus parameters).
    #[must_use]
    pub fn width(self) -> usize {
        self.param_count() + 1
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_table_matches_declaration_order() {
        for opcode in Opcode::iter() {
            assert_eq!(opcode.info().opcode, opcode);
        }
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Opcode::from_code(1), Some(Opcode::Add));
        assert_eq!(Opcode::from_code(9), Some(Opcode::AdjustRelativeBase));
        assert_eq!(Opcode::from_code(99), Some(Opcode::Halt));
        assert_eq!(Opcode::from_code(0), None);
        assert_eq!(Opcode::from_code(10), None);
        assert_eq!(Opcode::from_code(-1), None);
        assert_eq!(Opcode::from_code(1099), None);
    }

    #[test]
    fn test_widths() {
        assert_eq!(Opcode::Add.width(), 4);
        assert_eq!(Opcode::Input.width(), 2);
        assert_eq!(Opcode::JumpIfFalse.width(), 3);
        assert_eq!(Opcode::Halt.width(), 1);
        assert!(Opcode::iter().all(|op| op.param_count() <= MAX_PARAMS));
    }

    #[test]
    fn test_write_params_are_last() {
        for info in &OPCODES {
            if let Some(index) = info.write_param {
                assert_eq!(index + 1, info.params, "{}", info.mnemonic);
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Opcode::JumpIfTrue.to_string(), "JNZ");
        assert_eq!(Opcode::Halt.code(), 99);
    }
}
