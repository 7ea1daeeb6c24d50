//! Program text parsing.
//!
//! A program is distributed as a single line of comma-separated signed decimal
//! integers giving the initial contents of machine memory from address 0.
//! [`Program`] parses that text and hands the cells to
//! [`Machine::load`](crate::Machine::load).
//!
//! # Example
//!
//! ```rust
//! use intcode::{Machine, Program};
//!
//! let program: Program = "104,1125899906842624,99".parse()?;
//! let mut machine = Machine::new();
//! machine.load(&program);
//! machine.run();
//! assert_eq!(machine.drain_outputs(), vec![1125899906842624]);
//! # Ok::<(), intcode::Error>(())
//! ```

use std::{fs, ops::Deref, path::Path, str::FromStr};

use crate::{Error, Result};

/// The initial memory image of a machine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Program {
    cells: Vec<i64>,
}

impl Program {
    /// Parses program text.
    ///
    /// Leading and trailing whitespace (including the trailing newline of a
    /// program file) is ignored, as is whitespace around each cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] for blank text and [`Error::Parse`] for the
    /// first cell that is not a signed decimal `i64`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Empty);
        }

        let cells = text
            .split(',')
            .enumerate()
            .map(|(position, token)| {
                let token = token.trim();
                token.parse::<i64>().map_err(|e| Error::Parse {
                    position,
                    token: token.to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Program { cells })
    }

    /// Reads and parses a program file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileError`] if the file cannot be read, otherwise the
    /// errors of [`Program::parse`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Returns the program cells.
    #[must_use]
    pub fn cells(&self) -> &[i64] {
        &self.cells
    }

    /// Consumes the program and returns its cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<i64> {
        self.cells
    }
}

impl Deref for Program {
    type Target = [i64];

    fn deref(&self) -> &Self::Target {
        &self.cells
    }
}

impl AsRef<[i64]> for Program {
    fn as_ref(&self) -> &[i64] {
        &self.cells
    }
}

impl From<Vec<i64>> for Program {
    fn from(cells: Vec<i64>) -> Self {
        Program { cells }
    }
}

impl FromStr for Program {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
