//! Crate-level error type.
//!
//! [`Error`] covers loading program text and lifting a recorded machine
//! [`Fault`] into a `Result`.

use thiserror::Error;

use crate::machine::Fault;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Machine faults are normally reported through the machine's execution state rather than as
/// errors. [`Error::Fault`] exists so that drivers which prefer `?` can lift a recorded fault
/// into this type via [`crate::Machine::check`].
///
/// # Error Categories
///
/// ## Program Text Errors
/// - [`Error::Parse`] - A cell of the program text is not a signed decimal integer
/// - [`Error::Empty`] - Empty program text provided
///
/// ## I/O Errors
/// - [`Error::FileError`] - Filesystem I/O errors while reading a program file
///
/// ## Execution Errors
/// - [`Error::Fault`] - The machine stopped on a terminal fault
///
/// # Examples
///
/// ```rust
/// use intcode::{Error, Program};
///
/// match Program::parse("1,0,x,3") {
///     Err(Error::Parse { position, .. }) => assert_eq!(position, 2),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A cell of the program text could not be parsed.
    ///
    /// # Fields
    ///
    /// * `position` - Zero-based index of the offending cell
    /// * `token` - The trimmed text of the offending cell
    /// * `message` - Description of the underlying integer parse failure
    #[error("Invalid program text at cell {position} ({token:?}): {message}")]
    Parse {
        /// Zero-based index of the cell that failed to parse
        position: usize,
        /// The offending token, trimmed of whitespace
        token: String,
        /// The message of the underlying parse error
        message: String,
    },

    /// Provided program text was empty.
    #[error("Provided program text was empty")]
    Empty,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while reading a program file from disk.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// The machine stopped on a terminal fault.
    #[error("Machine fault - {0}")]
    Fault(#[from] Fault),
}
