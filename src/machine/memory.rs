//! Growable integer memory.
//!
//! [`Memory`] is a single owned buffer of `i64` cells addressed from zero.
//! Reads past the end yield 0, writes past the end zero-fill up to and
//! including the target address, and the buffer never shrinks while a program
//! is loaded.

use crate::machine::Fault;

/// Default cap on memory growth, in cells.
pub const DEFAULT_MAX_MEMORY: usize = 16 * 1024 * 1024;

/// Zero-indexed, automatically growing store of signed integers.
///
/// # Example
///
/// ```rust
/// use intcode::machine::Memory;
///
/// let mut memory = Memory::new();
/// memory.load(&[1, 2, 3]);
/// memory.write(10, 7)?;
///
/// assert_eq!(memory.len(), 11);
/// assert_eq!(memory.read(5)?, 0);
/// assert_eq!(memory.read(10)?, 7);
/// assert_eq!(memory.read(5000)?, 0);
/// # Ok::<(), intcode::machine::Fault>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<i64>,
    /// Maximum length growth may reach (0 = unlimited).
    limit: usize,
}

impl Memory {
    /// Creates an empty memory without a growth limit.
    #[must_use]
    pub fn new() -> Self {
        Memory {
            cells: Vec::new(),
            limit: 0,
        }
    }

    /// Creates an empty memory whose growth is capped at `limit` cells.
    ///
    /// A limit of 0 disables the cap. The cap applies to writes only; a loaded
    /// program may be longer than the limit.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Memory {
            cells: Vec::new(),
            limit,
        }
    }

    /// Replaces the contents with `program`, starting at address 0.
    pub fn load(&mut self, program: &[i64]) {
        self.cells.clear();
        self.cells.extend_from_slice(program);
    }

    /// Returns the current length in cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no cells are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the growth limit (0 = unlimited).
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the stored cells.
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    /// Reads the cell at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::Bounds`] if `address` is negative.
    pub fn read(&self, address: i64) -> Result<i64, Fault> {
        let index = Self::index(address)?;
        Ok(self.get(index))
    }

    /// Writes `value` to `address`, growing memory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::Bounds`] if `address` is negative, otherwise the
    /// faults of [`Memory::set`].
    pub fn write(&mut self, address: i64, value: i64) -> Result<(), Fault> {
        let index = Self::index(address)?;
        self.set(index, value)
    }

    /// Reads the cell at an unsigned index; cells past the end read as 0.
    #[must_use]
    pub fn get(&self, index: usize) -> i64 {
        self.cells.get(index).copied().unwrap_or(0)
    }

    /// Writes the cell at an unsigned index, zero-filling any gap.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::MemoryLimit`] if growth would exceed the limit and
    /// [`Fault::AllocationFailure`] if the cells cannot be allocated.
    pub fn set(&mut self, index: usize, value: i64) -> Result<(), Fault> {
        if index >= self.cells.len() {
            let requested = index.saturating_add(1);
            if self.limit != 0 && index >= self.limit {
                return Err(Fault::MemoryLimit {
                    requested,
                    limit: self.limit,
                });
            }
            self.cells
                .try_reserve(requested - self.cells.len())
                .map_err(|_| Fault::AllocationFailure { requested })?;
            self.cells.resize(requested, 0);
        }
        self.cells[index] = value;
        Ok(())
    }

    /// Returns the cell at `index` only if it lies within the current length.
    pub(crate) fn fetch(&self, index: usize) -> Option<i64> {
        self.cells.get(index).copied()
    }

    fn index(address: i64) -> Result<usize, Fault> {
        usize::try_from(address).map_err(|_| Fault::Bounds { address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_within_and_beyond() {
        let mut memory = Memory::new();
        memory.load(&[5, 6, 7]);

        assert_eq!(memory.read(0).unwrap(), 5);
        assert_eq!(memory.read(2).unwrap(), 7);
        assert_eq!(memory.read(3).unwrap(), 0);
        assert_eq!(memory.read(1_000_000).unwrap(), 0);
        // Reads never grow memory
        assert_eq!(memory.len(), 3);
    }

    #[test]
    fn test_negative_address() {
        let mut memory = Memory::new();
        memory.load(&[1]);

        assert_eq!(memory.read(-1), Err(Fault::Bounds { address: -1 }));
        assert_eq!(memory.write(-5, 1), Err(Fault::Bounds { address: -5 }));
        assert_eq!(memory.as_slice(), &[1]);
    }

    #[test]
    fn test_write_grows_with_zero_fill() {
        let mut memory = Memory::new();
        memory.load(&[1, 2]);
        memory.write(6, 42).unwrap();

        assert_eq!(memory.as_slice(), &[1, 2, 0, 0, 0, 0, 42]);

        // Writing inside the current length does not change it
        memory.write(3, 9).unwrap();
        assert_eq!(memory.len(), 7);
        assert_eq!(memory.read(3).unwrap(), 9);
    }

    #[test]
    fn test_growth_limit() {
        let mut memory = Memory::with_limit(8);
        memory.load(&[0; 4]);

        memory.write(7, 1).unwrap();
        assert_eq!(
            memory.write(8, 1),
            Err(Fault::MemoryLimit {
                requested: 9,
                limit: 8
            })
        );
        assert_eq!(memory.len(), 8);
    }

    #[test]
    fn test_unlimited_growth_beyond_address_space() {
        let mut memory = Memory::new();
        memory.load(&[1, 2]);

        assert_eq!(
            memory.write(i64::MAX, 1),
            Err(Fault::AllocationFailure {
                requested: i64::MAX as usize + 1
            })
        );
        assert_eq!(
            memory.set(usize::MAX, 1),
            Err(Fault::AllocationFailure {
                requested: usize::MAX
            })
        );
        assert_eq!(memory.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_load_replaces_contents() {
        let mut memory = Memory::new();
        memory.load(&[1, 2, 3]);
        memory.write(100, 1).unwrap();
        memory.load(&[9]);

        assert_eq!(memory.as_slice(), &[9]);
    }

    #[test]
    fn test_fetch_only_within_length() {
        let mut memory = Memory::new();
        memory.load(&[99]);

        assert_eq!(memory.fetch(0), Some(99));
        assert_eq!(memory.fetch(1), None);
    }
}
