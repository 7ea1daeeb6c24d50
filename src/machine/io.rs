//! Input and output queues.

use std::collections::{vec_deque, VecDeque};

/// The machine's two FIFO integer queues.
///
/// Values pushed to the input side are consumed by INPUT instructions in push
/// order; values produced by OUTPUT instructions appear on the output side in
/// execution order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IoChannel {
    input: VecDeque<i64>,
    output: VecDeque<i64>,
}

impl IoChannel {
    /// Creates an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value to the tail of the input queue.
    pub fn push_input(&mut self, value: i64) {
        self.input.push_back(value);
    }

    /// Appends every value of `values` to the input queue, in order.
    pub fn extend_input<I: IntoIterator<Item = i64>>(&mut self, values: I) {
        self.input.extend(values);
    }

    /// Replaces the input queue with `values`.
    pub fn set_input<I: IntoIterator<Item = i64>>(&mut self, values: I) {
        self.input.clear();
        self.input.extend(values);
    }

    /// Removes the value at the head of the input queue.
    pub fn pop_input(&mut self) -> Option<i64> {
        self.input.pop_front()
    }

    /// Returns the number of values waiting in the input queue.
    #[must_use]
    pub fn inputs_pending(&self) -> usize {
        self.input.len()
    }

    pub(crate) fn push_output(&mut self, value: i64) {
        self.output.push_back(value);
    }

    /// Removes the oldest produced value.
    pub fn pop_output(&mut self) -> Option<i64> {
        self.output.pop_front()
    }

    /// Removes and returns all produced values, oldest first.
    pub fn drain_outputs(&mut self) -> Vec<i64> {
        self.output.drain(..).collect()
    }

    /// Returns the number of produced values not yet consumed.
    #[must_use]
    pub fn outputs_pending(&self) -> usize {
        self.output.len()
    }

    /// Iterates over the produced values without consuming them.
    pub fn outputs(&self) -> vec_deque::Iter<'_, i64> {
        self.output.iter()
    }

    /// Empties both queues.
    pub fn clear(&mut self) {
        self.input.clear();
        self.output.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_fifo() {
        let mut io = IoChannel::new();
        io.push_input(1);
        io.extend_input([2, 3]);

        assert_eq!(io.inputs_pending(), 3);
        assert_eq!(io.pop_input(), Some(1));
        assert_eq!(io.pop_input(), Some(2));
        assert_eq!(io.pop_input(), Some(3));
        assert_eq!(io.pop_input(), None);
    }

    #[test]
    fn test_set_input_replaces() {
        let mut io = IoChannel::new();
        io.extend_input([7, 8]);
        io.set_input(vec![4, 5]);

        assert_eq!(io.pop_input(), Some(4));
        assert_eq!(io.inputs_pending(), 1);
    }

    #[test]
    fn test_output_fifo() {
        let mut io = IoChannel::new();
        io.push_output(10);
        io.push_output(20);
        io.push_output(30);

        assert_eq!(io.outputs().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
        assert_eq!(io.pop_output(), Some(10));
        assert_eq!(io.drain_outputs(), vec![20, 30]);
        assert_eq!(io.outputs_pending(), 0);
        assert_eq!(io.pop_output(), None);
    }

    #[test]
    fn test_clear() {
        let mut io = IoChannel::new();
        io.push_input(1);
        io.push_output(2);
        io.clear();

        assert_eq!(io, IoChannel::new());
    }
}
