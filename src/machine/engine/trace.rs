//! Execution tracing for debugging and analysis.
//!
//! When enabled through [`TracingConfig`], every executed instruction and its
//! observable effects (input consumed, output produced, branch decision,
//! relative base change, halt, fault) are recorded as [`TraceEvent`]s in the
//! machine's [`TraceBuffer`].
//!
//! # Output Format
//!
//! Events render two ways:
//!
//! - [`Display`](std::fmt::Display): one human-readable line, e.g.
//!   `[   0] MUL [4]=33, 3, ->[4]`
//! - `serde::Serialize` (with the `serde` feature): one object per event,
//!   tagged by `"type"`, suitable for newline-delimited JSON output.
//!
//! The buffer is part of machine state: it is cleared by a load and copied by a
//! clone, so each speculative continuation keeps its own history.

use std::{
    collections::{vec_deque, VecDeque},
    fmt::{self, Write as FmtWrite},
    mem,
};

use crate::machine::{
    operand::{Mode, ParamResolver},
    Fault, Opcode, TracingConfig,
};

/// One resolved instruction parameter as seen at execution time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TracedParam {
    /// Addressing mode.
    pub mode: Mode,
    /// Raw parameter cell.
    pub raw: i64,
    /// Effective address, for position and relative parameters.
    pub address: Option<i64>,
    /// Value read, for read parameters that resolved successfully.
    pub value: Option<i64>,
    /// Whether the parameter is the instruction's write target.
    pub write: bool,
}

impl TracedParam {
    /// Captures parameter `index` through `params` without faulting.
    pub(crate) fn capture(params: &ParamResolver<'_>, mode: Mode, index: usize, write: bool) -> Self {
        let address = match mode {
            Mode::Immediate => None,
            Mode::Position | Mode::Relative => params.address(index).ok(),
        };
        let value = if write {
            None
        } else {
            params.value(index).ok()
        };
        TracedParam {
            mode,
            raw: params.raw(index),
            address,
            value,
            write,
        }
    }
}

impl fmt::Display for TracedParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.write {
            f.write_str("->")?;
        }
        match (self.mode, self.address) {
            (Mode::Immediate, _) => return write!(f, "{}", self.raw),
            (Mode::Position, Some(address)) => write!(f, "[{address}]")?,
            (Mode::Relative, Some(address)) => write!(f, "[rb{:+}={address}]", self.raw)?,
            (_, None) => f.write_str("[?]")?,
        }
        if let Some(value) = self.value {
            write!(f, "={value}")?;
        }
        Ok(())
    }
}

/// A trace event recorded during execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum TraceEvent {
    /// An instruction was decoded and dispatched.
    Instruction {
        /// Address of the instruction word.
        pc: usize,
        /// The decoded opcode.
        opcode: Opcode,
        /// Parameters as resolved before execution.
        params: Vec<TracedParam>,
    },

    /// An input value was consumed.
    Input {
        /// Address of the INPUT instruction.
        pc: usize,
        /// Address written.
        address: i64,
        /// Value consumed.
        value: i64,
    },

    /// An output value was produced.
    Output {
        /// Address of the OUTPUT instruction.
        pc: usize,
        /// Value produced.
        value: i64,
    },

    /// A conditional jump was evaluated.
    Branch {
        /// Address of the jump instruction.
        pc: usize,
        /// The new program counter, or `None` if the jump was not taken.
        target: Option<usize>,
    },

    /// The relative base changed.
    RelativeBase {
        /// Address of the RELBASE instruction.
        pc: usize,
        /// The new relative base.
        base: i64,
    },

    /// The machine halted.
    Halt {
        /// Address of the HALT instruction.
        pc: usize,
    },

    /// The machine faulted.
    Fault {
        /// Program counter at the time of the fault.
        pc: usize,
        /// The fault.
        fault: Fault,
    },
}

impl TraceEvent {
    /// Returns the program counter the event belongs to.
    #[must_use]
    pub fn pc(&self) -> usize {
        match self {
            TraceEvent::Instruction { pc, .. }
            | TraceEvent::Input { pc, .. }
            | TraceEvent::Output { pc, .. }
            | TraceEvent::Branch { pc, .. }
            | TraceEvent::RelativeBase { pc, .. }
            | TraceEvent::Halt { pc }
            | TraceEvent::Fault { pc, .. } => *pc,
        }
    }

    /// Returns the event type name used in JSON output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TraceEvent::Instruction { .. } => "instruction",
            TraceEvent::Input { .. } => "input",
            TraceEvent::Output { .. } => "output",
            TraceEvent::Branch { .. } => "branch",
            TraceEvent::RelativeBase { .. } => "relative_base",
            TraceEvent::Halt { .. } => "halt",
            TraceEvent::Fault { .. } => "fault",
        }
    }

    /// Returns the human-readable description without the pc prefix.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            TraceEvent::Instruction { opcode, params, .. } => {
                let mut line = opcode.mnemonic().to_string();
                for (i, param) in params.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    let _ = write!(line, "{sep}{param}");
                }
                line
            }
            TraceEvent::Input { address, value, .. } => format!("input {value} -> [{address}]"),
            TraceEvent::Output { value, .. } => format!("output {value}"),
            TraceEvent::Branch {
                target: Some(target),
                ..
            } => format!("jump -> {target}"),
            TraceEvent::Branch { target: None, .. } => "no jump".to_string(),
            TraceEvent::RelativeBase { base, .. } => format!("relative base = {base}"),
            TraceEvent::Halt { .. } => "halt".to_string(),
            TraceEvent::Fault { fault, .. } => format!("fault: {fault}"),
        }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>4}] {}", self.pc(), self.detail())
    }
}

/// Bounded in-memory store of trace events.
#[derive(Clone, Debug, Default)]
pub struct TraceBuffer {
    events: VecDeque<TraceEvent>,
    enabled: bool,
    /// Maximum retained events (0 = unlimited).
    max_entries: usize,
    /// Number of events recorded since the last clear, including dropped ones.
    event_count: u64,
}

impl TraceBuffer {
    /// Creates a buffer according to `config`.
    #[must_use]
    pub fn new(config: &TracingConfig) -> Self {
        TraceBuffer {
            events: VecDeque::with_capacity(config.max_entries.min(10_000)),
            enabled: config.enabled,
            max_entries: config.max_entries,
            event_count: 0,
        }
    }

    /// Returns `true` if events are being recorded.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Records an event, dropping the oldest one when full.
    pub fn record(&mut self, event: TraceEvent) {
        if !self.enabled {
            return;
        }
        self.event_count += 1;
        if self.max_entries > 0 && self.events.len() >= self.max_entries {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Returns the number of events recorded, including dropped ones.
    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Returns the number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no events are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterates over the retained events, oldest first.
    pub fn iter(&self) -> vec_deque::Iter<'_, TraceEvent> {
        self.events.iter()
    }

    /// Takes the retained events, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<TraceEvent> {
        mem::take(&mut self.events).into()
    }

    /// Drops all events and resets the counter.
    pub fn clear(&mut self) {
        self.events.clear();
        self.event_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn halt(pc: usize) -> TraceEvent {
        TraceEvent::Halt { pc }
    }

    #[test]
    fn test_instruction_display() {
        let event = TraceEvent::Instruction {
            pc: 0,
            opcode: Opcode::Mul,
            params: vec![
                TracedParam {
                    mode: Mode::Position,
                    raw: 4,
                    address: Some(4),
                    value: Some(33),
                    write: false,
                },
                TracedParam {
                    mode: Mode::Immediate,
                    raw: 3,
                    address: None,
                    value: Some(3),
                    write: false,
                },
                TracedParam {
                    mode: Mode::Position,
                    raw: 4,
                    address: Some(4),
                    value: None,
                    write: true,
                },
            ],
        };

        assert_eq!(event.to_string(), "[   0] MUL [4]=33, 3, ->[4]");
    }

    #[test]
    fn test_relative_param_display() {
        let param = TracedParam {
            mode: Mode::Relative,
            raw: -1,
            address: Some(9),
            value: Some(109),
            write: false,
        };
        assert_eq!(param.to_string(), "[rb-1=9]=109");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_event_json() {
        let json = serde_json::to_string(&TraceEvent::Output { pc: 12, value: -5 }).unwrap();
        assert_eq!(json, r#"{"type":"output","pc":12,"value":-5}"#);

        let json = serde_json::to_value(TraceEvent::Branch {
            pc: 3,
            target: None,
        })
        .unwrap();
        assert_eq!(json["type"], "branch");
        assert!(json["target"].is_null());

        let json = serde_json::to_value(TraceEvent::Fault {
            pc: 0,
            fault: Fault::Decode { opcode: 42, pc: 0 },
        })
        .unwrap();
        assert_eq!(json["fault"]["type"], "decode");
        assert_eq!(json["fault"]["opcode"], 42);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_instruction_json() {
        let event = TraceEvent::Instruction {
            pc: 4,
            opcode: Opcode::AdjustRelativeBase,
            params: vec![TracedParam {
                mode: Mode::Relative,
                raw: -1,
                address: Some(9),
                value: Some(109),
                write: false,
            }],
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "instruction");
        assert_eq!(json["opcode"], "adjust_relative_base");
        assert_eq!(json["params"][0]["mode"], "relative");
        assert_eq!(json["params"][0]["value"], 109);
        assert_eq!(json["params"][0]["write"], false);
    }

    #[test]
    fn test_buffer_disabled_records_nothing() {
        let mut buffer = TraceBuffer::new(&TracingConfig::disabled());
        buffer.record(halt(0));

        assert!(buffer.is_empty());
        assert_eq!(buffer.event_count(), 0);
    }

    #[test]
    fn test_buffer_drops_oldest() {
        let mut buffer = TraceBuffer::new(&TracingConfig::memory(2));
        buffer.record(halt(1));
        buffer.record(halt(2));
        buffer.record(halt(3));

        assert_eq!(buffer.event_count(), 3);
        assert_eq!(
            buffer.iter().map(TraceEvent::pc).collect::<Vec<_>>(),
            vec![2, 3]
        );

        let taken = buffer.take();
        assert_eq!(taken.len(), 2);
        assert!(buffer.is_empty());
    }
}
