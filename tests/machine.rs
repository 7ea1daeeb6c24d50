//! End-to-end tests driving the machine through its public API.

use std::{collections::VecDeque, path::PathBuf};

use intcode::prelude::*;

/// Reads inputs forever and outputs the running sum after each one.
const ACCUMULATE: [i64; 11] = [3, 100, 1, 100, 101, 101, 4, 101, 1105, 1, 0];

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("samples")
        .join(name)
}

#[test]
fn quine_from_file() -> Result<()> {
    let program = Program::from_file(sample("quine.ic"))?;
    let mut machine = Machine::new();
    machine.load(&program);

    assert_eq!(machine.run(), ExecutionState::Halted);
    assert_eq!(machine.drain_outputs(), program.cells());
    Ok(())
}

#[test]
fn wrapped_program_file() -> Result<()> {
    let program = Program::from_file(sample("compare8.ic"))?;
    assert_eq!(program.len(), 47);

    for (input, expected) in [(-3, 999), (8, 1000), (1_000, 1001)] {
        let mut machine = Machine::with_program(&program);
        machine.push_input(input);
        machine.run();
        assert_eq!(machine.drain_outputs(), vec![expected]);
    }
    Ok(())
}

#[test]
fn missing_file_is_an_error() {
    let result = Program::from_file(sample("does-not-exist.ic"));
    assert!(matches!(result, Err(Error::FileError(_))));
}

#[test]
fn noun_verb_search() -> Result<()> {
    // mem[0] = mem[noun] + mem[verb]
    let program: Program = "1,0,0,0,99,7,11,13,17,19".parse()?;
    let base = Machine::with_program(&program);

    let mut found = None;
    'search: for noun in 0..10 {
        for verb in 0..10 {
            let mut machine = base.clone();
            machine.set_noun_verb(noun, verb)?;
            if machine.run() == ExecutionState::Halted && machine.peek(0) == 30 {
                found = Some((noun, verb));
                break 'search;
            }
        }
    }

    assert_eq!(found, Some((6, 9)));
    assert_eq!(base.state(), ExecutionState::Ready);
    assert_eq!(base.peek(1), 0);
    Ok(())
}

fn amplify(program: &[i64], phases: &[i64]) -> Option<i64> {
    let mut amps: Vec<Machine> = phases
        .iter()
        .map(|&phase| {
            let mut amp = Machine::with_program(program);
            amp.push_input(phase);
            amp
        })
        .collect();

    let mut signal = 0;
    let mut last = None;
    loop {
        for (index, amp) in amps.iter_mut().enumerate() {
            amp.push_input(signal);
            match amp.run_until_output() {
                Some(value) => signal = value,
                None => return last,
            }
            if index == phases.len() - 1 {
                last = Some(signal);
            }
        }
    }
}

#[test]
fn amplifier_chain() {
    let program = [
        3, 15, 3, 16, 1002, 16, 10, 16, 1, 16, 15, 15, 4, 15, 99, 0, 0,
    ];
    assert_eq!(amplify(&program, &[4, 3, 2, 1, 0]), Some(43210));
}

#[test]
fn amplifier_feedback_loop() {
    let program = [
        3, 26, 1001, 26, -4, 26, 3, 27, 1002, 27, 2, 27, 1, 27, 26, 27, 4, 27, 1001, 28, -1, 28,
        1005, 28, 6, 99, 0, 0, 5,
    ];
    assert_eq!(amplify(&program, &[9, 8, 7, 6, 5]), Some(139_629_729));
}

#[test]
fn breadth_first_exploration_with_clones() {
    const STEPS: [i64; 3] = [1, 2, 5];
    const GOAL: i64 = 12;

    let root = Machine::with_program(&ACCUMULATE);
    let mut frontier: VecDeque<(Machine, Vec<i64>)> = VecDeque::from([(root.clone(), Vec::new())]);
    let mut solution = None;
    let mut expanded = 0;

    while let Some((machine, path)) = frontier.pop_front() {
        expanded += 1;
        for &step in &STEPS {
            let mut child = machine.fork(&[step]);
            let Some(total) = child.run_until_output() else {
                continue;
            };
            let mut child_path = path.clone();
            child_path.push(step);

            if total == GOAL {
                solution = Some(child_path);
                break;
            }
            if total < GOAL {
                frontier.push_back((child, child_path));
            }
        }
        if solution.is_some() {
            break;
        }
    }

    let solution = solution.expect("goal is reachable");
    assert_eq!(solution.len(), 3);
    assert_eq!(solution.iter().sum::<i64>(), GOAL);
    assert!(expanded > 1);

    // Exploring never touches the root.
    assert_eq!(root.state(), ExecutionState::Ready);
    assert_eq!(root.stats().instructions_executed, 0);
    assert_eq!(root.memory().as_slice(), &ACCUMULATE);
}

#[test]
fn sibling_clones_diverge() {
    let mut parent = Machine::with_program(&ACCUMULATE);
    parent.push_input(10);
    parent.run_until_output();

    let mut left = parent.fork(&[1]);
    let mut right = parent.fork(&[-1]);

    assert_eq!(left.run_until_output(), Some(11));
    assert_eq!(right.run_until_output(), Some(9));
    assert_eq!(left.peek(101), 11);
    assert_eq!(right.peek(101), 9);
    assert_eq!(parent.peek(101), 10);
}

#[test]
fn sandboxed_infinite_loop_faults() {
    let mut machine = Machine::with_config(MachineConfig::sandboxed());
    machine.load(&[1105, 1, 0]);

    assert_eq!(machine.run(), ExecutionState::Faulted);
    let fault = machine.fault().cloned().expect("limit fault");
    assert_eq!(fault.kind(), FaultKind::LimitFault);
    assert!(matches!(fault, Fault::InstructionLimit { .. }));
}

#[test]
fn fault_lifts_into_error() {
    // Surplus mode digits are ignored, so 99_999 is still HALT
    let mut machine = Machine::with_program(&[99_999]);
    assert_eq!(machine.run(), ExecutionState::Halted);
    assert!(machine.check().is_ok());

    machine.load(&[42]);
    machine.run();

    let error = machine.check().unwrap_err();
    assert!(matches!(
        error,
        Error::Fault(Fault::Decode { opcode: 42, pc: 0 })
    ));
    assert_eq!(error.to_string(), "Machine fault - unknown opcode 42 at pc 0");
}

#[test]
fn trace_renders_human_readable() {
    let config = MachineConfig::default().with_tracing(TracingConfig::memory(0));
    let mut machine = Machine::with_config(config);
    machine.load(&[1002, 4, 3, 4, 33]);
    machine.run();

    let events = machine.take_trace();
    assert_eq!(events[0].to_string(), "[   0] MUL [4]=33, 3, ->[4]");
    assert_eq!(events.last().map(TraceEvent::name), Some("halt"));
}

#[cfg(feature = "serde")]
#[test]
fn trace_serializes_as_tagged_json() {
    let config = MachineConfig::default().with_tracing(TracingConfig::memory(0));
    let mut machine = Machine::with_config(config);
    machine.load(&[1002, 4, 3, 4, 33]);
    machine.run();

    let lines: Vec<serde_json::Value> = machine
        .take_trace()
        .iter()
        .map(|event| serde_json::to_value(event).unwrap())
        .collect();

    assert_eq!(lines[0]["type"], "instruction");
    assert_eq!(lines[0]["pc"], 0);
    assert_eq!(lines[0]["opcode"], "mul");
    assert_eq!(lines[0]["params"][0]["value"], 33);
    assert_eq!(lines[0]["params"][2]["write"], true);
    assert_eq!(lines[0]["params"][2]["address"], 4);
    assert_eq!(lines.last().map(|line| line["type"].clone()), Some("halt".into()));
}

#[test]
fn trace_buffer_keeps_most_recent_events() {
    let config = MachineConfig::default().with_tracing(TracingConfig::memory(4));
    let mut machine = Machine::with_config(config);
    machine.load(&[104, 1, 104, 2, 104, 3, 99]);
    machine.run();

    assert_eq!(machine.trace().len(), 4);
    assert_eq!(machine.trace().event_count(), 8);
    assert_eq!(
        machine.trace().iter().last(),
        Some(&TraceEvent::Halt { pc: 6 })
    );
}
