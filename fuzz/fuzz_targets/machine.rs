#![no_main]

use libfuzzer_sys::fuzz_target;
use intcode::{Machine, MachineConfig, Program};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(program) = Program::parse(text) else {
        return;
    };

    let mut machine = Machine::with_config(MachineConfig::sandboxed());
    machine.load(&program);
    machine.extend_input(program.iter().copied().take(16));

    let mut copy = machine.clone();
    let state = machine.run();
    assert!(state.is_terminal());

    // Execution is deterministic: a clone taken before running ends identically.
    assert_eq!(copy.run(), state);
    assert_eq!(copy.memory(), machine.memory());
    assert_eq!(copy.drain_outputs(), machine.drain_outputs());
});
