use anyhow::Context;
use intcode::{
    machine::{MachineLimits, TracingConfig},
    Machine, MachineConfig, Program,
};
use serde::Serialize;

use crate::app::ProgramArgs;

/// Final machine state shared by every execution command's report.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub state: String,
    pub pc: usize,
    pub relative_base: i64,
    pub instructions: u64,
    pub inputs_consumed: u64,
    pub memory_cells: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<FaultInfo>,
}

#[derive(Debug, Serialize)]
pub struct FaultInfo {
    pub kind: String,
    pub message: String,
}

impl Summary {
    pub fn of(machine: &Machine) -> Self {
        let stats = machine.stats();
        Self {
            state: machine.state().to_string(),
            pc: machine.pc(),
            relative_base: machine.relative_base(),
            instructions: stats.instructions_executed,
            inputs_consumed: stats.inputs_consumed,
            memory_cells: machine.memory().len(),
            fault: machine.fault().map(|fault| FaultInfo {
                kind: fault.kind().to_string(),
                message: fault.to_string(),
            }),
        }
    }

    pub fn print(&self) {
        println!("State:         {}", self.state);
        println!("PC:            {}", self.pc);
        println!("Relative base: {}", self.relative_base);
        println!("Instructions:  {}", self.instructions);
        println!("Inputs used:   {}", self.inputs_consumed);
        println!("Memory cells:  {}", self.memory_cells);
        if let Some(fault) = &self.fault {
            println!("Fault:         {} ({})", fault.message, fault.kind);
        }
    }
}

/// Parse the program file and build a machine with inputs, limits and patches applied.
pub fn load_machine(args: &ProgramArgs, tracing: TracingConfig) -> anyhow::Result<Machine> {
    let program = Program::from_file(&args.path)
        .with_context(|| format!("failed to load program: {}", args.path.display()))?;

    let config = MachineConfig::default()
        .with_limits(MachineLimits::new().with_max_instructions(args.max_instructions))
        .with_tracing(tracing);
    let mut machine = Machine::with_config(config);
    machine.load(&program);

    if let Some(noun) = args.noun {
        machine.patch(1, noun).context("failed to set noun")?;
    }
    if let Some(verb) = args.verb {
        machine.patch(2, verb).context("failed to set verb")?;
    }
    machine.extend_input(args.input.iter().copied());

    log::debug!(
        "loaded {} cells from {} with {} queued inputs",
        program.len(),
        args.path.display(),
        args.input.len()
    );
    Ok(machine)
}

/// Turn a faulted machine into a non-zero exit.
pub fn finish(machine: &Machine, args: &ProgramArgs) -> anyhow::Result<()> {
    machine
        .check()
        .with_context(|| format!("program faulted: {}", args.path.display()))
}
