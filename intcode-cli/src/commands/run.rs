use intcode::machine::TracingConfig;
use serde::Serialize;

use crate::{
    app::{GlobalOptions, ProgramArgs},
    commands::common::{finish, load_machine, Summary},
    output::print_output,
};

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub outputs: Vec<i64>,
    #[serde(flatten)]
    pub summary: Summary,
}

pub fn run(args: &ProgramArgs, opts: &GlobalOptions) -> anyhow::Result<()> {
    let mut machine = load_machine(args, TracingConfig::disabled())?;
    machine.run();

    let report = RunReport {
        outputs: machine.drain_outputs(),
        summary: Summary::of(&machine),
    };

    print_output(&report, opts, |report| {
        if report.outputs.is_empty() {
            println!("Outputs:       (none)");
        } else {
            let outputs: Vec<String> = report.outputs.iter().map(i64::to_string).collect();
            println!("Outputs:       {}", outputs.join(","));
        }
        report.summary.print();
    })?;

    finish(&machine, args)
}
