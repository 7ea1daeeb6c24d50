use intcode::machine::TracingConfig;
use serde::Serialize;

use crate::{
    app::{GlobalOptions, ProgramArgs},
    commands::common::{finish, load_machine, Summary},
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
pub struct Cell {
    pub address: usize,
    pub value: i64,
}

#[derive(Debug, Serialize)]
pub struct PeekReport {
    pub cells: Vec<Cell>,
    #[serde(flatten)]
    pub summary: Summary,
}

pub fn run(args: &ProgramArgs, addresses: &[usize], opts: &GlobalOptions) -> anyhow::Result<()> {
    let mut machine = load_machine(args, TracingConfig::disabled())?;
    machine.run();

    let report = PeekReport {
        cells: addresses
            .iter()
            .map(|&address| Cell {
                address,
                value: machine.peek(address),
            })
            .collect(),
        summary: Summary::of(&machine),
    };

    print_output(&report, opts, |report| {
        let mut table = TabWriter::new(&[("ADDR", Align::Right), ("VALUE", Align::Right)]);
        for cell in &report.cells {
            table.row([cell.address.to_string(), cell.value.to_string()]);
        }
        table.print();
        println!();
        report.summary.print();
    })?;

    finish(&machine, args)
}
