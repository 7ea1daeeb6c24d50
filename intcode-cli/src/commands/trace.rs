use intcode::machine::{TraceEvent, TracingConfig};

use crate::{
    app::{GlobalOptions, ProgramArgs},
    commands::common::{finish, load_machine, Summary},
    output::{Align, TabWriter},
};

pub fn run(args: &ProgramArgs, limit: usize, opts: &GlobalOptions) -> anyhow::Result<()> {
    let mut machine = load_machine(args, TracingConfig::memory(limit))?;
    machine.run();

    let recorded = machine.trace().event_count();
    let events = machine.take_trace();

    if opts.json {
        // One event per line
        for event in &events {
            println!("{}", serde_json::to_string(event)?);
        }
    } else {
        print_table(&events);
        if recorded > events.len() as u64 {
            println!();
            println!("({} earlier events dropped)", recorded - events.len() as u64);
        }
        println!();
        Summary::of(&machine).print();
    }

    finish(&machine, args)
}

fn print_table(events: &[TraceEvent]) {
    let mut table = TabWriter::new(&[
        ("PC", Align::Right),
        ("EVENT", Align::Left),
        ("DETAIL", Align::Left),
    ]);
    for event in events {
        table.row([event.pc().to_string(), event.name().to_string(), event.detail()]);
    }
    table.print();
}
