use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// intcode - run, trace and inspect Intcode programs
#[derive(Debug, Parser)]
#[command(name = "intcode", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Program loading and input options shared by the execution commands.
#[derive(Debug, Args)]
pub struct ProgramArgs {
    /// Path to the program file (comma-separated integers).
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Values to queue as input, in order (e.g. `-i 5` or `-i 1,-2,3`).
    #[arg(
        short,
        long,
        value_name = "N,..",
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub input: Vec<i64>,

    /// Stop with a fault after this many instructions (0 = unlimited).
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub max_instructions: u64,

    /// Override cell 1 before running.
    #[arg(long, allow_negative_numbers = true)]
    pub noun: Option<i64>,

    /// Override cell 2 before running.
    #[arg(long, allow_negative_numbers = true)]
    pub verb: Option<i64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a program to completion and print its outputs and final state.
    Run {
        #[command(flatten)]
        program: ProgramArgs,
    },

    /// Run a program with tracing enabled and print every executed instruction.
    Trace {
        #[command(flatten)]
        program: ProgramArgs,

        /// Keep only the last N trace events (0 = keep all).
        #[arg(long, value_name = "N", default_value_t = 0)]
        limit: usize,
    },

    /// Run a program and print selected memory cells afterwards.
    Peek {
        #[command(flatten)]
        program: ProgramArgs,

        /// Addresses to print.
        #[arg(value_name = "ADDR", required = true)]
        addresses: Vec<usize>,
    },
}
