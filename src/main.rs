use std::{fs, io, process};

use clap::Parser;
use rpal::{get_ast, get_result, get_result_with_trace, get_st};

/// rpal is an interpreter for RPAL, a small applicative functional language,
/// built on a CSE machine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the abstract syntax tree and exit.
    #[arg(long, conflicts_with = "st")]
    ast: bool,

    /// Print the standardized tree and exit.
    #[arg(long)]
    st: bool,

    /// Additionally write per-step machine state to control_stack.txt and
    /// value_stack.txt in the working directory.
    #[arg(long)]
    trace: bool,

    /// The RPAL source file to run.
    file: String,
}

fn main() {
    let args = Args::parse();

    let source = fs::read_to_string(&args.file).unwrap_or_else(|_| {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  &args.file);
        process::exit(1);
    });

    let outcome = if args.ast {
        get_ast(&source).map(|ast| print!("{ast}"))
    } else if args.st {
        get_st(&source).map(|st| print!("{st}"))
    } else if args.trace {
        run_with_trace(&source)
    } else {
        get_result(&source, &mut io::stdout())
    };

    if let Err(e) = outcome {
        eprintln!("{e}");
        process::exit(1);
    }
}

/// Runs the program with machine tracing wired to the two dump files.
fn run_with_trace(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout();
    let mut control_sink = fs::File::create("control_stack.txt")?;
    let mut stack_sink = fs::File::create("value_stack.txt")?;

    get_result_with_trace(source, &mut stdout, &mut control_sink, &mut stack_sink)
}
