#![allow(clippy::result_large_err)]

use std::fs;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;

use slotted::errors::{CommandError, SlottedError};
use slotted::ops::WriteMode;
use slotted::{demos, Engine};

mod repl;

#[derive(Parser)]
#[command(name = "slotted", about = "Records, slot descriptors, and accessor properties")]
struct Cli {
    /// Path to a command script to execute
    file: Option<String>,
    /// Run a named demo (see --list)
    #[arg(long)]
    demo: Option<String>,
    /// List the available demos
    #[arg(long)]
    list: bool,
    /// Run every demo in order
    #[arg(long)]
    all: bool,
    /// Evaluate a single command line
    #[arg(long)]
    eval: Option<String>,
    /// Silently ignore refused writes instead of reporting them
    #[arg(long)]
    lenient: bool,
    /// Print version and exit
    #[arg(long)]
    version: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!(
            "{} {}",
            "slotted".bright_cyan().bold(),
            env!("CARGO_PKG_VERSION").bright_black()
        );
        return;
    }

    if cli.list {
        for demo in demos::all() {
            println!(
                "{:<22} {}",
                demo.name.bright_cyan(),
                demo.summary.bright_black()
            );
        }
        return;
    }

    if cli.all {
        for demo in demos::all() {
            println!("{} {}", "demo".bright_blue().bold(), demo.name.bright_cyan());
            run_demo_or_exit(demo);
        }
        return;
    }

    if let Some(name) = cli.demo {
        let Some(demo) = demos::find(&name) else {
            eprintln!(
                "{} unknown demo '{}' (try --list)",
                "error:".red().bold(),
                name.yellow()
            );
            process::exit(1);
        };
        run_demo_or_exit(demo);
        return;
    }

    let mode = if cli.lenient {
        WriteMode::Lenient
    } else {
        WriteMode::Strict
    };
    let engine = Engine::new().with_write_mode(mode);

    if let Some(line) = cli.eval {
        let mut session = engine.new_session();
        if let Err(err) = session.eval(&line) {
            eprintln!("{} {err:?}", "error:".red().bold());
            process::exit(1);
        }
        return;
    }

    if let Some(file) = cli.file {
        let source = match fs::read_to_string(&file) {
            Ok(s) => s,
            Err(e) => {
                eprintln!(
                    "{} could not read '{}': {e}",
                    "error:".red().bold(),
                    file.yellow()
                );
                process::exit(1);
            }
        };
        run_script(&engine, &file, &source);
        return;
    }

    if let Err(err) = repl::run(mode) {
        eprintln!("{} {err:?}", "error:".red().bold());
        process::exit(1);
    }
}

fn run_demo_or_exit(demo: &demos::Demo) {
    if let Err(err) = demos::run(demo) {
        eprintln!("{} {err:?}", "error:".red().bold());
        process::exit(1);
    }
}

fn run_script(engine: &Engine, path: &str, source: &str) {
    let mut session = engine.new_session();
    for (index, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match session.eval(trimmed) {
            Ok(()) => {}
            Err(SlottedError::Command(err)) => {
                eprintln!("{}", format_command_error(path, index + 1, &err));
                process::exit(1);
            }
            Err(err) => {
                eprintln!("{} {err:?}", "runtime error:".red().bold());
                process::exit(1);
            }
        }
    }
}

fn format_command_error(path: &str, line: usize, err: &CommandError) -> String {
    format!(
        "{} at {}:{}:{}: {}",
        "command".red().bold(),
        path.cyan(),
        line,
        err.span.offset() + 1,
        err.message.bright_white()
    )
}
