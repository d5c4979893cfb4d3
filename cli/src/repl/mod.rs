mod completer;
mod helper;
mod highlighter;
mod hinter;

use owo_colors::OwoColorize;
use rustyline::error::ReadlineError;
use rustyline::{Config, EditMode, Editor};
use slotted::errors::{SlotError, SlottedError};
use slotted::ops::WriteMode;
use slotted::Session;
use std::fs;

use self::helper::ReplHelper;

pub fn run(mode: WriteMode) -> Result<(), SlottedError> {
    let config = Config::builder()
        .history_ignore_dups(true)
        .map_err(to_slot_error)?
        .completion_type(rustyline::CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut rl: Editor<ReplHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config).map_err(to_slot_error)?;
    rl.set_helper(Some(ReplHelper));

    let mut session = Session::with_mode(mode);

    println!(
        "{} {}",
        "slotted".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    println!("{}", "Type 'help' for the command reference".bright_black());

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                if handle_command(trimmed, &mut session) {
                    continue;
                }

                let _ = rl.add_history_entry(trimmed);
                run_line(&mut session, trimmed);
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "bye".bright_black());
                break;
            }
            Err(err) => {
                eprintln!("{} {err}", "repl error:".red().bold());
                break;
            }
        }
    }

    Ok(())
}

fn handle_command(trimmed: &str, session: &mut Session) -> bool {
    if trimmed == ".exit" || trimmed == "exit" {
        std::process::exit(0);
    }
    if trimmed == ".help" || trimmed == "help" {
        print_reference();
        return true;
    }
    if trimmed == ".clear" {
        *session = Session::with_mode(session.mode());
        println!("{}", "session cleared".green());
        return true;
    }
    if let Some(path) = trimmed.strip_prefix(".load ") {
        let path = path.trim();
        match fs::read_to_string(path) {
            Ok(source) => {
                for line in source.lines() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    run_line(session, line);
                }
            }
            Err(err) => eprintln!("{} {err}", "load error:".red().bold()),
        }
        return true;
    }
    false
}

fn run_line(session: &mut Session, line: &str) {
    if let Err(err) = session.eval(line) {
        eprintln!("{} {err:?}", "error:".red().bold());
    }
}

fn print_reference() {
    let lines = [
        "new <rec> [<parent>]         create a record, optionally delegating",
        "def <rec>.<slot> <value> [+w|-w] [+e|-e] [+c|-c]",
        "                             define a data slot",
        "accessor <rec>.<slot> <backing>",
        "                             define an accessor pair over a backing slot",
        "serial <rec>.<slot> <backing>",
        "                             strictly-increasing serial number accessor",
        "get <rec>.<slot>             read and print",
        "set <rec>.<slot> <value>     write",
        "del <rec>.<slot>             delete",
        "desc <rec>.<slot>            print the slot descriptor",
        "keys <rec> [--all]           list own slot names",
        "copy <src> <dst> [--all]     copy descriptors onto another record",
        "show <rec>                   print the record as JSON",
        "mode [strict|lenient]        query or switch write mode",
        ".load <file>                 run a command script",
        ".clear                       reset the session",
        ".exit                        exit",
    ];
    for line in lines {
        println!("{}", line.bright_blue());
    }
}

fn to_slot_error(err: ReadlineError) -> SlottedError {
    SlottedError::Slot(SlotError::TypeMismatch {
        message: format!("failed to initialize REPL: {err}"),
    })
}
