pub mod command;
pub mod demos;
pub mod engine;
pub mod errors;
pub mod ops;
pub mod record;
pub mod session;
pub mod value;

pub use engine::Engine;
pub use record::{Descriptor, Record};
pub use session::Session;
pub use value::{RecordRef, Value};

use errors::SlottedError;

/// Convenience function to run a script of command lines end-to-end.
/// Blank lines and `#` comments are skipped.
pub fn run(source: &str) -> Result<Session, SlottedError> {
    let mut session = Session::new();
    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        session.eval(trimmed)?;
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_executes_a_script_and_skips_comments() {
        let session = run(
            "# serial numbers over a backing slot\n\
             new o\n\
             def o.$n 0\n\
             serial o.next $n\n\
             get o.next\n\
             \n\
             get o.next\n",
        )
        .unwrap();
        assert_eq!(session.output(), ["o.next -> 0", "o.next -> 1"]);
    }

    #[test]
    fn run_surfaces_command_errors() {
        assert!(matches!(
            run("frobnicate o"),
            Err(SlottedError::Command(_))
        ));
    }
}
