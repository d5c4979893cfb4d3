//! Slot attributes: writable, enumerable, configurable, and what each one
//! permits or refuses.

use crate::errors::{SlotError, SlottedError};
use crate::ops::{self, WriteMode};
use crate::record::{accessor::Reader, Descriptor};
use crate::session::Session;
use crate::value::{json, RecordRef, Value};

/// A hidden, locked, but still writable slot, exercised through the command
/// language under lenient writes: refused deletes are silent, refused reads
/// are reported.
pub fn flags(session: &mut Session) -> Result<(), SlottedError> {
    session.set_mode(WriteMode::Lenient);

    session.eval("new o")?;
    session.eval("def o.x 1 +w -e -c")?;

    session.eval("set o.x 200")?;
    session.eval("set o.y 300")?;
    session.eval("get o.x")?;
    session.eval("get o.y")?;
    session.eval("keys o")?;

    session.eval("del o.y")?;
    session.eval("del o.x")?;
    session.eval("get o.x")?;
    report_refused(session, "get o.y");

    Ok(())
}

/// Defining several slots at once, including a computed `r` over `x` and
/// `y`, then enumerating and rendering the record.
pub fn define_many(session: &mut Session) -> Result<(), SlottedError> {
    let p = session.new_record("p", None)?;
    ops::define(&p, "x", Descriptor::data(Value::Number(1.0)))?;
    ops::define(&p, "y", Descriptor::data(Value::Number(1.0)))?;
    ops::define(
        &p,
        "r",
        Descriptor::accessor(Reader::from_closure(|receiver| {
            let x = coordinate(receiver, "x")?;
            let y = coordinate(receiver, "y")?;
            Ok(Value::Number((x * x + y * y).sqrt()))
        })),
    )?;

    session.log(format!("keys p -> {:?}", ops::keys(&p, false)));
    session.log(format!("p.r -> {}", ops::read(&p, "r")?));
    session.log(format!(
        "p -> {}",
        json::to_json_string(&Value::Record(p.clone()))?
    ));

    ops::write(&p, "x", Value::Number(3.0), WriteMode::Strict)?;
    ops::write(&p, "y", Value::Number(4.0), WriteMode::Strict)?;
    session.log(format!("p.r -> {}", ops::read(&p, "r")?));

    Ok(())
}

fn coordinate(receiver: &RecordRef, name: &str) -> Result<f64, SlotError> {
    ops::read(receiver, name)?
        .as_number()
        .ok_or_else(|| SlotError::TypeMismatch {
            message: format!("'{name}' does not hold a number"),
        })
}

fn report_refused(session: &mut Session, line: &str) {
    if let Err(err) = session.eval(line) {
        session.log(format!("{line} -> error: {err}"));
    }
}
