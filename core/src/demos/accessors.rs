//! Accessor slots: computed fields defined as a reader/writer pair over a
//! plain data slot, and how they behave across delegation.

use crate::errors::SlottedError;
use crate::ops::{self, WriteMode};
use crate::record::{accessor, Descriptor, Record};
use crate::session::Session;
use crate::value::Value;

/// A record with an ordinary data slot `x` and an accessor slot `data`
/// whose reader and writer delegate to `x` on the receiver.
pub fn basics(session: &mut Session) -> Result<(), SlottedError> {
    let o = session.new_record("o", None)?;
    ops::write(&o, "x", Value::Number(0.0), WriteMode::Strict)?;
    let (reader, writer) = accessor::backed_by("x");
    ops::define(&o, "data", Descriptor::accessor_pair(reader, writer))?;

    session.log(format!("o.data -> {}", ops::read(&o, "data")?));

    ops::write(&o, "data", Value::Number(42.0), WriteMode::Strict)?;
    session.log(format!("o.x -> {}", ops::read(&o, "x")?));
    session.log(format!("o.data -> {}", ops::read(&o, "data")?));

    Ok(())
}

/// Accessor slots are inherited like data slots: a child delegating to a
/// parent reads through the parent's accessor, and writing through it
/// shadows the backing slot on the child.
pub fn inherited(session: &mut Session) -> Result<(), SlottedError> {
    let p = session.new_record("p", None)?;
    ops::write(&p, "data_y", Value::Number(0.0), WriteMode::Strict)?;
    let (reader, writer) = accessor::backed_by("data_y");
    ops::define(&p, "y", Descriptor::accessor_pair(reader, writer))?;

    let child = Record::with_parent(p.clone()).into_ref();
    session.bind("child", child.clone());

    session.log(format!("child.y -> {}", ops::read(&child, "y")?));

    ops::write(&child, "y", Value::Number(7.0), WriteMode::Strict)?;
    session.log(format!("child.y -> {}", ops::read(&child, "y")?));
    session.log(format!("p.y -> {}", ops::read(&p, "y")?));
    session.log(format!("child.data_y -> {}", ops::read(&child, "data_y")?));
    session.log(format!("p.data_y -> {}", ops::read(&p, "data_y")?));

    Ok(())
}

/// Strictly increasing serial numbers: reading `next` returns the current
/// number and increments it, writing accepts only larger values.
pub fn serial_numbers(session: &mut Session) -> Result<(), SlottedError> {
    let serialnum = session.new_record("serialnum", None)?;
    ops::write(&serialnum, "$n", Value::Number(0.0), WriteMode::Strict)?;
    let (reader, writer) = accessor::serial("$n");
    ops::define(
        &serialnum,
        "next",
        Descriptor::accessor_pair(reader, writer),
    )?;

    session.log(format!("serialnum.next -> {}", ops::read(&serialnum, "next")?));
    session.log(format!("serialnum.next -> {}", ops::read(&serialnum, "next")?));

    ops::write(&serialnum, "next", Value::Number(10.0), WriteMode::Strict)?;
    session.log(format!("serialnum.$n -> {}", ops::read(&serialnum, "$n")?));

    match ops::write(&serialnum, "next", Value::Number(5.0), WriteMode::Strict) {
        Ok(()) => session.log("serialnum.next = 5 -> accepted"),
        Err(err) => session.log(format!("serialnum.next = 5 -> error: {err}")),
    }
    session.log(format!("serialnum.$n -> {}", ops::read(&serialnum, "$n")?));

    Ok(())
}
