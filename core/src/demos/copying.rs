//! Descriptor-preserving copying: the naive "copy each value" approach
//! collapses accessor slots into snapshots; copying descriptors keeps them
//! live and bound to the new owner.

use crate::errors::SlottedError;
use crate::ops::{self, WriteMode};
use crate::record::{accessor, Descriptor, DescriptorSnapshot};
use crate::session::Session;
use crate::value::Value;

pub fn descriptor_copy(session: &mut Session) -> Result<(), SlottedError> {
    let src = session.new_record("src", None)?;
    ops::define(
        &src,
        "x",
        Descriptor::data(Value::Number(5.0)).enumerable(false),
    )?;
    let (reader, writer) = accessor::backed_by("x");
    ops::define(&src, "data", Descriptor::accessor_pair(reader, writer))?;
    ops::write(
        &src,
        "note",
        Value::String("from src".into()),
        WriteMode::Strict,
    )?;

    // The target already has `note` and its own hidden `x`.
    let dst = session.new_record("dst", None)?;
    ops::write(
        &dst,
        "note",
        Value::String("original".into()),
        WriteMode::Strict,
    )?;
    ops::define(
        &dst,
        "x",
        Descriptor::data(Value::Number(10.0)).enumerable(false),
    )?;

    let copied = ops::copy_own(&src, &dst, false);
    session.log(format!("copy src dst -> {copied} slot(s)"));
    session.log(format!("dst.note -> {}", ops::read(&dst, "note")?));

    // The copied slot is still an accessor, reading the target's state.
    let slot = dst.borrow().slots.get("data").cloned();
    if let Some(slot) = slot {
        let snapshot = serde_json::to_string(&DescriptorSnapshot::of(&slot)?)
            .unwrap_or_else(|_| "<unrenderable>".into());
        session.log(format!("dst.data :: {snapshot}"));
    }
    session.log(format!("dst.data -> {}", ops::read(&dst, "data")?));

    ops::write(&dst, "data", Value::Number(11.0), WriteMode::Strict)?;
    session.log(format!("dst.x -> {}", ops::read(&dst, "x")?));
    session.log(format!("src.x -> {}", ops::read(&src, "x")?));

    // A bare target only works once the hidden backing slot comes along.
    let bare = session.new_record("bare", None)?;
    let copied = ops::copy_own(&src, &bare, false);
    session.log(format!("copy src bare -> {copied} slot(s)"));
    match ops::read(&bare, "data") {
        Ok(value) => session.log(format!("bare.data -> {value}")),
        Err(err) => session.log(format!("bare.data -> error: {err}")),
    }

    let copied = ops::copy_own(&src, &bare, true);
    session.log(format!("copy src bare --all -> {copied} slot(s)"));
    session.log(format!("bare.data -> {}", ops::read(&bare, "data")?));

    Ok(())
}
