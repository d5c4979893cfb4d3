//! Controlled slot access: define, read, write, delete, enumerate, copy.
//!
//! Parent delegation is an explicit lookup loop over `Record::parent`, own
//! slots first. Accessor callables are always invoked with the record the
//! access started from, so inherited and copied accessors evaluate against
//! the receiver's own state.

use std::rc::Rc;

use crate::errors::SlotError;
use crate::record::{Descriptor, Slot, SlotKind};
use crate::value::{RecordRef, Value};

/// How refused writes and deletes are reported. Strict surfaces them as
/// errors; lenient swallows the refusal and leaves the slot untouched.
/// Accessor writers' own domain errors surface in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Strict,
    Lenient,
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMode::Strict => f.write_str("strict"),
            WriteMode::Lenient => f.write_str("lenient"),
        }
    }
}

/// Installs or replaces a slot descriptor on the record's own slots.
pub fn define(record: &RecordRef, name: &str, descriptor: Descriptor) -> Result<(), SlotError> {
    let existing = record.borrow().slots.get(name).cloned();
    let slot = descriptor.resolve(name, existing.as_ref())?;
    record.borrow_mut().slots.insert(name.to_string(), slot);
    Ok(())
}

/// Copy of the own slot's descriptor. Does not consult the parent.
pub fn descriptor_of(record: &RecordRef, name: &str) -> Option<Descriptor> {
    record.borrow().slots.get(name).map(Descriptor::of)
}

/// Reads a slot, falling back to the parent chain. Accessor readers are
/// invoked with the original receiver.
pub fn read(record: &RecordRef, name: &str) -> Result<Value, SlotError> {
    let mut current = Some(record.clone());
    while let Some(candidate) = current {
        let (slot, next) = {
            let borrowed = candidate.borrow();
            (borrowed.slots.get(name).cloned(), borrowed.parent.clone())
        };
        if let Some(slot) = slot {
            return match slot.kind {
                SlotKind::Data { value, .. } => Ok(value),
                SlotKind::Accessor { reader, .. } => reader.call(record),
            };
        }
        current = next;
    }
    Err(SlotError::NoSuchSlot {
        name: name.to_string(),
    })
}

/// Writes a slot through the nearest descriptor on the chain. An absent name
/// implicitly defines an own data slot; a writable inherited data slot is
/// shadowed on the receiver.
pub fn write(
    record: &RecordRef,
    name: &str,
    value: Value,
    mode: WriteMode,
) -> Result<(), SlotError> {
    let mut current = Some(record.clone());
    let mut own = true;
    while let Some(candidate) = current {
        let (slot, next) = {
            let borrowed = candidate.borrow();
            (borrowed.slots.get(name).cloned(), borrowed.parent.clone())
        };
        if let Some(slot) = slot {
            match slot.kind {
                SlotKind::Accessor {
                    writer: Some(writer),
                    ..
                } => return writer.call(record, value),
                SlotKind::Accessor { writer: None, .. } => {
                    return refuse(
                        SlotError::NoSetter {
                            name: name.to_string(),
                        },
                        mode,
                    );
                }
                SlotKind::Data {
                    writable: false, ..
                } => {
                    return refuse(
                        SlotError::NotWritable {
                            name: name.to_string(),
                        },
                        mode,
                    );
                }
                SlotKind::Data { writable: true, .. } => {
                    if own {
                        let mut borrowed = candidate.borrow_mut();
                        if let Some(slot) = borrowed.slots.get_mut(name)
                            && let SlotKind::Data { value: stored, .. } = &mut slot.kind
                        {
                            *stored = value;
                        }
                        return Ok(());
                    }
                    // Writable inherited data slot: shadow it below.
                    break;
                }
            }
        }
        own = false;
        current = next;
    }

    record
        .borrow_mut()
        .slots
        .insert(name.to_string(), Slot::data(value));
    Ok(())
}

/// Removes an own slot. Non-configurable slots refuse: an error in strict
/// mode, `Ok(false)` in lenient mode. Deleting an absent name succeeds.
pub fn delete(record: &RecordRef, name: &str, mode: WriteMode) -> Result<bool, SlotError> {
    let mut borrowed = record.borrow_mut();
    match borrowed.slots.get(name) {
        None => Ok(true),
        Some(slot) if slot.configurable => {
            borrowed.slots.shift_remove(name);
            Ok(true)
        }
        Some(_) => match mode {
            WriteMode::Strict => Err(SlotError::NotConfigurable {
                name: name.to_string(),
            }),
            WriteMode::Lenient => Ok(false),
        },
    }
}

/// Own slot names in insertion order, filtered to enumerable slots unless
/// `include_hidden`.
pub fn keys(record: &RecordRef, include_hidden: bool) -> Vec<String> {
    record
        .borrow()
        .slots
        .iter()
        .filter_map(|(name, slot)| {
            (include_hidden || slot.enumerable).then(|| name.clone())
        })
        .collect()
}

/// Copies own slots of `source` onto `target`, preserving descriptors.
/// Accessor slots keep their callables; names already present on `target`
/// are never overwritten. Returns the number of slots installed.
pub fn copy_own(source: &RecordRef, target: &RecordRef, include_hidden: bool) -> usize {
    if Rc::ptr_eq(source, target) {
        return 0;
    }

    let slots: Vec<(String, Slot)> = source
        .borrow()
        .slots
        .iter()
        .filter(|(_, slot)| include_hidden || slot.enumerable)
        .map(|(name, slot)| (name.clone(), slot.clone()))
        .collect();

    let mut target = target.borrow_mut();
    let mut copied = 0;
    for (name, slot) in slots {
        if target.slots.contains_key(&name) {
            continue;
        }
        target.slots.insert(name, slot);
        copied += 1;
    }
    copied
}

fn refuse(error: SlotError, mode: WriteMode) -> Result<(), SlotError> {
    match mode {
        WriteMode::Strict => Err(error),
        WriteMode::Lenient => Ok(()),
    }
}
