use serde::Serialize;

use super::accessor::{Reader, Writer};
use super::slot::{Slot, SlotKind};
use crate::errors::SlotError;
use crate::value::{json, Value};

/// A descriptor request: the attributes a caller wants a slot to have.
/// Absent fields keep their current value on redefinition, or fall back to
/// defaults when the slot is first created.
#[derive(Debug, Clone, Default)]
pub struct Descriptor {
    pub value: Option<Value>,
    pub writable: Option<bool>,
    pub reader: Option<Reader>,
    pub writer: Option<Writer>,
    pub enumerable: Option<bool>,
    pub configurable: Option<bool>,
}

impl Descriptor {
    pub fn data(value: Value) -> Self {
        Self {
            value: Some(value),
            ..Default::default()
        }
    }

    pub fn accessor(reader: Reader) -> Self {
        Self {
            reader: Some(reader),
            ..Default::default()
        }
    }

    pub fn accessor_pair(reader: Reader, writer: Writer) -> Self {
        Self {
            reader: Some(reader),
            writer: Some(writer),
            ..Default::default()
        }
    }

    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = Some(writable);
        self
    }

    pub fn enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = Some(enumerable);
        self
    }

    pub fn configurable(mut self, configurable: bool) -> Self {
        self.configurable = Some(configurable);
        self
    }

    /// Full descriptor of an existing slot. Accessor callables are shared,
    /// not copied.
    pub fn of(slot: &Slot) -> Self {
        match &slot.kind {
            SlotKind::Data { value, writable } => Self {
                value: Some(value.clone()),
                writable: Some(*writable),
                enumerable: Some(slot.enumerable),
                configurable: Some(slot.configurable),
                ..Default::default()
            },
            SlotKind::Accessor { reader, writer } => Self {
                reader: Some(reader.clone()),
                writer: writer.clone(),
                enumerable: Some(slot.enumerable),
                configurable: Some(slot.configurable),
                ..Default::default()
            },
        }
    }

    pub fn is_accessor(&self) -> bool {
        self.reader.is_some() || self.writer.is_some()
    }

    /// Rejects descriptors that mix stored-value and accessor attributes.
    pub fn validate(&self, name: &str) -> Result<(), SlotError> {
        if (self.value.is_some() || self.writable.is_some()) && self.is_accessor() {
            return Err(SlotError::MalformedDescriptor {
                name: name.to_string(),
                reason: "both a stored value and accessor functions".into(),
            });
        }
        Ok(())
    }

    /// Resolves this request against the current slot state into the slot
    /// that should be installed. Fails with `NotConfigurable` when the slot
    /// is locked and the request changes anything but a writable value.
    pub fn resolve(self, name: &str, existing: Option<&Slot>) -> Result<Slot, SlotError> {
        self.validate(name)?;
        match existing {
            None => self.resolve_fresh(name),
            Some(old) if old.configurable => self.resolve_merge(name, old),
            Some(old) => self.resolve_locked(name, old),
        }
    }

    fn resolve_fresh(self, name: &str) -> Result<Slot, SlotError> {
        let enumerable = self.enumerable.unwrap_or(true);
        let configurable = self.configurable.unwrap_or(true);
        let kind = if self.is_accessor() {
            SlotKind::Accessor {
                reader: self.reader.ok_or_else(|| missing_reader(name))?,
                writer: self.writer,
            }
        } else {
            SlotKind::Data {
                value: self.value.unwrap_or(Value::Undefined),
                writable: self.writable.unwrap_or(true),
            }
        };
        Ok(Slot {
            kind,
            enumerable,
            configurable,
        })
    }

    fn resolve_merge(self, name: &str, old: &Slot) -> Result<Slot, SlotError> {
        let enumerable = self.enumerable.unwrap_or(old.enumerable);
        let configurable = self.configurable.unwrap_or(old.configurable);

        let kind = if self.is_accessor() {
            let (kept_reader, kept_writer) = match &old.kind {
                SlotKind::Accessor { reader, writer } => (Some(reader.clone()), writer.clone()),
                SlotKind::Data { .. } => (None, None),
            };
            SlotKind::Accessor {
                reader: self
                    .reader
                    .or(kept_reader)
                    .ok_or_else(|| missing_reader(name))?,
                writer: self.writer.or(kept_writer),
            }
        } else if self.value.is_some() || self.writable.is_some() {
            match &old.kind {
                SlotKind::Data { value, writable } => SlotKind::Data {
                    value: self.value.unwrap_or_else(|| value.clone()),
                    writable: self.writable.unwrap_or(*writable),
                },
                SlotKind::Accessor { .. } => SlotKind::Data {
                    value: self.value.unwrap_or(Value::Undefined),
                    writable: self.writable.unwrap_or(true),
                },
            }
        } else {
            old.kind.clone()
        };

        Ok(Slot {
            kind,
            enumerable,
            configurable,
        })
    }

    fn resolve_locked(self, name: &str, old: &Slot) -> Result<Slot, SlotError> {
        let locked = || SlotError::NotConfigurable {
            name: name.to_string(),
        };

        if let Some(enumerable) = self.enumerable
            && enumerable != old.enumerable
        {
            return Err(locked());
        }
        if let Some(configurable) = self.configurable
            && configurable
        {
            return Err(locked());
        }

        match &old.kind {
            SlotKind::Data { value, writable } => {
                if self.is_accessor() {
                    return Err(locked());
                }
                if let Some(requested) = self.writable
                    && requested != *writable
                {
                    return Err(locked());
                }
                if let Some(new_value) = self.value {
                    if !*writable && new_value != *value {
                        return Err(locked());
                    }
                    return Ok(Slot {
                        kind: SlotKind::Data {
                            value: new_value,
                            writable: *writable,
                        },
                        enumerable: old.enumerable,
                        configurable: false,
                    });
                }
                Ok(old.clone())
            }
            SlotKind::Accessor { reader, writer } => {
                if self.value.is_some() || self.writable.is_some() {
                    return Err(locked());
                }
                if let Some(requested) = &self.reader
                    && !requested.ptr_eq(reader)
                {
                    return Err(locked());
                }
                match (&self.writer, writer) {
                    (Some(requested), Some(current)) if !requested.ptr_eq(current) => {
                        return Err(locked());
                    }
                    (Some(_), None) => return Err(locked()),
                    _ => {}
                }
                Ok(old.clone())
            }
        }
    }
}

fn missing_reader(name: &str) -> SlotError {
    SlotError::MalformedDescriptor {
        name: name.to_string(),
        reason: "accessor slot requires a reader".into(),
    }
}

/// Serializable view of a slot's descriptor, for console rendering.
#[derive(Debug, Serialize)]
pub struct DescriptorSnapshot {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reader: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writer: Option<bool>,
    pub enumerable: bool,
    pub configurable: bool,
}

impl DescriptorSnapshot {
    pub fn of(slot: &Slot) -> Result<Self, SlotError> {
        Ok(match &slot.kind {
            SlotKind::Data { value, writable } => Self {
                kind: "data",
                value: Some(json::to_json(value)?),
                writable: Some(*writable),
                reader: None,
                writer: None,
                enumerable: slot.enumerable,
                configurable: slot.configurable,
            },
            SlotKind::Accessor { writer, .. } => Self {
                kind: "accessor",
                value: None,
                writable: None,
                reader: Some(true),
                writer: Some(writer.is_some()),
                enumerable: slot.enumerable,
                configurable: slot.configurable,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_reader() -> Reader {
        Reader::from_closure(|_| Ok(Value::Undefined))
    }

    fn noop_writer() -> Writer {
        Writer::from_closure(|_, _| Ok(()))
    }

    #[test]
    fn mixed_descriptor_is_malformed() {
        let descriptor = Descriptor {
            value: Some(Value::Number(1.0)),
            reader: Some(noop_reader()),
            ..Default::default()
        };
        assert!(matches!(
            descriptor.resolve("x", None),
            Err(SlotError::MalformedDescriptor { .. })
        ));
    }

    #[test]
    fn writer_without_reader_is_malformed() {
        let descriptor = Descriptor {
            writer: Some(noop_writer()),
            ..Default::default()
        };
        assert!(matches!(
            descriptor.resolve("x", None),
            Err(SlotError::MalformedDescriptor { .. })
        ));
    }

    #[test]
    fn fresh_data_slot_defaults_to_open_attributes() {
        let slot = Descriptor::data(Value::Number(1.0)).resolve("x", None).unwrap();
        assert!(slot.enumerable);
        assert!(slot.configurable);
        assert!(matches!(
            slot.kind,
            SlotKind::Data { writable: true, .. }
        ));
    }

    #[test]
    fn locked_slot_rejects_flag_changes() {
        let slot = Descriptor::data(Value::Number(1.0))
            .configurable(false)
            .enumerable(false)
            .resolve("x", None)
            .unwrap();

        let err = Descriptor::default()
            .enumerable(true)
            .resolve("x", Some(&slot));
        assert!(matches!(err, Err(SlotError::NotConfigurable { .. })));

        let err = Descriptor::default()
            .configurable(true)
            .resolve("x", Some(&slot));
        assert!(matches!(err, Err(SlotError::NotConfigurable { .. })));
    }

    #[test]
    fn locked_writable_slot_still_accepts_value() {
        let slot = Descriptor::data(Value::Number(1.0))
            .configurable(false)
            .resolve("x", None)
            .unwrap();

        let updated = Descriptor::data(Value::Number(2.0))
            .resolve("x", Some(&slot))
            .unwrap();
        assert!(matches!(
            updated.kind,
            SlotKind::Data { value: Value::Number(n), .. } if n == 2.0
        ));
        assert!(!updated.configurable);
    }

    #[test]
    fn locked_frozen_slot_rejects_value_change() {
        let slot = Descriptor::data(Value::Number(1.0))
            .writable(false)
            .configurable(false)
            .resolve("x", None)
            .unwrap();

        let err = Descriptor::data(Value::Number(2.0)).resolve("x", Some(&slot));
        assert!(matches!(err, Err(SlotError::NotConfigurable { .. })));

        // Redefining the identical value is not a change.
        let same = Descriptor::data(Value::Number(1.0)).resolve("x", Some(&slot));
        assert!(same.is_ok());
    }

    #[test]
    fn locked_accessor_rejects_different_callables() {
        let reader = noop_reader();
        let slot = Descriptor::accessor(reader.clone())
            .configurable(false)
            .resolve("x", None)
            .unwrap();

        let err = Descriptor::accessor(noop_reader()).resolve("x", Some(&slot));
        assert!(matches!(err, Err(SlotError::NotConfigurable { .. })));

        let same = Descriptor::accessor(reader).resolve("x", Some(&slot));
        assert!(same.is_ok());
    }

    #[test]
    fn configurable_slot_switches_kind() {
        let slot = Descriptor::data(Value::Number(1.0)).resolve("x", None).unwrap();
        let switched = Descriptor::accessor(noop_reader())
            .resolve("x", Some(&slot))
            .unwrap();
        assert!(switched.is_accessor());

        let back = Descriptor::data(Value::Number(2.0))
            .resolve("x", Some(&switched))
            .unwrap();
        assert!(!back.is_accessor());
    }

    #[test]
    fn merge_keeps_unmentioned_attributes() {
        let slot = Descriptor::data(Value::Number(1.0))
            .enumerable(false)
            .resolve("x", None)
            .unwrap();
        let merged = Descriptor::data(Value::Number(5.0))
            .resolve("x", Some(&slot))
            .unwrap();
        assert!(!merged.enumerable);
        assert!(merged.configurable);
    }
}
