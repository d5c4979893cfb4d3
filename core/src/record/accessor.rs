use std::rc::Rc;

use crate::errors::SlotError;
use crate::ops::{self, WriteMode};
use crate::value::{RecordRef, Value};

/// A slot reader. Invoked with the record the read happened through, so a
/// copied or inherited accessor evaluates against the receiver's own state.
#[derive(Clone)]
pub struct Reader {
    callback: Rc<dyn Fn(&RecordRef) -> Result<Value, SlotError>>,
}

impl std::fmt::Debug for Reader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Reader(..)")
    }
}

impl Reader {
    pub fn from_closure<F>(callback: F) -> Self
    where
        F: Fn(&RecordRef) -> Result<Value, SlotError> + 'static,
    {
        Self {
            callback: Rc::new(callback),
        }
    }

    pub fn call(&self, receiver: &RecordRef) -> Result<Value, SlotError> {
        (self.callback)(receiver)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

/// A slot writer, invoked with the receiver and the incoming value.
#[derive(Clone)]
pub struct Writer {
    callback: Rc<dyn Fn(&RecordRef, Value) -> Result<(), SlotError>>,
}

impl std::fmt::Debug for Writer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Writer(..)")
    }
}

impl Writer {
    pub fn from_closure<F>(callback: F) -> Self
    where
        F: Fn(&RecordRef, Value) -> Result<(), SlotError> + 'static,
    {
        Self {
            callback: Rc::new(callback),
        }
    }

    pub fn call(&self, receiver: &RecordRef, value: Value) -> Result<(), SlotError> {
        (self.callback)(receiver, value)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

/// Accessor pair delegating to a backing slot on the receiver, like
/// `get data() { return this.x }` / `set data(v) { this.x = v }`.
pub fn backed_by(backing: &str) -> (Reader, Writer) {
    let name = backing.to_string();
    let reader = {
        let name = name.clone();
        Reader::from_closure(move |receiver| ops::read(receiver, &name))
    };
    let writer = Writer::from_closure(move |receiver, value| {
        ops::write(receiver, &name, value, WriteMode::Strict)
    });
    (reader, writer)
}

/// Strictly-increasing serial numbers over a numeric backing slot. Reading
/// returns the current number and increments it; writing accepts only values
/// at least as large as the current one.
pub fn serial(backing: &str) -> (Reader, Writer) {
    let name = backing.to_string();
    let reader = {
        let name = name.clone();
        Reader::from_closure(move |receiver| {
            let current = backing_number(receiver, &name)?;
            ops::write(
                receiver,
                &name,
                Value::Number(current + 1.0),
                WriteMode::Strict,
            )?;
            Ok(Value::Number(current))
        })
    };
    let writer = Writer::from_closure(move |receiver, value| {
        let requested = value.as_number().ok_or_else(|| SlotError::TypeMismatch {
            message: "serial number must be a number".into(),
        })?;
        let current = backing_number(receiver, &name)?;
        if requested >= current {
            ops::write(receiver, &name, Value::Number(requested), WriteMode::Strict)
        } else {
            Err(SlotError::Domain {
                message: "serial number can only be set to a larger value".into(),
            })
        }
    });
    (reader, writer)
}

fn backing_number(receiver: &RecordRef, name: &str) -> Result<f64, SlotError> {
    ops::read(receiver, name)?
        .as_number()
        .ok_or_else(|| SlotError::TypeMismatch {
            message: format!("backing slot '{name}' does not hold a number"),
        })
}
