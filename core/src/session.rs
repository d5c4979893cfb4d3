use indexmap::IndexMap;

use crate::command::{self, Command, Flags, Literal};
use crate::errors::{SlotError, SlottedError};
use crate::ops::{self, WriteMode};
use crate::record::{accessor, Descriptor, DescriptorSnapshot, Record};
use crate::value::{json, RecordRef, Value};

/// A console session: named record bindings, a write mode, and the lines
/// printed so far.
#[derive(Debug)]
pub struct Session {
    bindings: IndexMap<String, RecordRef>,
    mode: WriteMode,
    output: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_mode(WriteMode::Strict)
    }

    pub fn with_mode(mode: WriteMode) -> Self {
        Self {
            bindings: IndexMap::new(),
            mode,
            output: Vec::new(),
        }
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: WriteMode) {
        self.mode = mode;
    }

    pub fn bind(&mut self, name: impl Into<String>, record: RecordRef) {
        self.bindings.insert(name.into(), record);
    }

    pub fn record(&self, name: &str) -> Result<RecordRef, SlotError> {
        self.bindings
            .get(name)
            .cloned()
            .ok_or_else(|| SlotError::UnknownBinding {
                name: name.to_string(),
            })
    }

    pub fn new_record(
        &mut self,
        name: impl Into<String>,
        parent: Option<&str>,
    ) -> Result<RecordRef, SlotError> {
        let record = match parent {
            Some(parent) => Record::with_parent(self.record(parent)?),
            None => Record::new(),
        }
        .into_ref();
        self.bindings.insert(name.into(), record.clone());
        Ok(record)
    }

    /// Parses and executes one command line.
    pub fn eval(&mut self, line: &str) -> Result<(), SlottedError> {
        let command = command::parse(line)?;
        self.execute(command)?;
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<(), SlotError> {
        match command {
            Command::New { name, parent } => {
                self.new_record(name, parent.as_deref())?;
            }
            Command::Define {
                record,
                slot,
                value,
                flags,
            } => {
                let record = self.record(&record)?;
                let value = self.resolve_literal(value)?;
                ops::define(&record, &slot, data_descriptor(value, flags))?;
            }
            Command::Accessor {
                record,
                slot,
                backing,
            } => {
                let record = self.record(&record)?;
                let (reader, writer) = accessor::backed_by(&backing);
                ops::define(&record, &slot, Descriptor::accessor_pair(reader, writer))?;
            }
            Command::Serial {
                record,
                slot,
                backing,
            } => {
                let record = self.record(&record)?;
                let (reader, writer) = accessor::serial(&backing);
                ops::define(&record, &slot, Descriptor::accessor_pair(reader, writer))?;
            }
            Command::Get { record, slot } => {
                let target = self.record(&record)?;
                let value = ops::read(&target, &slot)?;
                self.log(format!("{record}.{slot} -> {value}"));
            }
            Command::Set {
                record,
                slot,
                value,
            } => {
                let target = self.record(&record)?;
                let value = self.resolve_literal(value)?;
                ops::write(&target, &slot, value, self.mode)?;
            }
            Command::Delete { record, slot } => {
                let target = self.record(&record)?;
                let removed = ops::delete(&target, &slot, self.mode)?;
                self.log(format!("del {record}.{slot} -> {removed}"));
            }
            Command::Describe { record, slot } => {
                let target = self.record(&record)?;
                let current = target.borrow().slots.get(&slot).cloned();
                let Some(current) = current else {
                    return Err(SlotError::NoSuchSlot { name: slot });
                };
                let snapshot = DescriptorSnapshot::of(&current)?;
                let rendered = render_json(&snapshot)?;
                self.log(format!("{record}.{slot} :: {rendered}"));
            }
            Command::Keys { record, all } => {
                let target = self.record(&record)?;
                let keys = ops::keys(&target, all);
                let rendered = render_json(&keys)?;
                self.log(format!("keys {record} -> {rendered}"));
            }
            Command::Copy {
                source,
                target,
                all,
            } => {
                let from = self.record(&source)?;
                let to = self.record(&target)?;
                let copied = ops::copy_own(&from, &to, all);
                self.log(format!("copied {copied} slot(s) from {source} to {target}"));
            }
            Command::Show { record } => {
                let target = self.record(&record)?;
                let rendered = json::to_json_string(&Value::Record(target))?;
                self.log(format!("{record} -> {rendered}"));
            }
            Command::Mode { mode } => {
                if let Some(mode) = mode {
                    self.mode = mode;
                }
                self.log(format!("mode -> {}", self.mode));
            }
        }
        Ok(())
    }

    fn resolve_literal(&self, literal: Literal) -> Result<Value, SlotError> {
        Ok(match literal {
            Literal::Undefined => Value::Undefined,
            Literal::Null => Value::Null,
            Literal::Boolean(b) => Value::Boolean(b),
            Literal::Number(n) => Value::Number(n),
            Literal::Str(s) => Value::String(s),
            Literal::Ref(name) => Value::Record(self.record(&name)?),
        })
    }

    pub fn log(&mut self, line: impl Into<String>) {
        let line = line.into();
        println!("{line}");
        self.output.push(line);
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn data_descriptor(value: Value, flags: Flags) -> Descriptor {
    Descriptor {
        value: Some(value),
        writable: flags.writable,
        enumerable: flags.enumerable,
        configurable: flags.configurable,
        ..Default::default()
    }
}

fn render_json<T: serde::Serialize>(value: &T) -> Result<String, SlotError> {
    serde_json::to_string(value).map_err(|err| SlotError::TypeMismatch {
        message: format!("could not render output as JSON: {err}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_defines_and_reads_back() {
        let mut session = Session::new();
        session.eval("new o").unwrap();
        session.eval("def o.x 1").unwrap();
        session.eval("get o.x").unwrap();
        assert_eq!(session.output(), ["o.x -> 1"]);
    }

    #[test]
    fn unknown_binding_is_reported() {
        let mut session = Session::new();
        let err = session.eval("get ghost.x").unwrap_err();
        assert!(matches!(
            err,
            SlottedError::Slot(SlotError::UnknownBinding { .. })
        ));
    }

    #[test]
    fn mode_switch_changes_write_behavior() {
        let mut session = Session::new();
        session.eval("new o").unwrap();
        session.eval("def o.x 1 -w").unwrap();

        assert!(session.eval("set o.x 2").is_err());

        session.eval("mode lenient").unwrap();
        session.eval("set o.x 2").unwrap();
        session.eval("get o.x").unwrap();
        assert_eq!(session.output().last().unwrap(), "o.x -> 1");
    }

    #[test]
    fn accessor_command_installs_delegating_pair() {
        let mut session = Session::new();
        session.eval("new o").unwrap();
        session.eval("def o.x 0").unwrap();
        session.eval("accessor o.data x").unwrap();
        session.eval("set o.data 42").unwrap();
        session.eval("get o.x").unwrap();
        assert_eq!(session.output().last().unwrap(), "o.x -> 42");
    }

    #[test]
    fn new_with_parent_delegates_reads() {
        let mut session = Session::new();
        session.eval("new base").unwrap();
        session.eval("def base.greeting 'hi'").unwrap();
        session.eval("new child base").unwrap();
        session.eval("get child.greeting").unwrap();
        assert_eq!(session.output().last().unwrap(), "child.greeting -> hi");
    }

    #[test]
    fn describe_renders_descriptor_json() {
        let mut session = Session::new();
        session.eval("new o").unwrap();
        session.eval("def o.x 1 -e -c").unwrap();
        session.eval("desc o.x").unwrap();
        let line = session.output().last().unwrap();
        assert!(line.contains("\"kind\":\"data\""));
        assert!(line.contains("\"enumerable\":false"));
        assert!(line.contains("\"configurable\":false"));
    }

    #[test]
    fn record_reference_literals_resolve() {
        let mut session = Session::new();
        session.eval("new inner").unwrap();
        session.eval("def inner.x 1").unwrap();
        session.eval("new outer").unwrap();
        session.eval("def outer.child inner").unwrap();
        session.eval("show outer").unwrap();
        assert_eq!(
            session.output().last().unwrap(),
            "outer -> {\"child\":{\"x\":1.0}}"
        );
    }
}
