use std::collections::HashSet;
use std::rc::Rc;

use serde_json::Value as JsonValue;

use super::Value;
use crate::errors::SlotError;
use crate::record::{Slot, SlotKind};

/// Renders a value as JSON. Enumerable own slots only; accessor slots are
/// evaluated against the owning record.
pub fn to_json(value: &Value) -> Result<JsonValue, SlotError> {
    let mut seen = HashSet::new();
    json_value(value, &mut seen)
}

pub fn to_json_string(value: &Value) -> Result<String, SlotError> {
    Ok(to_json(value)?.to_string())
}

fn json_value(value: &Value, seen: &mut HashSet<usize>) -> Result<JsonValue, SlotError> {
    Ok(match value {
        Value::Undefined | Value::Null => JsonValue::Null,
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Record(record) => {
            let ptr = Rc::as_ptr(record) as usize;
            if !seen.insert(ptr) {
                return Err(SlotError::TypeMismatch {
                    message: "converting circular record structure to JSON".into(),
                });
            }

            let slots: Vec<(String, Slot)> = record
                .borrow()
                .slots
                .iter()
                .filter(|(_, slot)| slot.enumerable)
                .map(|(name, slot)| (name.clone(), slot.clone()))
                .collect();

            let mut map = serde_json::Map::new();
            for (name, slot) in slots {
                let slot_value = match slot.kind {
                    SlotKind::Data { value, .. } => value,
                    SlotKind::Accessor { reader, .. } => reader.call(record)?,
                };
                map.insert(name, json_value(&slot_value, seen)?);
            }

            seen.remove(&ptr);
            JsonValue::Object(map)
        }
    })
}
