use std::fmt;

use super::Value;
use crate::record::SlotKind;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::String(s) => write!(f, "{s}"),
            Value::Record(record) => {
                let record = record.borrow();
                let pairs: Vec<String> = record
                    .slots
                    .iter()
                    .map(|(name, slot)| match &slot.kind {
                        SlotKind::Data { value, .. } => format!("{name}: {value}"),
                        SlotKind::Accessor { .. } => format!("{name}: [accessor]"),
                    })
                    .collect();
                write!(f, "{{ {} }}", pairs.join(", "))
            }
        }
    }
}
