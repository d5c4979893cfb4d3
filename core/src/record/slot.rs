use super::accessor::{Reader, Writer};
use crate::value::Value;

#[derive(Debug, Clone)]
pub enum SlotKind {
    Data { value: Value, writable: bool },
    Accessor { reader: Reader, writer: Option<Writer> },
}

#[derive(Debug, Clone)]
pub struct Slot {
    pub kind: SlotKind,
    pub enumerable: bool,
    pub configurable: bool,
}

impl Slot {
    pub fn data(value: Value) -> Self {
        Self {
            kind: SlotKind::Data {
                value,
                writable: true,
            },
            enumerable: true,
            configurable: true,
        }
    }

    pub fn is_accessor(&self) -> bool {
        matches!(self.kind, SlotKind::Accessor { .. })
    }
}
