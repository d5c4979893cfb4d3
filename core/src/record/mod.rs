pub mod accessor;
pub mod descriptor;
mod slot;

pub use descriptor::{Descriptor, DescriptorSnapshot};
pub use slot::{Slot, SlotKind};

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::value::RecordRef;

/// A record: named slots in insertion order, plus an optional parent the
/// record delegates reads to.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub slots: IndexMap<String, Slot>,
    pub parent: Option<RecordRef>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: RecordRef) -> Self {
        Self {
            slots: IndexMap::new(),
            parent: Some(parent),
        }
    }

    pub fn into_ref(self) -> RecordRef {
        Rc::new(RefCell::new(self))
    }
}
