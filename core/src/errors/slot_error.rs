use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SlotError {
    #[error("slot '{name}' is not writable")]
    NotWritable { name: String },

    #[error("slot '{name}' is not configurable")]
    NotConfigurable { name: String },

    #[error("no such slot '{name}'")]
    NoSuchSlot { name: String },

    #[error("slot '{name}' has no setter")]
    NoSetter { name: String },

    #[error("malformed descriptor for '{name}': {reason}")]
    MalformedDescriptor { name: String, reason: String },

    #[error("type mismatch: {message}")]
    TypeMismatch { message: String },

    #[error("{message}")]
    Domain { message: String },

    #[error("'{name}' is not bound to a record")]
    UnknownBinding { name: String },
}
