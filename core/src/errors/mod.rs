mod command_error;
mod slot_error;

pub use command_error::CommandError;
pub use slot_error::SlotError;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type wrapping all slotted errors.
#[derive(Debug, Error, Diagnostic)]
pub enum SlottedError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Slot(#[from] SlotError),
}
