use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
#[error("command error: {message}")]
#[diagnostic(help("type 'help' for the command reference"))]
pub struct CommandError {
    pub message: String,

    #[label("here")]
    pub span: miette::SourceSpan,
}

impl CommandError {
    pub fn new(message: impl Into<String>, offset: usize, length: usize) -> Self {
        Self {
            message: message.into(),
            span: (offset, length).into(),
        }
    }
}
