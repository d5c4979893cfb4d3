use crate::ops::WriteMode;
use crate::session::Session;

#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    mode: WriteMode,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn new_session(&self) -> Session {
        Session::with_mode(self.mode)
    }
}
