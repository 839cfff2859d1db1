use ferrous_lookup_application::ports::LookupLogger;
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingLogger {
    debug: Mutex<Vec<String>>,
    error: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug_lines(&self) -> Vec<String> {
        self.debug.lock().unwrap().clone()
    }

    pub fn error_lines(&self) -> Vec<String> {
        self.error.lock().unwrap().clone()
    }
}

impl LookupLogger for RecordingLogger {
    fn debug(&self, message: &str) {
        self.debug.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.error.lock().unwrap().push(message.to_string());
    }
}
