//! Key/value diagnostics emitted by effects on request

use std::fmt::Display;

/// Receives formatted diagnostic lines from an effect
pub trait DebugSink {
    fn line(&mut self, key: &str, value: &dyn Display);
}

/// Forwards diagnostics to the `log` facade at info level
pub struct LogSink {
    prefix: String,
}

impl LogSink {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl DebugSink for LogSink {
    fn line(&mut self, key: &str, value: &dyn Display) {
        log::info!("\t[{}] {} = {}", self.prefix, key, value);
    }
}

/// Collects lines in memory
impl DebugSink for Vec<(String, String)> {
    fn line(&mut self, key: &str, value: &dyn Display) {
        self.push((key.to_string(), value.to_string()));
    }
}
