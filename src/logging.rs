use serde_json::{Map, Number, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Logger {
    min_level: LogLevel,
}

impl Logger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn debug(&self, event: &str, fields: Value) {
        self.log_event(LogLevel::Debug, event, fields);
    }

    pub fn info(&self, event: &str, fields: Value) {
        self.log_event(LogLevel::Info, event, fields);
    }

    pub fn warn(&self, event: &str, fields: Value) {
        self.log_event(LogLevel::Warn, event, fields);
    }

    pub fn error(&self, event: &str, fields: Value) {
        self.log_event(LogLevel::Error, event, fields);
    }

    pub fn log_event(&self, level: LogLevel, event: &str, fields: Value) {
        if let Some(line) = self.format_event(level, event, fields) {
            emit(level, &line);
        }
    }

    fn format_event(&self, level: LogLevel, event: &str, fields: Value) -> Option<String> {
        if !self.enabled(level) {
            return None;
        }

        let mut payload = Map::new();
        payload.insert("ts".to_string(), Value::Number(Number::from(now_unix_millis())));
        payload.insert("level".to_string(), Value::String(level.as_str().to_string()));
        payload.insert("event".to_string(), Value::String(event.to_string()));

        if let Value::Object(extra) = fields {
            for (key, value) in extra {
                payload.insert(key, value);
            }
        }

        Some(Value::Object(payload).to_string())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: &str) {
    match level {
        LogLevel::Debug | LogLevel::Info => gloo::console::log!(line),
        LogLevel::Warn => gloo::console::warn!(line),
        LogLevel::Error => gloo::console::error!(line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, line: &str) {
    eprintln!("{line}");
}
