use colored::*;
use std::fmt::Display;
use chrono::{DateTime, Local};
use uuid::Uuid;

pub use crate::{debug_entry, information_entry, notice_entry, warning_entry, error_entry, critical_entry, alert_entry, emergency_entry};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Information,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl LogLevel {
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Debug => "Debug",
            LogLevel::Information => "Information",
            LogLevel::Notice => "Notice",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Critical => "Critical",
            LogLevel::Alert => "Alert",
            LogLevel::Emergency => "Emergency",
        }
    }

    pub fn to_colored_string(&self) -> ColoredString {
        let padded = format!("{:<11}", self.name());
        match self {
            LogLevel::Debug => padded.bright_black(),
            LogLevel::Information => padded.bright_blue(),
            LogLevel::Notice => padded.bright_green(),
            LogLevel::Warning => padded.yellow(),
            LogLevel::Error => padded.bright_red(),
            LogLevel::Critical => padded.bright_yellow(),
            LogLevel::Alert => padded.red(),
            LogLevel::Emergency => padded.magenta(),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<11}", self.name())
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<Local>,
    pub request_id: Option<Uuid>,
    pub position: String,
    pub message: String,
    pub debug_info: String,
}

impl LogEntry {
    pub fn new<T: Into<String>, U: Into<String>, V: Into<String>>(level: LogLevel, position: T, message: U, debug_info: V) -> Self {
        Self {
            level,
            timestamp: Local::now(),
            request_id: None,
            position: position.into(),
            message: message.into(),
            debug_info: debug_info.into(),
        }
    }

    pub fn for_request(mut self, request_id: Uuid) -> Self {
        self.request_id = Some(request_id);
        self
    }

    fn render(&self, level: String, position: String, debug_info: String) -> String {
        let timestamp = self.timestamp.format("%Y/%m/%d %H:%M:%S");
        let request = match self.request_id {
            Some(request_id) => format!(" <{request_id}>"),
            None => String::new(),
        };
        if self.debug_info.is_empty() {
            format!("[{level}] {timestamp}{request} {position}: {}", self.message)
        } else {
            format!("[{level}] {timestamp}{request} {position}: {}\n{debug_info}", self.message)
        }
    }

    pub fn to_plain_string(&self) -> String {
        self.render(self.level.to_string(), self.position.clone(), self.debug_info.clone())
    }

    pub fn to_colored_string(&self) -> String {
        let level = self.level.to_colored_string().to_string();
        let position = self.position.cyan().to_string();
        let debug_info = self.debug_info.bright_black().to_string();
        self.render(level, position, debug_info)
    }
}

impl Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}

#[macro_export]
macro_rules! debug_entry {
    ($message:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Debug, format!("{}:{}", file!(), line!()), $message, "")
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Debug, format!("{}:{}", file!(), line!()), $message, $debug_info)
    };
}

#[macro_export]
macro_rules! information_entry {
    ($message:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Information, format!("{}:{}", file!(), line!()), $message, "")
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Information, format!("{}:{}", file!(), line!()), $message, $debug_info)
    };
}

#[macro_export]
macro_rules! notice_entry {
    ($message:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Notice, format!("{}:{}", file!(), line!()), $message, "")
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Notice, format!("{}:{}", file!(), line!()), $message, $debug_info)
    };
}

#[macro_export]
macro_rules! warning_entry {
    ($message:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Warning, format!("{}:{}", file!(), line!()), $message, "")
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Warning, format!("{}:{}", file!(), line!()), $message, $debug_info)
    };
}

#[macro_export]
macro_rules! error_entry {
    ($message:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Error, format!("{}:{}", file!(), line!()), $message, "")
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Error, format!("{}:{}", file!(), line!()), $message, $debug_info)
    };
}

#[macro_export]
macro_rules! critical_entry {
    ($message:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Critical, format!("{}:{}", file!(), line!()), $message, "")
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Critical, format!("{}:{}", file!(), line!()), $message, $debug_info)
    };
}

#[macro_export]
macro_rules! alert_entry {
    ($message:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Alert, format!("{}:{}", file!(), line!()), $message, "")
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Alert, format!("{}:{}", file!(), line!()), $message, $debug_info)
    };
}

#[macro_export]
macro_rules! emergency_entry {
    ($message:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Emergency, format!("{}:{}", file!(), line!()), $message, "")
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Emergency, format!("{}:{}", file!(), line!()), $message, $debug_info)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_string_carries_position_and_request() {
        let request_id = Uuid::new_v4();
        let entry = LogEntry::new(LogLevel::Warning, "detector.rs:10", "1 detection skipped", "").for_request(request_id);
        let rendered = entry.to_plain_string();
        assert!(rendered.starts_with("[Warning    ]"));
        assert!(rendered.contains(&request_id.to_string()));
        assert!(rendered.ends_with("detector.rs:10: 1 detection skipped"));
    }

    #[test]
    fn entry_macros_record_call_site() {
        let entry = error_entry!("boom", "details");
        assert_eq!(entry.level, LogLevel::Error);
        assert!(entry.position.contains("logging.rs"));
        assert!(entry.to_plain_string().ends_with("boom\ndetails"));
    }
}
