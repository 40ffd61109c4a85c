pub use crate::{logging_debug, logging_information, logging_notice, logging_warning, logging_error, logging_critical, logging_emergency, logging_entry};
pub use common::utils::log_entry::inference::InferenceEntry;
pub use common::utils::log_entry::system::SystemEntry;
pub use common::utils::log_entry::web::WebEntry;
pub use common::utils::logging::*;
pub use common::{debug_entry, information_entry, notice_entry, warning_entry, error_entry, critical_entry, alert_entry, emergency_entry};

use chrono::{DateTime, Local};
use lazy_static::lazy_static;
use std::collections::{HashMap, VecDeque};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

const SYSTEM_LOG_CAPACITY: usize = 4096;
const REQUEST_LOG_CAPACITY: usize = 256;

lazy_static! {
    static ref LOGGER: RwLock<Logger> = RwLock::new(Logger::new());
}

pub struct Logger {
    system_log: VecDeque<LogEntry>,
    request_log: HashMap<Uuid, Vec<LogEntry>>,
    request_order: VecDeque<Uuid>,
}

impl Logger {
    fn new() -> Self {
        let mut system_log = VecDeque::new();
        let log_entry = LogEntry::new(LogLevel::Information, "Logger", "Online now", "");
        system_log.push_back(log_entry);
        Self {
            system_log,
            request_log: HashMap::new(),
            request_order: VecDeque::new(),
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Logger> {
        LOGGER.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Logger> {
        LOGGER.write().await
    }

    pub async fn add_system_log<T: Into<String>, U: Into<String>, V: Into<String>>(level: LogLevel, position: T, message: U, debug_info: V) {
        Self::add_system_log_entry(LogEntry::new(level, position, message, debug_info)).await;
    }

    pub async fn add_request_log<T: Into<String>, U: Into<String>, V: Into<String>>(request_id: Uuid, level: LogLevel, position: T, message: U, debug_info: V) {
        Self::add_request_log_entry(request_id, LogEntry::new(level, position, message, debug_info)).await;
    }

    /// The oldest system entry is dropped once the log is full.
    pub async fn add_system_log_entry(log_entry: LogEntry) {
        Self::logging_console(&log_entry);
        let mut logger = Self::instance_mut().await;
        Self::push_bounded(&mut logger.system_log, log_entry, SYSTEM_LOG_CAPACITY);
    }

    fn push_bounded(log: &mut VecDeque<LogEntry>, log_entry: LogEntry, capacity: usize) {
        while log.len() >= capacity.max(1) {
            log.pop_front();
        }
        log.push_back(log_entry);
    }

    /// Only the most recent requests are kept; the oldest request log is dropped first.
    pub async fn add_request_log_entry(request_id: Uuid, log_entry: LogEntry) {
        let log_entry = log_entry.for_request(request_id);
        Self::logging_console(&log_entry);
        let mut logger = Self::instance_mut().await;
        if !logger.request_log.contains_key(&request_id) {
            if logger.request_order.len() == REQUEST_LOG_CAPACITY {
                if let Some(oldest) = logger.request_order.pop_front() {
                    logger.request_log.remove(&oldest);
                }
            }
            logger.request_order.push_back(request_id);
        }
        logger.request_log.entry(request_id).or_default().push(log_entry);
    }

    pub fn logging_console(log_entry: &LogEntry) {
        println!("{}", log_entry.to_colored_string());
    }

    pub async fn get_system_logs() -> Vec<LogEntry> {
        Self::instance().await.system_log.iter().cloned().collect()
    }

    pub async fn get_request_logs(request_id: Uuid) -> Option<Vec<LogEntry>> {
        let logger = Self::instance().await;
        logger.request_log.get(&request_id).cloned()
    }

    pub async fn get_system_logs_since(time: DateTime<Local>) -> Vec<LogEntry> {
        let logger = Self::instance().await;
        let index = logger.system_log.partition_point(|entry| entry.timestamp <= time);
        logger.system_log.range(index..).cloned().collect()
    }

    pub async fn get_request_logs_since(request_id: Uuid, time: DateTime<Local>) -> Option<Vec<LogEntry>> {
        let logger = Self::instance().await;
        let logs = logger.request_log.get(&request_id)?;
        let index = logs.partition_point(|entry| entry.timestamp <= time);
        Some(logs[index..].to_vec())
    }

    pub fn format_logs(logs: &[LogEntry]) -> String {
        logs.iter().map(LogEntry::to_plain_string).collect::<Vec<_>>().join("\n")
    }
}

#[macro_export]
macro_rules! logging_debug {
    ($message:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::Debug, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::Debug, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
    ($uuid:expr, $message:expr, $debug_info:expr) => {
        $crate::utils::logging::Logger::add_request_log($uuid, $crate::utils::logging::LogLevel::Debug, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_information {
    ($message:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::Information, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::Information, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
    ($uuid:expr, $message:expr, $debug_info:expr) => {
        $crate::utils::logging::Logger::add_request_log($uuid, $crate::utils::logging::LogLevel::Information, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_notice {
    ($message:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::Notice, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::Notice, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
    ($uuid:expr, $message:expr, $debug_info:expr) => {
        $crate::utils::logging::Logger::add_request_log($uuid, $crate::utils::logging::LogLevel::Notice, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_warning {
    ($message:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::Warning, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::Warning, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
    ($uuid:expr, $message:expr, $debug_info:expr) => {
        $crate::utils::logging::Logger::add_request_log($uuid, $crate::utils::logging::LogLevel::Warning, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_error {
    ($message:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::Error, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::Error, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
    ($uuid:expr, $message:expr, $debug_info:expr) => {
        $crate::utils::logging::Logger::add_request_log($uuid, $crate::utils::logging::LogLevel::Error, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_critical {
    ($message:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::Critical, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::Critical, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_emergency {
    ($message:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::Emergency, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::Emergency, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_entry {
    ($entry:expr) => {
        $crate::utils::logging::Logger::add_system_log_entry($entry).await
    };
    ($uuid:expr, $entry:expr) => {
        $crate::utils::logging::Logger::add_request_log_entry($uuid, $entry).await
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn request_logs_are_kept_per_request() {
        let request_id = Uuid::new_v4();
        logging_information!(request_id, WebEntry::DetectionRequested("field.png".to_string()), "");
        logging_warning!(request_id, WebEntry::MalformedSkipped(2), "");
        let logs = Logger::get_request_logs(request_id).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[1].level, LogLevel::Warning);
        assert_eq!(logs[1].request_id, Some(request_id));
        assert!(Logger::get_request_logs(Uuid::new_v4()).await.is_none());
    }

    #[test]
    fn full_log_drops_oldest_entry() {
        let mut log = VecDeque::new();
        for message in ["first", "second", "third"] {
            Logger::push_bounded(&mut log, LogEntry::new(LogLevel::Information, "test", message, ""), 2);
        }
        let messages = log.iter().map(|entry| entry.message.as_str()).collect::<Vec<_>>();
        assert_eq!(messages, vec!["second", "third"]);
    }

    #[actix_web::test]
    async fn since_filters_older_entries() {
        let request_id = Uuid::new_v4();
        logging_information!(request_id, "first", "");
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let since = Local::now();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        logging_information!(request_id, "second", "");
        let logs = Logger::get_request_logs_since(request_id, since).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].message, "second");
    }
}
