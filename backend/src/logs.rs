//! Pipeline log broadcasting.
//!
//! Every entry is echoed to stderr (unless echo is switched off) and fanned
//! out over a broadcast channel. A [`LogRecorder`] subscribes to that channel
//! and collects what a run logged, e.g. for the CLI's `--log-file`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Entries buffered per subscriber before the oldest are dropped.
const CHANNEL_CAPACITY: usize = 1024;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting depth for grouped messages
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            indent: 0,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Console form: indent, level marker, message.
    pub fn render(&self) -> String {
        let marker = match self.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        format!("{}{} {}", "   ".repeat(self.indent as usize), marker, self.message)
    }
}

/// Global log broadcaster
pub static LOG_BROADCASTER: Lazy<LogBroadcaster> = Lazy::new(LogBroadcaster::new);

/// Fans log entries out to subscribers.
pub struct LogBroadcaster {
    sender: broadcast::Sender<LogEntry>,
    echo: AtomicBool,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            sender,
            echo: AtomicBool::new(true),
        }
    }

    /// Echo to stderr (if enabled) and send to all subscribers.
    pub fn log(&self, entry: LogEntry) {
        if self.echo.load(Ordering::Relaxed) {
            eprintln!("{}", entry.render());
        }

        // no receivers is fine
        let _ = self.sender.send(entry);
    }

    /// Turn the stderr echo on or off. Subscribers are unaffected.
    pub fn set_echo(&self, enabled: bool) {
        self.echo.store(enabled, Ordering::Relaxed);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }

    /// Start collecting every entry logged from now on.
    pub fn record(&self) -> LogRecorder {
        LogRecorder {
            receiver: self.subscribe(),
        }
    }
}

/// Collects entries from a broadcaster subscription.
pub struct LogRecorder {
    receiver: broadcast::Receiver<LogEntry>,
}

impl LogRecorder {
    /// Entries received so far. Overflow is reported as a warning entry.
    pub fn drain(&mut self) -> Vec<LogEntry> {
        let mut entries = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(entry) => entries.push(entry),
                Err(TryRecvError::Lagged(missed)) => {
                    entries.push(LogEntry::warning(format!("{} log entries dropped", missed)));
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        entries
    }

    /// Drained entries as JSON lines.
    pub fn drain_json_lines(&mut self) -> serde_json::Result<String> {
        let mut out = String::new();
        for entry in self.drain() {
            out.push_str(&serde_json::to_string(&entry)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_info(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOG_BROADCASTER.log(LogEntry::info(msg).with_indent(indent));
}
