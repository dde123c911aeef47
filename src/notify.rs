//! User-facing notifications: mode switches, undo/redo, missing terrain.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Info,
    Warning,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Info => f.write_str("info"),
            NoticeLevel::Warning => f.write_str("warning"),
        }
    }
}

/// Receives short messages meant for the user. The host decides how to show them.
pub trait NotificationSink {
    fn notify(&mut self, level: NoticeLevel, message: &str);

    fn info(&mut self, message: &str) {
        self.notify(NoticeLevel::Info, message);
    }

    fn warn(&mut self, message: &str) {
        self.notify(NoticeLevel::Warning, message);
    }
}

/// Forwards notifications to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&mut self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => tracing::info!(target: "terrain_sculpt::notice", "{message}"),
            NoticeLevel::Warning => tracing::warn!(target: "terrain_sculpt::notice", "{message}"),
        }
    }
}

/// Keeps every notification in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoticeLog {
    pub entries: Vec<(NoticeLevel, String)>,
}

impl NoticeLog {
    pub fn last(&self) -> Option<&(NoticeLevel, String)> {
        self.entries.last()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(level, _)| *level == NoticeLevel::Warning)
            .map(|(_, message)| message.as_str())
    }
}

impl NotificationSink for NoticeLog {
    fn notify(&mut self, level: NoticeLevel, message: &str) {
        self.entries.push((level, message.to_string()));
    }
}
