use std::collections::VecDeque;
use std::str::FromStr;

use chrono::NaiveDateTime;

use super::constants::LOG_CAPACITY;
use super::errors::ColonyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    /// Tag shown next to each entry.
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Normal => "INFO",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Narrative text shouting WARNING or ALERT is a warning.
    pub fn of_text(text: &str) -> Self {
        if text.contains("WARNING") || text.contains("ALERT") {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    pub text: String,
    pub severity: Severity,
}

/// Which entries a log view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFilter {
    All,
    Only(Severity),
}

impl LogFilter {
    pub fn matches(&self, entry: &LogEntry) -> bool {
        match self {
            LogFilter::All => true,
            LogFilter::Only(severity) => entry.severity == *severity,
        }
    }
}

impl FromStr for LogFilter {
    type Err = ColonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(LogFilter::All),
            "normal" | "info" => Ok(LogFilter::Only(Severity::Normal)),
            "warning" => Ok(LogFilter::Only(Severity::Warning)),
            "critical" => Ok(LogFilter::Only(Severity::Critical)),
            other => Err(ColonyError::InvalidField {
                field: "log filter",
                value: other.to_string(),
            }),
        }
    }
}

/// Capped mission log, newest entry first.
#[derive(Debug, Clone, Default)]
pub struct MissionLog {
    entries: VecDeque<LogEntry>,
}

impl MissionLog {
    pub fn new() -> Self {
        MissionLog {
            entries: VecDeque::with_capacity(LOG_CAPACITY),
        }
    }

    /// Insert at the front; the oldest entry falls off past capacity.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(LOG_CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn newest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn filtered(&self, filter: LogFilter) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| filter.matches(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timestamp::colony_time;

    fn entry(n: usize, severity: Severity) -> LogEntry {
        LogEntry {
            timestamp: colony_time(n as u64 * 1000),
            text: format!("entry {}", n),
            severity,
        }
    }

    #[test]
    fn newest_first() {
        let mut log = MissionLog::new();
        log.push(entry(1, Severity::Normal));
        log.push(entry(2, Severity::Normal));
        assert_eq!(log.newest().unwrap().text, "entry 2");
    }

    #[test]
    fn thirty_first_entry_evicts_oldest() {
        let mut log = MissionLog::new();
        for n in 1..=31 {
            log.push(entry(n, Severity::Normal));
        }
        assert_eq!(log.len(), LOG_CAPACITY);
        assert!(log.iter().all(|e| e.text != "entry 1"));
        assert_eq!(log.iter().last().unwrap().text, "entry 2");
    }

    #[test]
    fn filter_by_tag() {
        let mut log = MissionLog::new();
        log.push(entry(1, Severity::Normal));
        log.push(entry(2, Severity::Warning));
        log.push(entry(3, Severity::Critical));
        let warnings: Vec<_> = log.filtered(LogFilter::Only(Severity::Warning)).collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(log.filtered(LogFilter::All).count(), 3);
    }

    #[test]
    fn severity_from_text() {
        assert_eq!(Severity::of_text("WARNING: surrounded"), Severity::Warning);
        assert_eq!(Severity::of_text("ALERT: followed"), Severity::Warning);
        assert_eq!(Severity::of_text("equipment malfunction"), Severity::Normal);
    }
}
