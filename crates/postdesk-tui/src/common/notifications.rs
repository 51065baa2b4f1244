//! Transient notifications (toasts).
//!
//! Entries are kept in arrival order and expire individually.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Upper bound on retained entries; older ones are dropped first.
const MAX_ENTRIES: usize = 8;

const MIN_TTL: Duration = Duration::from_secs(1);
const MAX_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    notice: Notice,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct Notifications {
    entries: VecDeque<Entry>,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: VecDeque::new(),
            ttl: ttl.clamp(MIN_TTL, MAX_TTL),
        }
    }

    pub fn push(&mut self, notice: Notice) {
        self.push_at(notice, Instant::now());
    }

    /// Adds a notice. A repeat of the newest entry only refreshes its expiry.
    pub fn push_at(&mut self, notice: Notice, now: Instant) {
        let expires_at = now.checked_add(self.ttl).unwrap_or(now);
        if let Some(last) = self.entries.back_mut()
            && last.notice == notice
        {
            last.expires_at = expires_at;
            return;
        }

        self.entries.push_back(Entry { notice, expires_at });
        while self.entries.len() > MAX_ENTRIES {
            self.entries.pop_front();
        }
    }

    /// Drops expired entries. Returns true if anything was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.expires_at > now);
        self.entries.len() != before
    }

    /// Newest `limit` notices, oldest first.
    pub fn visible(&self, limit: usize) -> impl Iterator<Item = &Notice> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip).map(|entry| &entry.notice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
