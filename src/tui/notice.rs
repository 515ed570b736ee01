//! Transient notifications shown at the bottom of the screen

use std::collections::VecDeque;
use std::time::{Duration, Instant};

const NOTICE_TTL: Duration = Duration::from_secs(5);
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    /// Rejected user input
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    /// Failed remote call
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Queue of live notices, newest last
#[derive(Debug, Default)]
pub struct Notices {
    entries: VecDeque<(Notice, Instant)>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        self.push_at(notice, Instant::now());
    }

    fn push_at(&mut self, notice: Notice, at: Instant) {
        match notice.level {
            NoticeLevel::Error => log::error!("{}", notice.message),
            NoticeLevel::Warning => log::debug!("Validation: {}", notice.message),
            _ => log::info!("Notice: {}", notice.message),
        }
        self.entries.push_back((notice, at));
        while self.entries.len() > MAX_VISIBLE {
            self.entries.pop_front();
        }
    }

    /// Drop notices older than their time to live
    pub fn expire(&mut self, now: Instant) {
        self.entries.retain(|(_, at)| now.duration_since(*at) < NOTICE_TTL);
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notice> {
        self.entries.iter().map(|(notice, _)| notice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
