//! Transient user-facing notifications produced at operation boundaries.

use std::time::Instant;

#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub timestamp: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl Notice {
    pub fn new(message: String, level: NoticeLevel) -> Self {
        Self {
            message,
            level,
            timestamp: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message.into(), NoticeLevel::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message.into(), NoticeLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), NoticeLevel::Error)
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
