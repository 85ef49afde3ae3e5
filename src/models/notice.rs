//! Notice Models
//!
//! User-visible messages raised by the reconciliation controller. The view
//! drains them; each failure is raised exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

impl std::fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoticeLevel::Success => write!(f, "success"),
            NoticeLevel::Info => write!(f, "info"),
            NoticeLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

/// Pending notices in raise order.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    pending: Vec<Notice>,
    next_id: u64,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&mut self, level: NoticeLevel, message: impl Into<String>) -> &Notice {
        self.next_id += 1;
        let notice = Notice {
            id: self.next_id,
            level,
            message: message.into(),
            raised_at: Utc::now(),
        };
        match level {
            NoticeLevel::Error => tracing::error!(message = %notice.message, "Notice raised"),
            _ => tracing::info!(level = %level, message = %notice.message, "Notice raised"),
        }
        self.pending.push(notice);
        // Just pushed
        &self.pending[self.pending.len() - 1]
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.raise(NoticeLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.raise(NoticeLevel::Error, message);
    }

    pub fn pending(&self) -> &[Notice] {
        &self.pending
    }

    /// Take every pending notice, leaving the board empty.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }

    pub fn count(&self, level: NoticeLevel) -> usize {
        self.pending.iter().filter(|n| n.level == level).count()
    }
}
