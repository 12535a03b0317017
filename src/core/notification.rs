use chrono::{DateTime, Utc};
use std::fmt;

/// Identifier handed out by a [`Scheduler`](super::scheduler::Scheduler).
///
/// Ids come from a per-scheduler counter and are never reused, not even after
/// a `clear_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }

    /// Unknown categories fall back to `Info` instead of failing.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Success",
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }

    pub const ALL: &[Severity] = &[Self::Info, Self::Success, Self::Warning, Self::Error];
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user-facing message owned by the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub(crate) fn new(
        id: NotificationId,
        title: impl Into<String>,
        body: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            severity,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_round_trips_known_names() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_str(severity.as_str()), *severity);
        }
    }

    #[test]
    fn test_unknown_severity_coerces_to_info() {
        assert_eq!(Severity::from_str("critical"), Severity::Info);
        assert_eq!(Severity::from_str(""), Severity::Info);
        assert_eq!(Severity::from_str("  WARNING "), Severity::Warning);
    }

    #[test]
    fn test_default_severity_is_info() {
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(NotificationId::from_raw(7).to_string(), "#7");
    }
}
