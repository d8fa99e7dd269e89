//! NSE cash-session clock. Pure functions of a UTC instant so the session
//! state is testable without a wall clock.

use chrono::{DateTime, FixedOffset, Timelike, Utc};

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// 09:15 IST
const OPEN_MINUTE: u32 = 9 * 60 + 15;
/// 15:30 IST
const CLOSE_MINUTE: u32 = 15 * 60 + 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    PreOpen,
    Live,
    Closed,
}

impl SessionStatus {
    pub fn label(self) -> &'static str {
        match self {
            SessionStatus::PreOpen => "Pre-open",
            SessionStatus::Live => "Cash session LIVE",
            SessionStatus::Closed => "Closed",
        }
    }
}

/// Status strings for the market header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionBanner {
    pub session_label: String,
    pub status_label: String,
}

fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset is in range")
}

/// Classify an instant against the NSE cash session (09:15-15:30 IST,
/// boundaries inclusive).
pub fn session_status_at(now: DateTime<Utc>) -> SessionStatus {
    let local = now.with_timezone(&ist());
    let minute = local.hour() * 60 + local.minute();

    if (OPEN_MINUTE..=CLOSE_MINUTE).contains(&minute) {
        SessionStatus::Live
    } else if minute < OPEN_MINUTE {
        SessionStatus::PreOpen
    } else {
        SessionStatus::Closed
    }
}

/// Render the header labels for an instant.
pub fn session_banner(now: DateTime<Utc>) -> SessionBanner {
    let status = session_status_at(now);
    let local = now.with_timezone(&ist());
    let time_label = local.format("%H:%M");

    SessionBanner {
        session_label: format!("India (IST) {} • {}", time_label, status.label()),
        status_label: match status {
            SessionStatus::Live => "NSE cash session active".to_string(),
            other => format!("India session: {}", other.label()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Build a UTC instant from IST wall-clock time.
    fn ist_time(hour: u32, minute: u32) -> DateTime<Utc> {
        ist()
            .with_ymd_and_hms(2024, 12, 6, hour, minute, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_session_boundaries() {
        assert_eq!(session_status_at(ist_time(9, 14)), SessionStatus::PreOpen);
        assert_eq!(session_status_at(ist_time(9, 15)), SessionStatus::Live);
        assert_eq!(session_status_at(ist_time(15, 30)), SessionStatus::Live);
        assert_eq!(session_status_at(ist_time(15, 31)), SessionStatus::Closed);
    }

    #[test]
    fn test_midnight_is_pre_open() {
        assert_eq!(session_status_at(ist_time(0, 0)), SessionStatus::PreOpen);
    }

    #[test]
    fn test_banner_during_session() {
        let banner = session_banner(ist_time(11, 5));
        assert_eq!(
            banner.session_label,
            "India (IST) 11:05 • Cash session LIVE"
        );
        assert_eq!(banner.status_label, "NSE cash session active");
    }

    #[test]
    fn test_banner_after_close() {
        let banner = session_banner(ist_time(18, 0));
        assert_eq!(banner.session_label, "India (IST) 18:00 • Closed");
        assert_eq!(banner.status_label, "India session: Closed");
    }
}
