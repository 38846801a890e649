//! sshd authentication line matchers.
//!
//! Three patterns are tried in order (accepted, failed, invalid user) and the
//! first match wins, so a line classifies at most once. All share the BSD
//! syslog header `Mmm dd HH:MM:SS` and an `sshd[PID]:` or `sshd:` tag.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};
use std::sync::LazyLock;

use aw_protocol::{AuthEvent, AuthOutcome, INVALID_USER_METHOD};

const TS_PREFIX: &str = r"^(?P<mon>\w{3})\s+(?P<day>\d{1,2})\s+(?P<time>\d{2}:\d{2}:\d{2})";
const SSHD_PREFIX: &str = r".*sshd(?:\[\d+\])?:\s+";
const FROM_ADDR_PORT: &str = r"\s+from\s+(?P<ip>\S+)\s+port\s+(?P<port>[0-9]+)";

static RE_ACCEPTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{TS_PREFIX}{SSHD_PREFIX}Accepted\s+(?P<method>\S+)\s+for\s+(?P<user>\S+){FROM_ADDR_PORT}"
    ))
    .unwrap()
});

// "Failed <method> for invalid user <user>" folds into plain failures.
static RE_FAILED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{TS_PREFIX}{SSHD_PREFIX}Failed\s+(?P<method>\S+)\s+for\s+(?:invalid user\s+)?(?P<user>\S+){FROM_ADDR_PORT}"
    ))
    .unwrap()
});

static RE_INVALID_USER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{TS_PREFIX}{SSHD_PREFIX}Invalid user\s+(?P<user>\S+){FROM_ADDR_PORT}"
    ))
    .unwrap()
});

/// Which matcher fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Accepted,
    Failed,
    InvalidUser,
}

impl MatchKind {
    pub fn outcome(&self) -> AuthOutcome {
        match self {
            Self::Accepted => AuthOutcome::Success,
            Self::Failed | Self::InvalidUser => AuthOutcome::Failed,
        }
    }
}

/// Fields captured from a matching line, borrowed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthMatch<'a> {
    pub kind: MatchKind,
    pub month: &'a str,
    pub day: &'a str,
    pub time: &'a str,
    /// `None` for invalid-user lines.
    pub method: Option<&'a str>,
    pub user: &'a str,
    pub ip: &'a str,
    pub port: u64,
}

impl<'a> AuthMatch<'a> {
    fn from_captures(kind: MatchKind, caps: &Captures<'a>) -> Option<Self> {
        let field = |name: &str| caps.name(name).map(|m| m.as_str());
        Some(Self {
            kind,
            month: field("mon")?,
            day: field("day")?,
            time: field("time")?,
            method: field("method"),
            user: field("user")?,
            ip: field("ip")?,
            // Only absurdly long digit runs fail to parse; they saturate.
            port: field("port")?.parse().unwrap_or(u64::MAX),
        })
    }

    pub fn outcome(&self) -> AuthOutcome {
        self.kind.outcome()
    }

    pub fn method(&self) -> &'a str {
        self.method.unwrap_or(INVALID_USER_METHOD)
    }

    /// Materialize the event, dating it in `year`.
    pub fn to_event(&self, raw: &str, year: i32) -> AuthEvent {
        AuthEvent {
            timestamp: build_timestamp(self.month, self.day, self.time, year),
            outcome: self.outcome(),
            user: self.user.to_string(),
            ip: self.ip.to_string(),
            port: self.port,
            method: self.method().to_string(),
            raw: raw.to_string(),
        }
    }
}

/// Classify a line. `None` if no matcher fires; the first one that fires
/// decides.
pub fn classify(line: &str) -> Option<AuthMatch<'_>> {
    let matchers: [(MatchKind, &Regex); 3] = [
        (MatchKind::Accepted, &*RE_ACCEPTED),
        (MatchKind::Failed, &*RE_FAILED),
        (MatchKind::InvalidUser, &*RE_INVALID_USER),
    ];
    for (kind, re) in matchers {
        if let Some(caps) = re.captures(line) {
            return AuthMatch::from_captures(kind, &caps);
        }
    }
    None
}

/// Parse a line into an event dated in `year`.
pub fn parse_event(line: &str, year: i32) -> Option<AuthEvent> {
    classify(line).map(|m| m.to_event(line, year))
}

/// Whether the line was emitted by sshd (`sshd[PID]` or `sshd:`).
pub fn has_sshd_marker(line: &str) -> bool {
    line.contains("sshd[") || line.contains("sshd:")
}

/// Whether the line's leading timestamp is `today`.
///
/// syslog pads the day with a space (`Feb  8`), journalctl with a zero
/// (`Feb 08`); both are accepted.
pub fn is_today_line(line: &str, today: NaiveDate) -> bool {
    let zero_padded = today.format("%b %d").to_string();
    let space_padded = today.format("%b %e").to_string();
    line.starts_with(&zero_padded) || line.starts_with(&space_padded)
}

/// Rebuild `YYYY-MM-DD HH:MM:SS` from a year-less syslog header.
///
/// The header carries no year, so `year` (the current one at parse time) is
/// assumed: lines from last December read in January land a year ahead.
/// Impossible dates (Feb 29 off a leap year, unknown month names, 25:00:00)
/// fall back to the header text as logged.
pub fn build_timestamp(month: &str, day: &str, time: &str, year: i32) -> String {
    let parsed = month_number(month)
        .zip(day.parse::<u32>().ok())
        .and_then(|(m, d)| NaiveDate::from_ymd_opt(year, m, d))
        .zip(NaiveTime::parse_from_str(time, "%H:%M:%S").ok())
        .map(|(date, t)| NaiveDateTime::new(date, t));
    match parsed {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format!("{month} {day} {time}"),
    }
}

fn month_number(abbrev: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(abbrev))
        .map(|i| i as u32 + 1)
}
