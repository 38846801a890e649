//! Line parsers.
//!
//! Only sshd's BSD-syslog-style authentication lines are understood; the
//! same text shape is produced by `/var/log/auth.log`, `/var/log/secure`
//! and `journalctl`'s default short output.

pub mod sshd;

use aw_protocol::AuthEvent;

pub use sshd::{AuthMatch, MatchKind, classify, has_sshd_marker, is_today_line, parse_event};

/// Parse every matching line, in input order.
pub fn parse_events(lines: &[String], year: i32) -> Vec<AuthEvent> {
    lines.iter().filter_map(|l| parse_event(l, year)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::sample_auth_lines;
    use aw_protocol::AuthOutcome;

    #[test]
    fn parse_sample_keeps_file_order() {
        let events = parse_events(&sample_auth_lines(), 2026);
        let users: Vec<&str> = events.iter().map(|e| e.user.as_str()).collect();
        assert_eq!(users, vec!["alice", "bob", "carol", "bob", "dave"]);
        assert_eq!(
            events.iter().filter(|e| e.outcome == AuthOutcome::Success).count(),
            2
        );
    }

    #[test]
    fn parse_skips_noise() {
        let lines = vec![
            "".to_string(),
            "-- Logs begin at Mon 2026-02-02 --".to_string(),
            "Feb  8 03:24:00 host CRON[126]: session opened".to_string(),
        ];
        assert!(parse_events(&lines, 2026).is_empty());
    }
}
