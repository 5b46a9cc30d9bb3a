//! Warning listings

use crate::engine::WarningRecord;
use crate::models::LimitWarning;

/// One `warning:` line per limit warning, for stderr notices
pub fn format_warning_notices(warnings: &[LimitWarning]) -> String {
    warnings
        .iter()
        .map(|w| format!("warning: {}\n", w))
        .collect()
}

/// Table of recorded warnings, oldest first
pub fn format_warning_records(records: &[WarningRecord]) -> String {
    if records.is_empty() {
        return "No limit warnings recorded.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<20} {:>8} {:<13} {:<25} {:>12} {:>12}\n",
        "Recorded", "User", "Scope", "Window", "Spent", "Limit"
    ));
    output.push_str(&"-".repeat(95));
    output.push('\n');

    for record in records {
        let w = &record.warning;
        output.push_str(&format!(
            "{:<20} {:>8} {:<13} {:<25} {:>12} {:>12}\n",
            record.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            w.user_id,
            w.scope.to_string(),
            w.window.to_string(),
            w.spent,
            w.limit
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, UserId};
    use chrono::{NaiveDate, Utc};

    fn daily() -> LimitWarning {
        LimitWarning::daily(
            UserId::new(1),
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            Money::from_cents(110_000),
            Money::from_cents(100_000),
        )
    }

    #[test]
    fn test_notices() {
        let text = format_warning_notices(&[daily()]);
        assert_eq!(
            text,
            "warning: User 1 exceeded daily limit on 2025-05-01: spent 1100.00 > 1000.00\n"
        );
        assert!(format_warning_notices(&[]).is_empty());
    }

    #[test]
    fn test_records_table() {
        let records = vec![WarningRecord {
            recorded_at: Utc::now(),
            warning: daily(),
        }];
        let text = format_warning_records(&records);
        assert!(text.contains("daily limit"));
        assert!(text.contains("on 2025-05-01"));
        assert!(text.contains("1100.00"));
    }

    #[test]
    fn test_records_empty() {
        assert_eq!(format_warning_records(&[]), "No limit warnings recorded.\n");
    }
}
