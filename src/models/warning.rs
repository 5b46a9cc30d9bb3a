//! Limit warning value objects
//!
//! Warnings are produced per query and handed to a warning sink; they are not
//! part of the stats payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;
use super::money::Money;

/// Which limit was exceeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimitScope {
    DailyLimit,
    WeeklyLimit,
}

impl fmt::Display for LimitScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DailyLimit => write!(f, "daily limit"),
            Self::WeeklyLimit => write!(f, "weekly limit"),
        }
    }
}

/// The period a warning covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitWindow {
    /// A single UTC calendar day
    Day(NaiveDate),
    /// A rolling week, both ends inclusive
    Week { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for LimitWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(day) => write!(f, "on {}", day),
            Self::Week { start, end } => write!(f, "in period {} - {}", start, end),
        }
    }
}

/// An overspend signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitWarning {
    pub scope: LimitScope,
    pub user_id: UserId,
    pub window: LimitWindow,
    pub spent: Money,
    pub limit: Money,
}

impl LimitWarning {
    pub fn daily(user_id: UserId, day: NaiveDate, spent: Money, limit: Money) -> Self {
        Self {
            scope: LimitScope::DailyLimit,
            user_id,
            window: LimitWindow::Day(day),
            spent,
            limit,
        }
    }

    pub fn weekly(
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
        spent: Money,
        limit: Money,
    ) -> Self {
        Self {
            scope: LimitScope::WeeklyLimit,
            user_id,
            window: LimitWindow::Week { start, end },
            spent,
            limit,
        }
    }

    /// How far over the limit the spend went
    pub fn overage(&self) -> Money {
        self.spent - self.limit
    }
}

impl fmt::Display for LimitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User {} exceeded {} {}: spent {} > {}",
            self.user_id, self.scope, self.window, self.spent, self.limit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_daily_display() {
        let warning = LimitWarning::daily(
            UserId::new(1),
            day(1),
            Money::from_cents(110000),
            Money::from_cents(100000),
        );
        assert_eq!(
            warning.to_string(),
            "User 1 exceeded daily limit on 2025-01-01: spent 1100.00 > 1000.00"
        );
        assert_eq!(warning.overage(), Money::from_cents(10000));
    }

    #[test]
    fn test_weekly_display() {
        let warning = LimitWarning::weekly(
            UserId::new(2),
            day(1),
            day(8),
            Money::from_cents(600000),
            Money::from_cents(500000),
        );
        assert_eq!(
            warning.to_string(),
            "User 2 exceeded weekly limit in period 2025-01-01 - 2025-01-08: spent 6000.00 > 5000.00"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let warning = LimitWarning::weekly(
            UserId::new(2),
            day(1),
            day(8),
            Money::from_cents(600000),
            Money::from_cents(500000),
        );
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["scope"], "WeeklyLimit");
        assert_eq!(json["user_id"], 2);
        assert_eq!(json["window"]["week"]["start"], "2025-01-01");
        assert_eq!(json["spent"], 6000.0);
    }
}
