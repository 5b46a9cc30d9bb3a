//! Transaction model
//!
//! Transactions are created once by import and never edited afterwards. A
//! negative amount is a debit (spend); credits are carried but ignored by the
//! spending engine.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SpendError, SpendResult};

use super::ids::{TransactionId, UserId};
use super::money::{Money, MAX_TRANSACTION_UNITS};
use super::range::DateRange;

/// Label used for transactions without a category
pub const UNCATEGORIZED_LABEL: &str = "Other";

/// An imported financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier from the source data
    pub id: TransactionId,

    /// Owning user
    pub user_id: UserId,

    /// Amount (negative for spend, positive for income)
    pub amount: Money,

    /// Currency tag; carried, never converted
    #[serde(default)]
    pub currency: String,

    /// Category name, if the source provided one
    #[serde(default)]
    pub category: Option<String>,

    /// When the transaction happened
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Create an uncategorized transaction
    pub fn new(
        id: impl Into<TransactionId>,
        user_id: UserId,
        amount: Money,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id,
            amount,
            currency: String::new(),
            category: None,
            timestamp,
        }
    }

    /// Builder-style category setter
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder-style currency setter
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Reject amounts beyond the per-transaction bound
    pub fn validate(&self) -> SpendResult<()> {
        if !self.amount.within_transaction_bound() {
            return Err(SpendError::Validation(format!(
                "Transaction {} amount {} exceeds the limit of {} per transaction",
                self.id, self.amount, MAX_TRANSACTION_UNITS
            )));
        }
        Ok(())
    }

    /// Check if this is a debit (negative amount)
    pub fn is_debit(&self) -> bool {
        self.amount.is_negative()
    }

    /// Absolute amount spent; zero for credits
    pub fn spent(&self) -> Money {
        if self.is_debit() {
            -self.amount
        } else {
            Money::zero()
        }
    }

    /// Category for grouping: missing or empty folds into "Other"
    pub fn category_label(&self) -> &str {
        match self.category.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNCATEGORIZED_LABEL,
        }
    }

    /// Calendar day of the timestamp (UTC)
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// The store's debit query predicate.
    ///
    /// `category` is an exact match against the stored value, so a filter of
    /// "Other" does not pick up uncategorized rows.
    pub fn matches_debit_query(
        &self,
        user_id: UserId,
        range: &DateRange,
        category: Option<&str>,
    ) -> bool {
        self.user_id == user_id
            && range.contains(self.timestamp)
            && self.is_debit()
            && category.map_or(true, |c| self.category.as_deref() == Some(c))
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.category_label(),
            self.amount,
            self.currency
        )
    }
}
