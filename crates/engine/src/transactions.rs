//! Transaction primitives.
//!
//! A `Transaction` is a single income (positive amount) or expense (negative
//! amount) entry in a user's ledger. It carries no id: its position in the
//! ledger is its identity.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Amount, EngineError, ResultEngine};

/// Date format used both when parsing input and when exporting.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub text: String,
    pub category: String,
    pub amount: Amount,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(
        text: impl Into<String>,
        category: impl Into<String>,
        amount: Amount,
        date: NaiveDate,
    ) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            amount,
            date,
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }
}

/// Input of an append request, before the presence check.
///
/// Every field is optional: a draft only becomes a [`Transaction`] when all of
/// them are present (see [`TransactionDraft::complete`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub text: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Amount>,
    pub date: Option<NaiveDate>,
}

impl TransactionDraft {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Returns the transaction if every field is present.
    ///
    /// Empty strings and a zero amount count as missing.
    pub fn complete(self) -> Option<Transaction> {
        let text = self.text.filter(|text| !text.is_empty())?;
        let category = self.category.filter(|category| !category.is_empty())?;
        let amount = self.amount.filter(|amount| !amount.is_zero())?;
        let date = self.date?;

        Some(Transaction {
            text,
            category,
            amount,
            date,
        })
    }
}

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(value: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|err| EngineError::InvalidDate(format!("{value}: {err}")))
}
