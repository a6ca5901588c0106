//! Sorted and filtered view over a ledger sequence, as shown by the history
//! table.
//!
//! Rows keep their ledger position in [`HistoryRow::index`], so a row picked
//! from a sorted or filtered view can still be deleted by position.

use std::cmp::Ordering;

use crate::{Transaction, transactions::DATE_FORMAT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Text,
    Category,
    Amount,
    Date,
}

impl TryFrom<&str> for SortKey {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "text" => Ok(Self::Text),
            "category" => Ok(Self::Category),
            "amount" => Ok(Self::Amount),
            "date" => Ok(Self::Date),
            other => Err(format!("invalid sort column: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Case-insensitive substring matched against every column.
    pub filter: Option<String>,
    pub sort: Option<SortKey>,
    pub order: SortOrder,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRow {
    /// Position in the ledger sequence.
    pub index: usize,
    pub transaction: Transaction,
}

pub fn history(sequence: &[Transaction], query: &HistoryQuery) -> Vec<HistoryRow> {
    let needle = query
        .filter
        .as_deref()
        .map(str::trim)
        .filter(|needle| !needle.is_empty())
        .map(str::to_lowercase);

    let mut rows: Vec<HistoryRow> = sequence
        .iter()
        .enumerate()
        .filter(|(_, tx)| needle.as_deref().is_none_or(|needle| matches(tx, needle)))
        .map(|(index, tx)| HistoryRow {
            index,
            transaction: tx.clone(),
        })
        .collect();

    if let Some(key) = query.sort {
        // `sort_by` is stable: ties keep ledger order in both directions.
        rows.sort_by(|a, b| {
            let ordering = compare(&a.transaction, &b.transaction, key);
            match query.order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }

    rows
}

fn matches(tx: &Transaction, needle: &str) -> bool {
    tx.text.to_lowercase().contains(needle)
        || tx.category.to_lowercase().contains(needle)
        || tx.amount.to_string().contains(needle)
        || tx.date.format(DATE_FORMAT).to_string().contains(needle)
}

fn compare(a: &Transaction, b: &Transaction, key: SortKey) -> Ordering {
    match key {
        SortKey::Text => a.text.cmp(&b.text),
        SortKey::Category => a.category.cmp(&b.category),
        SortKey::Amount => a.amount.cmp(&b.amount),
        SortKey::Date => a.date.cmp(&b.date),
    }
}
