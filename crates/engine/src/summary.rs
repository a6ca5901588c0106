//! Totals and chart series derived from a ledger sequence.
//!
//! Everything here is recomputed from scratch on every call: there are no
//! cached or incremental counters, so each aggregation is O(n).

use serde::Serialize;

use crate::{Amount, EngineError, ResultEngine, Transaction};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: Amount,
    pub color: &'static str,
}

/// Two-bar comparison, always `[Income, Expense]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub bars: [ChartBar; 2],
}

impl ChartSeries {
    pub fn new(income: Amount, expense: Amount) -> Self {
        Self {
            bars: [
                ChartBar {
                    label: "Income",
                    value: income,
                    color: "green",
                },
                ChartBar {
                    label: "Expense",
                    value: expense,
                    color: "red",
                },
            ],
        }
    }

    pub fn values(&self) -> [Amount; 2] {
        [self.bars[0].value, self.bars[1].value]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Sum of the strictly positive amounts.
    pub income: Amount,
    /// Magnitude of the sum of the strictly negative amounts.
    pub expense: Amount,
    /// `income - expense`, i.e. the sum of all amounts.
    pub balance: Amount,
    pub chart: ChartSeries,
}

/// Running income and expense magnitudes.
///
/// Both stay within `0..=i64::MAX` cents, so `income - expense` never
/// overflows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Totals {
    income: Amount,
    expense: Amount,
}

impl Totals {
    pub(crate) fn of(sequence: &[Transaction]) -> ResultEngine<Self> {
        sequence.iter().try_fold(Self::default(), Self::with)
    }

    /// Adds one more transaction, failing if a total leaves the `i64` range.
    pub(crate) fn with(self, tx: &Transaction) -> ResultEngine<Self> {
        let overflow = || EngineError::InvalidAmount(format!("{} overflows the totals", tx.amount));

        let mut next = self;
        if tx.is_income() {
            next.income = self.income.checked_add(tx.amount).ok_or_else(overflow)?;
        } else if tx.is_expense() {
            let magnitude = tx.amount.checked_abs().ok_or_else(overflow)?;
            next.expense = self.expense.checked_add(magnitude).ok_or_else(overflow)?;
        }
        Ok(next)
    }

    fn summary(self) -> Summary {
        Summary {
            income: self.income,
            expense: self.expense,
            balance: self.income - self.expense,
            chart: ChartSeries::new(self.income, self.expense),
        }
    }
}

/// Fails with [`EngineError::InvalidAmount`] only when a total does not fit
/// in `i64` cents. Sequences built through [`crate::Ledger::append`] never do.
pub fn aggregate(sequence: &[Transaction]) -> ResultEngine<Summary> {
    Totals::of(sequence).map(Totals::summary)
}
