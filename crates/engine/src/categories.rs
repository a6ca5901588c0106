//! Category suggestions shown by the dashboard.
//!
//! The list is a UI convenience only: the ledger accepts any non-empty
//! category string.

pub const DEFAULT_CATEGORIES: [&str; 6] = ["Groceries", "Rent", "Salary", "Misc", "Dress", "Others"];

/// Returns the suggestions as owned strings, in display order.
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect()
}
