use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;
    use uuid::Uuid;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub username: String,
        pub password: String,
    }

    /// Returned by a successful login. `token` goes in
    /// `Authorization: Bearer <token>` on every other request.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub token: Uuid,
        pub username: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SessionView {
        pub username: String,
    }
}

pub mod transaction {
    use super::*;

    /// Amount as typed in a form (`"-4,50"`) or sent as a JSON number (`-4.5`).
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum AmountInput {
        Number(f64),
        Text(String),
    }

    /// Append request. Every field may be missing: an incomplete request is
    /// ignored by the server rather than rejected.
    ///
    /// `date` is `YYYY-MM-DD`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub text: Option<String>,
        pub category: Option<String>,
        pub amount: Option<AmountInput>,
        pub date: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransactionView {
        /// Position in the ledger, used to delete the row.
        pub index: usize,
        pub text: String,
        pub category: String,
        pub amount: String,
        pub date: String,
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SortOrder {
        #[default]
        Asc,
        Desc,
    }

    /// Query string of `GET /dashboard`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct HistoryParams {
        pub filter: Option<String>,
        /// One of `text`, `category`, `amount`, `date`.
        pub sort: Option<String>,
        pub order: Option<SortOrder>,
    }
}

pub mod dashboard {
    use super::*;
    use crate::transaction::TransactionView;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ChartBar {
        pub label: String,
        pub value: String,
        pub color: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardView {
        pub transactions: Vec<TransactionView>,
        pub income: String,
        pub expense: String,
        pub balance: String,
        pub income_display: String,
        pub expense_display: String,
        pub balance_display: String,
        pub chart: Vec<ChartBar>,
        /// Set by append requests only: `false` when the request was
        /// incomplete and ignored.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub appended: Option<bool>,
    }
}

pub mod categories {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Categories {
        pub categories: Vec<String>,
    }
}
