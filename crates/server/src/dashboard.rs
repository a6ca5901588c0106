//! Dashboard API endpoint and the mapping from engine view state to DTOs.

use api_types::{
    dashboard::{ChartBar, DashboardView},
    transaction::{HistoryParams, SortOrder, TransactionView},
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use engine::{Dashboard, HistoryQuery, HistoryRow, Identity, SortKey};

use crate::{ServerError, server::ServerState};

pub(crate) fn history_query(params: HistoryParams) -> Result<HistoryQuery, ServerError> {
    let sort = params
        .sort
        .as_deref()
        .map(SortKey::try_from)
        .transpose()
        .map_err(ServerError::Generic)?;
    let order = match params.order.unwrap_or_default() {
        SortOrder::Asc => engine::SortOrder::Ascending,
        SortOrder::Desc => engine::SortOrder::Descending,
    };

    Ok(HistoryQuery {
        filter: params.filter,
        sort,
        order,
    })
}

fn map_row(row: HistoryRow) -> TransactionView {
    let HistoryRow { index, transaction } = row;
    TransactionView {
        index,
        text: transaction.text,
        category: transaction.category,
        amount: transaction.amount.to_string(),
        date: transaction.date.to_string(),
    }
}

pub(crate) fn view(dashboard: Dashboard, appended: Option<bool>) -> DashboardView {
    let summary = dashboard.summary;

    DashboardView {
        transactions: dashboard.rows.into_iter().map(map_row).collect(),
        income: summary.income.to_string(),
        expense: summary.expense.to_string(),
        balance: summary.balance.to_string(),
        income_display: summary.income.dollars(),
        expense_display: summary.expense.dollars(),
        balance_display: summary.balance.dollars(),
        chart: summary
            .chart
            .bars
            .iter()
            .map(|bar| ChartBar {
                label: bar.label.to_string(),
                value: bar.value.to_string(),
                color: bar.color.to_string(),
            })
            .collect(),
        appended,
    }
}

pub async fn get(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<DashboardView>, ServerError> {
    let query = history_query(params)?;
    let dashboard = state.engine.read().await.dashboard(&identity, &query)?;

    Ok(Json(view(dashboard, None)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_map_to_query() {
        let query = history_query(HistoryParams {
            filter: Some("misc".to_string()),
            sort: Some("amount".to_string()),
            order: Some(SortOrder::Desc),
        })
        .unwrap();

        assert_eq!(query.filter.as_deref(), Some("misc"));
        assert_eq!(query.sort, Some(SortKey::Amount));
        assert_eq!(query.order, engine::SortOrder::Descending);
    }

    #[test]
    fn unknown_sort_column_is_rejected() {
        let err = history_query(HistoryParams {
            sort: Some("id".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ServerError::Generic(_)));
    }
}
