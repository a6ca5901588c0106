//! Transactions API endpoints

use api_types::{
    dashboard::DashboardView,
    transaction::{AmountInput, HistoryParams, TransactionNew},
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use engine::{Amount, EXPORT_FILE_NAME, Identity, TransactionDraft, parse_date};

use crate::{
    ServerError,
    dashboard::{history_query, view},
    server::ServerState,
};

/// Turns the request body into a draft. Missing or empty fields stay `None`;
/// present fields that do not parse are rejected.
fn draft(payload: TransactionNew) -> Result<TransactionDraft, ServerError> {
    let present = |value: Option<String>| value.filter(|value| !value.trim().is_empty());

    let amount = match payload.amount {
        Some(AmountInput::Number(value)) => Some(Amount::try_from(value)?),
        Some(AmountInput::Text(text)) => present(Some(text))
            .map(|text| text.parse::<Amount>())
            .transpose()?,
        None => None,
    };
    let date = present(payload.date)
        .map(|date| parse_date(&date))
        .transpose()?;

    Ok(TransactionDraft {
        text: payload.text,
        category: payload.category,
        amount,
        date,
    })
}

pub async fn append(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Query(params): Query<HistoryParams>,
    Json(payload): Json<TransactionNew>,
) -> Result<Json<DashboardView>, ServerError> {
    let query = history_query(params)?;
    let draft = draft(payload)?;

    let mut engine = state.engine.write().await;
    let appended = engine.append(&identity, draft)?;
    let dashboard = engine.dashboard(&identity, &query)?;

    Ok(Json(view(dashboard, Some(appended))))
}

pub async fn delete_row(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Path(index): Path<usize>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<DashboardView>, ServerError> {
    let query = history_query(params)?;

    let mut engine = state.engine.write().await;
    engine.delete_row(&identity, index)?;
    let dashboard = engine.dashboard(&identity, &query)?;

    Ok(Json(view(dashboard, None)))
}

pub async fn export(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let data = state.engine.read().await.export(&identity)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        data,
    ))
}

#[cfg(test)]
mod tests {
    use engine::EngineError;

    use super::*;

    #[test]
    fn blank_fields_stay_absent() {
        let draft = draft(TransactionNew {
            text: Some("Coffee".to_string()),
            category: None,
            amount: Some(AmountInput::Text(" ".to_string())),
            date: Some(String::new()),
        })
        .unwrap();

        assert_eq!(draft.text.as_deref(), Some("Coffee"));
        assert_eq!(draft.amount, None);
        assert_eq!(draft.date, None);
        assert!(draft.complete().is_none());
    }

    #[test]
    fn present_fields_are_parsed() {
        let draft = draft(TransactionNew {
            text: Some("Coffee".to_string()),
            category: Some("Misc".to_string()),
            amount: Some(AmountInput::Text("-4.50".to_string())),
            date: Some("2024-01-01".to_string()),
        })
        .unwrap();

        let tx = draft.complete().unwrap();
        assert_eq!(tx.amount, Amount::from_cents(-450));
        assert_eq!(tx.date.to_string(), "2024-01-01");
    }

    #[test]
    fn malformed_amount_is_rejected() {
        let err = draft(TransactionNew {
            amount: Some(AmountInput::Text("four".to_string())),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ServerError::Engine(EngineError::InvalidAmount(_))));
    }

    #[test]
    fn numeric_amounts_are_accepted() {
        let payload: TransactionNew = serde_json::from_str(
            r#"{"text": "Coffee", "category": "Misc", "amount": -4.5, "date": "2024-01-01"}"#,
        )
        .unwrap();

        let tx = draft(payload).unwrap().complete().unwrap();
        assert_eq!(tx.amount, Amount::from_cents(-450));

        let err = draft(TransactionNew {
            amount: Some(AmountInput::Number(0.125)),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ServerError::Engine(EngineError::InvalidAmount(_))));
    }
}
