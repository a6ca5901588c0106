use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener, spawn_with_listener};

mod categories;
mod dashboard;
mod server;
mod transactions;
mod user;

pub mod types {
    pub mod user {
        pub use api_types::user::{Login, LoginResponse, SessionView};
    }

    pub mod transaction {
        pub use api_types::transaction::{
            AmountInput, HistoryParams, SortOrder, TransactionNew, TransactionView,
        };
    }

    pub mod dashboard {
        pub use api_types::dashboard::{ChartBar, DashboardView};
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::AuthFailure => StatusCode::UNAUTHORIZED,
        EngineError::InvalidAmount(_) | EngineError::InvalidDate(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        EngineError::UnknownIdentity(_) | EngineError::Password(_) | EngineError::Export(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::UnknownIdentity(_) => {
            // Accounts and ledger disagree: a bug, not bad input.
            tracing::error!("session identity without ledger: {err}");
            "internal server error".to_string()
        }
        EngineError::Password(_) | EngineError::Export(_) => {
            tracing::error!("{err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
