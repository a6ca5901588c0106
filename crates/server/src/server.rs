use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tokio::sync::RwLock;
use uuid::Uuid;

use std::sync::Arc;

use crate::{categories, dashboard, transactions, user};
use engine::Engine;

/// Shared handle to the process-wide engine.
///
/// Every handler goes through the same lock: mutations take the write half,
/// so two appends for the same identity can never interleave.
#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<RwLock<Engine>>,
}

impl ServerState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }
}

/// Token of the session that authenticated the current request.
#[derive(Clone, Copy, Debug)]
pub struct SessionToken(pub Uuid);

async fn auth(
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    let token = Uuid::parse_str(bearer.token()).map_err(|_| StatusCode::UNAUTHORIZED)?;

    let identity = state
        .engine
        .read()
        .await
        .current_identity(&token)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(identity);
    request.extensions_mut().insert(SessionToken(token));
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/logout", post(user::logout))
        .route("/session", get(user::session))
        .route("/dashboard", get(dashboard::get))
        .route("/transactions", post(transactions::append))
        .route("/transactions/export", get(transactions::export))
        .route("/transactions/{index}", delete(transactions::delete_row))
        .route("/categories", get(categories::list))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/login", post(user::login))
        .merge(protected)
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::new(engine))).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
