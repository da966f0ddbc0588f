use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use engine::{Engine, EngineError, User};

use std::{net::SocketAddr, sync::Arc};

use crate::{ServerError, categories, entry, user};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// The account that authenticated the current request.
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

/// Verify the HTTP Basic credentials against the stored password hash and
/// attach the account to the request.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(TypedHeader(auth_header)) = auth_header else {
        return Err(EngineError::Unauthorized.into());
    };
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(EngineError::Unauthorized.into());
    }

    let user = state
        .engine
        .authenticate(auth_header.username(), auth_header.password())
        .await?;

    request.extensions_mut().insert(AuthUser(user));
    Ok(next.run(request).await)
}

/// Build the application router. Everything but registration requires
/// authentication.
pub fn router(state: ServerState) -> Router {
    let authenticated = Router::new()
        .route("/user/{username}", get(user::get))
        .route("/entries", get(entry::list).post(entry::entry_new))
        .route("/entries/random", post(entry::random))
        .route("/entries/between/dates/{from}/{to}", get(entry::between_dates))
        .route("/entries/between/price/{from}/{to}", get(entry::between_prices))
        .route("/entries/{id}/category/{category}", put(entry::update_category))
        .route("/category/all/count", get(categories::all_count))
        .route("/category/expense/count", get(categories::expense_count))
        .route("/category/top-spending", get(categories::top_spending))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/user/register", post(user::register))
        .merge(authenticated)
        .with_state(state)
}

pub async fn run(engine: Engine, addr: SocketAddr) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
