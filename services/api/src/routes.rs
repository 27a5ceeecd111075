use crate::infra::{AppState, Marketplace};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use matchflow::error::AppError;
use matchflow::marketplace::{
    fetch_dataset, Action, ActionOutcome, Screen, UserAccount, ViewEvent,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

/// Id attribute of the triggering control; pages send either a number or its string form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ControlId {
    Number(u64),
    Text(String),
}

impl ControlId {
    fn raw(&self) -> String {
        match self {
            ControlId::Number(value) => value.to_string(),
            ControlId::Text(value) => value.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActionRequest {
    pub(crate) action: String,
    pub(crate) id: ControlId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignUpRequest {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) password: String,
    #[serde(default)]
    pub(crate) confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) password: String,
}

pub(crate) fn marketplace_router(marketplace: Marketplace) -> Router {
    Router::new()
        .route("/api/v1/screen", get(screen_endpoint))
        .route("/api/v1/screen/grid", get(grid_endpoint))
        .route("/api/v1/events", post(event_endpoint))
        .route("/api/v1/actions", post(action_endpoint))
        .route("/api/v1/dataset/reload", post(reload_endpoint))
        .route("/api/v1/accounts/signup", post(signup_endpoint))
        .route("/api/v1/accounts/login", post(login_endpoint))
        .route("/api/v1/accounts/logout", post(logout_endpoint))
        .with_state(marketplace)
}

pub(crate) fn with_marketplace_routes(marketplace: Marketplace) -> Router {
    marketplace_router(marketplace)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn screen_endpoint(State(marketplace): State<Marketplace>) -> Json<Screen> {
    Json(marketplace.view().screen(Utc::now()))
}

pub(crate) async fn grid_endpoint(State(marketplace): State<Marketplace>) -> impl IntoResponse {
    let (grid, _) = marketplace.view().render_grid(Utc::now());
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        grid,
    )
}

pub(crate) async fn event_endpoint(
    State(marketplace): State<Marketplace>,
    Json(event): Json<ViewEvent>,
) -> Json<Screen> {
    let now = Utc::now();
    let mut view = marketplace.view();
    view.apply(event, now);
    Json(view.screen(now))
}

pub(crate) async fn action_endpoint(
    State(marketplace): State<Marketplace>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<ActionOutcome>, AppError> {
    let action = Action::from_control(&request.action, &request.id.raw())?;
    let outcome = marketplace.view().dispatch(action, Utc::now())?;
    Ok(Json(outcome))
}

pub(crate) async fn reload_endpoint(State(marketplace): State<Marketplace>) -> Json<Screen> {
    let loaded = fetch_dataset(marketplace.source()).await;
    info!(source = %marketplace.source(), ok = loaded.is_ok(), "dataset reload requested");

    let mut view = marketplace.view();
    view.replace_dataset(loaded);
    Json(view.screen(Utc::now()))
}

pub(crate) async fn signup_endpoint(
    State(marketplace): State<Marketplace>,
    Json(request): Json<SignUpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = marketplace.accounts().sign_up(
        &request.name,
        &request.email,
        &request.password,
        &request.confirm_password,
    )?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub(crate) async fn login_endpoint(
    State(marketplace): State<Marketplace>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserAccount>, AppError> {
    let user = marketplace
        .accounts()
        .log_in(&request.email, &request.password)?;
    Ok(Json(user))
}

pub(crate) async fn logout_endpoint(State(marketplace): State<Marketplace>) -> StatusCode {
    marketplace.accounts().log_out();
    StatusCode::NO_CONTENT
}
