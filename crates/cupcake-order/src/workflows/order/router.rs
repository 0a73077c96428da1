use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::share::ShareTarget;
use super::wizard::OrderWizard;
use crate::error::AppError;

/// Shared handler state: the single in-memory wizard plus its share hook.
pub struct OrderRouterState<S> {
    pub wizard: Arc<OrderWizard>,
    pub share_target: Arc<S>,
}

#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct FlavorRequest {
    pub flavor: String,
}

#[derive(Debug, Deserialize)]
pub struct PickupRequest {
    pub pickup_date: String,
}

/// Router builder exposing the ordering wizard to a remote renderer.
pub fn order_router<S>(wizard: Arc<OrderWizard>, share_target: Arc<S>) -> Router
where
    S: ShareTarget + 'static,
{
    let state = Arc::new(OrderRouterState {
        wizard,
        share_target,
    });

    Router::new()
        .route("/api/v1/order", get(view_handler::<S>))
        .route("/api/v1/order/start", post(start_handler::<S>))
        .route("/api/v1/order/flavor", post(flavor_handler::<S>))
        .route("/api/v1/order/pickup", post(pickup_handler::<S>))
        .route("/api/v1/order/advance", post(advance_handler::<S>))
        .route("/api/v1/order/back", post(back_handler::<S>))
        .route("/api/v1/order/cancel", post(cancel_handler::<S>))
        .route(
            "/api/v1/order/share",
            get(share_preview_handler::<S>).post(share_handler::<S>),
        )
        .with_state(state)
}

pub(crate) async fn view_handler<S>(State(state): State<Arc<OrderRouterState<S>>>) -> Response
where
    S: ShareTarget + 'static,
{
    view_response(&state.wizard)
}

pub(crate) async fn start_handler<S>(
    State(state): State<Arc<OrderRouterState<S>>>,
    Json(request): Json<QuantityRequest>,
) -> Result<Response, AppError>
where
    S: ShareTarget + 'static,
{
    state.wizard.start_order(request.quantity)?;
    Ok(view_response(&state.wizard))
}

pub(crate) async fn flavor_handler<S>(
    State(state): State<Arc<OrderRouterState<S>>>,
    Json(request): Json<FlavorRequest>,
) -> Response
where
    S: ShareTarget + 'static,
{
    state.wizard.select_flavor(&request.flavor);
    view_response(&state.wizard)
}

pub(crate) async fn pickup_handler<S>(
    State(state): State<Arc<OrderRouterState<S>>>,
    Json(request): Json<PickupRequest>,
) -> Response
where
    S: ShareTarget + 'static,
{
    state.wizard.select_pickup_date(&request.pickup_date);
    view_response(&state.wizard)
}

pub(crate) async fn advance_handler<S>(
    State(state): State<Arc<OrderRouterState<S>>>,
) -> Result<Response, AppError>
where
    S: ShareTarget + 'static,
{
    state.wizard.advance()?;
    Ok(view_response(&state.wizard))
}

pub(crate) async fn back_handler<S>(State(state): State<Arc<OrderRouterState<S>>>) -> Response
where
    S: ShareTarget + 'static,
{
    state.wizard.back();
    view_response(&state.wizard)
}

pub(crate) async fn cancel_handler<S>(State(state): State<Arc<OrderRouterState<S>>>) -> Response
where
    S: ShareTarget + 'static,
{
    state.wizard.cancel();
    view_response(&state.wizard)
}

pub(crate) async fn share_preview_handler<S>(
    State(state): State<Arc<OrderRouterState<S>>>,
) -> Result<Response, AppError>
where
    S: ShareTarget + 'static,
{
    let payload = state.wizard.share_payload()?;
    Ok((StatusCode::OK, Json(payload)).into_response())
}

pub(crate) async fn share_handler<S>(
    State(state): State<Arc<OrderRouterState<S>>>,
) -> Result<Response, AppError>
where
    S: ShareTarget + 'static,
{
    let payload = state.wizard.share(state.share_target.as_ref())?;
    Ok((StatusCode::ACCEPTED, Json(payload)).into_response())
}

fn view_response(wizard: &OrderWizard) -> Response {
    (StatusCode::OK, Json(wizard.view())).into_response()
}
