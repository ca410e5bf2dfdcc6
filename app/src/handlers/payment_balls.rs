use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::{
    core::state::AppState,
    repos::payment_balls::{
        CreatePaymentBall, PaymentBallFilter, PaymentBallView, PaymentBallsRepo, UpdatePaymentBall,
    },
    utils::response::{APIError, APIResponse},
};

pub async fn list_payment_balls(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<PaymentBallFilter>, QueryRejection>,
) -> Result<Json<Vec<PaymentBallView>>, APIError> {
    let Query(filter) = filter?;

    let payment_balls_repo = PaymentBallsRepo::new(state.database.clone());
    let payment_balls = payment_balls_repo.list(filter).await?;

    Ok(Json(payment_balls.into_iter().map(PaymentBallView::from).collect()))
}

/// Same as the filtered list, but the job card is mandatory.
pub async fn list_by_job_card(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<PaymentBallFilter>, QueryRejection>,
) -> Result<Json<Vec<PaymentBallView>>, APIError> {
    let Query(filter) = filter?;
    if filter.job_card.as_deref().map_or(true, str::is_empty) {
        return Err(APIError::BadRequest(
            "job_card parameter is required".to_string(),
        ));
    }

    let payment_balls_repo = PaymentBallsRepo::new(state.database.clone());
    let payment_balls = payment_balls_repo.list(filter).await?;

    Ok(Json(payment_balls.into_iter().map(PaymentBallView::from).collect()))
}

pub async fn get_payment_ball(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PaymentBallView>, APIError> {
    let payment_balls_repo = PaymentBallsRepo::new(state.database.clone());
    let payment_ball = payment_balls_repo.get(&id).await?;

    Ok(Json(payment_ball.into()))
}

pub async fn create_payment_ball(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreatePaymentBall>, JsonRejection>,
) -> Result<(StatusCode, Json<PaymentBallView>), APIError> {
    let Json(payload) = payload?;

    let payment_balls_repo = PaymentBallsRepo::new(state.database.clone());
    let payment_ball = payment_balls_repo.create(payload).await.map_err(|e| {
        if let Some(errors) = e.validation_errors() {
            warn!("Rejected payment ball: {:?}", errors);
        }
        e
    })?;
    info!(
        "Created payment ball {} for job card {}",
        payment_ball.id, payment_ball.job_card_id
    );

    Ok((StatusCode::CREATED, Json(payment_ball.into())))
}

pub async fn update_payment_ball(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePaymentBall>, JsonRejection>,
) -> Result<Json<PaymentBallView>, APIError> {
    let Json(payload) = payload?;

    let payment_balls_repo = PaymentBallsRepo::new(state.database.clone());
    let payment_ball = payment_balls_repo.update(&id, payload).await.map_err(|e| {
        if let Some(errors) = e.validation_errors() {
            warn!("Rejected update to payment ball {}: {:?}", id, errors);
        }
        e
    })?;

    Ok(Json(payment_ball.into()))
}

/// Idempotent: a payment ball that already has an invoice, or is not
/// purple, comes back unchanged.
pub async fn generate_invoice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PaymentBallView>, APIError> {
    let payment_balls_repo = PaymentBallsRepo::new(state.database.clone());
    let payment_ball = payment_balls_repo.generate_invoice(&id).await?;

    Ok(Json(payment_ball.into()))
}

pub async fn delete_payment_ball(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<APIResponse, APIError> {
    let payment_balls_repo = PaymentBallsRepo::new(state.database.clone());
    payment_balls_repo.delete(&id).await?;
    info!("Deleted payment ball {}", id);

    Ok(APIResponse::NoContent)
}
