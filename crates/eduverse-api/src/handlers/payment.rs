//! Payment handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use eduverse_core::types::pagination::PageResponse;
use eduverse_entity::payment::{CreatePayment, Payment};

use crate::dto::request::{PaymentStatusFilter, RecordPaymentRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/payments
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePayment>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = state.payment_service.create(&auth, &req).await?;
    Ok(Json(ApiResponse::ok(payment)))
}

/// GET /api/payments/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = state.payment_service.get(&auth, payment_id).await?;
    Ok(Json(ApiResponse::ok(payment)))
}

/// POST /api/payments/{id}/record
pub async fn record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(payment_id): Path<Uuid>,
    Json(req): Json<RecordPaymentRequest>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = state
        .payment_service
        .record_payment(&auth, payment_id, req.sum)
        .await?;
    Ok(Json(ApiResponse::ok(payment)))
}

/// POST /api/payments/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = state.payment_service.cancel(&auth, payment_id).await?;
    Ok(Json(ApiResponse::ok(payment)))
}

/// GET /api/students/{id}/payments
pub async fn list_for_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(student_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Payment>>>, ApiError> {
    let page = state
        .payment_service
        .list_for_student(&auth, student_id, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/schools/{id}/payments?status=
pub async fn list_for_school(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(school_id): Path<Uuid>,
    Query(filter): Query<PaymentStatusFilter>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Payment>>>, ApiError> {
    let page = state
        .payment_service
        .list_for_school(&auth, school_id, filter.status, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}
