//! Axum handlers for the Contacts API.
//!
//! Extractor rejections (bad JSON, non-numeric ids, malformed query strings)
//! are turned into `ServiceError::BadRequest` so that every failure shares
//! the same `{"detail": ...}` body.

use super::AppState;
use crate::error::{ServiceError, ServiceResult};
use crate::metrics::MetricsSummary;
use crate::models::{Contact, ContactPayload, ContactUpdatePayload};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

/// Query string of the list route.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

/// Query string of the upcoming-birthdays route.
#[derive(Debug, Default, Deserialize)]
pub struct UpcomingParams {
    pub days: Option<u32>,
}

fn bad_request(rejection: impl std::fmt::Display) -> ServiceError {
    ServiceError::BadRequest(rejection.to_string())
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

pub async fn healthz(State(state): State<AppState>) -> ServiceResult<Json<Value>> {
    state.service.health().await?;
    Ok(Json(json!({ "message": "ok" })))
}

pub async fn metrics(State(state): State<AppState>) -> Json<MetricsSummary> {
    Json(state.metrics.summary())
}

pub async fn list_contacts(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ServiceResult<Json<Vec<Contact>>> {
    let Query(params) = params.map_err(bad_request)?;
    let contacts = state
        .service
        .list_contacts(params.skip, params.limit)
        .await?;
    Ok(Json(contacts))
}

pub async fn get_contact(
    State(state): State<AppState>,
    contact_id: Result<Path<i64>, PathRejection>,
) -> ServiceResult<Json<Contact>> {
    let Path(contact_id) = contact_id.map_err(bad_request)?;
    Ok(Json(state.service.get_contact(contact_id).await?))
}

pub async fn find_contacts(
    State(state): State<AppState>,
    text: Result<Path<String>, PathRejection>,
) -> ServiceResult<Json<Vec<Contact>>> {
    let Path(text) = text.map_err(bad_request)?;
    Ok(Json(state.service.find_contacts(&text).await?))
}

pub async fn upcoming_birthdays(
    State(state): State<AppState>,
    params: Result<Query<UpcomingParams>, QueryRejection>,
) -> ServiceResult<Json<Vec<Contact>>> {
    let Query(params) = params.map_err(bad_request)?;
    Ok(Json(state.service.upcoming_birthdays(params.days).await?))
}

pub async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> ServiceResult<(StatusCode, Json<Contact>)> {
    let Json(payload) = payload.map_err(bad_request)?;
    let contact = state.service.create_contact(payload).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn update_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactUpdatePayload>, JsonRejection>,
) -> ServiceResult<Json<Contact>> {
    let Json(payload) = payload.map_err(bad_request)?;
    Ok(Json(state.service.update_contact(payload).await?))
}

pub async fn remove_contact(
    State(state): State<AppState>,
    contact_id: Result<Path<i64>, PathRejection>,
) -> ServiceResult<Json<Contact>> {
    let Path(contact_id) = contact_id.map_err(bad_request)?;
    Ok(Json(state.service.remove_contact(contact_id).await?))
}
