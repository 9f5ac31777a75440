//! Billing handlers

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use domain_billing::request::parse_tax_id_filter;
use domain_billing::{parse_record_id, BillingRecordRequest};
use tracing::instrument;

use crate::dto::billing::*;
use crate::extract::ApiQuery;
use crate::{error::ApiError, AppState};

const PERIOD_DATE_FORMAT: &str = "%Y-%m-%d";

/// `POST /api/cobrancas`
///
/// A missing or unreadable body counts as a request with every field blank.
pub async fn create_billing_record(
    State(state): State<AppState>,
    body: Option<Json<BillingRecordInput>>,
) -> Result<Json<BillingRecordAccepted>, ApiError> {
    let request = body.map(|Json(input)| BillingRecordRequest::from(input));
    accept(&state, request).await
}

/// `PUT /api/cobrancas?dataVencimento=&cpf=&valorcobranca=`
pub async fn create_billing_record_from_query(
    State(state): State<AppState>,
    ApiQuery(input): ApiQuery<BillingRecordInput>,
) -> Result<Json<BillingRecordAccepted>, ApiError> {
    accept(&state, Some(input.into())).await
}

async fn accept(
    state: &AppState,
    request: Option<BillingRecordRequest>,
) -> Result<Json<BillingRecordAccepted>, ApiError> {
    let echo = request.clone().unwrap_or_default();
    let record = state.billing.create(request).await?;
    Ok(Json(BillingRecordAccepted::new(&record, echo)))
}

/// `GET /api/cobrancas/:id`
#[instrument(skip(state))]
pub async fn get_billing_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BillingRecordResponse>, ApiError> {
    let record_id = parse_record_id(&id)?;
    state
        .billing
        .get(record_id)
        .await?
        .map(|record| Json(record.into()))
        .ok_or_else(|| ApiError::NotFound(format!("Billing record {} not found", record_id)))
}

/// `GET /api/cobrancas?cpf=&mesref=`
pub async fn list_billing_records(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListBillingRecordsQuery>,
) -> Result<Json<Vec<BillingRecordResponse>>, ApiError> {
    let records = state.billing.list(query.into()).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// `GET /api/cobrancas/periodo?inicio=&fim=&cpf=`
pub async fn list_billing_records_by_period(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> Result<Json<Vec<BillingRecordResponse>>, ApiError> {
    let start = parse_period_date("inicio", query.start.as_deref())?;
    let end = parse_period_date("fim", query.end.as_deref())?;
    let tax_id = parse_tax_id_filter(query.tax_id.as_deref())?;

    let records = state
        .billing
        .list_between(start, end, tax_id.as_ref())
        .await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

fn parse_period_date(name: &str, value: Option<&str>) -> Result<NaiveDate, ApiError> {
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("'{}' is required", name)))?;
    NaiveDate::parse_from_str(value, PERIOD_DATE_FORMAT)
        .map_err(|_| ApiError::BadRequest(format!("'{}' must be a YYYY-MM-DD date", name)))
}
