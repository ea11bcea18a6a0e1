use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::calculator::FinancingCalculator;
use crate::decimal::{Money, Rate};
use crate::payments::AmortizationSchedule;
use crate::reference::ReferenceData;
use crate::request::{FinancingRequest, ScheduleRequest};
use crate::result::FinancingResult;
use crate::server::errors::AppError;
use crate::types::CalculationType;

/// Source of response timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    /// Always reports the same instant.
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// Shared application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub calculator: FinancingCalculator,
    pub clock: Clock,
    /// Built once at startup; never mutated.
    pub reference: Arc<ReferenceData>,
}

impl AppState {
    pub fn new(clock: Clock) -> Self {
        Self {
            calculator: FinancingCalculator::new(),
            clock,
            reference: Arc::new(ReferenceData::current()),
        }
    }

    fn timestamp(&self) -> String {
        self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub success: bool,
    pub calculation_type: CalculationType,
    pub timestamp: String,
    pub data: FinancingResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub success: bool,
    pub timestamp: String,
    pub data: AmortizationSchedule,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

/// POST /api/v1/financing/calculate
///
/// Validates the request, then quotes every requested loan and lease option.
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FinancingRequest>, JsonRejection>,
) -> Result<Json<CalculationResponse>, AppError> {
    let Json(request) = payload?;
    tracing::info!(
        "POST /financing/calculate - price: {}, type: {:?}",
        request.vehicle_price,
        request.calculation_type
    );

    let data = state.calculator.compute(&request)?;

    tracing::info!(
        "Quoted {} loan and {} lease options",
        data.loan_options.len(),
        data.lease_options.len()
    );

    Ok(Json(CalculationResponse {
        success: true,
        calculation_type: request.calculation_type,
        timestamp: state.timestamp(),
        data,
    }))
}

/// POST /api/v1/financing/schedule
///
/// Month-by-month amortization for a single loan option.
pub async fn schedule(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let Json(request) = payload?;
    tracing::info!(
        "POST /financing/schedule - principal: {}, apr: {}, term: {}",
        request.principal,
        request.apr,
        request.term_months
    );

    request.validate()?;
    let start_date = request.start_date.unwrap_or_else(|| state.clock.now());

    let data = AmortizationSchedule::generate(
        Money::from_decimal(request.principal),
        Rate::from_percent(request.apr),
        request.term(),
        start_date,
    )?;

    Ok(Json(ScheduleResponse {
        success: true,
        timestamp: state.timestamp(),
        data,
    }))
}

/// GET /api/v1/financing/reference
///
/// Static market rates, fee schedules, and disclosures.
pub async fn reference(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "data": state.reference.as_ref(),
    }))
}
