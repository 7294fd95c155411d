use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::services::{fancy_calculation, record_calculation, CalculationError};
use crate::startup::AppState;

/// `GET /api/calculate/fancy`.
///
/// Failures never escape as faults: they are rendered as an `Error: ...` body.
/// The status stays 200 unless strict upstream errors are enabled.
pub async fn calculate_fancy(State(state): State<AppState>) -> Response {
    match fancy_calculation(state.numbers.as_ref()).await {
        Ok(report) => {
            record_calculation("success");
            report.into_response()
        }
        Err(e) => {
            let (outcome, strict_status) = classify(&e);
            record_calculation(outcome);

            match &e {
                CalculationError::Formatting(_) => {
                    tracing::error!(error = %e, "Fancy calculation failed")
                }
                _ => tracing::warn!(error = %e, "Fancy calculation failed"),
            }

            let status = if state.strict_upstream_errors {
                strict_status
            } else {
                StatusCode::OK
            };

            (status, format!("Error: {}", e)).into_response()
        }
    }
}

fn classify(error: &CalculationError) -> (&'static str, StatusCode) {
    match error {
        CalculationError::Upstream(_) => ("upstream_error", StatusCode::BAD_GATEWAY),
        CalculationError::MissingNumber => ("missing_number", StatusCode::BAD_GATEWAY),
        CalculationError::Formatting(_) => ("formatting_error", StatusCode::INTERNAL_SERVER_ERROR),
    }
}
