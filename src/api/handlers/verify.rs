//! Handler for listing verification.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Utc;
use serde_json::json;

use crate::api::dto::verify::{VerificationSummary, VerifyRequest, VerifyResponse};
use crate::application::services::Verification;
use crate::error::AppError;
use crate::state::AppState;

/// Verifies a listing and computes rough investment metrics.
///
/// # Endpoint
///
/// `POST /api/v1/properties/verify`
///
/// # Request Body
///
/// ```json
/// { "address": "1 Main St", "city": "Austin", "state": "TX", "list_price": 450000 }
/// ```
///
/// # Response
///
/// **200 OK** in both outcomes. Missing address fields yield
/// `{"is_valid": false, "issues": "Missing required fields: ..."}`.
///
/// # Errors
///
/// - **400 Bad Request**: Body is not valid JSON
pub async fn verify_handler(
    State(state): State<AppState>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>, AppError> {
    let Json(req) = body.map_err(|e| {
        AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
    })?;

    let outcome = state.analysis_service.verify(
        req.address.as_deref(),
        req.city.as_deref(),
        req.state.as_deref(),
        req.list_price,
    );

    let response = match outcome {
        Verification::Invalid { missing } => VerifyResponse::Invalid {
            is_valid: false,
            issues: format!("Missing required fields: {}", missing.join(", ")),
        },
        Verification::Valid {
            confidence_score,
            data_quality,
            metrics,
        } => VerifyResponse::Valid {
            is_valid: true,
            verification: VerificationSummary {
                address_verified: true,
                data_quality,
                confidence_score,
            },
            metrics,
            calculated_at: Utc::now(),
        },
    };

    Ok(Json(response))
}
