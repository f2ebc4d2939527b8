// src/routes/appointment_routes.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    models::{AppState, AppointmentRecord, AppointmentStatus},
};

pub fn router() -> Router<AppState> {
    // The trailing-slash form is its own route; axum does not collapse the two.
    Router::new()
        .route(
            "/appointments",
            post(create_appointment).get(list_appointments),
        )
        .route(
            "/appointments/",
            post(create_appointment).get(list_appointments),
        )
        .route("/appointments/{reference_id}", get(get_appointment))
}

/* ============================================================
   DTOs
   ============================================================ */

// Unknown fields, including any client-supplied status, date or reference
// identifier, are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_name: String,
    pub contact_number: String,
}

#[derive(Debug, Serialize)]
pub struct CreateAppointmentResponse {
    pub reference_id: String,
    pub status: AppointmentStatus,
    pub message: String,
    pub pdf_path: String,
}

/* ============================================================
   POST /appointments (create)
   ============================================================ */

pub async fn create_appointment(
    State(state): State<AppState>,
    Json(req): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<CreateAppointmentResponse>), ApiError> {
    let record = state
        .registry
        .create(req.patient_name, req.contact_number)
        .await?;
    tracing::info!(reference_id = %record.reference_id, "appointment scheduled");

    // The record commits first; a failed document write surfaces as a 500
    // with the record kept.
    let pdf_path = match state.documents.generate(&record) {
        Ok(path) => path,
        Err(err) => {
            tracing::error!(
                reference_id = %record.reference_id,
                error = %err,
                "confirmation document failed"
            );
            return Err(err.into());
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(CreateAppointmentResponse {
            reference_id: record.reference_id,
            status: AppointmentStatus::Confirmed,
            message: "Appointment scheduled successfully".to_string(),
            pdf_path: pdf_path.display().to_string(),
        }),
    ))
}

/* ============================================================
   GET /appointments/{reference_id}
   ============================================================ */

pub async fn get_appointment(
    State(state): State<AppState>,
    Path(reference_id): Path<String>,
) -> Result<Json<AppointmentRecord>, ApiError> {
    let record = state.registry.get(&reference_id).await?;
    Ok(Json(record))
}

/* ============================================================
   GET /appointments (list)
   ============================================================ */

pub async fn list_appointments(State(state): State<AppState>) -> Json<Vec<AppointmentRecord>> {
    Json(state.registry.list().await)
}
