// src/handlers/booking.rs
//
// A superfície HTTP do fluxo de reserva: consulta de disponibilidade,
// efetivação da reserva e gestão dos agendamentos do cliente.

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        billing::{CardData, PaymentMethod, PaymentStatus},
        scheduling::{Appointment, AppointmentListItem, AppointmentStatus, SlotView},
    },
};

// =============================================================================
//  DISPONIBILIDADE
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    // Dia consultado (hora local)
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    #[schema(value_type = String, example = "2024-06-15")]
    pub date: NaiveDate,
    pub slots: Vec<SlotView>,
}

// GET /api/partners/{id}/availability?date=YYYY-MM-DD
#[utoipa::path(
    get,
    path = "/api/partners/{id}/availability",
    tag = "Reserva",
    params(
        ("id" = Uuid, Path, description = "ID do parceiro"),
        ("date" = String, Query, description = "Dia consultado (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Grade do dia com a flag de disponibilidade", body = AvailabilityResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_availability(
    State(app_state): State<AppState>,
    Path(partner_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    // Falha na leitura de conflitos não derruba a navegação: degrada
    // para conjunto vazio. A escrita re-arbitra pelo índice único.
    let booked = match app_state
        .availability_service
        .booked_times(&app_state.db_pool, partner_id, query.date)
        .await
    {
        Ok(booked) => booked,
        Err(e) => {
            tracing::warn!(
                partner_id = %partner_id,
                "Falha ao buscar conflitos, exibindo agenda sem bloqueios: {}",
                e
            );
            HashSet::new()
        }
    };

    let now = chrono::Local::now().naive_local();
    let slots = app_state
        .availability_service
        .day_slots(Some(query.date), now, &booked);

    Ok((
        StatusCode::OK,
        Json(AvailabilityResponse {
            date: query.date,
            slots,
        }),
    ))
}

// =============================================================================
//  EFETIVAÇÃO DA RESERVA
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingPayload {
    pub partner_id: Uuid,
    pub service_id: Uuid,

    #[schema(value_type = String, example = "2024-06-15T14:30:00")]
    pub date_time: NaiveDateTime,

    pub method: PaymentMethod,

    // Obrigatório quando method = credit_card; conferido e descartado
    pub card: Option<CardData>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub method: PaymentMethod,
    pub status: PaymentStatus,

    #[schema(example = "50.00")]
    pub amount: Decimal,
    pub pix_code: Option<String>,
}

// Confirmação devolvida ao cliente: o ID do agendamento mais o
// contexto original da reserva, para a tela de confirmação.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub appointment_id: Uuid,
    pub status: AppointmentStatus,

    #[schema(value_type = String, example = "2024-06-15T14:30:00")]
    pub date_time: NaiveDateTime,

    #[schema(example = "Corte masculino")]
    pub service_name: String,
    pub duration: i32,

    #[schema(example = "Barbearia do Zé")]
    pub partner_name: String,

    pub payment: PaymentSummary,
}

// POST /api/bookings
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Reserva",
    request_body = CreateBookingPayload,
    responses(
        (status = 201, description = "Reserva confirmada", body = BookingConfirmation),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Serviço ou parceiro não encontrado"),
        (status = 409, description = "Horário acabou de ser reservado por outro cliente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_booking(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let booking = app_state
        .booking_service
        .commit_booking(
            user.0.id,
            payload.partner_id,
            payload.service_id,
            payload.date_time,
            payload.method,
            payload.card,
        )
        .await?;

    let confirmation = BookingConfirmation {
        appointment_id: booking.appointment.id,
        status: booking.appointment.status,
        date_time: booking.appointment.date_time,
        service_name: booking.service.name,
        duration: booking.service.duration,
        partner_name: booking.partner.business_name,
        payment: PaymentSummary {
            method: booking.payment.method,
            status: booking.payment.status,
            amount: booking.payment.amount,
            pix_code: booking.payment.pix_code,
        },
    };

    Ok((StatusCode::CREATED, Json(confirmation)))
}

// =============================================================================
//  MEUS AGENDAMENTOS
// =============================================================================

// GET /api/appointments
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Agendamentos",
    responses(
        (status = 200, description = "Agendamentos do cliente, mais recentes primeiro", body = Vec<AppointmentListItem>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_appointments(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let appointments = app_state.booking_service.list_appointments(user.0.id).await?;

    Ok((StatusCode::OK, Json(appointments)))
}

// POST /api/appointments/{id}/cancel
#[utoipa::path(
    post,
    path = "/api/appointments/{id}/cancel",
    tag = "Agendamentos",
    params(
        ("id" = Uuid, Path, description = "ID do agendamento")
    ),
    responses(
        (status = 200, description = "Agendamento cancelado", body = Appointment),
        (status = 404, description = "Agendamento não encontrado"),
        (status = 409, description = "Status atual não permite cancelamento")
    ),
    security(("api_jwt" = []))
)]
pub async fn cancel_appointment(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = app_state
        .booking_service
        .cancel_appointment(user.0.id, id)
        .await?;

    Ok((StatusCode::OK, Json(appointment)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewPayload {
    #[validate(range(min = 1, max = 5, message = "A nota deve ser de 1 a 5."))]
    #[schema(example = 5)]
    pub rating: i32,

    pub comment: Option<String>,
}

// POST /api/appointments/{id}/review
#[utoipa::path(
    post,
    path = "/api/appointments/{id}/review",
    tag = "Agendamentos",
    params(
        ("id" = Uuid, Path, description = "ID do agendamento")
    ),
    request_body = CreateReviewPayload,
    responses(
        (status = 201, description = "Avaliação registrada"),
        (status = 404, description = "Agendamento não encontrado"),
        (status = 409, description = "Agendamento não concluído ou já avaliado")
    ),
    security(("api_jwt" = []))
)]
pub async fn review_appointment(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateReviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .booking_service
        .review_appointment(user.0.id, id, payload.rating, payload.comment.as_deref())
        .await?;

    Ok(StatusCode::CREATED)
}
