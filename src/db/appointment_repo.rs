// src/db/appointment_repo.rs

use chrono::NaiveDateTime;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::remap_unique_violation,
    models::scheduling::{Appointment, AppointmentListItem, AppointmentStatus},
};

#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Horários já consumidos na agenda do parceiro dentro do dia.
    /// O conjunto de status que ocupa horário vem da máquina de estados
    /// (`AppointmentStatus::active`): cancelado libera a vaga e
    /// concluído é histórico.
    pub async fn find_booked_times<'e, E>(
        &self,
        executor: E,
        partner_id: Uuid,
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> Result<Vec<NaiveDateTime>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let times = sqlx::query_scalar::<_, NaiveDateTime>(
            r#"
            SELECT date_time
            FROM appointments
            WHERE partner_id = $1
              AND date_time >= $2
              AND date_time <= $3
              AND status = ANY($4)
            "#,
        )
        .bind(partner_id)
        .bind(day_start)
        .bind(day_end)
        .bind(AppointmentStatus::active())
        .fetch_all(executor)
        .await?;

        Ok(times)
    }

    /// Insere o agendamento com status 'pending'.
    /// O índice único parcial (parceiro + horário + status ativo) é o
    /// árbitro em corridas: o segundo cliente recebe SlotUnavailable.
    pub async fn create_appointment<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        partner_id: Uuid,
        service_id: Uuid,
        date_time: NaiveDateTime,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (user_id, partner_id, service_id, date_time, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING id, user_id, partner_id, service_id, date_time, status, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(partner_id)
        .bind(service_id)
        .bind(date_time)
        .fetch_one(executor)
        .await
        .map_err(|e| remap_unique_violation(e, AppError::SlotUnavailable))?;

        Ok(appointment)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, user_id, partner_id, service_id, date_time, status, created_at, updated_at
            FROM appointments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(appointment)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, partner_id, service_id, date_time, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::AppointmentNotFound)?;

        Ok(appointment)
    }

    /// Lista "Meus agendamentos": mais recentes primeiro, com nomes do
    /// serviço/parceiro e o status do pagamento associado.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<AppointmentListItem>, AppError> {
        let items = sqlx::query_as::<_, AppointmentListItem>(
            r#"
            SELECT
                a.id,
                a.date_time,
                a.status,
                s.name AS service_name,
                s.duration AS service_duration,
                pt.business_name AS partner_name,
                pay.status AS payment_status
            FROM appointments a
            INNER JOIN services s ON s.id = a.service_id
            INNER JOIN partners pt ON pt.id = a.partner_id
            LEFT JOIN payments pay ON pay.appointment_id = a.id
            WHERE a.user_id = $1
            ORDER BY a.date_time DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
