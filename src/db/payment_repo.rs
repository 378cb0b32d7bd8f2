// src/db/payment_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::billing::{Payment, PaymentMethod, PaymentStatus},
};

/// Pagamentos só são tocados dentro das transações do fluxo de reserva,
/// então o repositório não carrega pool própria.
#[derive(Clone)]
pub struct PaymentRepository;

impl PaymentRepository {
    pub fn new() -> Self {
        Self
    }

    /// Registra o pagamento do agendamento. No fluxo simulado ele já
    /// nasce 'paid'; o valor vem congelado do preço do serviço.
    pub async fn create_payment<'e, E>(
        &self,
        executor: E,
        appointment_id: Uuid,
        user_id: Uuid,
        method: PaymentMethod,
        amount: Decimal,
        status: PaymentStatus,
        pix_code: Option<&str>,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (appointment_id, user_id, method, amount, status, pix_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                id, appointment_id, user_id, method, amount, status,
                pix_code, transaction_id, created_at, updated_at
            "#,
        )
        .bind(appointment_id)
        .bind(user_id)
        .bind(method)
        .bind(amount)
        .bind(status)
        .bind(pix_code)
        .fetch_one(executor)
        .await?;

        Ok(payment)
    }

    pub async fn find_by_appointment<'e, E>(
        &self,
        executor: E,
        appointment_id: Uuid,
    ) -> Result<Option<Payment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            SELECT
                id, appointment_id, user_id, method, amount, status,
                pix_code, transaction_id, created_at, updated_at
            FROM payments
            WHERE appointment_id = $1
            "#,
        )
        .bind(appointment_id)
        .fetch_optional(executor)
        .await?;

        Ok(payment)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, appointment_id, user_id, method, amount, status,
                pix_code, transaction_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(payment)
    }
}
