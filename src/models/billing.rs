// src/models/billing.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Pix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    /// pending -> paid | failed; paid -> refunded.
    /// No fluxo simulado o pagamento nasce 'paid' e o cancelamento
    /// do agendamento o leva a 'refunded'.
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!((self, next), (Pending, Paid) | (Pending, Failed) | (Paid, Refunded))
    }
}

// --- PAGAMENTO ---
// Um por agendamento; o valor é congelado no preço do serviço
// no momento da reserva.

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub user_id: Uuid,

    pub method: PaymentMethod,

    #[schema(example = "50.00")]
    pub amount: Decimal,

    pub status: PaymentStatus,

    // Somente para method = pix
    pub pix_code: Option<String>,
    pub transaction_id: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados de cartão: validados por presença e DESCARTADOS.
// Nunca persistimos nada disso.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    #[schema(example = "4111 1111 1111 1111")]
    pub number: String,
    pub holder_name: String,
    #[schema(example = "12/30")]
    pub expiry: String,
    pub cvv: String,
}

impl CardData {
    pub fn is_complete(&self) -> bool {
        !self.number.trim().is_empty()
            && !self.holder_name.trim().is_empty()
            && !self.expiry.trim().is_empty()
            && !self.cvv.trim().is_empty()
    }
}

/// Gera a referência PIX simulada exibida ao cliente.
pub fn generate_pix_code() -> String {
    format!("PIX{}", Uuid::new_v4().simple().to_string().to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maquina_de_estados_do_pagamento() {
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Paid));
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Failed));
        assert!(PaymentStatus::Paid.can_transition_to(PaymentStatus::Refunded));

        assert!(!PaymentStatus::Paid.can_transition_to(PaymentStatus::Pending));
        assert!(!PaymentStatus::Failed.can_transition_to(PaymentStatus::Paid));
        assert!(!PaymentStatus::Refunded.can_transition_to(PaymentStatus::Paid));
    }

    // Guarda usada pelo cancelamento: só pagamento aprovado é estornado.
    #[test]
    fn estorno_so_sai_de_paid() {
        assert!(PaymentStatus::Paid.can_transition_to(PaymentStatus::Refunded));
        assert!(!PaymentStatus::Pending.can_transition_to(PaymentStatus::Refunded));
        assert!(!PaymentStatus::Failed.can_transition_to(PaymentStatus::Refunded));
        assert!(!PaymentStatus::Refunded.can_transition_to(PaymentStatus::Refunded));
    }

    #[test]
    fn pix_code_tem_prefixo_e_e_unico() {
        let a = generate_pix_code();
        let b = generate_pix_code();
        assert!(a.starts_with("PIX"));
        assert!(a.len() > 3);
        assert_ne!(a, b);
    }

    #[test]
    fn cartao_incompleto_e_rejeitado() {
        let card = CardData {
            number: "4111 1111 1111 1111".into(),
            holder_name: "MARIA DA SILVA".into(),
            expiry: "12/30".into(),
            cvv: "".into(),
        };
        assert!(!card.is_complete());

        let card = CardData { cvv: "123".into(), ..card };
        assert!(card.is_complete());
    }
}
