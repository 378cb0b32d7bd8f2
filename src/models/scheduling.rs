// src/models/scheduling.rs

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS ---

// Mapeia o CREATE TYPE appointment_status do banco.
// 'canceled' e 'completed' são terminais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Canceled,
    Completed,
}

impl AppointmentStatus {
    /// Máquina de estados do agendamento:
    /// pending -> confirmed | canceled
    /// confirmed -> canceled | completed
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Canceled) | (Confirmed, Canceled) | (Confirmed, Completed)
        )
    }

    /// Status que ocupam um horário na agenda do parceiro.
    /// Cancelado libera o horário; concluído é histórico.
    pub fn blocks_slot(self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }

    /// O conjunto que a consulta de conflitos usa como filtro de status.
    pub fn active() -> Vec<AppointmentStatus> {
        use AppointmentStatus::*;
        [Pending, Confirmed, Canceled, Completed]
            .into_iter()
            .filter(|s| s.blocks_slot())
            .collect()
    }
}

// --- AGENDAMENTO ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub partner_id: Uuid,
    pub service_id: Uuid,

    // Hora local (parede) do atendimento. Sem fuso: operação mono-região.
    #[schema(value_type = String, example = "2024-06-15T14:30:00")]
    pub date_time: NaiveDateTime,

    pub status: AppointmentStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha da lista "Meus agendamentos": agendamento + nomes + status do pagamento
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentListItem {
    pub id: Uuid,

    #[schema(value_type = String, example = "2024-06-15T14:30:00")]
    pub date_time: NaiveDateTime,
    pub status: AppointmentStatus,

    #[schema(example = "Corte masculino")]
    pub service_name: String,
    pub service_duration: i32,

    #[schema(example = "Barbearia do Zé")]
    pub partner_name: String,

    pub payment_status: Option<crate::models::billing::PaymentStatus>,
}

// --- GRADE DE HORÁRIOS ---

// Janela de funcionamento fixa do produto: 08h às 18h, passos de 30min.
// Valor efêmero, recomputado a cada consulta; nada disso é persistido.
#[derive(Debug, Clone, Copy)]
pub struct SlotGridOptions {
    pub open_hour: u32,
    pub close_hour: u32,
    pub step_minutes: u32,
}

impl Default for SlotGridOptions {
    fn default() -> Self {
        Self {
            open_hour: 8,
            close_hour: 18,
            step_minutes: 30,
        }
    }
}

// Um horário candidato oferecido (ou não) ao cliente
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    #[schema(value_type = String, example = "14:30")]
    #[serde(serialize_with = "serialize_hhmm")]
    pub time: NaiveTime,
    pub available: bool,
}

// O app mostra os horários como "HH:MM"
fn serialize_hhmm<S: serde::Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&time.format("%H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_pode_confirmar_ou_cancelar() {
        assert!(AppointmentStatus::Pending.can_transition_to(AppointmentStatus::Confirmed));
        assert!(AppointmentStatus::Pending.can_transition_to(AppointmentStatus::Canceled));
        assert!(!AppointmentStatus::Pending.can_transition_to(AppointmentStatus::Completed));
    }

    #[test]
    fn confirmed_pode_cancelar_ou_concluir() {
        assert!(AppointmentStatus::Confirmed.can_transition_to(AppointmentStatus::Canceled));
        assert!(AppointmentStatus::Confirmed.can_transition_to(AppointmentStatus::Completed));
        assert!(!AppointmentStatus::Confirmed.can_transition_to(AppointmentStatus::Pending));
    }

    #[test]
    fn estados_terminais_nao_saem() {
        for next in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Canceled,
            AppointmentStatus::Completed,
        ] {
            assert!(!AppointmentStatus::Canceled.can_transition_to(next));
            assert!(!AppointmentStatus::Completed.can_transition_to(next));
        }
    }

    #[test]
    fn apenas_pending_e_confirmed_ocupam_horario() {
        assert!(AppointmentStatus::Pending.blocks_slot());
        assert!(AppointmentStatus::Confirmed.blocks_slot());
        assert!(!AppointmentStatus::Canceled.blocks_slot());
        assert!(!AppointmentStatus::Completed.blocks_slot());
    }

    #[test]
    fn conjunto_ativo_acompanha_a_maquina_de_estados() {
        assert_eq!(
            AppointmentStatus::active(),
            vec![AppointmentStatus::Pending, AppointmentStatus::Confirmed]
        );
    }
}
