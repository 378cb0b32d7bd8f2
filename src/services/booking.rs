// src/services/booking.rs
//
// O "committer" da reserva: transforma a seleção (parceiro, serviço,
// horário, forma de pagamento) em Appointment + Payment persistidos,
// em uma única transação voltada ao cliente.

use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AppointmentRepository, CatalogRepository, PaymentRepository},
    models::{
        billing::{self, CardData, Payment, PaymentMethod, PaymentStatus},
        catalog::{Partner, Service},
        scheduling::{Appointment, AppointmentListItem, AppointmentStatus},
    },
};

/// Resultado do commit: o agendamento confirmado mais o contexto
/// original da reserva, para a tela de confirmação.
#[derive(Debug)]
pub struct CommittedBooking {
    pub appointment: Appointment,
    pub payment: Payment,
    pub service: Service,
    pub partner: Partner,
}

#[derive(Clone)]
pub struct BookingService {
    appointment_repo: AppointmentRepository,
    payment_repo: PaymentRepository,
    catalog_repo: CatalogRepository,
    pool: PgPool,
}

impl BookingService {
    pub fn new(
        appointment_repo: AppointmentRepository,
        payment_repo: PaymentRepository,
        catalog_repo: CatalogRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            appointment_repo,
            payment_repo,
            catalog_repo,
            pool,
        }
    }

    /// Efetiva a reserva em três passos, todos dentro da MESMA transação:
    /// 1. insere o Appointment com status 'pending';
    /// 2. insere o Payment já 'paid' (pagamento simulado — PIX ganha uma
    ///    referência gerada, dados de cartão são conferidos e descartados);
    /// 3. transiciona o Appointment para 'confirmed'.
    ///
    /// Falha em qualquer passo desfaz tudo: a reserva é tudo-ou-nada.
    /// Não revalidamos o predicado de disponibilidade aqui; sob corrida,
    /// o índice único de horário ativo decide e o perdedor recebe
    /// SlotUnavailable.
    pub async fn commit_booking(
        &self,
        user_id: Uuid,
        partner_id: Uuid,
        service_id: Uuid,
        date_time: NaiveDateTime,
        method: PaymentMethod,
        card: Option<CardData>,
    ) -> Result<CommittedBooking, AppError> {
        // Cartão: validação de presença apenas. Nada é persistido.
        if method == PaymentMethod::CreditCard
            && !card.as_ref().is_some_and(CardData::is_complete)
        {
            return Err(AppError::IncompleteCardData);
        }

        let mut tx = self.pool.begin().await?;

        // Contexto da reserva: o valor do pagamento é congelado no preço
        // atual do serviço, lido dentro da transação.
        let service = self
            .catalog_repo
            .find_service(&mut *tx, service_id)
            .await?
            .ok_or(AppError::ServiceNotFound)?;

        let partner = self
            .catalog_repo
            .find_partner(&mut *tx, partner_id)
            .await?
            .ok_or(AppError::PartnerNotFound)?;

        // Passo 1: agendamento pendente
        let appointment = self
            .appointment_repo
            .create_appointment(&mut *tx, user_id, partner_id, service_id, date_time)
            .await?;

        // Passo 2: pagamento simulado — sempre aprovado
        let pix_code = match method {
            PaymentMethod::Pix => Some(billing::generate_pix_code()),
            PaymentMethod::CreditCard => None,
        };

        let payment = self
            .payment_repo
            .create_payment(
                &mut *tx,
                appointment.id,
                user_id,
                method,
                service.price,
                PaymentStatus::Paid,
                pix_code.as_deref(),
            )
            .await?;

        // Passo 3: pending -> confirmed
        let appointment = self
            .appointment_repo
            .update_status(&mut *tx, appointment.id, AppointmentStatus::Confirmed)
            .await?;

        tx.commit().await?;

        tracing::info!(
            appointment_id = %appointment.id,
            partner = %partner.business_name,
            "Reserva confirmada"
        );

        Ok(CommittedBooking {
            appointment,
            payment,
            service,
            partner,
        })
    }

    /// Cancelamento pelo cliente: permitido apenas a partir de
    /// 'pending' ou 'confirmed'. O registro nunca é apagado. Se houver
    /// pagamento aprovado, o estorno simulado ('paid' -> 'refunded')
    /// acontece na mesma transação.
    pub async fn cancel_appointment(
        &self,
        user_id: Uuid,
        appointment_id: Uuid,
    ) -> Result<Appointment, AppError> {
        let mut tx = self.pool.begin().await?;

        let appointment = self
            .appointment_repo
            .find_by_id(&mut *tx, appointment_id)
            .await?
            .filter(|a| a.user_id == user_id)
            .ok_or(AppError::AppointmentNotFound)?;

        if !appointment.status.can_transition_to(AppointmentStatus::Canceled) {
            return Err(AppError::InvalidStatusTransition);
        }

        let appointment = self
            .appointment_repo
            .update_status(&mut *tx, appointment_id, AppointmentStatus::Canceled)
            .await?;

        if let Some(payment) = self
            .payment_repo
            .find_by_appointment(&mut *tx, appointment_id)
            .await?
        {
            if payment.status.can_transition_to(PaymentStatus::Refunded) {
                self.payment_repo
                    .update_status(&mut *tx, payment.id, PaymentStatus::Refunded)
                    .await?;
            }
        }

        tx.commit().await?;

        Ok(appointment)
    }

    pub async fn list_appointments(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<AppointmentListItem>, AppError> {
        self.appointment_repo.list_for_user(user_id).await
    }

    /// Avaliação pós-atendimento: uma por agendamento, só pelo dono e só
    /// depois de concluído. Atualiza o agregado do parceiro na mesma
    /// transação.
    pub async fn review_appointment(
        &self,
        user_id: Uuid,
        appointment_id: Uuid,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let appointment = self
            .appointment_repo
            .find_by_id(&mut *tx, appointment_id)
            .await?
            .filter(|a| a.user_id == user_id)
            .ok_or(AppError::AppointmentNotFound)?;

        if appointment.status != AppointmentStatus::Completed {
            return Err(AppError::InvalidStatusTransition);
        }

        self.catalog_repo
            .create_review(
                &mut *tx,
                appointment.id,
                appointment.partner_id,
                user_id,
                rating,
                comment,
            )
            .await?;

        self.catalog_repo
            .refresh_partner_rating(&mut *tx, appointment.partner_id)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
