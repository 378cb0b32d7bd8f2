// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::update_me,

        // --- Catálogo ---
        handlers::catalog::list_partners,
        handlers::catalog::get_partner_detail,

        // --- Reserva ---
        handlers::booking::get_availability,
        handlers::booking::create_booking,

        // --- Agendamentos ---
        handlers::booking::list_appointments,
        handlers::booking::cancel_appointment,
        handlers::booking::review_appointment,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Profile,
            models::auth::RegisterPayload,
            models::auth::LoginPayload,
            models::auth::UpdateProfilePayload,
            models::auth::AuthResponse,

            // --- Catálogo ---
            models::catalog::Partner,
            models::catalog::Service,
            models::catalog::Review,
            models::catalog::ReviewWithAuthor,
            models::catalog::PartnerDetail,

            // --- Agendamento ---
            models::scheduling::AppointmentStatus,
            models::scheduling::Appointment,
            models::scheduling::AppointmentListItem,
            models::scheduling::SlotView,

            // --- Pagamento ---
            models::billing::PaymentMethod,
            models::billing::PaymentStatus,
            models::billing::Payment,
            models::billing::CardData,

            // --- Payloads do fluxo de reserva ---
            handlers::booking::AvailabilityResponse,
            handlers::booking::CreateBookingPayload,
            handlers::booking::PaymentSummary,
            handlers::booking::BookingConfirmation,
            handlers::booking::CreateReviewPayload,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registro e login de clientes"),
        (name = "Users", description = "Perfil do cliente autenticado"),
        (name = "Catálogo", description = "Parceiros, serviços e avaliações"),
        (name = "Reserva", description = "Disponibilidade de horários e efetivação da reserva"),
        (name = "Agendamentos", description = "Gestão dos agendamentos do cliente"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_jwt",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
