// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{AppointmentRepository, CatalogRepository, PaymentRepository, UserRepository},
    services::{
        auth::AuthService, availability::AvailabilityService, booking::BookingService,
        catalog::CatalogService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repo: UserRepository,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub availability_service: AvailabilityService,
    pub booking_service: BookingService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let appointment_repo = AppointmentRepository::new(db_pool.clone());
        let payment_repo = PaymentRepository::new();

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret, db_pool.clone());
        let catalog_service = CatalogService::new(catalog_repo.clone());
        let availability_service = AvailabilityService::new(appointment_repo.clone());
        let booking_service = BookingService::new(
            appointment_repo,
            payment_repo,
            catalog_repo,
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            user_repo,
            auth_service,
            catalog_service,
            availability_service,
            booking_service,
        })
    }
}
