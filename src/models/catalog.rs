// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- PARCEIRO (Estabelecimento) ---
// Somente leitura para o fluxo de agendamento.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: Uuid,

    #[schema(example = "Barbearia do Zé")]
    pub business_name: String,

    #[schema(example = "barbearia")]
    pub category: String,

    pub description: Option<String>,

    #[schema(example = "São Paulo")]
    pub city: String,
    pub neighborhood: Option<String>,
    pub address: Option<String>,

    pub phone: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub cover_url: Option<String>,

    // Agregado de avaliações (NULL enquanto não há nenhuma)
    #[schema(example = "4.75")]
    pub rating: Option<Decimal>,
    pub total_reviews: i32,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- SERVIÇO ---
// Pertence a exatamente um parceiro; imutável durante a sessão de reserva.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub partner_id: Uuid,

    #[schema(example = "Corte masculino")]
    pub name: String,
    pub description: Option<String>,

    #[schema(example = "50.00")]
    pub price: Decimal,

    // Duração em minutos
    #[schema(example = 30)]
    pub duration: i32,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- AVALIAÇÃO ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub partner_id: Uuid,
    pub user_id: Uuid,

    #[schema(example = 5)]
    pub rating: i32,
    pub comment: Option<String>,

    pub created_at: DateTime<Utc>,
}

// Avaliação com o nome de quem avaliou (JOIN com profiles),
// para a tela de detalhe do parceiro.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithAuthor {
    pub id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,

    #[schema(example = "Maria da Silva")]
    pub author_name: String,

    pub created_at: DateTime<Utc>,
}

// Detalhe completo do parceiro: perfil + serviços ativos + últimas avaliações
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerDetail {
    #[serde(flatten)]
    pub partner: Partner,
    pub services: Vec<Service>,
    pub reviews: Vec<ReviewWithAuthor>,
}
