// src/handlers/catalog.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalog::{Partner, PartnerDetail},
};

#[derive(Debug, Deserialize)]
pub struct PartnerListQuery {
    // Filtro de categoria (Home) e busca textual (tela de busca)
    pub category: Option<String>,
    pub q: Option<String>,
}

// GET /api/partners
#[utoipa::path(
    get,
    path = "/api/partners",
    tag = "Catálogo",
    params(
        ("category" = Option<String>, Query, description = "Filtra por categoria"),
        ("q" = Option<String>, Query, description = "Busca pelo nome do estabelecimento")
    ),
    responses(
        (status = 200, description = "Parceiros ativos, melhor avaliados primeiro", body = Vec<Partner>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_partners(
    State(app_state): State<AppState>,
    Query(query): Query<PartnerListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let partners = app_state
        .catalog_service
        .list_partners(query.category.as_deref(), query.q.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(partners)))
}

// GET /api/partners/{id}
#[utoipa::path(
    get,
    path = "/api/partners/{id}",
    tag = "Catálogo",
    params(
        ("id" = Uuid, Path, description = "ID do parceiro")
    ),
    responses(
        (status = 200, description = "Detalhe do parceiro com serviços e avaliações", body = PartnerDetail),
        (status = 404, description = "Parceiro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_partner_detail(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state
        .catalog_service
        .partner_detail(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(detail)))
}
