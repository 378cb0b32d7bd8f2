// src/services/catalog.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{Partner, PartnerDetail},
};

// Quantas avaliações aparecem na tela de detalhe
const RECENT_REVIEWS_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    pub async fn list_partners(
        &self,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<Partner>, AppError> {
        self.repo.list_partners(category, search).await
    }

    /// Monta a tela de detalhe: perfil do parceiro + serviços ativos
    /// (mais baratos primeiro) + últimas avaliações.
    pub async fn partner_detail(
        &self,
        pool: &sqlx::PgPool,
        partner_id: Uuid,
    ) -> Result<PartnerDetail, AppError> {
        let partner = self
            .repo
            .find_partner(pool, partner_id)
            .await?
            .ok_or(AppError::PartnerNotFound)?;

        let services = self.repo.list_services_by_partner(partner_id).await?;
        let reviews = self
            .repo
            .list_recent_reviews(partner_id, RECENT_REVIEWS_LIMIT)
            .await?;

        Ok(PartnerDetail {
            partner,
            services,
            reviews,
        })
    }
}
