// src/db/catalog_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::remap_unique_violation,
    models::catalog::{Partner, Review, ReviewWithAuthor, Service},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PARCEIROS
    // =========================================================================

    /// Lista parceiros ativos para a Home/Busca, com filtro opcional de
    /// categoria e busca textual pelo nome. Melhor avaliados primeiro.
    pub async fn list_partners(
        &self,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<Partner>, AppError> {
        let search_term = search.map(|q| format!("%{}%", q));

        let partners = sqlx::query_as::<_, Partner>(
            r#"
            SELECT *
            FROM partners
            WHERE is_active
              AND ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR business_name ILIKE $2)
            ORDER BY rating DESC NULLS LAST, business_name ASC
            "#,
        )
        .bind(category)
        .bind(search_term)
        .fetch_all(&self.pool)
        .await?;

        Ok(partners)
    }

    pub async fn find_partner<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Partner>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let partner = sqlx::query_as::<_, Partner>("SELECT * FROM partners WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(partner)
    }

    // =========================================================================
    //  SERVIÇOS
    // =========================================================================

    /// Serviços ativos do parceiro, mais baratos primeiro (como na tela de detalhe)
    pub async fn list_services_by_partner(&self, partner_id: Uuid) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(
            r#"
            SELECT *
            FROM services
            WHERE partner_id = $1 AND is_active
            ORDER BY price ASC
            "#,
        )
        .bind(partner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    pub async fn find_service<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Service>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(service)
    }

    // =========================================================================
    //  AVALIAÇÕES
    // =========================================================================

    /// Últimas avaliações do parceiro com o nome do autor
    pub async fn list_recent_reviews(
        &self,
        partner_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ReviewWithAuthor>, AppError> {
        let reviews = sqlx::query_as::<_, ReviewWithAuthor>(
            r#"
            SELECT r.id, r.rating, r.comment, p.name AS author_name, r.created_at
            FROM reviews r
            INNER JOIN profiles p ON p.id = r.user_id
            WHERE r.partner_id = $1
            ORDER BY r.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(partner_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Insere a avaliação. O UNIQUE em appointment_id garante uma por agendamento.
    pub async fn create_review<'e, E>(
        &self,
        executor: E,
        appointment_id: Uuid,
        partner_id: Uuid,
        user_id: Uuid,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<Review, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (appointment_id, partner_id, user_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, appointment_id, partner_id, user_id, rating, comment, created_at
            "#,
        )
        .bind(appointment_id)
        .bind(partner_id)
        .bind(user_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(executor)
        .await
        .map_err(|e| remap_unique_violation(e, AppError::AlreadyReviewed))?;

        Ok(review)
    }

    /// Recalcula o agregado de avaliações do parceiro a partir das avaliações.
    pub async fn refresh_partner_rating<'e, E>(
        &self,
        executor: E,
        partner_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE partners
            SET
                rating = (SELECT ROUND(AVG(rating)::numeric, 2) FROM reviews WHERE partner_id = $1),
                total_reviews = (SELECT COUNT(*) FROM reviews WHERE partner_id = $1),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(partner_id)
        .execute(executor)
        .await?;

        Ok(())
    }
}
