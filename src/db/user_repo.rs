// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, db::remap_unique_violation, models::auth::Profile};

// O repositório de clientes, responsável pelas interações com a tabela 'profiles'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um cliente pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, AppError> {
        let maybe_profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, name, email, password_hash, phone, avatar_url, created_at, updated_at
            FROM profiles
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_profile)
    }

    // Busca um cliente pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        let maybe_profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, name, email, password_hash, phone, avatar_url, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_profile)
    }

    // Cria um novo cliente, com tratamento específico para e-mail duplicado.
    pub async fn create_profile<'e, E>(
        &self,
        executor: E,
        name: &str,
        email: &str,
        password_hash: &str,
        phone: Option<&str>,
    ) -> Result<Profile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (name, email, password_hash, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, phone, avatar_url, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(phone)
        .fetch_one(executor)
        .await
        .map_err(|e| remap_unique_violation(e, AppError::EmailAlreadyExists))?;

        Ok(profile)
    }

    // Atualização parcial do perfil (nome / telefone / avatar)
    pub async fn update_profile<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<Profile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                avatar_url = COALESCE($4, avatar_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, password_hash, phone, avatar_url, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .bind(avatar_url)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::UserNotFound)?;

        Ok(profile)
    }
}
