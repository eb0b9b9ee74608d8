// src/db/account_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::accounts::{Profile, Role, RoleType, UpdateProfilePayload},
};

// Perfis e papéis vivem juntos: ambos nascem no registro do usuário.
#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Profiles
    // ---

    // Cria o perfil vazio que acompanha todo usuário novo
    pub async fn create_profile<'e, E>(&self, executor: E, user_id: Uuid) -> Result<Profile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Profile>(
            "INSERT INTO profiles (user_id) VALUES ($1) RETURNING *",
        )
        .bind(user_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("Este usuário já possui um perfil.".into());
                }
            }
            AppError::from(e)
        })
    }

    pub async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_profile_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        payload: &UpdateProfilePayload,
    ) -> Result<Profile, AppError> {
        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET picture = COALESCE($2, picture),
                phone = COALESCE($3, phone),
                studied_at = COALESCE($4, studied_at),
                county = COALESCE($5, county),
                location = COALESCE($6, location),
                my_profile = COALESCE($7, my_profile),
                occupation = COALESCE($8, occupation),
                education = COALESCE($9, education),
                skills = COALESCE($10, skills),
                country = COALESCE($11, country)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.picture.as_deref())
        .bind(payload.phone.as_deref())
        .bind(payload.studied_at.as_deref())
        .bind(payload.county.as_deref())
        .bind(payload.location.as_deref())
        .bind(payload.my_profile.as_deref())
        .bind(payload.occupation.as_deref())
        .bind(payload.education)
        .bind(payload.skills.as_deref())
        .bind(payload.country.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn delete_profile(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ---
    // Roles
    // ---

    pub async fn create_role<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        role_type: RoleType,
    ) -> Result<Role, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Role>(
            "INSERT INTO roles (user_id, role_type) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(role_type)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
    }

    pub async fn find_role(&self, id: Uuid) -> Result<Option<Role>, AppError> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_role_by_user(&self, user_id: Uuid) -> Result<Option<Role>, AppError> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY date_assigned")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn update_role(&self, id: Uuid, role_type: RoleType) -> Result<Role, AppError> {
        sqlx::query_as::<_, Role>(
            "UPDATE roles SET role_type = $2, date_assigned = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role_type)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    // Promove (ou cria) o papel de um usuário; usado quando alguém
    // vincula um cadastro de inquilino a si mesmo
    pub async fn set_role_for_user<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        role_type: RoleType,
    ) -> Result<Role, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (user_id, role_type)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET role_type = EXCLUDED.role_type, date_assigned = now()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(role_type)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
    }
}
