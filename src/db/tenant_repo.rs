// src/db/tenant_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::tenants::{CreateTenantPayload, Tenant, UpdateTenantPayload},
};

#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &CreateTenantPayload,
        user_id: Option<Uuid>,
    ) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants
                (user_id, first_name, last_name, id_number_or_passport, email,
                 phone_number, physical_address, occupation, workplace,
                 emergency_contact_phone)
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'Not Provided'), $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(payload.first_name.as_deref())
        .bind(payload.last_name.as_deref())
        .bind(payload.id_number_or_passport.as_deref())
        .bind(payload.email.as_deref())
        .bind(&payload.phone_number)
        .bind(payload.physical_address.as_deref())
        .bind(payload.occupation)
        .bind(payload.workplace.as_deref())
        .bind(payload.emergency_contact_phone.as_deref())
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(
                        "Já existe um inquilino com este documento, e-mail ou telefone.".into(),
                    );
                }
            }
            AppError::from(e)
        })
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            r#"
            SELECT * FROM tenants
            WHERE $1::text IS NULL
               OR first_name ILIKE '%' || $1 || '%'
               OR last_name ILIKE '%' || $1 || '%'
               OR email ILIKE '%' || $1 || '%'
               OR phone_number ILIKE '%' || $1 || '%'
            ORDER BY date_added
            "#,
        )
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    // Inquilinos que o proprietário enxerga: os que ocupam casas dele
    pub async fn list_for_landlord(&self, landlord_id: Uuid) -> Result<Vec<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            r#"
            SELECT DISTINCT t.*
            FROM tenants t
            JOIN houses h ON h.tenant_id = t.id
            JOIN apartments a ON h.apartment_id = a.id
            WHERE a.owner_id = $1
            ORDER BY t.date_added
            "#,
        )
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn update(&self, id: Uuid, payload: &UpdateTenantPayload) -> Result<Tenant, AppError> {
        sqlx::query_as::<_, Tenant>(
            r#"
            UPDATE tenants
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                id_number_or_passport = COALESCE($4, id_number_or_passport),
                email = COALESCE($5, email),
                phone_number = COALESCE($6, phone_number),
                physical_address = COALESCE($7, physical_address),
                occupation = COALESCE($8, occupation),
                workplace = COALESCE($9, workplace),
                emergency_contact_phone = COALESCE($10, emergency_contact_phone)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.first_name.as_deref())
        .bind(payload.last_name.as_deref())
        .bind(payload.id_number_or_passport.as_deref())
        .bind(payload.email.as_deref())
        .bind(payload.phone_number.as_deref())
        .bind(payload.physical_address.as_deref())
        .bind(payload.occupation)
        .bind(payload.workplace.as_deref())
        .bind(payload.emergency_contact_phone.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(
                        "Já existe um inquilino com este documento, e-mail ou telefone.".into(),
                    );
                }
            }
            AppError::from(e)
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM tenants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
