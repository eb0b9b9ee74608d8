// src/db/landlord_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::landlords::{CreateLandlordPayload, Landlord, UpdateLandlordPayload},
};

#[derive(Clone)]
pub struct LandlordRepository {
    pool: PgPool,
}

impl LandlordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &CreateLandlordPayload,
        user_id: Option<Uuid>,
    ) -> Result<Landlord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Landlord>(
            r#"
            INSERT INTO landlords
                (user_id, first_name, middle_name, other_names, id_number,
                 email, phone_number, physical_address, aob)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&payload.first_name)
        .bind(payload.middle_name.as_deref())
        .bind(payload.other_names.as_deref())
        .bind(&payload.id_number)
        .bind(&payload.email)
        .bind(&payload.phone_number)
        .bind(&payload.physical_address)
        .bind(payload.aob.as_deref())
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(
                        "Já existe um proprietário com este documento, e-mail ou telefone.".into(),
                    );
                }
            }
            AppError::from(e)
        })
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Landlord>, AppError> {
        sqlx::query_as::<_, Landlord>("SELECT * FROM landlords WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Landlord>, AppError> {
        sqlx::query_as::<_, Landlord>("SELECT * FROM landlords WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Landlord>, AppError> {
        sqlx::query_as::<_, Landlord>(
            r#"
            SELECT * FROM landlords
            WHERE $1::text IS NULL
               OR first_name ILIKE '%' || $1 || '%'
               OR middle_name ILIKE '%' || $1 || '%'
               OR email ILIKE '%' || $1 || '%'
               OR phone_number ILIKE '%' || $1 || '%'
            ORDER BY first_name
            "#,
        )
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    // Proprietários que o inquilino enxerga: os donos das casas que ele aluga
    pub async fn list_for_tenant(&self, tenant_id: Uuid) -> Result<Vec<Landlord>, AppError> {
        sqlx::query_as::<_, Landlord>(
            r#"
            SELECT DISTINCT l.*
            FROM landlords l
            JOIN apartments a ON a.owner_id = l.id
            JOIN houses h ON h.apartment_id = a.id
            WHERE h.tenant_id = $1
            ORDER BY l.first_name
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateLandlordPayload,
    ) -> Result<Landlord, AppError> {
        sqlx::query_as::<_, Landlord>(
            r#"
            UPDATE landlords
            SET first_name = COALESCE($2, first_name),
                middle_name = COALESCE($3, middle_name),
                other_names = COALESCE($4, other_names),
                email = COALESCE($5, email),
                phone_number = COALESCE($6, phone_number),
                physical_address = COALESCE($7, physical_address),
                aob = COALESCE($8, aob)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.first_name.as_deref())
        .bind(payload.middle_name.as_deref())
        .bind(payload.other_names.as_deref())
        .bind(payload.email.as_deref())
        .bind(payload.phone_number.as_deref())
        .bind(payload.physical_address.as_deref())
        .bind(payload.aob.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(
                        "Já existe um proprietário com este e-mail ou telefone.".into(),
                    );
                }
            }
            AppError::from(e)
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM landlords WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
