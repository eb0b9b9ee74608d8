// src/db/property_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::properties::{
        Apartment, ApartmentType, CreateApartmentPayload, CreateHousePayload, CreateTypePayload,
        House, HouseStatus, HouseType, UpdateApartmentPayload, UpdateHousePayload,
        UpdateTypePayload,
    },
};

// Catálogo de tipos, prédios e casas em um único repositório:
// as tabelas andam sempre juntas nas regras de visibilidade.
#[derive(Clone)]
pub struct PropertyRepository {
    pool: PgPool,
}

impl PropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Apartment types / house types (catálogo)
    // ---

    pub async fn create_apartment_type(
        &self,
        payload: &CreateTypePayload,
    ) -> Result<ApartmentType, AppError> {
        sqlx::query_as::<_, ApartmentType>(
            "INSERT INTO apartment_types (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(&payload.name)
        .bind(payload.description.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_to_conflict(e, "Já existe um tipo de prédio com este nome."))
    }

    pub async fn list_apartment_types(&self) -> Result<Vec<ApartmentType>, AppError> {
        sqlx::query_as::<_, ApartmentType>("SELECT * FROM apartment_types ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_apartment_type(&self, id: Uuid) -> Result<Option<ApartmentType>, AppError> {
        sqlx::query_as::<_, ApartmentType>("SELECT * FROM apartment_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn update_apartment_type(
        &self,
        id: Uuid,
        payload: &UpdateTypePayload,
    ) -> Result<ApartmentType, AppError> {
        sqlx::query_as::<_, ApartmentType>(
            r#"
            UPDATE apartment_types
            SET name = COALESCE($2, name), description = COALESCE($3, description)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.name.as_deref())
        .bind(payload.description.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_to_conflict(e, "Já existe um tipo de prédio com este nome."))
    }

    pub async fn delete_apartment_type(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM apartment_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn create_house_type(
        &self,
        payload: &CreateTypePayload,
    ) -> Result<HouseType, AppError> {
        sqlx::query_as::<_, HouseType>(
            "INSERT INTO house_types (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(&payload.name)
        .bind(payload.description.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_to_conflict(e, "Já existe um tipo de casa com este nome."))
    }

    pub async fn list_house_types(&self) -> Result<Vec<HouseType>, AppError> {
        sqlx::query_as::<_, HouseType>("SELECT * FROM house_types ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_house_type(&self, id: Uuid) -> Result<Option<HouseType>, AppError> {
        sqlx::query_as::<_, HouseType>("SELECT * FROM house_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn update_house_type(
        &self,
        id: Uuid,
        payload: &UpdateTypePayload,
    ) -> Result<HouseType, AppError> {
        sqlx::query_as::<_, HouseType>(
            r#"
            UPDATE house_types
            SET name = COALESCE($2, name), description = COALESCE($3, description)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.name.as_deref())
        .bind(payload.description.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_to_conflict(e, "Já existe um tipo de casa com este nome."))
    }

    pub async fn delete_house_type(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM house_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ---
    // Apartments (prédios)
    // ---

    pub async fn create_apartment<'e, E>(
        &self,
        executor: E,
        payload: &CreateApartmentPayload,
        owner_id: Uuid,
    ) -> Result<Apartment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Apartment>(
            r#"
            INSERT INTO apartments
                (name, apartment_type_id, location, description, owner_id,
                 management_fee_percentage, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(payload.apartment_type_id)
        .bind(&payload.location)
        .bind(payload.description.as_deref())
        .bind(owner_id)
        .bind(payload.management_fee_percentage)
        .bind(payload.image.as_deref())
        .fetch_one(executor)
        .await
        .map_err(|e| unique_to_conflict(e, "Já existe um prédio com este nome."))
    }

    pub async fn find_apartment(&self, id: Uuid) -> Result<Option<Apartment>, AppError> {
        sqlx::query_as::<_, Apartment>("SELECT * FROM apartments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_apartments(&self, search: Option<&str>) -> Result<Vec<Apartment>, AppError> {
        sqlx::query_as::<_, Apartment>(
            r#"
            SELECT * FROM apartments
            WHERE $1::text IS NULL
               OR name ILIKE '%' || $1 || '%'
               OR location ILIKE '%' || $1 || '%'
               OR description ILIKE '%' || $1 || '%'
            ORDER BY name
            "#,
        )
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn list_apartments_by_owner(
        &self,
        owner_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<Apartment>, AppError> {
        sqlx::query_as::<_, Apartment>(
            r#"
            SELECT * FROM apartments
            WHERE owner_id = $1
              AND ($2::text IS NULL
                   OR name ILIKE '%' || $2 || '%'
                   OR location ILIKE '%' || $2 || '%'
                   OR description ILIKE '%' || $2 || '%')
            ORDER BY name
            "#,
        )
        .bind(owner_id)
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn update_apartment(
        &self,
        id: Uuid,
        payload: &UpdateApartmentPayload,
    ) -> Result<Apartment, AppError> {
        sqlx::query_as::<_, Apartment>(
            r#"
            UPDATE apartments
            SET name = COALESCE($2, name),
                apartment_type_id = COALESCE($3, apartment_type_id),
                location = COALESCE($4, location),
                description = COALESCE($5, description),
                management_fee_percentage = COALESCE($6, management_fee_percentage),
                image = COALESCE($7, image)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.name.as_deref())
        .bind(payload.apartment_type_id)
        .bind(payload.location.as_deref())
        .bind(payload.description.as_deref())
        .bind(payload.management_fee_percentage)
        .bind(payload.image.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_to_conflict(e, "Já existe um prédio com este nome."))
    }

    pub async fn delete_apartment(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM apartments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Reconta as casas do prédio. Chamado dentro da mesma transação
    /// que criou, moveu ou removeu uma casa.
    pub async fn refresh_total_houses<'e, E>(
        &self,
        executor: E,
        apartment_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE apartments
            SET total_houses = (SELECT COUNT(*) FROM houses WHERE apartment_id = $1)
            WHERE id = $1
            "#,
        )
        .bind(apartment_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    // ---
    // Houses (unidades)
    // ---

    pub async fn create_house<'e, E>(
        &self,
        executor: E,
        payload: &CreateHousePayload,
    ) -> Result<House, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, House>(
            r#"
            INSERT INTO houses
                (apartment_id, number, monthly_rent, deposit_amount,
                 house_type_id, description, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(payload.apartment_id)
        .bind(&payload.number)
        .bind(payload.monthly_rent)
        .bind(payload.deposit_amount)
        .bind(payload.house_type_id)
        .bind(payload.description.as_deref())
        .bind(payload.image.as_deref())
        .fetch_one(executor)
        .await
        .map_err(|e| unique_to_conflict(e, "Já existe uma casa com este número neste prédio."))
    }

    pub async fn find_house(&self, id: Uuid) -> Result<Option<House>, AppError> {
        sqlx::query_as::<_, House>("SELECT * FROM houses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_houses(&self, search: Option<&str>) -> Result<Vec<House>, AppError> {
        sqlx::query_as::<_, House>(
            r#"
            SELECT h.* FROM houses h
            JOIN apartments a ON a.id = h.apartment_id
            WHERE $1::text IS NULL
               OR h.number ILIKE '%' || $1 || '%'
               OR h.description ILIKE '%' || $1 || '%'
               OR a.name ILIKE '%' || $1 || '%'
               OR a.location ILIKE '%' || $1 || '%'
            ORDER BY a.name, h.number
            "#,
        )
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn list_houses_by_owner(
        &self,
        landlord_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<House>, AppError> {
        sqlx::query_as::<_, House>(
            r#"
            SELECT h.* FROM houses h
            JOIN apartments a ON a.id = h.apartment_id
            WHERE a.owner_id = $1
              AND ($2::text IS NULL
                   OR h.number ILIKE '%' || $2 || '%'
                   OR h.description ILIKE '%' || $2 || '%'
                   OR a.name ILIKE '%' || $2 || '%'
                   OR a.location ILIKE '%' || $2 || '%')
            ORDER BY a.name, h.number
            "#,
        )
        .bind(landlord_id)
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    // Inquilino navega pelas casas vagas e enxerga as próprias
    pub async fn list_houses_visible_to_tenant(
        &self,
        tenant_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<House>, AppError> {
        sqlx::query_as::<_, House>(
            r#"
            SELECT h.* FROM houses h
            JOIN apartments a ON a.id = h.apartment_id
            WHERE (h.status = 'vacant' OR h.tenant_id = $1)
              AND ($2::text IS NULL
                   OR h.number ILIKE '%' || $2 || '%'
                   OR h.description ILIKE '%' || $2 || '%'
                   OR a.name ILIKE '%' || $2 || '%'
                   OR a.location ILIKE '%' || $2 || '%')
            ORDER BY a.name, h.number
            "#,
        )
        .bind(tenant_id)
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn list_vacant_houses(&self) -> Result<Vec<House>, AppError> {
        sqlx::query_as::<_, House>(
            r#"
            SELECT h.* FROM houses h
            JOIN apartments a ON a.id = h.apartment_id
            WHERE h.status = 'vacant'
            ORDER BY a.name, h.number
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn list_houses_in_apartment(
        &self,
        apartment_id: Uuid,
    ) -> Result<Vec<House>, AppError> {
        sqlx::query_as::<_, House>(
            "SELECT * FROM houses WHERE apartment_id = $1 ORDER BY number",
        )
        .bind(apartment_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn list_houses_in_apartment_visible_to_tenant(
        &self,
        apartment_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Vec<House>, AppError> {
        sqlx::query_as::<_, House>(
            r#"
            SELECT * FROM houses
            WHERE apartment_id = $1 AND (status = 'vacant' OR tenant_id = $2)
            ORDER BY number
            "#,
        )
        .bind(apartment_id)
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn update_house<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &UpdateHousePayload,
        status: HouseStatus,
    ) -> Result<House, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, House>(
            r#"
            UPDATE houses
            SET apartment_id = COALESCE($2, apartment_id),
                number = COALESCE($3, number),
                monthly_rent = COALESCE($4, monthly_rent),
                deposit_amount = COALESCE($5, deposit_amount),
                house_type_id = COALESCE($6, house_type_id),
                description = COALESCE($7, description),
                image = COALESCE($8, image),
                status = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.apartment_id)
        .bind(payload.number.as_deref())
        .bind(payload.monthly_rent)
        .bind(payload.deposit_amount)
        .bind(payload.house_type_id)
        .bind(payload.description.as_deref())
        .bind(payload.image.as_deref())
        .bind(status)
        .fetch_one(executor)
        .await
        .map_err(|e| unique_to_conflict(e, "Já existe uma casa com este número neste prédio."))
    }

    /// Troca o inquilino e o status de uma vez: é o coração do
    /// assign/vacate e da aprovação de reservas.
    pub async fn set_tenant<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        tenant_id: Option<Uuid>,
        status: HouseStatus,
    ) -> Result<House, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, House>(
            "UPDATE houses SET tenant_id = $2, status = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(tenant_id)
        .bind(status)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
    }

    pub async fn delete_house<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Devolve o prédio para a recontagem de casas
        sqlx::query_scalar::<_, Uuid>("DELETE FROM houses WHERE id = $1 RETURNING apartment_id")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(AppError::from)
    }

    // Dono (landlord) do prédio ao qual a casa pertence
    pub async fn owner_of_house(&self, house_id: Uuid) -> Result<Option<Uuid>, AppError> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT a.owner_id FROM houses h
            JOIN apartments a ON a.id = h.apartment_id
            WHERE h.id = $1
            "#,
        )
        .bind(house_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }
}

fn unique_to_conflict(e: sqlx::Error, message: &str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::Conflict(message.to_string());
        }
    }
    AppError::from(e)
}
