// src/db/booking_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::bookings::{BookingStatus, CreateBookingPayload, HouseBooking, UpdateBookingPayload},
};

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &CreateBookingPayload,
        tenant_id: Uuid,
    ) -> Result<HouseBooking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, HouseBooking>(
            r#"
            INSERT INTO house_bookings
                (house_id, tenant_id, deposit_amount, rent_amount_paid, move_in_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(payload.house_id)
        .bind(tenant_id)
        .bind(payload.deposit_amount)
        .bind(payload.rent_amount_paid)
        .bind(payload.move_in_date)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<HouseBooking>, AppError> {
        sqlx::query_as::<_, HouseBooking>("SELECT * FROM house_bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn list(&self) -> Result<Vec<HouseBooking>, AppError> {
        sqlx::query_as::<_, HouseBooking>(
            "SELECT * FROM house_bookings ORDER BY date_added DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    // Reservas feitas sobre as casas do proprietário
    pub async fn list_for_landlord(&self, landlord_id: Uuid) -> Result<Vec<HouseBooking>, AppError> {
        sqlx::query_as::<_, HouseBooking>(
            r#"
            SELECT b.* FROM house_bookings b
            JOIN houses h ON h.id = b.house_id
            JOIN apartments a ON a.id = h.apartment_id
            WHERE a.owner_id = $1
            ORDER BY b.date_added DESC
            "#,
        )
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn list_for_tenant(&self, tenant_id: Uuid) -> Result<Vec<HouseBooking>, AppError> {
        sqlx::query_as::<_, HouseBooking>(
            "SELECT * FROM house_bookings WHERE tenant_id = $1 ORDER BY date_added DESC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateBookingPayload,
    ) -> Result<HouseBooking, AppError> {
        sqlx::query_as::<_, HouseBooking>(
            r#"
            UPDATE house_bookings
            SET deposit_amount = COALESCE($2, deposit_amount),
                rent_amount_paid = COALESCE($3, rent_amount_paid),
                move_in_date = COALESCE($4, move_in_date)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.deposit_amount)
        .bind(payload.rent_amount_paid)
        .bind(payload.move_in_date)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<HouseBooking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, HouseBooking>(
            "UPDATE house_bookings SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM house_bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
