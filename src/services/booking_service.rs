// src/services/booking_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BookingRepository, PropertyRepository, TenantRepository},
    models::{
        auth::CurrentUser,
        bookings::{BookingStatus, CreateBookingPayload, HouseBooking, UpdateBookingPayload},
        properties::HouseStatus,
    },
};

#[derive(Clone)]
pub struct BookingService {
    booking_repo: BookingRepository,
    property_repo: PropertyRepository,
    tenant_repo: TenantRepository,
    pool: PgPool,
}

impl BookingService {
    pub fn new(
        booking_repo: BookingRepository,
        property_repo: PropertyRepository,
        tenant_repo: TenantRepository,
        pool: PgPool,
    ) -> Self {
        Self { booking_repo, property_repo, tenant_repo, pool }
    }

    /// Registra o pedido de reserva de uma casa vaga. Sem `tenant_id` no
    /// payload, a reserva sai em nome do cadastro do próprio usuário.
    pub async fn create(
        &self,
        actor: &CurrentUser,
        payload: &CreateBookingPayload,
    ) -> Result<HouseBooking, AppError> {
        let tenant_id = match payload.tenant_id {
            Some(id) => {
                if !actor.is_admin() && actor.tenant_id != Some(id) {
                    return Err(AppError::Forbidden(
                        "Você não pode reservar em nome de outro inquilino.".into(),
                    ));
                }
                self.tenant_repo
                    .find(id)
                    .await?
                    .ok_or(AppError::BadRequest("Inquilino inexistente.".into()))?;
                id
            }
            None => actor.tenant_id.ok_or(AppError::BadRequest(
                "Você ainda não possui cadastro de inquilino.".into(),
            ))?,
        };

        let house = self
            .property_repo
            .find_house(payload.house_id)
            .await?
            .ok_or(AppError::BadRequest("Casa inexistente.".into()))?;
        if house.status != HouseStatus::Vacant {
            return Err(AppError::BadRequest(
                "A casa não está disponível para reserva.".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        let booking = self.booking_repo.create(&mut *tx, payload, tenant_id).await?;
        tx.commit().await?;
        Ok(booking)
    }

    pub async fn list(&self, actor: &CurrentUser) -> Result<Vec<HouseBooking>, AppError> {
        if actor.is_admin() {
            return self.booking_repo.list().await;
        }
        if let Some(landlord_id) = actor.landlord_id {
            return self.booking_repo.list_for_landlord(landlord_id).await;
        }
        if let Some(tenant_id) = actor.tenant_id {
            return self.booking_repo.list_for_tenant(tenant_id).await;
        }
        Ok(Vec::new())
    }

    pub async fn get(&self, actor: &CurrentUser, id: Uuid) -> Result<HouseBooking, AppError> {
        let not_found = || AppError::NotFound("Reserva não encontrada.".into());
        let booking = self.booking_repo.find(id).await?.ok_or_else(not_found)?;

        if actor.is_admin() || actor.tenant_id == Some(booking.tenant_id) {
            return Ok(booking);
        }
        if let Some(landlord_id) = actor.landlord_id {
            let owner = self.property_repo.owner_of_house(booking.house_id).await?;
            if owner == Some(landlord_id) {
                return Ok(booking);
            }
        }
        Err(not_found())
    }

    pub async fn update(
        &self,
        actor: &CurrentUser,
        id: Uuid,
        payload: &UpdateBookingPayload,
    ) -> Result<HouseBooking, AppError> {
        self.owned_booking(actor, id).await?;
        self.booking_repo.update(id, payload).await
    }

    /// Muda o estado da reserva. A aprovação só acontece enquanto a casa
    /// continua vaga, e já deixa a casa ocupada pelo inquilino da reserva,
    /// tudo na mesma transação.
    pub async fn update_status(
        &self,
        actor: &CurrentUser,
        id: Uuid,
        status_value: &str,
    ) -> Result<HouseBooking, AppError> {
        let status = BookingStatus::parse(status_value)
            .ok_or(AppError::BadRequest("Valor de status inválido.".into()))?;

        // Inquilino só pode cancelar a própria reserva; o resto é do
        // proprietário da casa (ou do admin)
        let booking = if status == BookingStatus::Cancelled
            && actor.tenant_id.is_some()
            && !actor.is_admin()
        {
            let booking = self.get(actor, id).await?;
            if actor.tenant_id != Some(booking.tenant_id) {
                return Err(AppError::Forbidden("Permissão negada.".into()));
            }
            booking
        } else {
            self.owned_booking(actor, id).await?
        };

        if status == BookingStatus::Approved {
            let house = self
                .property_repo
                .find_house(booking.house_id)
                .await?
                .ok_or(AppError::BadRequest("Casa inexistente.".into()))?;
            if house.status != HouseStatus::Vacant {
                return Err(AppError::BadRequest(
                    "A casa não está mais disponível.".into(),
                ));
            }

            let mut tx = self.pool.begin().await?;
            let booking = self.booking_repo.update_status(&mut *tx, id, status).await?;
            self.property_repo
                .set_tenant(&mut *tx, booking.house_id, Some(booking.tenant_id), HouseStatus::Occupied)
                .await?;
            tx.commit().await?;
            return Ok(booking);
        }

        let mut tx = self.pool.begin().await?;
        let booking = self.booking_repo.update_status(&mut *tx, id, status).await?;
        tx.commit().await?;
        Ok(booking)
    }

    pub async fn delete(&self, actor: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        self.owned_booking(actor, id).await?;
        let deleted = self.booking_repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Reserva não encontrada.".into()));
        }
        Ok(())
    }

    // Reserva sobre uma casa do ator (ou qualquer reserva, para admin)
    async fn owned_booking(&self, actor: &CurrentUser, id: Uuid) -> Result<HouseBooking, AppError> {
        let not_found = || AppError::NotFound("Reserva não encontrada.".into());
        let booking = self.booking_repo.find(id).await?.ok_or_else(not_found)?;
        if actor.is_admin() {
            return Ok(booking);
        }
        if let Some(landlord_id) = actor.landlord_id {
            let owner = self.property_repo.owner_of_house(booking.house_id).await?;
            if owner == Some(landlord_id) {
                return Ok(booking);
            }
        }
        Err(not_found())
    }
}
