// src/services/property_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{LandlordRepository, PropertyRepository, TenantRepository},
    models::{
        auth::CurrentUser,
        properties::{
            Apartment, ApartmentType, CreateApartmentPayload, CreateHousePayload,
            CreateTypePayload, House, HouseStatus, HouseType, UpdateApartmentPayload,
            UpdateHousePayload, UpdateTypePayload,
        },
    },
};

#[derive(Clone)]
pub struct PropertyService {
    property_repo: PropertyRepository,
    landlord_repo: LandlordRepository,
    tenant_repo: TenantRepository,
    pool: PgPool,
}

impl PropertyService {
    pub fn new(
        property_repo: PropertyRepository,
        landlord_repo: LandlordRepository,
        tenant_repo: TenantRepository,
        pool: PgPool,
    ) -> Self {
        Self { property_repo, landlord_repo, tenant_repo, pool }
    }

    // ---
    // Catálogo: tipos de prédio e de casa
    // ---

    pub async fn create_apartment_type(
        &self,
        payload: &CreateTypePayload,
    ) -> Result<ApartmentType, AppError> {
        self.property_repo.create_apartment_type(payload).await
    }

    pub async fn list_apartment_types(&self) -> Result<Vec<ApartmentType>, AppError> {
        self.property_repo.list_apartment_types().await
    }

    pub async fn get_apartment_type(&self, id: Uuid) -> Result<ApartmentType, AppError> {
        self.property_repo
            .find_apartment_type(id)
            .await?
            .ok_or(AppError::NotFound("Tipo de prédio não encontrado.".into()))
    }

    pub async fn update_apartment_type(
        &self,
        id: Uuid,
        payload: &UpdateTypePayload,
    ) -> Result<ApartmentType, AppError> {
        self.get_apartment_type(id).await?;
        self.property_repo.update_apartment_type(id, payload).await
    }

    pub async fn delete_apartment_type(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.property_repo.delete_apartment_type(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Tipo de prédio não encontrado.".into()));
        }
        Ok(())
    }

    pub async fn create_house_type(&self, payload: &CreateTypePayload) -> Result<HouseType, AppError> {
        self.property_repo.create_house_type(payload).await
    }

    pub async fn list_house_types(&self) -> Result<Vec<HouseType>, AppError> {
        self.property_repo.list_house_types().await
    }

    pub async fn get_house_type(&self, id: Uuid) -> Result<HouseType, AppError> {
        self.property_repo
            .find_house_type(id)
            .await?
            .ok_or(AppError::NotFound("Tipo de casa não encontrado.".into()))
    }

    pub async fn update_house_type(
        &self,
        id: Uuid,
        payload: &UpdateTypePayload,
    ) -> Result<HouseType, AppError> {
        self.get_house_type(id).await?;
        self.property_repo.update_house_type(id, payload).await
    }

    pub async fn delete_house_type(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.property_repo.delete_house_type(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Tipo de casa não encontrado.".into()));
        }
        Ok(())
    }

    // ---
    // Apartments (prédios)
    // ---

    pub async fn create_apartment(
        &self,
        actor: &CurrentUser,
        payload: &CreateApartmentPayload,
    ) -> Result<Apartment, AppError> {
        // Landlord cria para si; admin precisa dizer de quem é o prédio
        let owner_id = if actor.is_admin() {
            payload.owner_id.ok_or(AppError::BadRequest(
                "Informe o proprietário do prédio.".into(),
            ))?
        } else {
            match payload.owner_id {
                Some(id) if actor.landlord_id != Some(id) => {
                    return Err(AppError::Forbidden(
                        "Você não pode criar prédios para outro proprietário.".into(),
                    ));
                }
                _ => actor.landlord_id.ok_or(AppError::Forbidden(
                    "Você ainda não possui cadastro de proprietário.".into(),
                ))?,
            }
        };

        self.landlord_repo
            .find(owner_id)
            .await?
            .ok_or(AppError::BadRequest("Proprietário inexistente.".into()))?;
        self.property_repo
            .find_apartment_type(payload.apartment_type_id)
            .await?
            .ok_or(AppError::BadRequest("Tipo de prédio inexistente.".into()))?;

        self.property_repo
            .create_apartment(&self.pool, payload, owner_id)
            .await
    }

    pub async fn list_apartments(
        &self,
        actor: &CurrentUser,
        search: Option<&str>,
    ) -> Result<Vec<Apartment>, AppError> {
        if actor.is_admin() {
            return self.property_repo.list_apartments(search).await;
        }
        if let Some(landlord_id) = actor.landlord_id {
            return self
                .property_repo
                .list_apartments_by_owner(landlord_id, search)
                .await;
        }
        // Todo o resto navega pela lista completa
        self.property_repo.list_apartments(search).await
    }

    pub async fn get_apartment(&self, actor: &CurrentUser, id: Uuid) -> Result<Apartment, AppError> {
        let apartment = self
            .property_repo
            .find_apartment(id)
            .await?
            .ok_or(AppError::NotFound("Prédio não encontrado.".into()))?;
        // Proprietário só enxerga o próprio portfólio; os demais navegam livremente
        if !actor.is_admin() {
            if let Some(landlord_id) = actor.landlord_id {
                if landlord_id != apartment.owner_id {
                    return Err(AppError::NotFound("Prédio não encontrado.".into()));
                }
            }
        }
        Ok(apartment)
    }

    pub async fn houses_of_apartment(
        &self,
        actor: &CurrentUser,
        id: Uuid,
    ) -> Result<Vec<House>, AppError> {
        let apartment = self.get_apartment(actor, id).await?;
        if let (Some(tenant_id), false) = (actor.tenant_id, actor.is_admin()) {
            return self
                .property_repo
                .list_houses_in_apartment_visible_to_tenant(apartment.id, tenant_id)
                .await;
        }
        self.property_repo.list_houses_in_apartment(apartment.id).await
    }

    pub async fn update_apartment(
        &self,
        actor: &CurrentUser,
        id: Uuid,
        payload: &UpdateApartmentPayload,
    ) -> Result<Apartment, AppError> {
        let apartment = self.get_apartment(actor, id).await?;
        if !actor.is_admin() && actor.landlord_id != Some(apartment.owner_id) {
            return Err(AppError::NotFound("Prédio não encontrado.".into()));
        }
        if let Some(type_id) = payload.apartment_type_id {
            self.property_repo
                .find_apartment_type(type_id)
                .await?
                .ok_or(AppError::BadRequest("Tipo de prédio inexistente.".into()))?;
        }
        self.property_repo.update_apartment(id, payload).await
    }

    pub async fn delete_apartment(&self, actor: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        let apartment = self.get_apartment(actor, id).await?;
        if !actor.is_admin() && actor.landlord_id != Some(apartment.owner_id) {
            return Err(AppError::NotFound("Prédio não encontrado.".into()));
        }
        self.property_repo.delete_apartment(id).await?;
        Ok(())
    }

    // ---
    // Houses (unidades)
    // ---

    pub async fn create_house(
        &self,
        actor: &CurrentUser,
        payload: &CreateHousePayload,
    ) -> Result<House, AppError> {
        let apartment = self
            .property_repo
            .find_apartment(payload.apartment_id)
            .await?
            .ok_or(AppError::BadRequest("Prédio inexistente.".into()))?;
        if !actor.is_admin() && actor.landlord_id != Some(apartment.owner_id) {
            return Err(AppError::Forbidden(
                "Você só pode criar casas nos próprios prédios.".into(),
            ));
        }
        self.property_repo
            .find_house_type(payload.house_type_id)
            .await?
            .ok_or(AppError::BadRequest("Tipo de casa inexistente.".into()))?;

        // A criação e a recontagem do prédio andam juntas
        let mut tx = self.pool.begin().await?;
        let house = self.property_repo.create_house(&mut *tx, payload).await?;
        self.property_repo
            .refresh_total_houses(&mut *tx, house.apartment_id)
            .await?;
        tx.commit().await?;

        Ok(house)
    }

    pub async fn list_houses(
        &self,
        actor: &CurrentUser,
        search: Option<&str>,
    ) -> Result<Vec<House>, AppError> {
        if actor.is_admin() {
            return self.property_repo.list_houses(search).await;
        }
        if let Some(landlord_id) = actor.landlord_id {
            return self.property_repo.list_houses_by_owner(landlord_id, search).await;
        }
        if let Some(tenant_id) = actor.tenant_id {
            return self
                .property_repo
                .list_houses_visible_to_tenant(tenant_id, search)
                .await;
        }
        // Sem vínculo nenhum: só as casas vagas
        self.property_repo.list_vacant_houses().await
    }

    pub async fn list_vacant_houses(&self) -> Result<Vec<House>, AppError> {
        self.property_repo.list_vacant_houses().await
    }

    pub async fn get_house(&self, actor: &CurrentUser, id: Uuid) -> Result<House, AppError> {
        let not_found = || AppError::NotFound("Casa não encontrada.".into());
        let house = self.property_repo.find_house(id).await?.ok_or_else(not_found)?;

        if actor.is_admin() {
            return Ok(house);
        }
        if let Some(landlord_id) = actor.landlord_id {
            let owner = self.property_repo.owner_of_house(id).await?;
            if owner == Some(landlord_id) {
                return Ok(house);
            }
            return Err(not_found());
        }
        // Inquilino (ou visitante autenticado) enxerga vagas e as próprias
        if house.status == HouseStatus::Vacant
            || (house.tenant_id.is_some() && house.tenant_id == actor.tenant_id)
        {
            return Ok(house);
        }
        Err(not_found())
    }

    pub async fn update_house(
        &self,
        actor: &CurrentUser,
        id: Uuid,
        payload: &UpdateHousePayload,
    ) -> Result<House, AppError> {
        let house = self.owned_house(actor, id).await?;

        if let Some(type_id) = payload.house_type_id {
            self.property_repo
                .find_house_type(type_id)
                .await?
                .ok_or(AppError::BadRequest("Tipo de casa inexistente.".into()))?;
        }
        // Mudança de prédio: o destino também precisa ser do ator
        if let Some(apartment_id) = payload.apartment_id {
            if apartment_id != house.apartment_id {
                let target = self
                    .property_repo
                    .find_apartment(apartment_id)
                    .await?
                    .ok_or(AppError::BadRequest("Prédio inexistente.".into()))?;
                if !actor.is_admin() && actor.landlord_id != Some(target.owner_id) {
                    return Err(AppError::Forbidden(
                        "Você só pode mover casas para os próprios prédios.".into(),
                    ));
                }
            }
        }
        // 'occupied' nunca é definido à mão; quem manda é o inquilino
        if payload.status == Some(HouseStatus::Occupied) && house.tenant_id.is_none() {
            return Err(AppError::BadRequest(
                "O status 'occupied' é derivado da presença de inquilino.".into(),
            ));
        }
        let requested = payload.status.unwrap_or(house.status);
        let status = House::derived_status(house.tenant_id, requested);

        let mut tx = self.pool.begin().await?;
        let updated = self
            .property_repo
            .update_house(&mut *tx, id, payload, status)
            .await?;
        // A casa mudou de prédio: reconta os dois lados
        if updated.apartment_id != house.apartment_id {
            self.property_repo
                .refresh_total_houses(&mut *tx, house.apartment_id)
                .await?;
            self.property_repo
                .refresh_total_houses(&mut *tx, updated.apartment_id)
                .await?;
        }
        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete_house(&self, actor: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        self.owned_house(actor, id).await?;

        let mut tx = self.pool.begin().await?;
        let apartment_id = self
            .property_repo
            .delete_house(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Casa não encontrada.".into()))?;
        self.property_repo
            .refresh_total_houses(&mut *tx, apartment_id)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Atribui um inquilino a uma casa vaga; a casa passa a 'occupied'.
    pub async fn assign_tenant(
        &self,
        actor: &CurrentUser,
        house_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<House, AppError> {
        let house = self.owned_house(actor, house_id).await?;

        if house.status != HouseStatus::Vacant {
            return Err(AppError::BadRequest("A casa não está vaga.".into()));
        }
        self.tenant_repo
            .find(tenant_id)
            .await?
            .ok_or(AppError::NotFound("Inquilino não encontrado.".into()))?;

        let mut tx = self.pool.begin().await?;
        let house = self
            .property_repo
            .set_tenant(&mut *tx, house_id, Some(tenant_id), HouseStatus::Occupied)
            .await?;
        tx.commit().await?;
        Ok(house)
    }

    /// Desocupa a casa: remove o inquilino e volta o status para 'vacant'.
    pub async fn vacate_house(&self, actor: &CurrentUser, house_id: Uuid) -> Result<House, AppError> {
        let house = self.property_repo.find_house(house_id).await?.ok_or(
            AppError::NotFound("Casa não encontrada.".into()),
        )?;

        if !actor.is_admin() {
            let owner = self.property_repo.owner_of_house(house_id).await?;
            if actor.landlord_id.is_none() || owner != actor.landlord_id {
                return Err(AppError::Forbidden("Permissão negada.".into()));
            }
        }
        if house.status != HouseStatus::Occupied {
            return Err(AppError::BadRequest(
                "A casa não está ocupada no momento.".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        let house = self
            .property_repo
            .set_tenant(&mut *tx, house_id, None, HouseStatus::Vacant)
            .await?;
        tx.commit().await?;
        Ok(house)
    }

    // Casa pertencente ao ator (ou qualquer casa, para admin).
    // Fora do conjunto visível, responde como inexistente.
    async fn owned_house(&self, actor: &CurrentUser, id: Uuid) -> Result<House, AppError> {
        let not_found = || AppError::NotFound("Casa não encontrada.".into());
        let house = self.property_repo.find_house(id).await?.ok_or_else(not_found)?;
        if actor.is_admin() {
            return Ok(house);
        }
        let owner = self.property_repo.owner_of_house(id).await?;
        match actor.landlord_id {
            Some(landlord_id) if owner == Some(landlord_id) => Ok(house),
            _ => Err(not_found()),
        }
    }
}
