// src/services/landlord_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LandlordRepository,
    models::{
        auth::CurrentUser,
        landlords::{CreateLandlordPayload, Landlord, UpdateLandlordPayload},
    },
};

#[derive(Clone)]
pub struct LandlordService {
    landlord_repo: LandlordRepository,
    pool: PgPool,
}

impl LandlordService {
    pub fn new(landlord_repo: LandlordRepository, pool: PgPool) -> Self {
        Self { landlord_repo, pool }
    }

    pub async fn create(
        &self,
        actor: &CurrentUser,
        payload: &CreateLandlordPayload,
    ) -> Result<Landlord, AppError> {
        // Não-admin só pode vincular o cadastro ao próprio usuário
        let user_id = match payload.user_id {
            Some(uid) if !actor.is_admin() && uid != actor.user.id => {
                return Err(AppError::Forbidden(
                    "Você não pode vincular o cadastro a outro usuário.".into(),
                ));
            }
            other => other,
        };

        self.landlord_repo.create(&self.pool, payload, user_id).await
    }

    pub async fn list(
        &self,
        actor: &CurrentUser,
        search: Option<&str>,
    ) -> Result<Vec<Landlord>, AppError> {
        if actor.is_admin() {
            return self.landlord_repo.list(search).await;
        }
        if let Some(landlord_id) = actor.landlord_id {
            return Ok(self
                .landlord_repo
                .find(landlord_id)
                .await?
                .into_iter()
                .collect());
        }
        if let Some(tenant_id) = actor.tenant_id {
            // Inquilino enxerga os donos das casas que aluga
            return self.landlord_repo.list_for_tenant(tenant_id).await;
        }
        Ok(Vec::new())
    }

    pub async fn get(&self, actor: &CurrentUser, id: Uuid) -> Result<Landlord, AppError> {
        let not_found = || AppError::NotFound("Proprietário não encontrado.".into());
        let landlord = self.landlord_repo.find(id).await?.ok_or_else(not_found)?;

        if actor.is_admin() {
            return Ok(landlord);
        }
        if actor.landlord_id == Some(id) {
            return Ok(landlord);
        }
        if let Some(tenant_id) = actor.tenant_id {
            let visible = self.landlord_repo.list_for_tenant(tenant_id).await?;
            if visible.iter().any(|l| l.id == id) {
                return Ok(landlord);
            }
        }
        Err(not_found())
    }

    pub async fn my_landlord_profile(&self, actor: &CurrentUser) -> Result<Landlord, AppError> {
        self.landlord_repo
            .find_by_user(actor.user.id)
            .await?
            .ok_or(AppError::NotFound(
                "Nenhum cadastro de proprietário encontrado.".into(),
            ))
    }

    pub async fn update(
        &self,
        actor: &CurrentUser,
        id: Uuid,
        payload: &UpdateLandlordPayload,
    ) -> Result<Landlord, AppError> {
        self.landlord_repo
            .find(id)
            .await?
            .ok_or(AppError::NotFound("Proprietário não encontrado.".into()))?;
        if !actor.is_admin() && actor.landlord_id != Some(id) {
            return Err(AppError::Forbidden(
                "Você só pode alterar o próprio cadastro.".into(),
            ));
        }
        self.landlord_repo.update(id, payload).await
    }

    pub async fn delete(&self, actor: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        if !actor.is_admin() && actor.landlord_id != Some(id) {
            return Err(AppError::Forbidden(
                "Você só pode remover o próprio cadastro.".into(),
            ));
        }
        let deleted = self.landlord_repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Proprietário não encontrado.".into()));
        }
        Ok(())
    }
}
