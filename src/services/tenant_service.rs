// src/services/tenant_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AccountRepository, TenantRepository},
    models::{
        accounts::RoleType,
        auth::CurrentUser,
        tenants::{CreateTenantPayload, Tenant, UpdateTenantPayload},
    },
};

#[derive(Clone)]
pub struct TenantService {
    tenant_repo: TenantRepository,
    account_repo: AccountRepository,
    pool: PgPool,
}

impl TenantService {
    pub fn new(tenant_repo: TenantRepository, account_repo: AccountRepository, pool: PgPool) -> Self {
        Self { tenant_repo, account_repo, pool }
    }

    /// Cria um cadastro de inquilino. Quando o cadastro aponta para o
    /// próprio usuário autenticado, o papel dele é promovido a 'tenant'
    /// na mesma transação.
    pub async fn create(
        &self,
        actor: &CurrentUser,
        payload: &CreateTenantPayload,
    ) -> Result<Tenant, AppError> {
        let user_id = match payload.user_id {
            Some(uid) if !actor.is_admin() && uid != actor.user.id => {
                return Err(AppError::Forbidden(
                    "Você não pode vincular o cadastro a outro usuário.".into(),
                ));
            }
            other => other,
        };

        let mut tx = self.pool.begin().await?;

        let tenant = self.tenant_repo.create(&mut *tx, payload, user_id).await?;

        if user_id == Some(actor.user.id) {
            self.account_repo
                .set_role_for_user(&mut *tx, actor.user.id, RoleType::Tenant)
                .await?;
        }

        tx.commit().await?;
        Ok(tenant)
    }

    pub async fn list(
        &self,
        actor: &CurrentUser,
        search: Option<&str>,
    ) -> Result<Vec<Tenant>, AppError> {
        if actor.is_admin() {
            return self.tenant_repo.list(search).await;
        }
        if let Some(tenant_id) = actor.tenant_id {
            return Ok(self.tenant_repo.find(tenant_id).await?.into_iter().collect());
        }
        if let Some(landlord_id) = actor.landlord_id {
            // Proprietário enxerga os inquilinos das casas dele
            return self.tenant_repo.list_for_landlord(landlord_id).await;
        }
        Ok(Vec::new())
    }

    pub async fn get(&self, actor: &CurrentUser, id: Uuid) -> Result<Tenant, AppError> {
        let not_found = || AppError::NotFound("Inquilino não encontrado.".into());
        let tenant = self.tenant_repo.find(id).await?.ok_or_else(not_found)?;

        if actor.is_admin() || actor.tenant_id == Some(id) {
            return Ok(tenant);
        }
        if let Some(landlord_id) = actor.landlord_id {
            let visible = self.tenant_repo.list_for_landlord(landlord_id).await?;
            if visible.iter().any(|t| t.id == id) {
                return Ok(tenant);
            }
        }
        Err(not_found())
    }

    pub async fn my_tenant_profile(&self, actor: &CurrentUser) -> Result<Tenant, AppError> {
        self.tenant_repo
            .find_by_user(actor.user.id)
            .await?
            .ok_or(AppError::NotFound(
                "Nenhum cadastro de inquilino encontrado.".into(),
            ))
    }

    pub async fn update(
        &self,
        actor: &CurrentUser,
        id: Uuid,
        payload: &UpdateTenantPayload,
    ) -> Result<Tenant, AppError> {
        self.tenant_repo
            .find(id)
            .await?
            .ok_or(AppError::NotFound("Inquilino não encontrado.".into()))?;
        if !actor.is_admin() && actor.tenant_id != Some(id) {
            return Err(AppError::Forbidden(
                "Você só pode alterar o próprio cadastro.".into(),
            ));
        }
        self.tenant_repo.update(id, payload).await
    }

    pub async fn delete(&self, actor: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        if !actor.is_admin() && actor.tenant_id != Some(id) {
            return Err(AppError::Forbidden(
                "Você só pode remover o próprio cadastro.".into(),
            ));
        }
        let deleted = self.tenant_repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Inquilino não encontrado.".into()));
        }
        Ok(())
    }
}
