// src/services/account_service.rs

use bcrypt::hash;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AccountRepository, UserRepository},
    models::{
        accounts::{Profile, Role, UpdateProfilePayload, UpdateRolePayload},
        auth::{CurrentUser, UpdateUserPayload, User},
    },
};

// Usuários, perfis e papéis: admin enxerga tudo, os demais só a si mesmos.
#[derive(Clone)]
pub struct AccountService {
    user_repo: UserRepository,
    account_repo: AccountRepository,
    pool: PgPool,
}

impl AccountService {
    pub fn new(user_repo: UserRepository, account_repo: AccountRepository, pool: PgPool) -> Self {
        Self { user_repo, account_repo, pool }
    }

    // ---
    // Users
    // ---

    pub async fn list_users(&self, actor: &CurrentUser) -> Result<Vec<User>, AppError> {
        if actor.is_admin() {
            self.user_repo.list_all().await
        } else {
            Ok(vec![actor.user.clone()])
        }
    }

    pub async fn get_user(&self, actor: &CurrentUser, id: Uuid) -> Result<User, AppError> {
        if !actor.is_admin() && actor.user.id != id {
            // Fora do conjunto visível: se comporta como inexistente
            return Err(AppError::NotFound("Usuário não encontrado.".into()));
        }
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Usuário não encontrado.".into()))
    }

    pub async fn update_user(
        &self,
        actor: &CurrentUser,
        id: Uuid,
        payload: &UpdateUserPayload,
    ) -> Result<User, AppError> {
        if !actor.is_admin() && actor.user.id != id {
            return Err(AppError::Forbidden(
                "Você não pode alterar outro usuário.".into(),
            ));
        }
        self.get_user(actor, id).await?;

        let mut tx = self.pool.begin().await?;

        let user = self
            .user_repo
            .update_user(
                &mut *tx,
                id,
                payload.email.as_deref(),
                payload.first_name.as_deref(),
                payload.last_name.as_deref(),
            )
            .await?;

        // Senha presente força re-hash
        if let Some(password) = &payload.password {
            let password_clone = password.clone();
            let hashed =
                tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                    .await
                    .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
            self.user_repo.update_password(&mut *tx, id, &hashed).await?;
        }

        tx.commit().await?;
        Ok(user)
    }

    pub async fn delete_user(&self, actor: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        if !actor.is_admin() && actor.user.id != id {
            return Err(AppError::Forbidden(
                "Você não pode remover outro usuário.".into(),
            ));
        }
        let deleted = self.user_repo.delete_user(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Usuário não encontrado.".into()));
        }
        Ok(())
    }

    // ---
    // Profiles
    // ---

    pub async fn list_profiles(&self, actor: &CurrentUser) -> Result<Vec<Profile>, AppError> {
        if actor.is_admin() {
            self.account_repo.list_profiles().await
        } else {
            Ok(self
                .account_repo
                .find_profile_by_user(actor.user.id)
                .await?
                .into_iter()
                .collect())
        }
    }

    pub async fn get_profile(&self, actor: &CurrentUser, id: Uuid) -> Result<Profile, AppError> {
        let profile = self
            .account_repo
            .find_profile(id)
            .await?
            .ok_or(AppError::NotFound("Perfil não encontrado.".into()))?;
        if !actor.is_admin() && profile.user_id != actor.user.id {
            return Err(AppError::NotFound("Perfil não encontrado.".into()));
        }
        Ok(profile)
    }

    pub async fn my_profile(&self, actor: &CurrentUser) -> Result<Profile, AppError> {
        self.account_repo
            .find_profile_by_user(actor.user.id)
            .await?
            .ok_or(AppError::NotFound("Perfil não encontrado.".into()))
    }

    pub async fn create_profile(
        &self,
        actor: &CurrentUser,
        payload: &UpdateProfilePayload,
    ) -> Result<Profile, AppError> {
        // O perfil é sempre do próprio usuário autenticado
        let created = self
            .account_repo
            .create_profile(&self.pool, actor.user.id)
            .await?;
        self.account_repo.update_profile(created.id, payload).await
    }

    pub async fn update_profile(
        &self,
        actor: &CurrentUser,
        id: Uuid,
        payload: &UpdateProfilePayload,
    ) -> Result<Profile, AppError> {
        let profile = self
            .account_repo
            .find_profile(id)
            .await?
            .ok_or(AppError::NotFound("Perfil não encontrado.".into()))?;
        if !actor.is_admin() && profile.user_id != actor.user.id {
            return Err(AppError::Forbidden(
                "Você não pode alterar o perfil de outro usuário.".into(),
            ));
        }
        self.account_repo.update_profile(id, payload).await
    }

    pub async fn update_my_profile(
        &self,
        actor: &CurrentUser,
        payload: &UpdateProfilePayload,
    ) -> Result<Profile, AppError> {
        let profile = self.my_profile(actor).await?;
        self.account_repo.update_profile(profile.id, payload).await
    }

    pub async fn delete_profile(&self, actor: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        let profile = self
            .account_repo
            .find_profile(id)
            .await?
            .ok_or(AppError::NotFound("Perfil não encontrado.".into()))?;
        if !actor.is_admin() && profile.user_id != actor.user.id {
            return Err(AppError::Forbidden(
                "Você não pode remover o perfil de outro usuário.".into(),
            ));
        }
        self.account_repo.delete_profile(id).await?;
        Ok(())
    }

    // ---
    // Roles
    // ---

    pub async fn list_roles(&self, actor: &CurrentUser) -> Result<Vec<Role>, AppError> {
        if actor.is_admin() {
            self.account_repo.list_roles().await
        } else {
            Ok(self
                .account_repo
                .find_role_by_user(actor.user.id)
                .await?
                .into_iter()
                .collect())
        }
    }

    pub async fn get_role(&self, actor: &CurrentUser, id: Uuid) -> Result<Role, AppError> {
        let role = self
            .account_repo
            .find_role(id)
            .await?
            .ok_or(AppError::NotFound("Papel não encontrado.".into()))?;
        if !actor.is_admin() && role.user_id != actor.user.id {
            return Err(AppError::NotFound("Papel não encontrado.".into()));
        }
        Ok(role)
    }

    pub async fn my_role(&self, actor: &CurrentUser) -> Result<Role, AppError> {
        self.account_repo
            .find_role_by_user(actor.user.id)
            .await?
            .ok_or(AppError::NotFound("Papel não encontrado.".into()))
    }

    // Somente admins alteram papéis (o guard da rota já garante isso)
    pub async fn update_role(
        &self,
        _actor: &CurrentUser,
        id: Uuid,
        payload: &UpdateRolePayload,
    ) -> Result<Role, AppError> {
        self.account_repo
            .find_role(id)
            .await?
            .ok_or(AppError::NotFound("Papel não encontrado.".into()))?;
        self.account_repo.update_role(id, payload.role_type).await
    }
}
