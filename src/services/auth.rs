// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AccountRepository, LandlordRepository, TenantRepository, UserRepository},
    models::{
        accounts::RoleType,
        auth::{Claims, CurrentUser, LoginResponse, RegisterUserPayload, User},
    },
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    account_repo: AccountRepository,
    landlord_repo: LandlordRepository,
    tenant_repo: TenantRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        account_repo: AccountRepository,
        landlord_repo: LandlordRepository,
        tenant_repo: TenantRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            account_repo,
            landlord_repo,
            tenant_repo,
            jwt_secret,
            pool,
        }
    }

    /// Registra um usuário e, na mesma transação, cria o perfil vazio e o
    /// papel padrão 'tenant' que acompanham toda conta nova.
    pub async fn register_user(&self, payload: &RegisterUserPayload) -> Result<(String, User), AppError> {
        // O hashing fica fora da transação: não toca no banco
        let password_clone = payload.password.clone();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let mut tx = self.pool.begin().await?;

        let new_user = self
            .user_repo
            .create_user(
                &mut *tx,
                &payload.username,
                &payload.email,
                payload.first_name.as_deref().unwrap_or(""),
                payload.last_name.as_deref().unwrap_or(""),
                &hashed_password,
            )
            .await?;

        // Perfil e papel nascem junto com o usuário
        self.account_repo.create_profile(&mut *tx, new_user.id).await?;
        self.account_repo
            .create_role(&mut *tx, new_user.id, RoleType::Tenant)
            .await?;

        tx.commit().await?;

        let token = self.create_token(new_user.id)?;
        Ok((token, new_user))
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em uma thread separada
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let role = self
            .account_repo
            .find_role_by_user(user.id)
            .await?
            .map(|r| r.role_type)
            .unwrap_or(RoleType::Tenant);
        let profile = self.account_repo.find_profile_by_user(user.id).await?;

        let token = self.create_token(user.id)?;
        Ok(LoginResponse { token, user, role, profile })
    }

    /// Invalida o token apresentado: o `jti` entra na lista de revogados
    /// e lá permanece até o próprio JWT expirar.
    pub async fn logout(&self, claims: &Claims) -> Result<(), AppError> {
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp as i64, 0)
            .ok_or(AppError::InvalidToken)?;
        self.user_repo.revoke_token(claims.jti, claims.sub, expires_at).await
    }

    /// Valida o token e carrega o usuário com papel e vínculos de
    /// proprietário/inquilino. É o que o middleware injeta na requisição.
    pub async fn validate_token(&self, token: &str) -> Result<(Claims, CurrentUser), AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let claims = token_data.claims;

        if self.user_repo.is_token_revoked(claims.jti).await? {
            return Err(AppError::InvalidToken);
        }

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::NotFound("Usuário não encontrado.".into()))?;

        let role = self
            .account_repo
            .find_role_by_user(user.id)
            .await?
            .map(|r| r.role_type)
            .unwrap_or(RoleType::Tenant);
        let landlord_id = self.landlord_repo.find_by_user(user.id).await?.map(|l| l.id);
        let tenant_id = self.tenant_repo.find_by_user(user.id).await?.map(|t| t.id);

        Ok((claims, CurrentUser { user, role, landlord_id, tenant_id }))
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            jti: Uuid::new_v4(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Round-trip de claims sem tocar no banco
    #[test]
    fn token_claims_survive_encode_decode() {
        let secret = "segredo-de-teste";
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            jti: Uuid::new_v4(),
            exp: (now + chrono::Duration::days(1)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, claims.sub);
        assert_eq!(decoded.claims.jti, claims.jti);
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            jti: Uuid::new_v4(),
            exp: (now + chrono::Duration::days(1)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"segredo-a"),
        )
        .unwrap();

        assert!(
            decode::<Claims>(
                &token,
                &DecodingKey::from_secret(b"segredo-b"),
                &Validation::default(),
            )
            .is_err()
        );
    }
}
