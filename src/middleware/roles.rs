// src/middleware/roles.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{common::error::AppError, models::auth::CurrentUser};

/// 1. O Trait que define quem passa pelo portão
pub trait RoleGate: Send + Sync + 'static {
    fn allows(user: &CurrentUser) -> bool;
    fn denial() -> &'static str;
}

/// 2. O Extractor (Guardião). Basta declará-lo como argumento do handler
/// para a rota exigir o papel.
pub struct RequireRole<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleGate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .ok_or(AppError::InvalidToken)?;

        if !T::allows(user) {
            return Err(AppError::Forbidden(T::denial().to_string()));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PORTÕES
// ---

pub struct AdminOnly;
impl RoleGate for AdminOnly {
    fn allows(user: &CurrentUser) -> bool {
        user.is_admin()
    }
    fn denial() -> &'static str {
        "Apenas administradores podem realizar esta ação."
    }
}

pub struct LandlordOrAdmin;
impl RoleGate for LandlordOrAdmin {
    fn allows(user: &CurrentUser) -> bool {
        user.is_admin() || user.is_landlord()
    }
    fn denial() -> &'static str {
        "Apenas proprietários ou administradores podem realizar esta ação."
    }
}

pub struct TenantOrAdmin;
impl RoleGate for TenantOrAdmin {
    fn allows(user: &CurrentUser) -> bool {
        user.is_admin() || user.is_tenant()
    }
    fn denial() -> &'static str {
        "Apenas inquilinos ou administradores podem realizar esta ação."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{accounts::RoleType, auth::User};
    use chrono::Utc;
    use uuid::Uuid;

    fn current_user(role: RoleType, is_staff: bool) -> CurrentUser {
        CurrentUser {
            user: User {
                id: Uuid::new_v4(),
                username: "probe".into(),
                email: "probe@example.com".into(),
                first_name: String::new(),
                last_name: String::new(),
                password_hash: String::new(),
                is_staff,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            role,
            landlord_id: None,
            tenant_id: None,
        }
    }

    #[test]
    fn staff_passes_every_gate() {
        let user = current_user(RoleType::Tenant, true);
        assert!(AdminOnly::allows(&user));
        assert!(LandlordOrAdmin::allows(&user));
        assert!(TenantOrAdmin::allows(&user));
    }

    #[test]
    fn landlord_gate_blocks_tenants() {
        let landlord = current_user(RoleType::Landlord, false);
        let tenant = current_user(RoleType::Tenant, false);
        assert!(LandlordOrAdmin::allows(&landlord));
        assert!(!LandlordOrAdmin::allows(&tenant));
        assert!(!AdminOnly::allows(&landlord));
    }

    #[test]
    fn tenant_gate_blocks_landlords() {
        let landlord = current_user(RoleType::Landlord, false);
        let tenant = current_user(RoleType::Tenant, false);
        assert!(TenantOrAdmin::allows(&tenant));
        assert!(!TenantOrAdmin::allows(&landlord));
    }
}
