// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        AccountRepository, BillingRepository, BookingRepository, DashboardRepository,
        LandlordRepository, PropertyRepository, TenantRepository, UserRepository,
    },
    services::{
        AccountService, AuthService, BillingService, BookingService, DashboardService,
        LandlordService, PropertyService, TenantService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub account_service: AccountService,
    pub landlord_service: LandlordService,
    pub tenant_service: TenantService,
    pub property_service: PropertyService,
    pub booking_service: BookingService,
    pub billing_service: BillingService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool, jwt_secret))
    }

    // --- Monta o gráfico de dependências ---
    // Separado do `new` para os testes poderem injetar a própria pool.
    pub fn with_pool(db_pool: PgPool, jwt_secret: String) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let account_repo = AccountRepository::new(db_pool.clone());
        let landlord_repo = LandlordRepository::new(db_pool.clone());
        let tenant_repo = TenantRepository::new(db_pool.clone());
        let property_repo = PropertyRepository::new(db_pool.clone());
        let booking_repo = BookingRepository::new(db_pool.clone());
        let billing_repo = BillingRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            account_repo.clone(),
            landlord_repo.clone(),
            tenant_repo.clone(),
            jwt_secret,
            db_pool.clone(),
        );
        let account_service =
            AccountService::new(user_repo, account_repo.clone(), db_pool.clone());
        let landlord_service = LandlordService::new(landlord_repo.clone(), db_pool.clone());
        let tenant_service =
            TenantService::new(tenant_repo.clone(), account_repo, db_pool.clone());
        let property_service = PropertyService::new(
            property_repo.clone(),
            landlord_repo,
            tenant_repo.clone(),
            db_pool.clone(),
        );
        let booking_service = BookingService::new(
            booking_repo,
            property_repo.clone(),
            tenant_repo.clone(),
            db_pool.clone(),
        );
        let billing_service =
            BillingService::new(billing_repo, property_repo, tenant_repo, db_pool.clone());
        let dashboard_service = DashboardService::new(dashboard_repo);

        Self {
            db_pool,
            auth_service,
            account_service,
            landlord_service,
            tenant_service,
            property_service,
            booking_service,
            billing_service,
            dashboard_service,
        }
    }
}
