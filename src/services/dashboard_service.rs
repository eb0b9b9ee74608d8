// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::{auth::CurrentUser, dashboard::DashboardStats},
};

#[derive(Clone)]
pub struct DashboardService {
    dashboard_repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(dashboard_repo: DashboardRepository) -> Self {
        Self { dashboard_repo }
    }

    /// O mesmo painel para todos os papéis, cada um com seu recorte:
    /// admin vê o sistema, landlord o portfólio, tenant as casas dele.
    pub async fn stats(&self, actor: &CurrentUser) -> Result<DashboardStats, AppError> {
        if actor.is_admin() {
            return self.dashboard_repo.stats_global().await;
        }
        if let Some(landlord_id) = actor.landlord_id {
            return self.dashboard_repo.stats_for_landlord(landlord_id).await;
        }
        if let Some(tenant_id) = actor.tenant_id {
            return self.dashboard_repo.stats_for_tenant(tenant_id).await;
        }
        // Sem vínculo nenhum ainda: painel zerado
        Ok(DashboardStats::default())
    }
}
