// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{common::error::AppError, models::dashboard::DashboardStats};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

fn stats_from_row(row: PgRow) -> DashboardStats {
    DashboardStats {
        total_apartments: row.get("total_apartments"),
        total_houses: row.get("total_houses"),
        vacant_houses: row.get("vacant_houses"),
        occupied_houses: row.get("occupied_houses"),
        total_tenants: row.get("total_tenants"),
        pending_bookings: row.get("pending_bookings"),
        total_invoices: row.get("total_invoices"),
        unpaid_invoices: row.get("unpaid_invoices"),
        overdue_invoices: row.get("overdue_invoices"),
        total_billed: row.get::<Option<Decimal>, _>("total_billed").unwrap_or(Decimal::ZERO),
        total_collected: row
            .get::<Option<Decimal>, _>("total_collected")
            .unwrap_or(Decimal::ZERO),
    }
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Visão global do sistema (admin)
    pub async fn stats_global(&self) -> Result<DashboardStats, AppError> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM apartments) AS total_apartments,
                (SELECT COUNT(*) FROM houses) AS total_houses,
                (SELECT COUNT(*) FROM houses WHERE status = 'vacant') AS vacant_houses,
                (SELECT COUNT(*) FROM houses WHERE status = 'occupied') AS occupied_houses,
                (SELECT COUNT(*) FROM tenants) AS total_tenants,
                (SELECT COUNT(*) FROM house_bookings WHERE status = 'pending') AS pending_bookings,
                (SELECT COUNT(*) FROM invoices) AS total_invoices,
                (SELECT COUNT(*) FROM invoices WHERE payment_status IN ('unpaid', 'overdue')) AS unpaid_invoices,
                (SELECT COUNT(*) FROM invoices WHERE payment_status = 'overdue') AS overdue_invoices,
                (SELECT SUM(total_payable) FROM invoices) AS total_billed,
                (SELECT SUM(amount_paid) FROM invoices) AS total_collected
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats_from_row(row))
    }

    // Visão restrita ao portfólio de um proprietário
    pub async fn stats_for_landlord(&self, landlord_id: Uuid) -> Result<DashboardStats, AppError> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM apartments WHERE owner_id = $1) AS total_apartments,
                (SELECT COUNT(*) FROM houses h JOIN apartments a ON a.id = h.apartment_id
                 WHERE a.owner_id = $1) AS total_houses,
                (SELECT COUNT(*) FROM houses h JOIN apartments a ON a.id = h.apartment_id
                 WHERE a.owner_id = $1 AND h.status = 'vacant') AS vacant_houses,
                (SELECT COUNT(*) FROM houses h JOIN apartments a ON a.id = h.apartment_id
                 WHERE a.owner_id = $1 AND h.status = 'occupied') AS occupied_houses,
                (SELECT COUNT(DISTINCT h.tenant_id) FROM houses h
                 JOIN apartments a ON a.id = h.apartment_id
                 WHERE a.owner_id = $1 AND h.tenant_id IS NOT NULL) AS total_tenants,
                (SELECT COUNT(*) FROM house_bookings b
                 JOIN houses h ON h.id = b.house_id
                 JOIN apartments a ON a.id = h.apartment_id
                 WHERE a.owner_id = $1 AND b.status = 'pending') AS pending_bookings,
                (SELECT COUNT(*) FROM invoices i
                 JOIN houses h ON h.id = i.house_id
                 JOIN apartments a ON a.id = h.apartment_id
                 WHERE a.owner_id = $1) AS total_invoices,
                (SELECT COUNT(*) FROM invoices i
                 JOIN houses h ON h.id = i.house_id
                 JOIN apartments a ON a.id = h.apartment_id
                 WHERE a.owner_id = $1 AND i.payment_status IN ('unpaid', 'overdue')) AS unpaid_invoices,
                (SELECT COUNT(*) FROM invoices i
                 JOIN houses h ON h.id = i.house_id
                 JOIN apartments a ON a.id = h.apartment_id
                 WHERE a.owner_id = $1 AND i.payment_status = 'overdue') AS overdue_invoices,
                (SELECT SUM(i.total_payable) FROM invoices i
                 JOIN houses h ON h.id = i.house_id
                 JOIN apartments a ON a.id = h.apartment_id
                 WHERE a.owner_id = $1) AS total_billed,
                (SELECT SUM(i.amount_paid) FROM invoices i
                 JOIN houses h ON h.id = i.house_id
                 JOIN apartments a ON a.id = h.apartment_id
                 WHERE a.owner_id = $1) AS total_collected
            "#,
        )
        .bind(landlord_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats_from_row(row))
    }

    // Visão do inquilino: as casas que aluga e as faturas dele
    pub async fn stats_for_tenant(&self, tenant_id: Uuid) -> Result<DashboardStats, AppError> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(DISTINCT h.apartment_id) FROM houses h
                 WHERE h.tenant_id = $1) AS total_apartments,
                (SELECT COUNT(*) FROM houses WHERE tenant_id = $1) AS total_houses,
                0::bigint AS vacant_houses,
                (SELECT COUNT(*) FROM houses WHERE tenant_id = $1) AS occupied_houses,
                1::bigint AS total_tenants,
                (SELECT COUNT(*) FROM house_bookings
                 WHERE tenant_id = $1 AND status = 'pending') AS pending_bookings,
                (SELECT COUNT(*) FROM invoices WHERE tenant_id = $1) AS total_invoices,
                (SELECT COUNT(*) FROM invoices
                 WHERE tenant_id = $1 AND payment_status IN ('unpaid', 'overdue')) AS unpaid_invoices,
                (SELECT COUNT(*) FROM invoices
                 WHERE tenant_id = $1 AND payment_status = 'overdue') AS overdue_invoices,
                (SELECT SUM(total_payable) FROM invoices WHERE tenant_id = $1) AS total_billed,
                (SELECT SUM(amount_paid) FROM invoices WHERE tenant_id = $1) AS total_collected
            "#,
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats_from_row(row))
    }
}
