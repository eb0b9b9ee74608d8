// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;

// Resumo numérico do painel. O escopo dos números depende do papel:
// admin enxerga o sistema inteiro, landlord só o próprio portfólio e
// tenant só as casas e faturas dele.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_apartments: i64,
    pub total_houses: i64,
    pub vacant_houses: i64,
    pub occupied_houses: i64,
    pub total_tenants: i64,
    pub pending_bookings: i64,
    pub total_invoices: i64,
    pub unpaid_invoices: i64,
    pub overdue_invoices: i64,
    pub total_billed: Decimal,
    pub total_collected: Decimal,
}
