// src/db/billing_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::billing::{
        CreateInvoicePayload, CreatePaymentPayload, Invoice, InvoiceStatus, Payment,
        PaymentMethod, UpdateInvoicePayload, UpdatePaymentPayload,
    },
};

#[derive(Clone)]
pub struct BillingRepository {
    pool: PgPool,
}

impl BillingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Invoices
    // ---

    pub async fn create_invoice<'e, E>(
        &self,
        executor: E,
        payload: &CreateInvoicePayload,
        additional_charges: Decimal,
        discount: Decimal,
        total_payable: Decimal,
        payment_status: InvoiceStatus,
        due_date: NaiveDate,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices
                (tenant_id, house_id, month, year, rent, additional_charges,
                 discount, total_payable, payment_status, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(payload.tenant_id)
        .bind(payload.house_id)
        .bind(&payload.month)
        .bind(payload.year)
        .bind(payload.rent)
        .bind(additional_charges)
        .bind(discount)
        .bind(total_payable)
        .bind(payment_status)
        .bind(due_date)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(
                        "Já existe uma fatura para este inquilino, casa, mês e ano.".into(),
                    );
                }
            }
            AppError::from(e)
        })
    }

    pub async fn find_invoice(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    // `only_unpaid = true` restringe às faturas em aberto (unpaid/overdue)
    pub async fn list_invoices(
        &self,
        search: Option<&str>,
        only_unpaid: bool,
    ) -> Result<Vec<Invoice>, AppError> {
        sqlx::query_as::<_, Invoice>(
            r#"
            SELECT i.* FROM invoices i
            JOIN tenants t ON t.id = i.tenant_id
            JOIN houses h ON h.id = i.house_id
            WHERE ($1::text IS NULL
                   OR t.first_name ILIKE '%' || $1 || '%'
                   OR t.last_name ILIKE '%' || $1 || '%'
                   OR h.number ILIKE '%' || $1 || '%')
              AND (NOT $2 OR i.payment_status IN ('unpaid', 'overdue'))
            ORDER BY i.date_added DESC
            "#,
        )
        .bind(search)
        .bind(only_unpaid)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn list_invoices_for_landlord(
        &self,
        landlord_id: Uuid,
        search: Option<&str>,
        only_unpaid: bool,
    ) -> Result<Vec<Invoice>, AppError> {
        sqlx::query_as::<_, Invoice>(
            r#"
            SELECT i.* FROM invoices i
            JOIN tenants t ON t.id = i.tenant_id
            JOIN houses h ON h.id = i.house_id
            JOIN apartments a ON a.id = h.apartment_id
            WHERE a.owner_id = $1
              AND ($2::text IS NULL
                   OR t.first_name ILIKE '%' || $2 || '%'
                   OR t.last_name ILIKE '%' || $2 || '%'
                   OR h.number ILIKE '%' || $2 || '%')
              AND (NOT $3 OR i.payment_status IN ('unpaid', 'overdue'))
            ORDER BY i.date_added DESC
            "#,
        )
        .bind(landlord_id)
        .bind(search)
        .bind(only_unpaid)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn list_invoices_for_tenant(
        &self,
        tenant_id: Uuid,
        only_unpaid: bool,
    ) -> Result<Vec<Invoice>, AppError> {
        sqlx::query_as::<_, Invoice>(
            r#"
            SELECT * FROM invoices
            WHERE tenant_id = $1
              AND (NOT $2 OR payment_status IN ('unpaid', 'overdue'))
            ORDER BY date_added DESC
            "#,
        )
        .bind(tenant_id)
        .bind(only_unpaid)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn update_invoice_fields<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &UpdateInvoicePayload,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET month = COALESCE($2, month),
                year = COALESCE($3, year),
                rent = COALESCE($4, rent),
                additional_charges = COALESCE($5, additional_charges),
                discount = COALESCE($6, discount),
                due_date = COALESCE($7, due_date)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.month.as_deref())
        .bind(payload.year)
        .bind(payload.rent)
        .bind(payload.additional_charges)
        .bind(payload.discount)
        .bind(payload.due_date)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(
                        "Já existe uma fatura para este inquilino, casa, mês e ano.".into(),
                    );
                }
            }
            AppError::from(e)
        })
    }

    /// Grava os campos derivados da fatura. Sempre chamado dentro da
    /// transação que alterou a fatura ou seus pagamentos.
    pub async fn apply_invoice_derivation<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        total_payable: Decimal,
        amount_paid: Decimal,
        payment_status: InvoiceStatus,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET total_payable = $2, amount_paid = $3, payment_status = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(total_payable)
        .bind(amount_paid)
        .bind(payment_status)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
    }

    pub async fn delete_invoice(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ---
    // Payments
    // ---

    pub async fn create_payment<'e, E>(
        &self,
        executor: E,
        payload: &CreatePaymentPayload,
        method: PaymentMethod,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (invoice_id, amount, payment_method, transaction_reference, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(payload.invoice_id)
        .bind(payload.amount)
        .bind(method)
        .bind(payload.transaction_reference.as_deref())
        .bind(payload.notes.as_deref())
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
    }

    pub async fn find_payment(&self, id: Uuid) -> Result<Option<Payment>, AppError> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_payments(&self) -> Result<Vec<Payment>, AppError> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments ORDER BY payment_date DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_payments_for_landlord(
        &self,
        landlord_id: Uuid,
    ) -> Result<Vec<Payment>, AppError> {
        sqlx::query_as::<_, Payment>(
            r#"
            SELECT p.* FROM payments p
            JOIN invoices i ON i.id = p.invoice_id
            JOIN houses h ON h.id = i.house_id
            JOIN apartments a ON a.id = h.apartment_id
            WHERE a.owner_id = $1
            ORDER BY p.payment_date DESC
            "#,
        )
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn list_payments_for_tenant(&self, tenant_id: Uuid) -> Result<Vec<Payment>, AppError> {
        sqlx::query_as::<_, Payment>(
            r#"
            SELECT p.* FROM payments p
            JOIN invoices i ON i.id = p.invoice_id
            WHERE i.tenant_id = $1
            ORDER BY p.payment_date DESC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    pub async fn update_payment<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &UpdatePaymentPayload,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET amount = COALESCE($2, amount),
                payment_method = COALESCE($3, payment_method),
                transaction_reference = COALESCE($4, transaction_reference),
                notes = COALESCE($5, notes)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.amount)
        .bind(payload.payment_method)
        .bind(payload.transaction_reference.as_deref())
        .bind(payload.notes.as_deref())
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
    }

    pub async fn delete_payment<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Devolve a fatura para a rederivação dos totais
        sqlx::query_scalar::<_, Uuid>("DELETE FROM payments WHERE id = $1 RETURNING invoice_id")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(AppError::from)
    }

    pub async fn sum_payments<'e, E>(&self, executor: E, invoice_id: Uuid) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE invoice_id = $1",
        )
        .bind(invoice_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
    }
}
