// src/services/billing_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BillingRepository, PropertyRepository, TenantRepository},
    models::{
        auth::CurrentUser,
        billing::{
            CreateInvoicePayload, CreatePaymentPayload, Invoice, Payment, PaymentMethod,
            UpdateInvoicePayload, UpdatePaymentPayload, derive_payment_status, total_payable,
        },
    },
};

#[derive(Clone)]
pub struct BillingService {
    billing_repo: BillingRepository,
    property_repo: PropertyRepository,
    tenant_repo: TenantRepository,
    pool: PgPool,
}

impl BillingService {
    pub fn new(
        billing_repo: BillingRepository,
        property_repo: PropertyRepository,
        tenant_repo: TenantRepository,
        pool: PgPool,
    ) -> Self {
        Self { billing_repo, property_repo, tenant_repo, pool }
    }

    // ---
    // Invoices
    // ---

    /// Emite a fatura mensal de uma casa. O inquilino cobrado precisa ser
    /// o mesmo que ocupa a casa, e os campos derivados já nascem corretos.
    pub async fn create_invoice(
        &self,
        actor: &CurrentUser,
        payload: &CreateInvoicePayload,
    ) -> Result<Invoice, AppError> {
        let house = self
            .property_repo
            .find_house(payload.house_id)
            .await?
            .ok_or(AppError::BadRequest("Casa inexistente.".into()))?;

        if !actor.is_admin() {
            let owner = self.property_repo.owner_of_house(house.id).await?;
            if actor.landlord_id.is_none() || owner != actor.landlord_id {
                return Err(AppError::NotFound("Casa não encontrada.".into()));
            }
        }

        self.tenant_repo
            .find(payload.tenant_id)
            .await?
            .ok_or(AppError::BadRequest("Inquilino inexistente.".into()))?;

        if house.tenant_id != Some(payload.tenant_id) {
            return Err(AppError::BadRequest(
                "O inquilino da fatura não corresponde ao inquilino da casa.".into(),
            ));
        }

        let additional_charges = payload.additional_charges.unwrap_or(Decimal::ZERO);
        let discount = payload.discount.unwrap_or(Decimal::ZERO);
        let total = total_payable(payload.rent, additional_charges, discount);

        let today = Utc::now().date_naive();
        let due_date = payload.due_date.unwrap_or(today + chrono::Duration::days(30));
        let status = derive_payment_status(Decimal::ZERO, total, due_date, today);

        self.billing_repo
            .create_invoice(
                &self.pool,
                payload,
                additional_charges,
                discount,
                total,
                status,
                due_date,
            )
            .await
    }

    pub async fn list_invoices(
        &self,
        actor: &CurrentUser,
        search: Option<&str>,
        only_unpaid: bool,
    ) -> Result<Vec<Invoice>, AppError> {
        if actor.is_admin() {
            return self.billing_repo.list_invoices(search, only_unpaid).await;
        }
        if let Some(landlord_id) = actor.landlord_id {
            return self
                .billing_repo
                .list_invoices_for_landlord(landlord_id, search, only_unpaid)
                .await;
        }
        if let Some(tenant_id) = actor.tenant_id {
            return self
                .billing_repo
                .list_invoices_for_tenant(tenant_id, only_unpaid)
                .await;
        }
        Ok(Vec::new())
    }

    pub async fn my_invoices(&self, actor: &CurrentUser) -> Result<Vec<Invoice>, AppError> {
        let tenant_id = actor.tenant_id.ok_or(AppError::NotFound(
            "Nenhum cadastro de inquilino encontrado.".into(),
        ))?;
        self.billing_repo.list_invoices_for_tenant(tenant_id, false).await
    }

    pub async fn get_invoice(&self, actor: &CurrentUser, id: Uuid) -> Result<Invoice, AppError> {
        let not_found = || AppError::NotFound("Fatura não encontrada.".into());
        let invoice = self.billing_repo.find_invoice(id).await?.ok_or_else(not_found)?;

        if actor.is_admin() || actor.tenant_id == Some(invoice.tenant_id) {
            return Ok(invoice);
        }
        if let Some(landlord_id) = actor.landlord_id {
            let owner = self.property_repo.owner_of_house(invoice.house_id).await?;
            if owner == Some(landlord_id) {
                return Ok(invoice);
            }
        }
        Err(not_found())
    }

    /// Atualiza os valores da fatura e rederiva total, pago e status na
    /// mesma transação.
    pub async fn update_invoice(
        &self,
        actor: &CurrentUser,
        id: Uuid,
        payload: &UpdateInvoicePayload,
    ) -> Result<Invoice, AppError> {
        self.owned_invoice(actor, id).await?;

        let mut tx = self.pool.begin().await?;
        let invoice = self
            .billing_repo
            .update_invoice_fields(&mut *tx, id, payload)
            .await?;

        let amount_paid = self.billing_repo.sum_payments(&mut *tx, id).await?;
        let total = total_payable(invoice.rent, invoice.additional_charges, invoice.discount);
        let today = Utc::now().date_naive();
        let status = derive_payment_status(amount_paid, total, invoice.due_date, today);

        let invoice = self
            .billing_repo
            .apply_invoice_derivation(&mut *tx, id, total, amount_paid, status)
            .await?;
        tx.commit().await?;
        Ok(invoice)
    }

    pub async fn delete_invoice(&self, actor: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        self.owned_invoice(actor, id).await?;
        let deleted = self.billing_repo.delete_invoice(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Fatura não encontrada.".into()));
        }
        Ok(())
    }

    // ---
    // Payments
    // ---

    /// Registra um pagamento e rederiva a fatura-mãe na mesma transação.
    /// Inquilino só paga as próprias faturas.
    pub async fn create_payment(
        &self,
        actor: &CurrentUser,
        payload: &CreatePaymentPayload,
    ) -> Result<Payment, AppError> {
        let invoice = self
            .billing_repo
            .find_invoice(payload.invoice_id)
            .await?
            .ok_or(AppError::BadRequest("Fatura inexistente.".into()))?;

        // Cada um paga só o que enxerga: o inquilino as próprias faturas,
        // o proprietário as das casas dele
        if !actor.is_admin() && actor.tenant_id != Some(invoice.tenant_id) {
            if actor.is_tenant() {
                return Err(AppError::Forbidden(
                    "Você só pode pagar as próprias faturas.".into(),
                ));
            }
            let owner = self.property_repo.owner_of_house(invoice.house_id).await?;
            match actor.landlord_id {
                Some(landlord_id) if owner == Some(landlord_id) => {}
                _ => return Err(AppError::NotFound("Fatura não encontrada.".into())),
            }
        }

        let method = payload.payment_method.unwrap_or(PaymentMethod::Cash);

        let mut tx = self.pool.begin().await?;
        let payment = self.billing_repo.create_payment(&mut *tx, payload, method).await?;
        self.rederive_invoice(&mut tx, invoice.id).await?;
        tx.commit().await?;
        Ok(payment)
    }

    pub async fn list_payments(&self, actor: &CurrentUser) -> Result<Vec<Payment>, AppError> {
        if actor.is_admin() {
            return self.billing_repo.list_payments().await;
        }
        if let Some(landlord_id) = actor.landlord_id {
            return self.billing_repo.list_payments_for_landlord(landlord_id).await;
        }
        if let Some(tenant_id) = actor.tenant_id {
            return self.billing_repo.list_payments_for_tenant(tenant_id).await;
        }
        Ok(Vec::new())
    }

    pub async fn my_payments(&self, actor: &CurrentUser) -> Result<Vec<Payment>, AppError> {
        let tenant_id = actor.tenant_id.ok_or(AppError::NotFound(
            "Nenhum cadastro de inquilino encontrado.".into(),
        ))?;
        self.billing_repo.list_payments_for_tenant(tenant_id).await
    }

    pub async fn get_payment(&self, actor: &CurrentUser, id: Uuid) -> Result<Payment, AppError> {
        let not_found = || AppError::NotFound("Pagamento não encontrado.".into());
        let payment = self.billing_repo.find_payment(id).await?.ok_or_else(not_found)?;

        let invoice = self
            .billing_repo
            .find_invoice(payment.invoice_id)
            .await?
            .ok_or_else(not_found)?;

        if actor.is_admin() || actor.tenant_id == Some(invoice.tenant_id) {
            return Ok(payment);
        }
        if let Some(landlord_id) = actor.landlord_id {
            let owner = self.property_repo.owner_of_house(invoice.house_id).await?;
            if owner == Some(landlord_id) {
                return Ok(payment);
            }
        }
        Err(not_found())
    }

    pub async fn update_payment(
        &self,
        actor: &CurrentUser,
        id: Uuid,
        payload: &UpdatePaymentPayload,
    ) -> Result<Payment, AppError> {
        let payment = self.owned_payment(actor, id).await?;

        let mut tx = self.pool.begin().await?;
        let payment_updated = self.billing_repo.update_payment(&mut *tx, payment.id, payload).await?;
        self.rederive_invoice(&mut tx, payment_updated.invoice_id).await?;
        tx.commit().await?;
        Ok(payment_updated)
    }

    pub async fn delete_payment(&self, actor: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        self.owned_payment(actor, id).await?;

        let mut tx = self.pool.begin().await?;
        let invoice_id = self
            .billing_repo
            .delete_payment(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Pagamento não encontrado.".into()))?;
        self.rederive_invoice(&mut tx, invoice_id).await?;
        tx.commit().await?;
        Ok(())
    }

    // Soma os pagamentos e grava os campos derivados da fatura
    async fn rederive_invoice(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        invoice_id: Uuid,
    ) -> Result<Invoice, AppError> {
        let invoice = self
            .billing_repo
            .find_invoice(invoice_id)
            .await?
            .ok_or(AppError::NotFound("Fatura não encontrada.".into()))?;

        let amount_paid = self.billing_repo.sum_payments(&mut **tx, invoice_id).await?;
        let total = total_payable(invoice.rent, invoice.additional_charges, invoice.discount);
        let today = Utc::now().date_naive();
        let status = derive_payment_status(amount_paid, total, invoice.due_date, today);

        self.billing_repo
            .apply_invoice_derivation(&mut **tx, invoice_id, total, amount_paid, status)
            .await
    }

    // Fatura de uma casa do ator (ou qualquer fatura, para admin)
    async fn owned_invoice(&self, actor: &CurrentUser, id: Uuid) -> Result<Invoice, AppError> {
        let not_found = || AppError::NotFound("Fatura não encontrada.".into());
        let invoice = self.billing_repo.find_invoice(id).await?.ok_or_else(not_found)?;
        if actor.is_admin() {
            return Ok(invoice);
        }
        if let Some(landlord_id) = actor.landlord_id {
            let owner = self.property_repo.owner_of_house(invoice.house_id).await?;
            if owner == Some(landlord_id) {
                return Ok(invoice);
            }
        }
        Err(not_found())
    }

    async fn owned_payment(&self, actor: &CurrentUser, id: Uuid) -> Result<Payment, AppError> {
        let not_found = || AppError::NotFound("Pagamento não encontrado.".into());
        let payment = self.billing_repo.find_payment(id).await?.ok_or_else(not_found)?;
        if actor.is_admin() {
            return Ok(payment);
        }
        let invoice = self
            .billing_repo
            .find_invoice(payment.invoice_id)
            .await?
            .ok_or_else(not_found)?;
        if let Some(landlord_id) = actor.landlord_id {
            let owner = self.property_repo.owner_of_house(invoice.house_id).await?;
            if owner == Some(landlord_id) {
                return Ok(payment);
            }
        }
        Err(not_found())
    }
}
