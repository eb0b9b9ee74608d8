// src/models/billing.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::common::validators::validate_non_negative;

// ---
// 1. Invoice (A fatura mensal de aluguel)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invoice_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Unpaid,
    Partial,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub house_id: Uuid,
    pub month: String,
    pub year: i32,
    pub rent: Decimal,
    pub additional_charges: Decimal,
    pub discount: Decimal,
    // Derivado: rent + additional_charges - discount
    pub total_payable: Decimal,
    // Derivado: soma dos pagamentos registrados
    pub amount_paid: Decimal,
    pub payment_status: InvoiceStatus,
    pub due_date: NaiveDate,
    pub date_added: DateTime<Utc>,
}

/// Total a pagar de uma fatura. Nunca fica negativo: um desconto maior
/// que o valor devido zera a fatura.
pub fn total_payable(rent: Decimal, additional_charges: Decimal, discount: Decimal) -> Decimal {
    let total = rent + additional_charges - discount;
    if total.is_sign_negative() { Decimal::ZERO } else { total }
}

/// Regra de derivação do status de pagamento:
/// quitada quando o pago cobre o total; parcial quando há pagamento
/// insuficiente; vencida quando não houve pagamento e o prazo passou.
pub fn derive_payment_status(
    amount_paid: Decimal,
    total_payable: Decimal,
    due_date: NaiveDate,
    today: NaiveDate,
) -> InvoiceStatus {
    if amount_paid >= total_payable {
        InvoiceStatus::Paid
    } else if amount_paid > Decimal::ZERO {
        InvoiceStatus::Partial
    } else if due_date < today {
        InvoiceStatus::Overdue
    } else {
        InvoiceStatus::Unpaid
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoicePayload {
    pub tenant_id: Uuid,
    pub house_id: Uuid,
    #[validate(length(min = 1, message = "O mês é obrigatório."))]
    pub month: String,
    pub year: i32,
    #[validate(custom(function = validate_non_negative))]
    pub rent: Decimal,
    #[validate(custom(function = validate_non_negative))]
    pub additional_charges: Option<Decimal>,
    #[validate(custom(function = validate_non_negative))]
    pub discount: Option<Decimal>,
    // Ausente: vence 30 dias após a emissão
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoicePayload {
    #[validate(length(min = 1, message = "O mês não pode ficar vazio."))]
    pub month: Option<String>,
    pub year: Option<i32>,
    #[validate(custom(function = validate_non_negative))]
    pub rent: Option<Decimal>,
    #[validate(custom(function = validate_non_negative))]
    pub additional_charges: Option<Decimal>,
    #[validate(custom(function = validate_non_negative))]
    pub discount: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
}

// ---
// 2. Payment (Um pagamento aplicado a uma fatura)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    MobileMoney,
    CreditCard,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub transaction_reference: Option<String>,
    pub payment_date: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentPayload {
    pub invoice_id: Uuid,
    #[validate(custom(function = validate_non_negative))]
    pub amount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub transaction_reference: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentPayload {
    #[validate(custom(function = validate_non_negative))]
    pub amount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    pub transaction_reference: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    #[test]
    fn total_payable_is_rent_plus_charges_minus_discount() {
        assert_eq!(total_payable(dec("1000"), dec("150"), dec("50")), dec("1100"));
        assert_eq!(total_payable(dec("1000"), dec("0"), dec("0")), dec("1000"));
    }

    #[test]
    fn total_payable_never_goes_negative() {
        assert_eq!(total_payable(dec("100"), dec("0"), dec("500")), Decimal::ZERO);
    }

    #[test]
    fn status_becomes_paid_once_amount_paid_covers_total() {
        let today = date("2025-06-10");
        let due = date("2025-06-30");
        assert_eq!(
            derive_payment_status(dec("1100"), dec("1100"), due, today),
            InvoiceStatus::Paid
        );
        assert_eq!(
            derive_payment_status(dec("1200"), dec("1100"), due, today),
            InvoiceStatus::Paid
        );
    }

    #[test]
    fn partial_payment_yields_partial_status() {
        let today = date("2025-06-10");
        assert_eq!(
            derive_payment_status(dec("400"), dec("1100"), date("2025-06-30"), today),
            InvoiceStatus::Partial
        );
        // Parcial prevalece mesmo com o prazo vencido
        assert_eq!(
            derive_payment_status(dec("400"), dec("1100"), date("2025-06-01"), today),
            InvoiceStatus::Partial
        );
    }

    #[test]
    fn unpaid_invoice_past_due_date_becomes_overdue() {
        let today = date("2025-06-10");
        assert_eq!(
            derive_payment_status(Decimal::ZERO, dec("1100"), date("2025-06-09"), today),
            InvoiceStatus::Overdue
        );
        assert_eq!(
            derive_payment_status(Decimal::ZERO, dec("1100"), date("2025-06-10"), today),
            InvoiceStatus::Unpaid
        );
    }
}
