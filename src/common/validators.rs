// src/common/validators.rs

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    // Formato internacional: '+999999999', até 15 dígitos.
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?1?\d{9,15}$").unwrap();
}

/// Valor monetário nunca pode ser negativo.
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

/// Taxa de administração do prédio, em percentual (0 a 100).
pub fn validate_percentage(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || *value > Decimal::from(100) {
        let mut err = ValidationError::new("percentage");
        err.message = Some("O percentual deve estar entre 0 e 100.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn phone_regex_accepts_international_format() {
        assert!(PHONE_REGEX.is_match("+254712345678"));
        assert!(PHONE_REGEX.is_match("0712345678"));
        assert!(!PHONE_REGEX.is_match("12345"));
        assert!(!PHONE_REGEX.is_match("telefone"));
        assert!(!PHONE_REGEX.is_match("+12345678901234567890"));
    }

    #[test]
    fn non_negative_rejects_negative_amounts() {
        assert!(validate_non_negative(&Decimal::from_str("0.00").unwrap()).is_ok());
        assert!(validate_non_negative(&Decimal::from_str("1500.50").unwrap()).is_ok());
        assert!(validate_non_negative(&Decimal::from_str("-0.01").unwrap()).is_err());
    }

    #[test]
    fn percentage_bounds_are_enforced() {
        assert!(validate_percentage(&Decimal::from(0)).is_ok());
        assert!(validate_percentage(&Decimal::from(100)).is_ok());
        assert!(validate_percentage(&Decimal::from(101)).is_err());
        assert!(validate_percentage(&Decimal::from(-1)).is_err());
    }
}
