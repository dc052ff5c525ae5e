use rust_decimal::Decimal;
use validator::ValidationError;

pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod log;
pub mod response;
pub mod zone;

// ---
// Validação Customizada compartilhada pelos payloads de pesagem
// ---
pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("validation.not_negative".into());
        return Err(err);
    }
    Ok(())
}

// Número do tanque (ISO 6346 tem 11 caracteres, mas aceitamos placas locais)
pub fn validate_tank_id(val: &str) -> Result<(), ValidationError> {
    let trimmed = val.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("validation.tank_id_required".into());
        return Err(err);
    }
    if trimmed.chars().count() > 20 {
        let mut err = ValidationError::new("length");
        err.add_param("max".into(), &20);
        err.message = Some("validation.tank_id_too_long".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_validate_not_negative() {
        assert!(validate_not_negative(&dec!(0)).is_ok());
        assert!(validate_not_negative(&dec!(12.5)).is_ok());
        let err = validate_not_negative(&dec!(-1)).unwrap_err();
        assert_eq!(err.message.as_deref(), Some("validation.not_negative"));
    }

    #[test]
    fn test_validate_tank_id() {
        assert!(validate_tank_id("TNKU1234567").is_ok());
        assert_eq!(
            validate_tank_id("   ").unwrap_err().message.as_deref(),
            Some("validation.tank_id_required")
        );
        assert_eq!(
            validate_tank_id(&"X".repeat(21)).unwrap_err().message.as_deref(),
            Some("validation.tank_id_too_long")
        );
    }
}
