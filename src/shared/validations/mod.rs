//! Field validators shared by the request DTOs.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

/// `ABC-1234` or `ABC1234`: two blocks of 2-4 uppercase letters or digits,
/// optionally dash-separated.
pub static LICENSE_PLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]{2,4}-?[A-Z0-9]{2,4}$").expect("license plate pattern compiles")
});

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Largest accepted money amount, matching a NUMERIC(10, 2) column.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

pub fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if !amount.is_sign_positive() || amount.is_zero() {
        let mut err = ValidationError::new("positive");
        err.message = Some("must be positive".into());
        return Err(err);
    }
    if *amount > MAX_AMOUNT {
        let mut err = ValidationError::new("max_amount");
        err.message = Some(format!("must not exceed {}", MAX_AMOUNT).into());
        return Err(err);
    }
    Ok(())
}
