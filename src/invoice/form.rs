//! Form collection: turns raw submitted values into an [`InvoiceRecord`].
//!
//! Text fields are required. Amounts are tolerant: blank or unparsable
//! input becomes zero instead of an error. A well-formed number that is
//! negative or above [`MAX_AMOUNT_RUPEES`] is rejected.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::models::{InvoiceForm, InvoiceRecord};
use super::validation::{validate_required, ValidationError, ValidationErrors};

pub const FIELD_NAME: &str = "name";
pub const FIELD_ADDRESS: &str = "address";
pub const FIELD_CONTACT: &str = "contact";
pub const FIELD_PLOT_NO: &str = "plotNo";
pub const FIELD_BILL_MONTH: &str = "billMonth";
pub const FIELD_DUES: &str = "dues";
pub const FIELD_CURRENT_PAYMENT: &str = "currentPayment";

pub const LABEL_NAME: &str = "Resident Name";
pub const LABEL_ADDRESS: &str = "Address";
pub const LABEL_CONTACT: &str = "Contact Number";
pub const LABEL_PLOT_NO: &str = "House / Plot No.";
pub const LABEL_BILL_MONTH: &str = "Billing Month";
pub const LABEL_DUES: &str = "Previous / Other Dues";
pub const LABEL_CURRENT_PAYMENT: &str = "Current Month Charges";

/// Largest accepted value for a single amount field.
pub const MAX_AMOUNT_RUPEES: i64 = 1_000_000_000_000;

pub fn max_amount() -> Decimal {
    Decimal::new(MAX_AMOUNT_RUPEES, 0)
}

/// Why a numeric amount was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    Negative,
    TooLarge,
}

/// Coerce an amount field to a decimal.
///
/// Blank input and anything that is not a number yield zero. Scientific
/// notation (`1.5e3`) is accepted. Numbers too small to show at two
/// decimals collapse to zero.
pub fn parse_amount(raw: &str) -> Result<Decimal, AmountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let value = match Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
        Ok(value) => value,
        Err(_) => return out_of_decimal_range(trimmed),
    };

    if value.is_zero() {
        Ok(Decimal::ZERO)
    } else if value.is_sign_negative() {
        Err(AmountError::Negative)
    } else if value > max_amount() {
        Err(AmountError::TooLarge)
    } else {
        Ok(value)
    }
}

/// Classify text that `Decimal` refused: a real number beyond its range is
/// an error, anything else is treated as blank.
fn out_of_decimal_range(trimmed: &str) -> Result<Decimal, AmountError> {
    let has_digit = trimmed.chars().any(|c| c.is_ascii_digit());
    match trimmed.parse::<f64>() {
        Ok(v) if has_digit && !v.is_nan() => {
            if v.is_sign_negative() && v != 0.0 {
                Err(AmountError::Negative)
            } else if v.abs() < 1.0 {
                Ok(Decimal::ZERO)
            } else {
                Err(AmountError::TooLarge)
            }
        }
        _ => {
            log::debug!("Amount {:?} is not numeric, using 0", trimmed);
            Ok(Decimal::ZERO)
        }
    }
}

fn collect_amount(raw: &str, field: &str, label: &str, errors: &mut ValidationErrors) -> Decimal {
    match parse_amount(raw) {
        Ok(value) => value,
        Err(AmountError::Negative) => {
            errors.add(ValidationError::negative_amount(field, label));
            Decimal::ZERO
        }
        Err(AmountError::TooLarge) => {
            errors.add(ValidationError::amount_too_large(field, label, &max_amount()));
            Decimal::ZERO
        }
    }
}

impl InvoiceForm {
    /// Validate the submitted values and build the record.
    ///
    /// Every failing field is reported, not just the first.
    pub fn collect(&self) -> Result<InvoiceRecord, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate_required(&self.name, FIELD_NAME, LABEL_NAME, &mut errors);
        validate_required(&self.contact, FIELD_CONTACT, LABEL_CONTACT, &mut errors);
        validate_required(&self.address, FIELD_ADDRESS, LABEL_ADDRESS, &mut errors);
        validate_required(&self.plot_no, FIELD_PLOT_NO, LABEL_PLOT_NO, &mut errors);
        validate_required(&self.bill_month, FIELD_BILL_MONTH, LABEL_BILL_MONTH, &mut errors);

        let dues = collect_amount(&self.dues, FIELD_DUES, LABEL_DUES, &mut errors);
        let current_payment = collect_amount(
            &self.current_payment,
            FIELD_CURRENT_PAYMENT,
            LABEL_CURRENT_PAYMENT,
            &mut errors,
        );

        errors.into_result()?;

        Ok(InvoiceRecord {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            contact: self.contact.trim().to_string(),
            plot_no: self.plot_no.trim().to_string(),
            bill_month: self.bill_month.trim().to_string(),
            dues,
            current_payment,
        })
    }
}
