//! Per-entity schema validation and type coercion.
//!
//! [`validate`] turns one raw snapshot record into a [`ValidRecord`] or an
//! ordered field-to-reason error map. Output is never partially typed: either
//! every field coerced, or the caller gets the full list of failures.
//!
//! Coercion rules:
//! - Numeric key fields accept string, integer, or float input. The value is
//!   parsed as a decimal and the fractional part is discarded (truncated, not
//!   rounded), so `"123.7"`, `123.9`, and `123` all coerce to `123`.
//! - Decimal fields accept string or numeric input and are truncated to the
//!   field's scale (`amount` 2, `qty` 3, rates 5).
//! - Optional fields treat JSON `null` and absence identically and pass text
//!   through unchanged.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde_json::{Map, Value};

use super::entity::EntityKind;
use super::record::{
    AccountUser, BillRecord, CancelledBill, KotSaleLine, MenuItem, ValidRecord,
};

/// Decimal places retained for bill amounts.
const AMOUNT_SCALE: u32 = 2;
/// Decimal places retained for sale-line quantities.
const QTY_SCALE: u32 = 3;
/// Decimal places retained for rates and rate tiers.
const RATE_SCALE: u32 = 5;

/// Why a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// A required field was absent or `null`.
    MissingField,
    /// The field was present but could not be coerced to its type.
    InvalidFormat,
}

/// One failed field with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire-format field name.
    pub field: &'static str,
    /// Failure category.
    pub kind: FieldErrorKind,
    /// Reason suitable for echoing back to the upstream terminal.
    pub message: String,
}

impl FieldError {
    fn missing(field: &'static str) -> Self {
        Self {
            field,
            kind: FieldErrorKind::MissingField,
            message: format!("{field} is required"),
        }
    }

    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            kind: FieldErrorKind::InvalidFormat,
            message: message.into(),
        }
    }
}

/// Ordered collection of field failures for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Individual failures, in schema field order.
    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    fn record_shape(message: impl Into<String>) -> Self {
        Self(vec![FieldError::invalid("record", message)])
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Accumulates field failures while the remaining fields keep coercing.
#[derive(Default)]
struct FieldCollector(Vec<FieldError>);

impl FieldCollector {
    fn take<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.0.push(error);
                None
            }
        }
    }

    fn into_errors(self) -> FieldErrors {
        FieldErrors(self.0)
    }
}

/// Validate one raw record against the schema for `entity`.
///
/// # Errors
///
/// Returns the full set of field failures when any field is missing or
/// malformed; the record must be resubmitted in corrected form.
pub fn validate(entity: EntityKind, raw: &Value) -> Result<ValidRecord, FieldErrors> {
    let Some(map) = raw.as_object() else {
        return Err(FieldErrors::record_shape("record must be a JSON object"));
    };

    match entity {
        EntityKind::AccUsers => validate_acc_user(map),
        EntityKind::Items => validate_item(map),
        EntityKind::Bills | EntityKind::BillsMonth => validate_bill(map),
        EntityKind::KotSales => validate_kot_sale(map),
        EntityKind::CancelledBills => validate_cancelled_bill(map),
    }
}

fn validate_acc_user(map: &Map<String, Value>) -> Result<ValidRecord, FieldErrors> {
    let mut errors = FieldCollector::default();
    let id = errors.take(required_text(map, "id"));
    let password = errors.take(required_text(map, "password"));

    let (Some(id), Some(password)) = (id, password) else {
        return Err(errors.into_errors());
    };
    Ok(ValidRecord::AccUser(AccountUser { id, password }))
}

fn validate_item(map: &Map<String, Value>) -> Result<ValidRecord, FieldErrors> {
    let mut errors = FieldCollector::default();
    let item_code = errors.take(key_number(map, "item_code"));
    let name = errors.take(required_text(map, "name"));
    let rate = errors.take(required_decimal(map, "rate", RATE_SCALE));
    let rate1 = errors.take(required_decimal(map, "rate1", RATE_SCALE));
    let rate2 = errors.take(required_decimal(map, "rate2", RATE_SCALE));
    let rate3 = errors.take(required_decimal(map, "rate3", RATE_SCALE));
    let rate4 = errors.take(required_decimal(map, "rate4", RATE_SCALE));
    let rate5 = errors.take(required_decimal(map, "rate5", RATE_SCALE));
    let rate6 = errors.take(required_decimal(map, "rate6", RATE_SCALE));
    let rate7 = errors.take(required_decimal(map, "rate7", RATE_SCALE));
    let kitchen = errors.take(required_text(map, "kitchen"));
    let category = errors.take(required_text(map, "category"));

    let (
        Some(item_code),
        Some(name),
        Some(rate),
        Some(rate1),
        Some(rate2),
        Some(rate3),
        Some(rate4),
        Some(rate5),
        Some(rate6),
        Some(rate7),
        Some(kitchen),
        Some(category),
    ) = (
        item_code, name, rate, rate1, rate2, rate3, rate4, rate5, rate6, rate7, kitchen, category,
    )
    else {
        return Err(errors.into_errors());
    };

    Ok(ValidRecord::Item(MenuItem {
        item_code,
        name,
        rate,
        rate1,
        rate2,
        rate3,
        rate4,
        rate5,
        rate6,
        rate7,
        kitchen,
        category,
    }))
}

fn validate_bill(map: &Map<String, Value>) -> Result<ValidRecord, FieldErrors> {
    let mut errors = FieldCollector::default();
    let billno = errors.take(key_number(map, "billno"));
    let time = errors.take(optional_text(map, "time"));
    let user = errors.take(optional_text(map, "user"));
    let amount = errors.take(required_decimal(map, "amount", AMOUNT_SCALE));
    let date = errors.take(optional_text(map, "date"));

    let (Some(billno), Some(time), Some(user), Some(amount), Some(date)) =
        (billno, time, user, amount, date)
    else {
        return Err(errors.into_errors());
    };

    Ok(ValidRecord::Bill(BillRecord {
        billno,
        time,
        user,
        amount,
        date,
    }))
}

fn validate_kot_sale(map: &Map<String, Value>) -> Result<ValidRecord, FieldErrors> {
    let mut errors = FieldCollector::default();
    let slno = errors.take(key_number(map, "slno"));
    let billno = errors.take(optional_key_number(map, "billno"));
    let item = errors.take(optional_text(map, "item"));
    let qty = errors.take(optional_decimal(map, "qty", QTY_SCALE));
    let rate = errors.take(optional_decimal(map, "rate", RATE_SCALE));

    let (Some(slno), Some(billno), Some(item), Some(qty), Some(rate)) =
        (slno, billno, item, qty, rate)
    else {
        return Err(errors.into_errors());
    };

    Ok(ValidRecord::KotSale(KotSaleLine {
        slno,
        billno,
        item,
        qty,
        rate,
    }))
}

fn validate_cancelled_bill(map: &Map<String, Value>) -> Result<ValidRecord, FieldErrors> {
    let mut errors = FieldCollector::default();
    let billno = errors.take(key_number(map, "billno"));
    let date = errors.take(optional_text(map, "date"));
    let creditcard = errors.take(optional_text(map, "creditcard"));
    let colnstatus = errors.take(optional_text(map, "colnstatus"));

    let (Some(billno), Some(date), Some(creditcard), Some(colnstatus)) =
        (billno, date, creditcard, colnstatus)
    else {
        return Err(errors.into_errors());
    };

    Ok(ValidRecord::Cancelled(CancelledBill {
        billno,
        date,
        creditcard,
        colnstatus,
    }))
}

/// Fetch a field, treating JSON `null` the same as absence.
fn present<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    map.get(name).filter(|value| !value.is_null())
}

fn required_text(map: &Map<String, Value>, name: &'static str) -> Result<String, FieldError> {
    match present(map, name) {
        None => Err(FieldError::missing(name)),
        Some(value) => text_from(value, name),
    }
}

fn optional_text(
    map: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<String>, FieldError> {
    match present(map, name) {
        None => Ok(None),
        Some(value) => text_from(value, name).map(Some),
    }
}

fn text_from(value: &Value, name: &'static str) -> Result<String, FieldError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        // Terminals occasionally send numeric text fields unquoted.
        Value::Number(number) => Ok(number.to_string()),
        _ => Err(FieldError::invalid(name, format!("{name} must be a string"))),
    }
}

fn key_number(map: &Map<String, Value>, name: &'static str) -> Result<i64, FieldError> {
    match present(map, name) {
        None => Err(FieldError::missing(name)),
        Some(value) => key_from(value, name),
    }
}

fn optional_key_number(
    map: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<i64>, FieldError> {
    match present(map, name) {
        None => Ok(None),
        Some(value) => key_from(value, name).map(Some),
    }
}

/// Coerce a key field to an integer, discarding any fractional part.
fn key_from(value: &Value, name: &'static str) -> Result<i64, FieldError> {
    let decimal = decimal_from(value, name)?;
    decimal
        .trunc()
        .to_i64()
        .ok_or_else(|| FieldError::invalid(name, format!("{name} is out of range")))
}

fn required_decimal(
    map: &Map<String, Value>,
    name: &'static str,
    scale: u32,
) -> Result<Decimal, FieldError> {
    match present(map, name) {
        None => Err(FieldError::missing(name)),
        Some(value) => decimal_from(value, name).map(|decimal| decimal.trunc_with_scale(scale)),
    }
}

fn optional_decimal(
    map: &Map<String, Value>,
    name: &'static str,
    scale: u32,
) -> Result<Option<Decimal>, FieldError> {
    match present(map, name) {
        None => Ok(None),
        Some(value) => decimal_from(value, name)
            .map(|decimal| Some(decimal.trunc_with_scale(scale))),
    }
}

fn decimal_from(value: &Value, name: &'static str) -> Result<Decimal, FieldError> {
    let invalid = || FieldError::invalid(name, format!("{name} must be numeric"));
    match value {
        Value::String(text) => text.trim().parse::<Decimal>().map_err(|_| invalid()),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Ok(Decimal::from(int))
            } else if let Some(uint) = number.as_u64() {
                Ok(Decimal::from(uint))
            } else {
                number
                    .as_f64()
                    .and_then(Decimal::from_f64)
                    .ok_or_else(invalid)
            }
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"billno": "123.7", "amount": "10"}), 123)]
    #[case(json!({"billno": 123.9, "amount": "10"}), 123)]
    #[case(json!({"billno": 123, "amount": "10"}), 123)]
    #[case(json!({"billno": "123", "amount": "10"}), 123)]
    fn bill_key_coercion_truncates(#[case] raw: Value, #[case] expected: i64) {
        let record = validate(EntityKind::Bills, &raw).expect("valid bill");
        let ValidRecord::Bill(bill) = record else {
            panic!("expected bill record");
        };
        assert_eq!(bill.billno, expected);
    }

    #[rstest]
    fn non_numeric_key_is_invalid_format() {
        let raw = json!({"billno": "abc", "amount": "10"});
        let errors = validate(EntityKind::Bills, &raw).expect_err("invalid key");
        let failures = errors.fields();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures.first().map(|e| e.field), Some("billno"));
        assert_eq!(
            failures.first().map(|e| e.kind),
            Some(FieldErrorKind::InvalidFormat)
        );
    }

    #[rstest]
    fn missing_required_fields_are_all_reported() {
        let raw = json!({"time": "12:30"});
        let errors = validate(EntityKind::Bills, &raw).expect_err("missing fields");
        let fields: Vec<_> = errors.fields().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["billno", "amount"]);
        assert!(
            errors
                .fields()
                .iter()
                .all(|e| e.kind == FieldErrorKind::MissingField)
        );
    }

    #[rstest]
    fn optional_fields_accept_null_and_absence() {
        let raw = json!({"billno": 1, "amount": "9.5", "time": null});
        let record = validate(EntityKind::Bills, &raw).expect("valid bill");
        let ValidRecord::Bill(bill) = record else {
            panic!("expected bill record");
        };
        assert_eq!(bill.time, None);
        assert_eq!(bill.user, None);
        assert_eq!(bill.date, None);
    }

    #[rstest]
    fn decimal_fields_truncate_to_scale() {
        let raw = json!({
            "slno": 1,
            "qty": "1.2349",
            "rate": "12.3456789",
        });
        let record = validate(EntityKind::KotSales, &raw).expect("valid line");
        let ValidRecord::KotSale(line) = record else {
            panic!("expected sale line");
        };
        assert_eq!(line.qty, Some("1.234".parse().expect("qty")));
        assert_eq!(line.rate, Some("12.34567".parse().expect("rate")));
    }

    #[rstest]
    fn amount_truncates_to_two_places() {
        let raw = json!({"billno": 1, "amount": 45.559});
        let record = validate(EntityKind::Bills, &raw).expect("valid bill");
        let ValidRecord::Bill(bill) = record else {
            panic!("expected bill record");
        };
        assert_eq!(bill.amount, "45.55".parse().expect("amount"));
    }

    #[rstest]
    fn acc_user_requires_id_and_password() {
        let raw = json!({"password": "p"});
        let errors = validate(EntityKind::AccUsers, &raw).expect_err("missing id");
        assert_eq!(errors.fields().iter().map(|e| e.field).collect::<Vec<_>>(), vec!["id"]);

        let raw = json!({"id": "U1", "password": "p"});
        let record = validate(EntityKind::AccUsers, &raw).expect("valid user");
        assert!(matches!(record, ValidRecord::AccUser(_)));
    }

    #[rstest]
    fn item_collects_every_failure() {
        let raw = json!({"item_code": "x", "rate": "bad"});
        let errors = validate(EntityKind::Items, &raw).expect_err("invalid item");
        let fields: Vec<_> = errors.fields().iter().map(|e| e.field).collect();
        assert!(fields.contains(&"item_code"));
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"rate"));
        assert!(fields.contains(&"rate7"));
        assert!(fields.contains(&"category"));
    }

    #[rstest]
    fn non_object_record_is_rejected() {
        let errors = validate(EntityKind::Bills, &json!([1, 2])).expect_err("not an object");
        assert_eq!(errors.fields().iter().map(|e| e.field).collect::<Vec<_>>(), vec!["record"]);
        assert_eq!(errors.to_string(), "record: record must be a JSON object");
    }

    #[rstest]
    fn numeric_text_fields_are_stringified() {
        let raw = json!({"id": 42, "password": "p"});
        let record = validate(EntityKind::AccUsers, &raw).expect("valid user");
        let ValidRecord::AccUser(user) = record else {
            panic!("expected account user");
        };
        assert_eq!(user.id, "42");
    }

    #[rstest]
    fn field_errors_display_joins_reasons() {
        let raw = json!({});
        let errors = validate(EntityKind::Bills, &raw).expect_err("missing fields");
        assert_eq!(errors.to_string(), "billno: billno is required; amount: amount is required");
    }
}
