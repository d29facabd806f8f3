//! Fully-typed snapshot records.
//!
//! A [`ValidRecord`] is the only shape the storage adapters accept: every
//! value has already passed the validator for its entity's schema, so
//! unvalidated data can never reach storage. Bill and monthly-archive
//! records share [`BillRecord`]; the owning [`EntityKind`](super::EntityKind)
//! decides which table they land in.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Terminal login account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUser {
    /// Login identifier, e.g. `"U1"`. Unique key.
    pub id: String,
    /// Password, stored verbatim as received from the terminal.
    pub password: String,
}

/// Menu item master row with eight rate tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Numeric item code. Unique key.
    pub item_code: i64,
    /// Display name.
    pub name: String,
    /// Base rate.
    pub rate: Decimal,
    /// Rate tier 1.
    pub rate1: Decimal,
    /// Rate tier 2.
    pub rate2: Decimal,
    /// Rate tier 3.
    pub rate3: Decimal,
    /// Rate tier 4.
    pub rate4: Decimal,
    /// Rate tier 5.
    pub rate5: Decimal,
    /// Rate tier 6.
    pub rate6: Decimal,
    /// Rate tier 7.
    pub rate7: Decimal,
    /// Kitchen routing label.
    pub kitchen: String,
    /// Menu category label.
    pub category: String,
}

/// A bill, either current (`bills`) or archived (`bills_month`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRecord {
    /// Bill number. Unique key.
    pub billno: i64,
    /// Time of sale, passed through verbatim.
    pub time: Option<String>,
    /// Operator who raised the bill.
    pub user: Option<String>,
    /// Bill total.
    pub amount: Decimal,
    /// Date of sale, passed through verbatim.
    pub date: Option<String>,
}

/// Kitchen-order-ticket sale line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KotSaleLine {
    /// Serial number of the line. Unique key.
    pub slno: i64,
    /// Owning bill number, when known.
    pub billno: Option<i64>,
    /// Item sold.
    pub item: Option<String>,
    /// Quantity, three decimal places.
    pub qty: Option<Decimal>,
    /// Rate applied, five decimal places.
    pub rate: Option<Decimal>,
}

/// Cancellation record for a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelledBill {
    /// Cancelled bill number. Unique key.
    pub billno: i64,
    /// Date of cancellation, passed through verbatim.
    pub date: Option<String>,
    /// Credit card reference, when the bill was card-paid.
    pub creditcard: Option<String>,
    /// Collection status marker.
    pub colnstatus: Option<String>,
}

/// A record that has passed validation for its entity's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidRecord {
    /// An `acc_users` record.
    AccUser(AccountUser),
    /// A `tb_item_master` record.
    Item(MenuItem),
    /// A `dine_bill` or `dine_bill_month` record.
    Bill(BillRecord),
    /// A `dine_kot_sales_detail` record.
    KotSale(KotSaleLine),
    /// A `cancelled_bills` record.
    Cancelled(CancelledBill),
}

/// Unique key of a record, used for upsert matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// Textual key (account users).
    Text(String),
    /// Integer key (everything else).
    Number(i64),
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

impl ValidRecord {
    /// The record's unique key within its table.
    #[must_use]
    pub fn key(&self) -> RecordKey {
        match self {
            Self::AccUser(user) => RecordKey::Text(user.id.clone()),
            Self::Item(item) => RecordKey::Number(item.item_code),
            Self::Bill(bill) => RecordKey::Number(bill.billno),
            Self::KotSale(line) => RecordKey::Number(line.slno),
            Self::Cancelled(bill) => RecordKey::Number(bill.billno),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    fn record_keys_reflect_entity_key_fields() {
        let user = ValidRecord::AccUser(AccountUser {
            id: "U1".to_owned(),
            password: "p".to_owned(),
        });
        assert_eq!(user.key(), RecordKey::Text("U1".to_owned()));

        let bill = ValidRecord::Bill(BillRecord {
            billno: 123,
            time: None,
            user: None,
            amount: Decimal::new(4550, 2),
            date: None,
        });
        assert_eq!(bill.key(), RecordKey::Number(123));
    }

    #[rstest]
    fn valid_record_serialises_flat() {
        let record = ValidRecord::KotSale(KotSaleLine {
            slno: 7,
            billno: Some(123),
            item: Some("tea".to_owned()),
            qty: Some(Decimal::new(1500, 3)),
            rate: Some(Decimal::new(1000000, 5)),
        });

        let value = serde_json::to_value(&record).expect("serialise record");
        assert_eq!(value.get("slno").and_then(serde_json::Value::as_i64), Some(7));
        // Untagged: no enum wrapper key in the wire shape.
        assert!(value.get("KotSale").is_none());
    }
}
