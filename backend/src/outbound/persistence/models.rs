//! Row structs bridging domain records and the Diesel schema.
//!
//! Each synced table gets one struct usable for both reads and writes.
//! `dine_bill` and `dine_bill_month` share the domain's [`BillRecord`] but
//! need separate structs because Diesel ties a struct to one table.

use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::record::{AccountUser, BillRecord, CancelledBill, KotSaleLine, MenuItem};

use super::schema::{
    acc_users, cancelled_bills, dine_bill, dine_bill_month, dine_kot_sales_detail, tb_item_master,
};

/// Row of `acc_users`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = acc_users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccUserRow {
    /// Login identifier.
    pub id: String,
    /// Password as received.
    pub password: String,
}

impl From<&AccountUser> for AccUserRow {
    fn from(user: &AccountUser) -> Self {
        Self {
            id: user.id.clone(),
            password: user.password.clone(),
        }
    }
}

impl From<AccUserRow> for AccountUser {
    fn from(row: AccUserRow) -> Self {
        Self {
            id: row.id,
            password: row.password,
        }
    }
}

/// Row of `tb_item_master`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tb_item_master)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemRow {
    /// Numeric item code.
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

impl From<&MenuItem> for ItemRow {
    fn from(item: &MenuItem) -> Self {
        Self {
            item_code: item.item_code,
            name: item.name.clone(),
            rate: item.rate,
            rate1: item.rate1,
            rate2: item.rate2,
            rate3: item.rate3,
            rate4: item.rate4,
            rate5: item.rate5,
            rate6: item.rate6,
            rate7: item.rate7,
            kitchen: item.kitchen.clone(),
            category: item.category.clone(),
        }
    }
}

impl From<ItemRow> for MenuItem {
    fn from(row: ItemRow) -> Self {
        Self {
            item_code: row.item_code,
            name: row.name,
            rate: row.rate,
            rate1: row.rate1,
            rate2: row.rate2,
            rate3: row.rate3,
            rate4: row.rate4,
            rate5: row.rate5,
            rate6: row.rate6,
            rate7: row.rate7,
            kitchen: row.kitchen,
            category: row.category,
        }
    }
}

/// Row of `dine_bill`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = dine_bill)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BillRow {
    /// Bill number.
    pub billno: i64,
    /// Time of sale.
    pub time: Option<String>,
    /// Operator who raised the bill.
    pub user: Option<String>,
    /// Bill total.
    pub amount: Decimal,
    /// Date of sale.
    pub date: Option<String>,
}

impl From<&BillRecord> for BillRow {
    fn from(bill: &BillRecord) -> Self {
        Self {
            billno: bill.billno,
            time: bill.time.clone(),
            user: bill.user.clone(),
            amount: bill.amount,
            date: bill.date.clone(),
        }
    }
}

impl From<BillRow> for BillRecord {
    fn from(row: BillRow) -> Self {
        Self {
            billno: row.billno,
            time: row.time,
            user: row.user,
            amount: row.amount,
            date: row.date,
        }
    }
}

/// Row of `dine_bill_month`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = dine_bill_month)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BillMonthRow {
    /// Bill number.
    pub billno: i64,
    /// Time of sale.
    pub time: Option<String>,
    /// Operator who raised the bill.
    pub user: Option<String>,
    /// Bill total.
    pub amount: Decimal,
    /// Date of sale.
    pub date: Option<String>,
}

impl From<&BillRecord> for BillMonthRow {
    fn from(bill: &BillRecord) -> Self {
        Self {
            billno: bill.billno,
            time: bill.time.clone(),
            user: bill.user.clone(),
            amount: bill.amount,
            date: bill.date.clone(),
        }
    }
}

impl From<BillMonthRow> for BillRecord {
    fn from(row: BillMonthRow) -> Self {
        Self {
            billno: row.billno,
            time: row.time,
            user: row.user,
            amount: row.amount,
            date: row.date,
        }
    }
}

/// Row of `dine_kot_sales_detail`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = dine_kot_sales_detail)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct KotSaleRow {
    /// Serial number of the line.
    pub slno: i64,
    /// Owning bill number.
    pub billno: Option<i64>,
    /// Item sold.
    pub item: Option<String>,
    /// Quantity.
    pub qty: Option<Decimal>,
    /// Rate applied.
    pub rate: Option<Decimal>,
}

impl From<&KotSaleLine> for KotSaleRow {
    fn from(line: &KotSaleLine) -> Self {
        Self {
            slno: line.slno,
            billno: line.billno,
            item: line.item.clone(),
            qty: line.qty,
            rate: line.rate,
        }
    }
}

impl From<KotSaleRow> for KotSaleLine {
    fn from(row: KotSaleRow) -> Self {
        Self {
            slno: row.slno,
            billno: row.billno,
            item: row.item,
            qty: row.qty,
            rate: row.rate,
        }
    }
}

/// Row of `cancelled_bills`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = cancelled_bills)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CancelledBillRow {
    /// Cancelled bill number.
    pub billno: i64,
    /// Date of cancellation.
    pub date: Option<String>,
    /// Credit card reference.
    pub creditcard: Option<String>,
    /// Collection status marker.
    pub colnstatus: Option<String>,
}

impl From<&CancelledBill> for CancelledBillRow {
    fn from(bill: &CancelledBill) -> Self {
        Self {
            billno: bill.billno,
            date: bill.date.clone(),
            creditcard: bill.creditcard.clone(),
            colnstatus: bill.colnstatus.clone(),
        }
    }
}

impl From<CancelledBillRow> for CancelledBill {
    fn from(row: CancelledBillRow) -> Self {
        Self {
            billno: row.billno,
            date: row.date,
            creditcard: row.creditcard,
            colnstatus: row.colnstatus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    fn bill_row_round_trips_through_domain_record() {
        let bill = BillRecord {
            billno: 123,
            time: Some("19:42".to_owned()),
            user: None,
            amount: Decimal::new(4550, 2),
            date: Some("2026-08-20".to_owned()),
        };

        let row = BillRow::from(&bill);
        assert_eq!(BillRecord::from(row), bill);
    }

    #[rstest]
    fn bill_and_archive_rows_share_one_domain_shape() {
        let bill = BillRecord {
            billno: 9,
            time: None,
            user: Some("cashier".to_owned()),
            amount: Decimal::new(100, 2),
            date: None,
        };

        let current = BillRow::from(&bill);
        let archived = BillMonthRow::from(&bill);
        assert_eq!(current.billno, archived.billno);
        assert_eq!(current.amount, archived.amount);
    }
}
