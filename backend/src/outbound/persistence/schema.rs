//! Diesel table definitions for the synced POS tables.
//!
//! Column layouts mirror the terminal's export schema: natural keys
//! (`id`, `item_code`, `billno`, `slno`), `NUMERIC` money and quantity
//! columns, and free-text date and time columns carried verbatim.

diesel::table! {
    /// Terminal login accounts.
    acc_users (id) {
        id -> Varchar,
        password -> Varchar,
    }
}

diesel::table! {
    /// Menu item master with eight rate tiers.
    tb_item_master (item_code) {
        item_code -> Int8,
        name -> Varchar,
        rate -> Numeric,
        rate1 -> Numeric,
        rate2 -> Numeric,
        rate3 -> Numeric,
        rate4 -> Numeric,
        rate5 -> Numeric,
        rate6 -> Numeric,
        rate7 -> Numeric,
        kitchen -> Varchar,
        category -> Varchar,
    }
}

diesel::table! {
    /// Bills for the current period.
    dine_bill (billno) {
        billno -> Int8,
        time -> Nullable<Varchar>,
        user -> Nullable<Varchar>,
        amount -> Numeric,
        date -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Monthly bill archive, same layout as `dine_bill`.
    dine_bill_month (billno) {
        billno -> Int8,
        time -> Nullable<Varchar>,
        user -> Nullable<Varchar>,
        amount -> Numeric,
        date -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Kitchen-order-ticket sale lines.
    dine_kot_sales_detail (slno) {
        slno -> Int8,
        billno -> Nullable<Int8>,
        item -> Nullable<Varchar>,
        qty -> Nullable<Numeric>,
        rate -> Nullable<Numeric>,
    }
}

diesel::table! {
    /// Cancelled bill records.
    cancelled_bills (billno) {
        billno -> Int8,
        date -> Nullable<Varchar>,
        creditcard -> Nullable<Varchar>,
        colnstatus -> Nullable<Varchar>,
    }
}
