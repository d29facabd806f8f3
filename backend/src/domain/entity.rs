//! Entity kinds synchronised by the snapshot engine.
//!
//! Each kind maps one upstream point-of-sale table to one HTTP resource and
//! one physical table. The engine treats the kinds as independent; no
//! cross-entity relationships are enforced.

use serde::{Deserialize, Serialize};

/// The six point-of-sale tables accepted by the sync endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Terminal login accounts (`acc_users`).
    AccUsers,
    /// Menu item master with rate tiers (`items`).
    Items,
    /// Current bills (`bills`).
    Bills,
    /// Monthly bill archive, same shape as bills (`bills_month`).
    BillsMonth,
    /// Kitchen-order-ticket sale lines (`kot_sales`).
    KotSales,
    /// Cancelled bill records (`cancelled_bills`).
    CancelledBills,
}

impl EntityKind {
    /// All entity kinds, in resource registration order.
    pub const ALL: [Self; 6] = [
        Self::AccUsers,
        Self::Items,
        Self::Bills,
        Self::BillsMonth,
        Self::KotSales,
        Self::CancelledBills,
    ];

    /// HTTP resource segment, e.g. `acc_users` in `/api/acc_users/`.
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::AccUsers => "acc_users",
            Self::Items => "items",
            Self::Bills => "bills",
            Self::BillsMonth => "bills_month",
            Self::KotSales => "kot_sales",
            Self::CancelledBills => "cancelled_bills",
        }
    }

    /// Physical table name backing the resource.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::AccUsers => "acc_users",
            Self::Items => "tb_item_master",
            Self::Bills => "dine_bill",
            Self::BillsMonth => "dine_bill_month",
            Self::KotSales => "dine_kot_sales_detail",
            Self::CancelledBills => "cancelled_bills",
        }
    }

    /// Name of the unique key field in the wire format.
    #[must_use]
    pub const fn key_field(self) -> &'static str {
        match self {
            Self::AccUsers => "id",
            Self::Items => "item_code",
            Self::Bills | Self::BillsMonth | Self::CancelledBills => "billno",
            Self::KotSales => "slno",
        }
    }

    /// Whether a bare JSON object is promoted to a one-element snapshot.
    ///
    /// Only the `acc_users` resource accepts this; every other resource
    /// requires a JSON array.
    #[must_use]
    pub const fn accepts_single_object(self) -> bool {
        matches!(self, Self::AccUsers)
    }
}

/// How a sync call reconciles the snapshot against existing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplaceMode {
    /// Clear all existing rows, then insert the validated snapshot.
    FullReplace,
    /// Match incoming records to existing rows by key; update matches and
    /// insert the rest without touching unrelated rows.
    UpsertByKey,
}

/// Per-entity replace-mode configuration.
///
/// The upstream system historically flip-flopped between full-replace and
/// upsert semantics for `acc_users` and `items`, so those two are
/// configurable. The remaining entities are always full replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncPolicy {
    acc_users: ReplaceMode,
    items: ReplaceMode,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            acc_users: ReplaceMode::FullReplace,
            items: ReplaceMode::FullReplace,
        }
    }
}

impl SyncPolicy {
    /// Override the mode used for the `acc_users` resource.
    #[must_use]
    pub const fn with_acc_users_mode(mut self, mode: ReplaceMode) -> Self {
        self.acc_users = mode;
        self
    }

    /// Override the mode used for the `items` resource.
    #[must_use]
    pub const fn with_items_mode(mut self, mode: ReplaceMode) -> Self {
        self.items = mode;
        self
    }

    /// Resolve the mode for one entity kind.
    #[must_use]
    pub const fn mode(&self, entity: EntityKind) -> ReplaceMode {
        match entity {
            EntityKind::AccUsers => self.acc_users,
            EntityKind::Items => self.items,
            EntityKind::Bills
            | EntityKind::BillsMonth
            | EntityKind::KotSales
            | EntityKind::CancelledBills => ReplaceMode::FullReplace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EntityKind::AccUsers, "acc_users", "acc_users", "id")]
    #[case(EntityKind::Items, "items", "tb_item_master", "item_code")]
    #[case(EntityKind::Bills, "bills", "dine_bill", "billno")]
    #[case(EntityKind::BillsMonth, "bills_month", "dine_bill_month", "billno")]
    #[case(EntityKind::KotSales, "kot_sales", "dine_kot_sales_detail", "slno")]
    #[case(
        EntityKind::CancelledBills,
        "cancelled_bills",
        "cancelled_bills",
        "billno"
    )]
    fn entity_kind_naming(
        #[case] entity: EntityKind,
        #[case] resource: &str,
        #[case] table: &str,
        #[case] key: &str,
    ) {
        assert_eq!(entity.resource(), resource);
        assert_eq!(entity.table(), table);
        assert_eq!(entity.key_field(), key);
    }

    #[rstest]
    fn only_acc_users_accepts_single_object() {
        for entity in EntityKind::ALL {
            assert_eq!(
                entity.accepts_single_object(),
                entity == EntityKind::AccUsers
            );
        }
    }

    #[rstest]
    fn default_policy_is_full_replace_everywhere() {
        let policy = SyncPolicy::default();
        for entity in EntityKind::ALL {
            assert_eq!(policy.mode(entity), ReplaceMode::FullReplace);
        }
    }

    #[rstest]
    fn policy_overrides_only_apply_to_configurable_entities() {
        let policy = SyncPolicy::default()
            .with_acc_users_mode(ReplaceMode::UpsertByKey)
            .with_items_mode(ReplaceMode::UpsertByKey);

        assert_eq!(policy.mode(EntityKind::AccUsers), ReplaceMode::UpsertByKey);
        assert_eq!(policy.mode(EntityKind::Items), ReplaceMode::UpsertByKey);
        assert_eq!(policy.mode(EntityKind::Bills), ReplaceMode::FullReplace);
        assert_eq!(policy.mode(EntityKind::KotSales), ReplaceMode::FullReplace);
    }
}
