//! Domain ports for the hexagonal boundary.

mod snapshot_sync;
mod table_store;

#[cfg(test)]
pub use snapshot_sync::{MockSnapshotQuery, MockSnapshotSync};
pub use snapshot_sync::{
    FixtureSnapshotQuery, FixtureSnapshotSync, SnapshotQuery, SnapshotSync,
};
#[cfg(test)]
pub use table_store::MockTableStore;
pub use table_store::{FixtureTableStore, RowOutcome, TableStore, TableStoreError};
