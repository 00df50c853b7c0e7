mod error;
mod retention;
mod snapshot;

pub use error::Error;
pub use retention::RetentionPolicy;
pub use snapshot::{
    ListSnapshotsResponse, ShardStats, Snapshot, SnapshotState, generate_snapshot_name,
};
