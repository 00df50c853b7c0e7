use chrono::Utc;
use serde::Deserialize;

/// State of a snapshot as reported by the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SnapshotState {
    Success,
    InProgress,
    Started,
    Partial,
    Failed,
    Incompatible,
    /// States introduced by newer cluster versions must not break listing.
    #[serde(other)]
    Unknown,
}

/// Per-snapshot shard counters from the listing endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ShardStats {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub successful: u32,
}

/// A read-only projection of one snapshot as returned by the cluster's
/// listing endpoint.
///
/// The tool never constructs or mutates these; it only lists them and
/// deletes them by name.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    /// Snapshot name, unique within its repository
    #[serde(rename = "snapshot")]
    pub name: String,
    /// Indices captured by the snapshot
    #[serde(default)]
    pub indices: Vec<String>,
    pub state: SnapshotState,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub start_time_in_millis: u64,
    /// Empty while the snapshot is still in progress
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub end_time_in_millis: u64,
    #[serde(default)]
    pub duration_in_millis: u64,
    #[serde(default)]
    pub failures: Vec<serde_json::Value>,
    #[serde(default)]
    pub shards: ShardStats,
}

/// Body of `GET _snapshot/{repo}/_all`.
///
/// The cluster returns snapshots in creation order, oldest first. Retention
/// and restore-last both depend on that ordering; decoding preserves it
/// exactly and nothing re-sorts locally.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListSnapshotsResponse {
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

/// Generates the name for a new snapshot: `snapshot_<unix-seconds>`.
pub fn generate_snapshot_name() -> String {
    format!("snapshot_{}", Utc::now().timestamp())
}
