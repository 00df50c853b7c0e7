use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "esnap", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Base URL of the cluster's HTTP endpoint.
    #[arg(long, env = "ESNAP_ADDRESS", default_value = "http://localhost:9200")]
    pub address: String,

    /// Lifecycle action to perform:
    /// create-repo | list | create | restore | clean-old.
    ///
    /// An unrecognized action is a no-op, not an error.
    #[arg(long, default_value = "")]
    pub action: String,

    /// Snapshot repository name. An empty value aborts startup.
    #[arg(long, env = "ESNAP_REPO", default_value = "")]
    pub repo: String,

    /// S3 bucket backing the repository (create-repo only).
    #[arg(long, default_value = "")]
    pub bucket_name: String,

    /// Base path inside the bucket (create-repo only).
    #[arg(long, default_value = "")]
    pub base_path: String,

    /// S3 region of the bucket (create-repo only).
    #[arg(long, default_value = "")]
    pub region: String,

    /// Number of most recent snapshots clean-old keeps.
    #[arg(long, default_value_t = 720)]
    pub keep_snapshots: usize,

    /// Perform create and clean-old only when this node is the elected
    /// master.
    ///
    /// Lets the tool run identically on every cluster node without
    /// duplicating snapshot or retention actions.
    #[arg(long, default_value_t = false)]
    pub master_only: bool,

    /// Enable verbose output mode.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}
