#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no snapshots found in repository '{repo}'")]
    NoSnapshotsFound { repo: String },

    #[error("request to '{path}' failed with status {status}")]
    UnexpectedStatus { status: u16, path: String },

    #[error("repository name must not be empty")]
    EmptyRepoName,
}
