mod client;
mod cluster;
mod request;

pub use client::{SnapshotClient, SnapshotClientBuilder};
pub use request::RequestDefinition;
