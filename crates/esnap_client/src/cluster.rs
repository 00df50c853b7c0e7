use std::collections::HashMap;

use anyhow::{Context as _, Result};
use serde::Deserialize;
use tracing::debug;

use crate::client::SnapshotClient;
use crate::request;

#[derive(Debug, Deserialize)]
struct MasterNodeResponse {
    master_node: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LocalNodesResponse {
    #[serde(default)]
    nodes: HashMap<String, serde_json::Value>,
}

impl SnapshotClient {
    /// Asks the cluster whether the node behind this client's address is
    /// the elected master.
    ///
    /// Compares the elected master id from the cluster state against the
    /// node ids answering on the local-nodes endpoint. A cluster without an
    /// elected master is never "this node".
    pub async fn is_master(&self) -> Result<bool> {
        let response = self
            .execute(&request::MASTER_NODE, HashMap::new())
            .await
            .context("Failed to fetch elected master from cluster state")?;
        let state: MasterNodeResponse = serde_json::from_str(&response.text().await?)
            .context("Failed to decode cluster state response")?;

        let Some(master_id) = state.master_node else {
            debug!("cluster has no elected master");
            return Ok(false);
        };

        let response = self
            .execute(&request::LOCAL_NODES, HashMap::new())
            .await
            .context("Failed to fetch local node descriptor")?;
        let local: LocalNodesResponse = serde_json::from_str(&response.text().await?)
            .context("Failed to decode local nodes response")?;

        Ok(local.nodes.contains_key(&master_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup() -> (SnapshotClient, mockito::ServerGuard) {
        let server = mockito::Server::new_async().await;
        let client = SnapshotClient::builder()
            .base_url(server.url())
            .build()
            .unwrap();
        (client, server)
    }

    async fn mock_cluster_state(server: &mut mockito::ServerGuard, master_id: &str) {
        server
            .mock("GET", "/_cluster/state/master_node")
            .with_status(200)
            .with_body(format!(
                r#"{{"cluster_name":"es","master_node":"{master_id}"}}"#
            ))
            .create_async()
            .await;
    }

    #[tokio::test]
    async fn test_is_master_when_local_node_is_elected() {
        let (client, mut server) = setup().await;
        mock_cluster_state(&mut server, "node-1").await;
        server
            .mock("GET", "/_nodes/_local")
            .with_status(200)
            .with_body(r#"{"cluster_name":"es","nodes":{"node-1":{"name":"es-data-0"}}}"#)
            .create_async()
            .await;

        let actual = client.is_master().await.unwrap();

        assert!(actual);
    }

    #[tokio::test]
    async fn test_is_master_when_other_node_is_elected() {
        let (client, mut server) = setup().await;
        mock_cluster_state(&mut server, "node-1").await;
        server
            .mock("GET", "/_nodes/_local")
            .with_status(200)
            .with_body(r#"{"cluster_name":"es","nodes":{"node-2":{"name":"es-data-1"}}}"#)
            .create_async()
            .await;

        let actual = client.is_master().await.unwrap();

        assert!(!actual);
    }

    #[tokio::test]
    async fn test_is_master_without_elected_master() {
        let (client, mut server) = setup().await;
        server
            .mock("GET", "/_cluster/state/master_node")
            .with_status(200)
            .with_body(r#"{"cluster_name":"es"}"#)
            .create_async()
            .await;

        let actual = client.is_master().await.unwrap();

        assert!(!actual);
    }

    #[tokio::test]
    async fn test_is_master_probe_failure() {
        let (client, mut server) = setup().await;
        server
            .mock("GET", "/_cluster/state/master_node")
            .with_status(500)
            .create_async()
            .await;

        let result = client.is_master().await;

        assert!(result.is_err());
    }
}
