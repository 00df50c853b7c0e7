use std::collections::HashMap;

use anyhow::{Context as _, Result};
use derive_setters::Setters;
use esnap_domain::{Error, ListSnapshotsResponse, RetentionPolicy, Snapshot};
use esnap_template::TemplateEngine;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode, Url};
use tracing::{debug, info, warn};

use crate::request::{self, RequestDefinition};

const DEFAULT_ADDRESS: &str = "http://localhost:9200";

#[derive(Debug, Default, Clone, Setters)]
#[setters(into)]
pub struct SnapshotClientBuilder {
    base_url: Option<String>,
}

impl SnapshotClientBuilder {
    pub fn build(self) -> Result<SnapshotClient> {
        let client = Client::builder().build()?;
        let mut base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

        // Url::join replaces the last path segment unless the base ends
        // with a slash.
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let base_url = Url::parse(&base_url)
            .with_context(|| format!("Failed to parse base URL: {}", base_url))?;

        Ok(SnapshotClient {
            client,
            base_url,
            engine: TemplateEngine::new(),
        })
    }
}

/// Client for a cluster's snapshot management API.
///
/// One method per lifecycle action. Every call is issued exactly once, with
/// no retry layer; calls that compose (`restore_last_snapshot`,
/// `apply_retention`) run strictly sequentially.
pub struct SnapshotClient {
    client: Client,
    base_url: Url,
    engine: TemplateEngine,
}

/// Builds a fresh parameter set for a single call.
fn params(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl SnapshotClient {
    pub fn builder() -> SnapshotClientBuilder {
        SnapshotClientBuilder::default()
    }

    fn url(&self, path: &str) -> Result<Url> {
        if path.contains("://") || path.contains("..") {
            anyhow::bail!("Invalid path: Contains forbidden patterns");
        }

        // Remove leading slash to avoid double slashes
        let path = path.trim_start_matches('/');

        self.base_url
            .join(path)
            .with_context(|| format!("Failed to append {} to base URL: {}", path, self.base_url))
    }

    /// Renders a request definition with a per-call parameter set and
    /// dispatches it.
    ///
    /// Transport errors propagate unchanged; any response status in
    /// [500, 600) becomes [`Error::UnexpectedStatus`] even though the
    /// transport succeeded.
    pub(crate) async fn execute(
        &self,
        definition: &RequestDefinition,
        params: HashMap<String, String>,
    ) -> Result<Response> {
        let (path, body) = definition.render(&self.engine, &params)?;
        let url = self.url(&path)?;
        debug!(method = %definition.method, %url, "dispatching snapshot api request");

        let mut request = self.client.request(definition.method.clone(), url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_server_error() {
            return Err(Error::UnexpectedStatus { status: status.as_u16(), path }.into());
        }

        Ok(response)
    }

    /// Checks whether a snapshot repository is registered.
    ///
    /// A 404 is a valid negative answer, not an error. Any other unexpected
    /// non-5xx status is treated as "not registered" and logged.
    pub async fn check_repo(&self, repo: &str) -> Result<bool> {
        let response = self
            .execute(&request::CHECK_REPO, params(&[("repo_name", repo)]))
            .await
            .context("Failed to perform repository check request")?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                warn!(repo, %status, "unexpected status while checking repository");
                Ok(false)
            }
        }
    }

    /// Registers an s3-backed snapshot repository.
    pub async fn create_repo(
        &self,
        repo: &str,
        bucket: &str,
        base_path: &str,
        region: &str,
    ) -> Result<()> {
        self.execute(
            &request::CREATE_REPO,
            params(&[
                ("repo_name", repo),
                ("bucket_name", bucket),
                ("base_path", base_path),
                ("region", region),
            ]),
        )
        .await
        .context("Failed to perform create repository request")?;

        info!(repo, bucket, "repository registered");
        Ok(())
    }

    /// Creates a snapshot and blocks until the cluster reports completion.
    pub async fn create_snapshot(&self, repo: &str, name: &str) -> Result<()> {
        info!(repo, snapshot = name, "creating snapshot");
        self.execute(
            &request::CREATE_SNAPSHOT,
            params(&[("repo_name", repo), ("snapshot_name", name)]),
        )
        .await
        .context("Failed to perform create snapshot request")?;

        Ok(())
    }

    /// Lists all snapshots in a repository, in the order the cluster
    /// returns them (creation order, oldest first).
    pub async fn list_snapshots(&self, repo: &str) -> Result<Vec<Snapshot>> {
        let response = self
            .execute(&request::LIST_SNAPSHOTS, params(&[("repo_name", repo)]))
            .await
            .context("Failed to perform list snapshots request")?;

        let text = response.text().await?;
        let decoded: ListSnapshotsResponse =
            serde_json::from_str(&text).context("Failed to decode snapshot listing")?;

        Ok(decoded.snapshots)
    }

    /// Restores a snapshot by name.
    pub async fn restore_snapshot(&self, repo: &str, name: &str) -> Result<()> {
        info!(repo, snapshot = name, "restoring snapshot");
        self.execute(
            &request::RESTORE_SNAPSHOT,
            params(&[("repo_name", repo), ("snapshot_name", name)]),
        )
        .await
        .context("Failed to perform restore snapshot request")?;

        Ok(())
    }

    /// Restores the most recent snapshot and returns its name.
    pub async fn restore_last_snapshot(&self, repo: &str) -> Result<String> {
        let snapshots = self.list_snapshots(repo).await?;

        // Listing order is creation order, so the last entry is the newest.
        let last = snapshots
            .last()
            .ok_or_else(|| Error::NoSnapshotsFound { repo: repo.to_string() })?;

        self.restore_snapshot(repo, &last.name).await?;
        Ok(last.name.clone())
    }

    /// Deletes a snapshot by name.
    pub async fn delete_snapshot(&self, repo: &str, name: &str) -> Result<()> {
        info!(repo, snapshot = name, "deleting snapshot");
        self.execute(
            &request::DELETE_SNAPSHOT,
            params(&[("repo_name", repo), ("snapshot_name", name)]),
        )
        .await
        .context("Failed to perform delete snapshot request")?;

        Ok(())
    }

    /// Deletes every snapshot that falls outside the keep-newest-`keep`
    /// window and returns how many were deleted.
    ///
    /// Deletions run one at a time and stop at the first failure; snapshots
    /// deleted before the failure stay deleted.
    pub async fn apply_retention(&self, repo: &str, keep: usize) -> Result<usize> {
        let snapshots = self.list_snapshots(repo).await?;
        let policy = RetentionPolicy::new(keep);
        let excess = policy.excess(&snapshots);

        if excess.is_empty() {
            info!(repo, count = snapshots.len(), keep, "nothing to clean up");
            return Ok(0);
        }

        info!(
            repo,
            count = snapshots.len(),
            keep,
            deleting = excess.len(),
            "applying retention"
        );

        let mut deleted = 0usize;
        for snapshot in excess {
            self.delete_snapshot(repo, &snapshot.name)
                .await
                .with_context(|| {
                    format!(
                        "Retention stopped at snapshot '{}' after {} deletions",
                        snapshot.name, deleted
                    )
                })?;
            deleted += 1;
        }

        Ok(deleted)
    }
}
