use anyhow::Result;
use esnap_client::SnapshotClient;
use esnap_domain::{Error, generate_snapshot_name};
use tracing::{info, warn};

use crate::cli::Cli;

pub async fn run(cli: Cli) -> Result<()> {
    if cli.repo.is_empty() {
        return Err(Error::EmptyRepoName.into());
    }

    let client = SnapshotClient::builder()
        .base_url(cli.address.clone())
        .build()?;

    match cli.action.as_str() {
        "create-repo" => create_repo(&client, &cli).await,
        "list" => list(&client, &cli).await,
        "create" => create(&client, &cli).await,
        "restore" => restore(&client, &cli).await,
        "clean-old" => clean_old(&client, &cli).await,
        other => {
            warn!(action = other, "unrecognized action, nothing to do");
            Ok(())
        }
    }
}

async fn create_repo(client: &SnapshotClient, cli: &Cli) -> Result<()> {
    if client.check_repo(&cli.repo).await? {
        info!(repo = %cli.repo, "repository already exists");
        return Ok(());
    }

    client
        .create_repo(&cli.repo, &cli.bucket_name, &cli.base_path, &cli.region)
        .await
}

async fn list(client: &SnapshotClient, cli: &Cli) -> Result<()> {
    for snapshot in client.list_snapshots(&cli.repo).await? {
        println!("{}", snapshot.name);
    }
    Ok(())
}

async fn create(client: &SnapshotClient, cli: &Cli) -> Result<()> {
    if skip_non_master(client, cli, "snapshot creation").await? {
        return Ok(());
    }

    let name = generate_snapshot_name();
    client.create_snapshot(&cli.repo, &name).await?;
    info!(snapshot = %name, "snapshot created");
    Ok(())
}

async fn restore(client: &SnapshotClient, cli: &Cli) -> Result<()> {
    let name = client.restore_last_snapshot(&cli.repo).await?;
    info!(snapshot = %name, "restore requested");
    Ok(())
}

async fn clean_old(client: &SnapshotClient, cli: &Cli) -> Result<()> {
    if skip_non_master(client, cli, "retention cleanup").await? {
        return Ok(());
    }

    let deleted = client
        .apply_retention(&cli.repo, cli.keep_snapshots)
        .await?;
    info!(deleted, keep = cli.keep_snapshots, "retention applied");
    Ok(())
}

/// True when master gating is on and this node is not the elected master.
/// A skipped action is a success, not an error.
async fn skip_non_master(client: &SnapshotClient, cli: &Cli, action: &str) -> Result<bool> {
    if !cli.master_only {
        return Ok(false);
    }

    if client.is_master().await? {
        return Ok(false);
    }

    info!("not the elected master, skipping {action}");
    Ok(true)
}
