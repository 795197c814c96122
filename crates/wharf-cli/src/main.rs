//! `wharf`: content-addressed asset backup and verification.
//!
//! # Usage
//!
//! ```text
//! wharf discover --creator <addr> [--creator <addr>]   # build + save the manifest
//! wharf sync                                           # fetch missing objects
//! wharf verify                                         # recompute and compare addresses
//! wharf export-cids                                    # write the flat CID list
//! ```
//!
//! All commands operate on the backup root (config `[backup] root`, default
//! `~/.wharf`, overridable with `--root`).

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use wharf_discovery::{discover, HttpRecordSource};
use wharf_ipfs::IpfsCli;
use wharf_manifest::{build_manifest, export_cids, load_manifest, save_manifest};
use wharf_store::BackupStore;
use wharf_sync::BackupSync;
use wharf_types::Manifest;
use wharf_verify::{Verifier, VerifyStatus};

use config::CliConfig;

// -----------------------------------------------------------------------
// CLI definition
// -----------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "wharf",
    version,
    about = "Content-addressed asset backup and verification"
)]
struct Cli {
    /// Path to TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the backup root directory.
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the record service and build the manifest.
    Discover {
        /// Creator address to query. Can be given multiple times;
        /// overrides `[discovery] creators` from the config file.
        #[arg(long = "creator")]
        creators: Vec<String>,

        /// Override the record API base URL.
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Fetch every missing referenced object into the backup.
    Sync,

    /// Recompute content addresses and report backup integrity.
    Verify,

    /// Write the deduplicated CID list next to the manifest.
    ExportCids,
}

// -----------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CliConfig::load(cli.config.as_deref()).context("failed to load config")?;

    setup_tracing(&config.log.level);

    if let Some(root) = cli.root {
        config.backup.root = root;
    }

    match cli.command {
        Commands::Discover { creators, base_url } => {
            if !creators.is_empty() {
                config.discovery.creators = creators;
            }
            if let Some(url) = base_url {
                config.discovery.base_url = url;
            }
            cmd_discover(&config).await
        }
        Commands::Sync => cmd_sync(&config).await,
        Commands::Verify => cmd_verify(&config).await,
        Commands::ExportCids => cmd_export_cids(&config).await,
    }
}

/// Initialize the `tracing` subscriber with the given level filter.
///
/// Respects `RUST_LOG` env var if set, otherwise uses the config value.
fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// -----------------------------------------------------------------------
// wharf discover
// -----------------------------------------------------------------------

async fn cmd_discover(config: &CliConfig) -> Result<()> {
    if config.discovery.base_url.is_empty() {
        bail!("no record API configured: set [discovery] base_url or pass --base-url");
    }
    if config.discovery.creators.is_empty() {
        bail!("no creators to query: set [discovery] creators or pass --creator");
    }

    info!(
        base_url = %config.discovery.base_url,
        creators = config.discovery.creators.len(),
        "starting discovery"
    );

    let source = HttpRecordSource::new(&config.discovery.base_url);
    let records = discover(&source, &config.discovery.creators)
        .await
        .context("record discovery failed")?;

    let manifest = build_manifest(&records).context("manifest construction failed")?;

    let store = BackupStore::open(&config.backup.root)
        .await
        .context("failed to open backup root")?;
    save_manifest(&manifest, &store.manifest_path()).context("failed to save manifest")?;

    println!("Discovered {} records", records.len());
    println!(
        "Manifest: {} entries, {} unique addresses -> {}",
        manifest.len(),
        manifest.unique_cids().len(),
        store.manifest_path().display()
    );
    Ok(())
}

// -----------------------------------------------------------------------
// wharf sync
// -----------------------------------------------------------------------

async fn cmd_sync(config: &CliConfig) -> Result<()> {
    let store = BackupStore::open(&config.backup.root)
        .await
        .context("failed to open backup root")?;
    let manifest = load_manifest_or_hint(&store)?;

    let ipfs = IpfsCli::new(&config.ipfs.binary);
    ipfs.check_available()
        .await
        .context("fetch tool precondition failed")?;

    let sync = BackupSync::new(store, Arc::new(ipfs));
    let report = sync.sync(&manifest).await?;

    println!("Sync complete ({} unique addresses)", report.total());
    println!("  fetched:         {}", report.fetched.len());
    println!("  already present: {}", report.already_present.len());
    println!("  failed:          {}", report.failed.len());
    for (cid, detail) in &report.failed {
        println!("    {cid}: {detail}");
    }
    if !report.is_clean() {
        println!("Some objects could not be fetched; rerun `wharf sync` to retry them.");
    }
    Ok(())
}

// -----------------------------------------------------------------------
// wharf verify
// -----------------------------------------------------------------------

async fn cmd_verify(config: &CliConfig) -> Result<()> {
    let store = BackupStore::open(&config.backup.root)
        .await
        .context("failed to open backup root")?;
    let manifest = load_manifest_or_hint(&store)?;

    let ipfs = IpfsCli::new(&config.ipfs.binary);
    ipfs.check_available()
        .await
        .context("hash tool precondition failed")?;

    let verifier = Verifier::new(store, Arc::new(ipfs));
    let report = verifier.verify(&manifest).await?;

    let summary = report.summary();
    println!("Verification complete");
    println!("  ok:       {}", summary.ok);
    println!("  missing:  {}", summary.missing);
    println!("  mismatch: {}", summary.mismatch);
    println!("  failed:   {}", summary.failed);

    // Name the entry and role for every problem so the user can retry
    // narrowly instead of rerunning everything.
    for reference in report.per_entry(&manifest) {
        match reference.status {
            Some(VerifyStatus::Ok) => {}
            Some(status) => println!(
                "  {:?}: {} [{}] {}",
                status, reference.entry.name, reference.role, reference.cid
            ),
            None => println!(
                "  Unresolved: {} [{}] {} (hash tool failed)",
                reference.entry.name, reference.role, reference.cid
            ),
        }
    }

    if report.is_clean() {
        println!("Backup is intact.");
    }
    Ok(())
}

// -----------------------------------------------------------------------
// wharf export-cids
// -----------------------------------------------------------------------

async fn cmd_export_cids(config: &CliConfig) -> Result<()> {
    let store = BackupStore::open(&config.backup.root)
        .await
        .context("failed to open backup root")?;
    let manifest = load_manifest_or_hint(&store)?;

    let cids = export_cids(&manifest);
    let path = store.write_cid_list(&cids).await?;

    println!("Exported {} addresses -> {}", cids.len(), path.display());
    Ok(())
}

// -----------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------

fn load_manifest_or_hint(store: &BackupStore) -> Result<Manifest> {
    let path = store.manifest_path();
    load_manifest(&path).with_context(|| {
        format!(
            "cannot load manifest at {}. Run `wharf discover` first.",
            path.display()
        )
    })
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
