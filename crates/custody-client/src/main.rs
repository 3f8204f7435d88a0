//! Custody client entry point.
//!
//! Three operations, one per invocation: `upload` replaces whatever
//! commitment the server holds, `update` unions new files into it, and
//! `download` fetches a single file by index. Each of upload/update is
//! followed by the audit described in spec.md §4.4 before any local file
//! is deleted.

use anyhow::Context;
use clap::Parser;
use custody_client::cache::{self, Cache};
use custody_client::cli::{Cli, Operation};
use custody_client::client::HttpClient;
use custody_client::error::ClientError;
use custody_client::{audit, discovery, expected_root};
use custody_merkle::{verify, LeafHash};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| cache::default_config_dir().display().to_string());
    let cache = Cache::open(&config_dir).context("opening config directory")?;
    let http = HttpClient::new(&cli.host);

    match cli.operation {
        Operation::Upload => run_upload(cli, &http, &cache),
        Operation::Update => run_update(cli, &http, &cache),
        Operation::Download => run_download(cli, &http, &cache),
    }
}

fn run_upload(cli: &Cli, http: &HttpClient, cache: &Cache) -> anyhow::Result<()> {
    let local_files =
        discovery::discover(cli.dir.as_deref(), cli.files.as_deref()).context("discovering files to upload")?;
    let contents: Vec<Vec<u8>> = local_files.iter().map(|f| f.contents.clone()).collect();

    let expected_root = expected_root(&contents);

    http.upload(&contents).context("uploading files")?;

    match audit(http, expected_root, contents.len())? {
        None => {
            cache
                .save_root_hash(expected_root)
                .context("saving root hash")?;
            println!("All files were uploaded and validated properly.");

            if cli.delete {
                discovery::delete_all(&local_files).context("deleting local files")?;
                println!("All local files have been removed successfully");
            }
            Ok(())
        }
        Some(index) => Err(ClientError::TamperDetected { index }.into()),
    }
}

fn run_update(cli: &Cli, http: &HttpClient, cache: &Cache) -> anyhow::Result<()> {
    let local_files =
        discovery::discover(cli.dir.as_deref(), cli.files.as_deref()).context("discovering files to submit")?;
    let contents: Vec<Vec<u8>> = local_files.iter().map(|f| f.contents.clone()).collect();

    let old_root = cache
        .load_root_hash()
        .context("reading the currently committed root hash")?;

    let new_root = http.update(old_root, &contents).context("updating files")?;

    // The server does not expose the merged set's size, and indices are
    // opaque across roots (spec.md §9), so the audit covers indices
    // `0..contents.len()` of the *new* root, the same count the original
    // client audits after either an upload or an update. The client does
    // not trust `new_root` just because the server returned it; every one
    // of those indices is re-verified against it here.
    match audit(http, new_root, contents.len())? {
        None => {
            cache.save_root_hash(new_root).context("saving root hash")?;
            println!("All files were uploaded and validated properly.");

            if cli.delete {
                discovery::delete_all(&local_files).context("deleting local files")?;
                println!("All local files have been removed successfully");
            }
            Ok(())
        }
        Some(index) => Err(ClientError::TamperDetected { index }.into()),
    }
}

fn run_download(cli: &Cli, http: &HttpClient, cache: &Cache) -> anyhow::Result<()> {
    if cli.index < 0 {
        anyhow::bail!("please provide a non-negative --index for the download operation");
    }
    let index = cli.index as usize;

    let root = cache
        .load_root_hash()
        .context("reading the currently committed root hash")?;

    let (file, proof) = http.download(root, index).context("downloading file")?;

    if !verify(LeafHash::of(&file), &proof, root) {
        println!("The download process was unsuccessful or the file is invalid");
        return Err(ClientError::TamperDetected { index }.into());
    }

    let path = cache
        .save_downloaded_file(index, &file)
        .context("saving downloaded file")?;
    println!("File downloaded, verified and saved as {}", path.display());
    Ok(())
}
