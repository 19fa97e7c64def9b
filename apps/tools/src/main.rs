use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{AudioUpload, FeatureClient};
use futures::{stream, StreamExt};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
struct Cli {
    /// Base URL of the feature service.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the feature rows currently known to the service.
    List,
    /// Upload every matching audio file under a directory for analysis.
    UploadDir {
        dir: PathBuf,
        /// File extensions to submit.
        #[arg(long, value_delimiter = ',', default_value = "wav,mp3,flac,ogg")]
        ext: Vec<String>,
        /// Maximum concurrent uploads.
        #[arg(long, default_value_t = 4)]
        concurrency: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();
    let client = FeatureClient::new(cli.server_url);

    match cli.command {
        Command::List => {
            let records = client
                .fetch_features()
                .await
                .context("fetching feature list")?;
            println!("{} analyzed files", records.len());
            for record in records {
                println!(
                    "{}  sr={}  centroid={:.0}  bandwidth={:.0}  rms={:.3}",
                    record.display_name(),
                    record.sr,
                    record.spectral_centroid_mean,
                    record.spectral_bandwidth_mean,
                    record.rms_mean,
                );
            }
        }
        Command::UploadDir {
            dir,
            ext,
            concurrency,
        } => {
            let files = collect_audio_files(&dir, &ext);
            if files.is_empty() {
                bail!("no matching audio files under {}", dir.display());
            }
            println!("Found {} files", files.len());

            let results = stream::iter(files.into_iter().map(|path| {
                let client = client.clone();
                async move {
                    let outcome = upload_one(&client, &path).await;
                    (path, outcome)
                }
            }))
            .buffer_unordered(concurrency.max(1))
            .collect::<Vec<_>>()
            .await;

            let uploaded = results.iter().filter(|(_, r)| r.is_ok()).count();
            let failed = results.len() - uploaded;
            println!("\nUploaded & analyzed {uploaded} files ({failed} failed)");
            if uploaded == 0 {
                bail!("every upload failed");
            }
        }
    }

    Ok(())
}

async fn upload_one(client: &FeatureClient, path: &Path) -> Result<()> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.bin")
        .to_string();
    println!("Uploading {filename} ...");

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let mime_type = mime_guess::from_path(path).first_raw().map(str::to_string);

    match client
        .upload(AudioUpload {
            filename: filename.clone(),
            mime_type,
            bytes,
        })
        .await
    {
        Ok(record) => {
            println!(
                "  done: {} -> centroid={:.0}, bandwidth={:.0}, rms={:.3}",
                filename,
                record.spectral_centroid_mean,
                record.spectral_bandwidth_mean,
                record.rms_mean,
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("  failed for {filename}: {err}");
            Err(err.into())
        }
    }
}

fn collect_audio_files(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}
