//! Backend worker: a dedicated thread owning a tokio runtime, draining the
//! command queue and pushing completions back to the GUI as [`UiEvent`]s.

use std::path::Path;
use std::thread;

use client_core::{AudioUpload, FeatureClient};
use crossbeam_channel::{Receiver, Sender};
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn spawn_backend_thread(
    server_url: Url,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::worker(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = FeatureClient::new(server_url.as_str());
            let _ = ui_tx.try_send(UiEvent::BackendInfo("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadFeatures => match client.fetch_features().await {
                        Ok(records) => {
                            let _ = ui_tx.try_send(UiEvent::FeaturesLoaded(records));
                        }
                        Err(err) => {
                            tracing::error!("feature list fetch failed: {err}");
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_api_error(
                                UiErrorContext::InitialLoad,
                                &err,
                            )));
                        }
                    },
                    // Uploads run as independent tasks so a slow analysis does
                    // not serialize behind the next command; completions append
                    // in whatever order responses arrive.
                    BackendCommand::UploadFile { path } => {
                        let client = client.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            run_upload(&client, &ui_tx, &path).await;
                        });
                    }
                }
            }
        });
    });
}

async fn run_upload(client: &FeatureClient, ui_tx: &Sender<UiEvent>, path: &Path) {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.bin")
        .to_string();

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!("failed to read {}: {err}", path.display());
            let _ = ui_tx.try_send(UiEvent::Error(UiError::worker(
                UiErrorContext::Upload,
                format!("Failed to read {filename}: {err}"),
            )));
            return;
        }
    };

    let mime_type = mime_guess::from_path(path).first_raw().map(str::to_string);

    match client
        .upload(AudioUpload {
            filename,
            mime_type,
            bytes,
        })
        .await
    {
        Ok(record) => {
            let _ = ui_tx.try_send(UiEvent::FeatureAnalyzed(record));
        }
        Err(err) => {
            tracing::error!("upload failed: {err}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_api_error(
                UiErrorContext::Upload,
                &err,
            )));
        }
    }
}
