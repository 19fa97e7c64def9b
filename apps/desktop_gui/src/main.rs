use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use url::Url;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use backend_bridge::runtime::spawn_backend_thread;
use controller::events::UiEvent;
use ui::app::{DashboardApp, PersistedDashboardSettings, SETTINGS_STORAGE_KEY};

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the feature service.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let server_url = match Url::parse(&args.server_url) {
        Ok(url) => url,
        Err(err) => {
            eprintln!("invalid --server-url {:?}: {err}", args.server_url);
            std::process::exit(2);
        }
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    spawn_backend_thread(server_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Audio Feature Dashboard")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([820.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Audio Feature Dashboard",
        options,
        Box::new(|cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| {
                        serde_json::from_str::<PersistedDashboardSettings>(&text).ok()
                    })
            });
            Ok(Box::new(DashboardApp::new(cmd_tx, ui_rx, persisted)))
        }),
    )
}
