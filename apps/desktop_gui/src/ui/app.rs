//! The dashboard window: card grid, sort selector, upload row, and the
//! info-panel toggle. All network work happens on the backend worker; this
//! thread only queues commands and drains completion events.

use std::path::PathBuf;
use std::time::Duration;

use client_core::classify::{Brightness, Complexity, Loudness};
use client_core::view::{self, CardView, MetricView};
use client_core::{DashboardState, SortMode};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serde::{Deserialize, Serialize};
use shared::domain::FeatureRecord;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiErrorContext, UiEvent};
use crate::controller::orchestration::queue_command;

pub const SETTINGS_STORAGE_KEY: &str = "feature_dashboard_settings";

const CARD_WIDTH: f32 = 260.0;
const METRIC_BAR_WIDTH: f32 = 170.0;

/// Settings that survive restarts via the eframe storage backend. The sort
/// mode is stored as its selector string so an unrecognized value degrades to
/// the default order on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedDashboardSettings {
    pub sort_value: String,
    pub info_panel_open: bool,
}

impl Default for PersistedDashboardSettings {
    fn default() -> Self {
        Self {
            sort_value: SortMode::default().value().to_string(),
            info_panel_open: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadPhase {
    Pending,
    Ready,
    Failed,
}

pub struct DashboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    /// Canonical append-only record sequence.
    state: DashboardState,
    /// Display ordering of the canonical sequence under `sort_mode`,
    /// recomputed on load, upload, and selector change.
    visible: Vec<FeatureRecord>,
    sort_mode: SortMode,

    load_phase: LoadPhase,

    pending_file: Option<PathBuf>,
    uploads_in_flight: usize,
    upload_status: String,

    info_panel_open: bool,
    status: String,
}

impl DashboardApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted: Option<PersistedDashboardSettings>,
    ) -> Self {
        let persisted = persisted.unwrap_or_default();
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state: DashboardState::new(),
            visible: Vec::new(),
            sort_mode: SortMode::from_value(&persisted.sort_value),
            load_phase: LoadPhase::Pending,
            pending_file: None,
            uploads_in_flight: 0,
            upload_status: String::new(),
            info_panel_open: persisted.info_panel_open,
            status: "Loading features...".to_string(),
        };
        queue_command(
            &app.cmd_tx,
            BackendCommand::LoadFeatures,
            &mut app.status,
        );
        app
    }

    pub fn persisted_settings(&self) -> PersistedDashboardSettings {
        PersistedDashboardSettings {
            sort_value: self.sort_mode.value().to_string(),
            info_panel_open: self.info_panel_open,
        }
    }

    fn refresh_view(&mut self) {
        self.visible = self.state.sorted(self.sort_mode);
    }

    fn set_sort_mode(&mut self, mode: SortMode) {
        if self.sort_mode != mode {
            self.sort_mode = mode;
            self.refresh_view();
        }
    }

    /// Form-submission guard: with no file staged nothing is queued and the
    /// inline message asks for one.
    fn submit_upload(&mut self) {
        let Some(path) = self.pending_file.clone() else {
            self.upload_status = "Choose a file first.".to_string();
            return;
        };

        self.upload_status = "Uploading & analyzing...".to_string();
        if queue_command(
            &self.cmd_tx,
            BackendCommand::UploadFile { path },
            &mut self.upload_status,
        ) {
            self.uploads_in_flight += 1;
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendInfo(message) => {
                    self.status = message;
                }
                UiEvent::FeaturesLoaded(records) => {
                    self.state.replace_all(records);
                    self.load_phase = LoadPhase::Ready;
                    self.status = format!("Loaded {}", view::file_count_text(self.state.len()));
                    self.refresh_view();
                }
                UiEvent::FeatureAnalyzed(record) => {
                    self.uploads_in_flight = self.uploads_in_flight.saturating_sub(1);
                    self.state.append(record);
                    self.upload_status = "Done".to_string();
                    self.pending_file = None;
                    self.refresh_view();
                }
                UiEvent::Error(err) => match err.context() {
                    UiErrorContext::InitialLoad => {
                        self.load_phase = LoadPhase::Failed;
                        self.status = err.status_text();
                    }
                    UiErrorContext::Upload => {
                        self.uploads_in_flight = self.uploads_in_flight.saturating_sub(1);
                        self.upload_status = err.status_text();
                    }
                    UiErrorContext::BackendStartup => {
                        self.status = err.status_text();
                    }
                },
            }
        }
    }

    fn show_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("dashboard_top").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Audio feature dashboard");
                ui.separator();
                ui.label(view::file_count_text(self.state.len()));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut selected = self.sort_mode;
                    egui::ComboBox::from_id_salt("sort_mode")
                        .selected_text(selected.label())
                        .show_ui(ui, |ui| {
                            for mode in SortMode::ALL {
                                ui.selectable_value(&mut selected, mode, mode.label());
                            }
                        });
                    ui.label("Sort by");
                    self.set_sort_mode(selected);
                });
            });

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("Choose audio...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Audio", &["wav", "mp3", "flac", "ogg"])
                        .pick_file()
                    {
                        self.pending_file = Some(path);
                        self.upload_status.clear();
                    }
                }
                match &self.pending_file {
                    Some(path) => {
                        let name = path
                            .file_name()
                            .and_then(|name| name.to_str())
                            .unwrap_or("selected file");
                        ui.monospace(name);
                    }
                    None => {
                        ui.weak("No file selected");
                    }
                }
                if ui.button("Upload & analyze").clicked() {
                    self.submit_upload();
                }
                if self.uploads_in_flight > 0 {
                    ui.spinner();
                }
                if !self.upload_status.is_empty() {
                    ui.label(&self.upload_status);
                }
            });

            ui.add_space(4.0);
            let toggle_label = if self.info_panel_open {
                "Hide metric guide"
            } else {
                "About these metrics"
            };
            if ui.small_button(toggle_label).clicked() {
                self.info_panel_open = !self.info_panel_open;
            }
            if self.info_panel_open {
                show_info_body(ui);
            }

            ui.horizontal(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
            ui.add_space(6.0);
        });
    }

    fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.visible.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(48.0);
                    match self.load_phase {
                        LoadPhase::Pending => {
                            ui.spinner();
                            ui.label("Loading features...");
                        }
                        LoadPhase::Failed => {
                            ui.heading("Could not load the feature list");
                            ui.small(egui::RichText::new(&self.status).weak());
                        }
                        LoadPhase::Ready => {
                            ui.heading("No analyzed files yet");
                            ui.label("Upload an audio file to see its feature summary here.");
                        }
                    }
                });
                return;
            }

            // Full re-render each frame from this frame's record set.
            let cards = view::build_cards(&self.visible);
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for card in &cards {
                        draw_card(ui, card);
                    }
                });
            });
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        // Worker events arrive off-thread; keep polling for them.
        ctx.request_repaint_after(Duration::from_millis(200));

        self.show_top_panel(ctx);
        self.show_central_panel(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(text) = serde_json::to_string(&self.persisted_settings()) {
            storage.set_string(SETTINGS_STORAGE_KEY, text);
        }
    }
}

fn brightness_color(brightness: Brightness) -> egui::Color32 {
    match brightness {
        Brightness::Dark => egui::Color32::from_rgb(108, 122, 224),
        Brightness::Neutral => egui::Color32::from_rgb(148, 155, 164),
        Brightness::Bright => egui::Color32::from_rgb(240, 195, 80),
    }
}

fn complexity_color(complexity: Complexity) -> egui::Color32 {
    match complexity {
        Complexity::Simple => egui::Color32::from_rgb(87, 186, 140),
        Complexity::Complex => egui::Color32::from_rgb(228, 140, 70),
    }
}

fn loudness_color(loudness: Loudness) -> egui::Color32 {
    match loudness {
        Loudness::Quiet => egui::Color32::from_rgb(96, 180, 200),
        Loudness::Loud => egui::Color32::from_rgb(224, 96, 96),
    }
}

fn tag(ui: &mut egui::Ui, label: &str, color: egui::Color32) {
    ui.label(egui::RichText::new(format!("\u{25cf} {label}")).color(color));
}

fn metric_row(ui: &mut egui::Ui, metric: &MetricView) {
    ui.small(metric.label);
    ui.horizontal(|ui| {
        ui.add(
            egui::ProgressBar::new(metric.fill as f32)
                .desired_width(METRIC_BAR_WIDTH)
                .desired_height(8.0),
        );
        ui.monospace(&metric.value_text);
    });
}

fn draw_card(ui: &mut egui::Ui, card: &CardView) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(12, 10))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical(|ui| {
                ui.strong(&card.file_name);
                ui.weak(&card.sample_rate_text);
                ui.add_space(4.0);
                ui.horizontal_wrapped(|ui| {
                    tag(ui, card.brightness.label(), brightness_color(card.brightness));
                    tag(ui, card.complexity.label(), complexity_color(card.complexity));
                    tag(ui, card.loudness.label(), loudness_color(card.loudness));
                });
                ui.add_space(4.0);
                for metric in &card.metrics {
                    metric_row(ui, metric);
                }
            });
        });
}

fn show_info_body(ui: &mut egui::Ui) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.label("Reading the metrics");
            ui.small("Spectral centroid: where the energy of the spectrum sits on average; higher reads as brighter.");
            ui.small("Spectral bandwidth: how widely energy spreads around the centroid; wider reads as more complex.");
            ui.small("RMS energy: average signal power; a rough proxy for perceived loudness.");
            ui.small("Bars are scaled against the files currently shown, so they shift as files are added.");
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::events::{UiError, UiErrorContext};
    use client_core::FeatureApiError;
    use crossbeam_channel::bounded;

    fn record(path: &str, centroid: f64, rms: f64) -> FeatureRecord {
        FeatureRecord {
            file_path: path.to_string(),
            sr: 44100,
            spectral_centroid_mean: centroid,
            spectral_bandwidth_mean: 1800.0,
            rms_mean: rms,
        }
    }

    fn test_app() -> (
        DashboardApp,
        Receiver<BackendCommand>,
        Sender<UiEvent>,
    ) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let app = DashboardApp::new(cmd_tx, ui_rx, None);
        (app, cmd_rx, ui_tx)
    }

    #[test]
    fn startup_queues_one_initial_feature_load() {
        let (_app, cmd_rx, _ui_tx) = test_app();
        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::LoadFeatures)
        ));
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn submit_without_a_file_sends_nothing_and_asks_for_one() {
        let (mut app, cmd_rx, _ui_tx) = test_app();
        let _ = cmd_rx.try_recv();

        app.submit_upload();

        assert_eq!(app.upload_status, "Choose a file first.");
        assert_eq!(app.uploads_in_flight, 0);
        assert!(cmd_rx.try_recv().is_err());
        assert!(app.state.is_empty());
    }

    #[test]
    fn submit_with_a_file_queues_the_upload() {
        let (mut app, cmd_rx, _ui_tx) = test_app();
        let _ = cmd_rx.try_recv();

        app.pending_file = Some(PathBuf::from("/tmp/kick.wav"));
        app.submit_upload();

        assert_eq!(app.uploads_in_flight, 1);
        assert_eq!(app.upload_status, "Uploading & analyzing...");
        match cmd_rx.try_recv() {
            Ok(BackendCommand::UploadFile { path }) => {
                assert_eq!(path, PathBuf::from("/tmp/kick.wav"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn loaded_features_replace_state_and_set_the_count() {
        let (mut app, _cmd_rx, ui_tx) = test_app();
        ui_tx
            .send(UiEvent::FeaturesLoaded(vec![
                record("a.wav", 1000.0, 0.1),
                record("b.wav", 3000.0, 0.2),
            ]))
            .expect("send");

        app.process_ui_events();

        assert_eq!(app.state.len(), 2);
        assert_eq!(app.status, "Loaded 2 files");
        assert_eq!(app.visible.len(), 2);
    }

    #[test]
    fn analyzed_record_lands_at_its_sorted_position() {
        let (mut app, _cmd_rx, ui_tx) = test_app();
        app.set_sort_mode(SortMode::BrightnessDesc);
        ui_tx
            .send(UiEvent::FeaturesLoaded(vec![
                record("low.wav", 1000.0, 0.1),
                record("high.wav", 5000.0, 0.3),
            ]))
            .expect("send");
        ui_tx
            .send(UiEvent::FeatureAnalyzed(record("mid.wav", 3000.0, 0.2)))
            .expect("send");
        app.uploads_in_flight = 1;
        app.pending_file = Some(PathBuf::from("/tmp/mid.wav"));

        app.process_ui_events();

        assert_eq!(app.uploads_in_flight, 0);
        assert_eq!(app.upload_status, "Done");
        assert!(app.pending_file.is_none());
        // Canonical order keeps the append at the end.
        assert_eq!(app.state.records()[2].display_name(), "mid.wav");
        // Display order re-sorts under the selected mode.
        let visible: Vec<_> = app.visible.iter().map(|r| r.display_name()).collect();
        assert_eq!(visible, vec!["high.wav", "mid.wav", "low.wav"]);
    }

    #[test]
    fn upload_error_restores_idle_and_shows_the_message() {
        let (mut app, _cmd_rx, ui_tx) = test_app();
        app.uploads_in_flight = 1;
        ui_tx
            .send(UiEvent::Error(UiError::from_api_error(
                UiErrorContext::Upload,
                &FeatureApiError::Server {
                    status: 400,
                    message: "Unsupported file type".to_string(),
                },
            )))
            .expect("send");

        app.process_ui_events();

        assert_eq!(app.uploads_in_flight, 0);
        assert_eq!(app.upload_status, "Unsupported file type");
        assert!(app.state.is_empty());
    }

    #[test]
    fn persisted_settings_round_trip_through_the_selector_string() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.set_sort_mode(SortMode::LoudnessAsc);
        app.info_panel_open = true;

        let persisted = app.persisted_settings();
        assert_eq!(persisted.sort_value, "loudness-asc");

        let text = serde_json::to_string(&persisted).expect("serialize");
        let reloaded: PersistedDashboardSettings =
            serde_json::from_str(&text).expect("deserialize");
        assert_eq!(reloaded, persisted);
        assert_eq!(SortMode::from_value(&reloaded.sort_value), SortMode::LoudnessAsc);
    }

    #[test]
    fn unrecognized_persisted_sort_value_falls_back_to_load_order() {
        let (cmd_tx, _cmd_rx) = bounded(8);
        let (_ui_tx, ui_rx) = bounded::<UiEvent>(8);
        let app = DashboardApp::new(
            cmd_tx,
            ui_rx,
            Some(PersistedDashboardSettings {
                sort_value: "bandwidth-desc".to_string(),
                info_panel_open: false,
            }),
        );
        assert_eq!(app.sort_mode, SortMode::Unsorted);
    }
}
