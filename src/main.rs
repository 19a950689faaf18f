#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the egui-based digital twin dashboard.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use twinview::config;
use twinview::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use twinview::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let settings = config::load_or_default();
    if let Ok(settings) = &settings {
        tracing::info!(
            "Using backend {} with models from {}",
            settings.backend_url,
            settings.models_dir.display()
        );
    }

    let viewport = egui::ViewportBuilder::default()
        .with_title("Digital Twin Dashboard")
        .with_inner_size([1280.0, 800.0])
        .with_min_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Digital Twin Dashboard",
        native_options,
        Box::new(move |_cc| {
            let app = settings
                .map_err(|err| format!("Failed to load config: {err}"))
                .and_then(EguiApp::new);
            match app {
                Ok(app) => Ok(Box::new(app)),
                Err(err) => {
                    tracing::error!("{err}");
                    Ok(Box::new(LaunchError { message: err }))
                }
            }
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
