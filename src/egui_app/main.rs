/**
 * Synthesis desktop client - Main Entry Point
 *
 * Implements eframe::App: polls background requests, then draws the header,
 * the routed view and any toasts.
 */
use std::time::Duration;

use eframe::egui;
use synthesis::egui_app::theme::styles;
use synthesis::egui_app::{views, AppState};
use tracing_subscriber::EnvFilter;

/// Repaint interval while a request is in flight or a toast is showing
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("synthesis=info")),
        )
        .init();

    let mut state = AppState::new()?;
    tracing::info!("Using backend at {}", state.config.server_url());
    if let Some(path) = std::env::args().nth(1) {
        state.open_path(&path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Synthesis",
        options,
        Box::new(|cc| {
            styles::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(SynthesisApp { state }))
        }),
    )?;
    Ok(())
}

struct SynthesisApp {
    state: AppState,
}

impl eframe::App for SynthesisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.update();

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);
        views::render_toasts(ctx, &self.state);

        if self.state.is_busy() || !self.state.toasts.is_empty() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }
}
