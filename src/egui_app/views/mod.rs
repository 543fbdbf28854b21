use eframe::egui;

use crate::egui_app::router::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub mod about_view;
pub mod home_view;
pub mod landing_view;
pub mod profile_view;
pub mod signin_view;
pub mod signup_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::header_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let title = egui::RichText::new("SYNTHESIS")
                    .size(28.0)
                    .strong()
                    .color(colors::TEXT_PRIMARY);
                if ui.add(egui::Label::new(title).sense(egui::Sense::click())).clicked() {
                    state.navigate(Route::Landing);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if state.auth_state.is_authenticated() {
                        if ui.button("Logout").clicked() {
                            state.logout();
                            return;
                        }
                        if let Some(ref user) = state.auth_state.user {
                            ui.colored_label(colors::TEXT_SECONDARY, format!("@{}", user.username));
                        }
                        nav_link(ui, state, "About Us", Route::About);
                        nav_link(ui, state, "Profile", Route::Profile);
                        nav_link(ui, state, "Home", Route::Home);
                    } else {
                        if ui.add(styles::primary_button("Get Started →")).clicked() {
                            state.navigate(Route::SignIn);
                        }
                        nav_link(ui, state, "About Us", Route::About);
                        nav_link(ui, state, "SignUp", Route::SignUp);
                    }
                });
            });
        });
}

fn nav_link(ui: &mut egui::Ui, state: &mut AppState, label: &str, route: Route) {
    let selected = state.current_route() == route;
    if ui.selectable_label(selected, label).clicked() {
        state.navigate(route);
    }
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(styles::page_frame())
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match state.current_route() {
                    Route::Landing => landing_view::render(ui, state),
                    Route::About => about_view::render(ui, state),
                    Route::SignIn => signin_view::render(ui, state),
                    Route::SignUp => signup_view::render(ui, state),
                    Route::Home => home_view::render(ui, state),
                    Route::Profile => profile_view::render(ui, state),
                });
        });
}

pub fn render_toasts(ctx: &egui::Context, state: &AppState) {
    if state.toasts.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_TOP, [-16.0, 80.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for toast in state.toasts.iter() {
                styles::toast_frame(toast.kind).show(ui, |ui| {
                    ui.set_max_width(320.0);
                    ui.colored_label(colors::TEXT_ON_ACCENT, &toast.message);
                });
                ui.add_space(6.0);
            }
        });
}

/// Inline message under a form field
pub(crate) fn field_error(ui: &mut egui::Ui, message: Option<&str>) {
    if let Some(message) = message {
        ui.colored_label(colors::ERROR, message);
    }
}

/// Labeled single-line input; returns true when the text changed.
pub(crate) fn labeled_input(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    hint: &str,
    password: bool,
) -> bool {
    ui.label(egui::RichText::new(label).strong().color(colors::TEXT_PRIMARY));
    ui.add(
        egui::TextEdit::singleline(value)
            .password(password)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    )
    .changed()
}
