use eframe::egui;

use crate::egui_app::forms::Field;
use crate::egui_app::router::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::validators::{password_requirements, PasswordRequirement};
use crate::egui_app::views::{field_error, labeled_input};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.set_max_width(460.0);
        ui.add_space(30.0);
        ui.label(
            egui::RichText::new("Welcome to Synthesis")
                .size(32.0)
                .strong()
                .color(colors::TEXT_PRIMARY),
        );
        ui.colored_label(colors::TEXT_SECONDARY, egui::RichText::new("Sign up").size(20.0));
        ui.add_space(16.0);

        if state.auth_state.is_authenticated() {
            styles::card_frame().show(ui, |ui| {
                ui.label("You already have an active session.");
                if ui.add(styles::primary_button("Go to Home")).clicked() {
                    state.navigate(Route::Home);
                }
            });
            return;
        }

        styles::card_frame().show(ui, |ui| {
            ui.with_layout(egui::Layout::top_down(egui::Align::LEFT), |ui| {
                render_form(ui, state);
            });
        });

        ui.add_space(16.0);
        ui.horizontal(|ui| {
            ui.colored_label(colors::TEXT_SECONDARY, "Already have an account?");
            if ui.link("Sign In.").clicked() {
                state.auth_state.clear_error();
                state.navigate(Route::SignIn);
            }
        });
    });
}

fn render_form(ui: &mut egui::Ui, state: &mut AppState) {
    let form_message = state
        .sign_up_form
        .errors
        .form()
        .map(str::to_string)
        .or_else(|| state.auth_state.error.clone());
    if let Some(message) = form_message {
        styles::banner_frame().show(ui, |ui| {
            ui.colored_label(colors::ERROR, message);
        });
        ui.add_space(8.0);
    }

    let form = &mut state.sign_up_form;
    if labeled_input(ui, "Username", &mut form.username, "enter your username.", false) {
        form.on_changed(Field::Username);
    }
    field_error(ui, form.errors.get(Field::Username));

    if labeled_input(ui, "Email", &mut form.email, "enter your email address.", false) {
        form.on_changed(Field::Email);
    }
    field_error(ui, form.errors.get(Field::Email));

    let masked = !form.show_password;
    if labeled_input(ui, "Password", &mut form.password, "enter password", masked) {
        form.on_changed(Field::Password);
    }
    field_error(ui, form.errors.get(Field::Password));

    if !form.password.is_empty() {
        let missing = password_requirements(&form.password);
        for requirement in PasswordRequirement::ALL {
            let (mark, color) = if missing.contains(&requirement) {
                ("✗", colors::TEXT_SECONDARY)
            } else {
                ("✓", colors::SUCCESS)
            };
            ui.colored_label(color, format!("{} {}", mark, requirement));
        }
    }

    if labeled_input(ui, "Confirm Password", &mut form.confirm_password, "repeat password", masked) {
        form.on_changed(Field::ConfirmPassword);
    }
    field_error(ui, form.errors.get(Field::ConfirmPassword));
    ui.checkbox(&mut form.show_password, "Show password");
    ui.add_space(16.0);

    let busy = state.is_signing_up() || state.auth_state.is_loading();
    if ui.add_enabled(!busy, styles::primary_button("Sign Up")).clicked() {
        state.handle_sign_up();
    }
    if busy {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Creating account...");
        });
    }
}
