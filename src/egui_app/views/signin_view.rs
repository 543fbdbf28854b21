use eframe::egui;

use crate::egui_app::forms::Field;
use crate::egui_app::router::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::{field_error, labeled_input};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.set_max_width(420.0);
        ui.add_space(40.0);
        ui.colored_label(
            colors::TEXT_SECONDARY,
            egui::RichText::new("Sign in to your Synthesis account").strong(),
        );
        ui.add_space(16.0);

        if state.auth_state.is_authenticated() {
            render_signed_in(ui, state);
            return;
        }

        styles::card_frame().show(ui, |ui| {
            ui.with_layout(egui::Layout::top_down(egui::Align::LEFT), |ui| {
                render_form(ui, state);
            });
        });

        ui.add_space(16.0);
        ui.horizontal(|ui| {
            ui.colored_label(colors::TEXT_SECONDARY, "Don't have an account?");
            if ui.link("Sign up here").clicked() {
                state.auth_state.clear_error();
                state.navigate(Route::SignUp);
            }
        });
    });
}

fn render_form(ui: &mut egui::Ui, state: &mut AppState) {
    let banner = state
        .sign_in_form
        .errors
        .form()
        .map(str::to_string)
        .or_else(|| state.auth_state.error.clone());
    if let Some(message) = banner {
        styles::banner_frame().show(ui, |ui| {
            ui.colored_label(colors::ERROR, message);
        });
        ui.add_space(8.0);
    }

    let form = &mut state.sign_in_form;
    if labeled_input(ui, "Email Address", &mut form.email, "Enter your email", false) {
        form.on_changed(Field::Email);
    }
    field_error(ui, form.errors.get(Field::Email));
    ui.add_space(8.0);

    let masked = !form.show_password;
    if labeled_input(ui, "Password", &mut form.password, "Enter your password", masked) {
        form.on_changed(Field::Password);
    }
    field_error(ui, form.errors.get(Field::Password));
    ui.checkbox(&mut form.show_password, "Show password");
    ui.add_space(16.0);

    let busy = state.is_signing_in() || state.auth_state.is_loading();
    let submit = ui.add_enabled(!busy, styles::primary_button("Sign In →"));
    let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
    if submit.clicked() || (enter && !busy) {
        state.handle_sign_in();
    }

    if busy {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Signing in...");
        });
    }
}

fn render_signed_in(ui: &mut egui::Ui, state: &mut AppState) {
    let username = state
        .auth_state
        .user
        .as_ref()
        .map(|user| user.username.clone())
        .unwrap_or_default();
    styles::card_frame().show(ui, |ui| {
        ui.label(format!("You are signed in as @{}", username));
        if ui.add(styles::primary_button("Go to Home")).clicked() {
            state.navigate(Route::Home);
        }
    });
}
