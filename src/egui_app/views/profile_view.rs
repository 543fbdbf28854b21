use eframe::egui;

use crate::egui_app::forms::Field;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::{field_error, labeled_input};
use crate::shared::api::UserProfile;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.set_max_width(560.0);
        ui.add_space(24.0);
        ui.heading(egui::RichText::new("Your Profile").strong().color(colors::TEXT_PRIMARY));
        ui.add_space(16.0);

        let Some(profile) = state.profile.clone() else {
            if state.is_loading_profile() {
                ui.spinner();
                ui.label("Loading profile...");
            } else {
                ui.colored_label(colors::TEXT_SECONDARY, "Profile unavailable.");
                if ui.button("Retry").clicked() {
                    state.load_profile();
                }
            }
            return;
        };

        styles::card_frame().show(ui, |ui| {
            ui.with_layout(egui::Layout::top_down(egui::Align::LEFT), |ui| {
                if state.profile_form.editing {
                    render_edit_form(ui, state);
                } else {
                    render_details(ui, &profile);
                    ui.add_space(12.0);
                    if ui.add(styles::primary_button("Edit Profile")).clicked() {
                        state.begin_profile_edit();
                    }
                }
            });
        });
    });
}

fn render_details(ui: &mut egui::Ui, profile: &UserProfile) {
    ui.label(
        egui::RichText::new(format!("@{}", profile.username))
            .size(22.0)
            .strong()
            .color(colors::TEXT_PRIMARY),
    );
    ui.add_space(8.0);

    let verified = if profile.email_verified { " (verified)" } else { "" };
    egui::Grid::new("profile_details")
        .num_columns(2)
        .spacing([24.0, 8.0])
        .show(ui, |ui| {
            detail_row(ui, "Email", &format!("{}{}", profile.email, verified));
            detail_row(ui, "Member since", &profile.member_since_display());
            detail_row(ui, "Phone", profile.phone.as_deref().unwrap_or("Not set"));
            detail_row(ui, "Date of birth", profile.date_of_birth.as_deref().unwrap_or("Not set"));
            detail_row(ui, "Gender", profile.gender.as_deref().unwrap_or("Not set"));
        });
}

fn detail_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.colored_label(colors::TEXT_SECONDARY, label);
    ui.label(value);
    ui.end_row();
}

fn render_edit_form(ui: &mut egui::Ui, state: &mut AppState) {
    if let Some(message) = state.profile_form.errors.form() {
        styles::banner_frame().show(ui, |ui| {
            ui.colored_label(colors::ERROR, message);
        });
        ui.add_space(8.0);
    }

    let form = &mut state.profile_form;
    if labeled_input(ui, "Phone", &mut form.phone, "10 digits", false) {
        form.on_changed(Field::Phone);
    }
    field_error(ui, form.errors.get(Field::Phone));

    if labeled_input(ui, "Date of birth", &mut form.date_of_birth, "YYYY-MM-DD", false) {
        form.on_changed(Field::DateOfBirth);
    }
    field_error(ui, form.errors.get(Field::DateOfBirth));

    ui.label(egui::RichText::new("Gender").strong().color(colors::TEXT_PRIMARY));
    egui::ComboBox::from_id_salt("profile_gender")
        .selected_text(if form.gender.is_empty() { "Not set" } else { form.gender.as_str() })
        .show_ui(ui, |ui| {
            for option in ["Male", "Female", "Other"] {
                ui.selectable_value(&mut form.gender, option.to_string(), option);
            }
        });

    labeled_input(ui, "Profile picture URL", &mut form.profile_picture, "https://...", false);
    ui.add_space(12.0);

    let saving = state.is_saving_profile();
    ui.horizontal(|ui| {
        if ui.add_enabled(!saving, styles::primary_button("Save")).clicked() {
            state.save_profile();
        }
        if ui.add_enabled(!saving, egui::Button::new("Cancel")).clicked() {
            state.profile_form.cancel();
        }
        if saving {
            ui.spinner();
        }
    });
}
