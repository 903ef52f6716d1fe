//! Role picker and session bar.

use egui::{self, Align, Layout, RichText, Vec2};

use relay_types::message::Role;
use relay_types::session::SessionToken;

use crate::state::UiState;
use crate::theme::*;

/// What the caller should do after rendering the session bar.
pub enum SessionAction {
    None,
    SwitchRole(Role),
    EndSession,
}

/// Full-panel role picker, shown while no role is bound for this session.
/// Returns the chosen role.
pub fn role_picker(ui: &mut egui::Ui, token: &SessionToken) -> Option<Role> {
    let mut chosen = None;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.25);
        ui.heading(RichText::new("Join this session").color(TEXT_PRIMARY).strong());
        ui.label(
            RichText::new(format!("Session {}", token))
                .color(TEXT_SECONDARY)
                .small(),
        );
        ui.add_space(16.0);

        let manager_btn = egui::Button::new(
            RichText::new("I'm the manager").color(TEXT_PRIMARY),
        )
        .fill(ACCENT)
        .corner_radius(PANEL_ROUNDING)
        .min_size(Vec2::new(220.0, 36.0));
        if ui.add(manager_btn).clicked() {
            chosen = Some(Role::Manager);
        }

        ui.add_space(8.0);

        let worker_btn = egui::Button::new(
            RichText::new("I'm the operator (digital worker)").color(TEXT_PRIMARY),
        )
        .fill(BG_SURFACE)
        .corner_radius(PANEL_ROUNDING)
        .min_size(Vec2::new(220.0, 36.0));
        if ui.add(worker_btn).clicked() {
            chosen = Some(Role::Worker);
        }
    });

    chosen
}

/// Top bar: session id, bound role, switch-role and end-session controls.
pub fn session_bar(
    ui: &mut egui::Ui,
    state: &UiState,
    token: &SessionToken,
) -> SessionAction {
    let mut action = SessionAction::None;

    ui.horizontal(|ui| {
        ui.label(RichText::new("Relay").strong().color(ACCENT).size(16.0));
        ui.separator();
        ui.label(
            RichText::new(format!("Session: {}", token))
                .color(TEXT_SECONDARY)
                .small(),
        );
        if let Some(role) = state.role {
            ui.separator();
            ui.label(RichText::new(role.label()).color(SUCCESS).small());
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if state.role.is_some() {
                if ui
                    .button(RichText::new("End session").color(ERROR).small())
                    .clicked()
                {
                    action = SessionAction::EndSession;
                }

                let other = match state.role {
                    Some(Role::Manager) => Role::Worker,
                    _ => Role::Manager,
                };
                let label = format!("Switch to {}", other.label().to_lowercase());
                if ui.button(RichText::new(label).small()).clicked() {
                    action = SessionAction::SwitchRole(other);
                }
            }
        });
    });

    action
}

/// Static banner shown when the store configuration is a placeholder.
pub fn config_banner(ui: &mut egui::Ui, message: &str) {
    egui::Frame::default()
        .fill(ERROR.linear_multiply(0.2))
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new(message).color(ERROR));
        });
}
