//! Chat panel — history bubbles, worker-only suggestion pills and pending
//! line, and the composer with optimistic clear.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};

use relay_types::message::ChatMessage;

use crate::state::UiState;
use crate::theme::*;

/// Render the chat panel. Returns Some(text) when the user submits input
/// or clicks a suggestion pill; the caller dispatches the actual send.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState, now_ms: i64) -> Option<String> {
    let mut submitted = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    let title = match state.role {
                        Some(role) if state.is_worker_view() => role.label(),
                        Some(_) => "Assistant",
                        None => "Relay",
                    };
                    ui.heading(RichText::new(title).color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(TEXT_SECONDARY)
                                .small(),
                        );
                    });
                });

                ui.separator();

                // Messages area
                let reserved = if state.is_worker_view() { 110.0 } else { 60.0 };
                let available_height = ui.available_height() - reserved;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for msg in &state.messages {
                            render_bubble(ui, state, msg);
                            ui.add_space(4.0);
                        }
                    });

                ui.add_space(4.0);

                // Worker-only: how long the manager has been waiting.
                if state.is_worker_view() {
                    if let Some(elapsed) = state.timer.elapsed_ms(now_ms) {
                        ui.label(
                            RichText::new(format!(
                                "Manager waiting for a reply — {}",
                                format_elapsed(elapsed)
                            ))
                            .color(WARNING)
                            .small(),
                        );
                    }
                }

                // Worker-only: suggestion pills with the exact reply text.
                if state.is_worker_view() && !state.suggestions.is_empty() {
                    let mut clicked = None;
                    ui.horizontal_wrapped(|ui| {
                        for suggestion in &state.suggestions {
                            let pill = egui::Button::new(
                                RichText::new(&suggestion.text).color(TEXT_PRIMARY).small(),
                            )
                            .fill(PILL_BG)
                            .corner_radius(PILL_ROUNDING);
                            if ui.add(pill).clicked() {
                                clicked = Some(suggestion.text.clone());
                            }
                        }
                    });
                    if let Some(text) = clicked {
                        state.clear_suggestions_optimistically();
                        submitted = Some(text);
                    }
                }

                ui.add_space(4.0);

                // Composer
                ui.horizontal(|ui| {
                    let hint = if state.config_error.is_some() {
                        "Chat is disabled until the backend is configured"
                    } else if state.is_worker_view() {
                        "Reply as the digital worker"
                    } else if state.role.is_some() {
                        "Type a message to the digital worker"
                    } else {
                        "Pick a role to start chatting"
                    };
                    let enabled = state.composer_enabled();

                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text(hint)
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));
                    let response = ui.add_enabled(enabled, input);

                    let send_enabled = enabled && !state.input_text.trim().is_empty();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click. The field clears
                    // before the write is acknowledged (optimistic).
                    if (response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter))
                        && send_enabled)
                        || send_btn.clicked()
                    {
                        submitted = Some(state.take_composer_text());
                        response.request_focus();
                    }
                });
            });
        });

    submitted
}

fn render_bubble(ui: &mut egui::Ui, state: &UiState, msg: &ChatMessage) {
    // "Mine" is pure role equality; the manager view deliberately shows
    // worker messages under the automated-agent label.
    let mine = state.role.map(|role| msg.is_mine(role)).unwrap_or(false);
    let label = if state.is_worker_view() || state.role.is_none() {
        msg.role.label().to_string()
    } else if mine {
        "You".to_string()
    } else {
        "Assistant".to_string()
    };

    let (bg, layout) = if mine {
        (MINE_BUBBLE, Layout::right_to_left(Align::TOP))
    } else {
        (THEIRS_BUBBLE, Layout::left_to_right(Align::TOP))
    };

    ui.with_layout(layout, |ui| {
        ui.set_max_width(ui.available_width() * 0.8);
        egui::Frame::default()
            .fill(bg)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(label).color(ACCENT).strong().small());
                        ui.label(
                            RichText::new(format_time(msg.timestamp_ms))
                                .color(TEXT_SECONDARY)
                                .small(),
                        );
                    });
                    ui.label(RichText::new(&msg.text).color(TEXT_PRIMARY));
                });
            });
    });
}

/// Short human form of a server timestamp, e.g. "Mar 4 16:02".
fn format_time(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms)
        .map(|t| t.format("%b %-d %H:%M").to_string())
        .unwrap_or_default()
}

fn format_elapsed(elapsed_ms: i64) -> String {
    let seconds = elapsed_ms / 1_000;
    if seconds < 60 {
        format!("{}s", seconds)
    } else {
        format!("{}m {:02}s", seconds / 60, seconds % 60)
    }
}
