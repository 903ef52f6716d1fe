//! Main egui application — composes all panels and manages the session.

use std::rc::Rc;

use egui::{self, CentralPanel, TopBottomPanel};

use relay_core::controller::{MessageSender, SessionController};
use relay_core::event_bus::EventBus;
use relay_core::suggest::SuggestionGenerator;
use relay_core::timer::TimerState;
use relay_platform::roles::LocalStorageRoleStore;
use relay_platform::session_url;
use relay_platform::store::store_for_config;
use relay_platform::suggest::OpenAiSuggestionService;
use relay_platform::tick::TickTimer;
use relay_types::config::RelayConfig;
use relay_types::message::Role;
use relay_types::session::SessionToken;
use relay_ui::panels::{chat, role};
use relay_ui::state::UiState;
use relay_ui::theme;

/// The main application state
pub struct RelayApp {
    ui_state: UiState,
    token: SessionToken,
    event_bus: EventBus,
    /// None when the store config is a placeholder; the UI then shows a
    /// static banner and nothing else is wired.
    controller: Option<SessionController>,
    /// Held only while the worker view has a pending manager message, so
    /// the elapsed-seconds line advances without user input.
    tick: Option<TickTimer>,
    first_frame: bool,
}

impl RelayApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = RelayConfig::default();
        let event_bus = EventBus::new();
        let resolved = session_url::resolve_or_create();

        let mut ui_state = UiState::new();
        let controller = match store_for_config(&config.store) {
            Ok(store) => {
                let roles = Rc::new(LocalStorageRoleStore::new());
                let service = Rc::new(OpenAiSuggestionService::new(config.suggest.clone()));
                let generator = Rc::new(SuggestionGenerator::new(service, Rc::clone(&store)));
                let mut controller = SessionController::open(
                    resolved.token.clone(),
                    store,
                    roles,
                    generator,
                    event_bus.clone(),
                );
                // A stored binding wins; the operator flag only seeds a
                // first visit.
                if controller.role().is_none() && resolved.operator_flag {
                    controller.bind_role(Role::Worker);
                }
                ui_state.role = controller.role();
                Some(controller)
            }
            Err(e) => {
                log::error!("Store unavailable: {}", e);
                ui_state.config_error = Some(format!(
                    "Backend not configured: {}. Fill in real credentials and reload.",
                    e
                ));
                None
            }
        };

        Self {
            ui_state,
            token: resolved.token,
            event_bus,
            controller,
            tick: None,
            first_frame: true,
        }
    }

    fn now_ms() -> i64 {
        js_sys::Date::now() as i64
    }

    /// Fire-and-forget send. The composer was already cleared; a failed
    /// write is only logged.
    fn dispatch_send(&self, sender: MessageSender, text: String, ctx: &egui::Context) {
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = sender.send(&text).await {
                log::error!("Send failed: {}", e);
            }
            ctx.request_repaint();
        });
    }

    /// Create or drop the one-second tick depending on whether the worker
    /// view currently shows the pending line.
    fn sync_tick(&mut self, ctx: &egui::Context) {
        let wants_tick = self.ui_state.is_worker_view()
            && matches!(self.ui_state.timer.state(), TimerState::Pending { .. });
        match (wants_tick, self.tick.is_some()) {
            (true, false) => {
                let ctx = ctx.clone();
                self.tick = Some(TickTimer::start(TickTimer::ONE_SECOND_MS, move || {
                    ctx.request_repaint();
                }));
            }
            (false, true) => {
                self.tick = None;
            }
            _ => {}
        }
    }
}

impl eframe::App for RelayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Drain snapshot events from the subscriptions
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events, Self::now_ms());
            ctx.request_repaint();
        }

        self.sync_tick(ctx);

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("session_bar").show(ctx, |ui| {
            match role::session_bar(ui, &self.ui_state, &self.token) {
                role::SessionAction::None => {}
                role::SessionAction::SwitchRole(new_role) => {
                    if let Some(controller) = self.controller.as_mut() {
                        controller.bind_role(new_role);
                        self.ui_state.role = Some(new_role);
                    }
                }
                role::SessionAction::EndSession => {
                    if let Some(controller) = self.controller.as_mut() {
                        controller.end_session();
                    }
                    self.ui_state = UiState::new();
                    session_url::navigate_to_bare_path();
                }
            }
        });

        // ── Main content ─────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = self.ui_state.config_error.clone() {
                role::config_banner(ui, &message);
                ui.add_space(4.0);
            }

            if self.ui_state.role.is_none() && self.controller.is_some() {
                if let Some(chosen) = role::role_picker(ui, &self.token) {
                    if let Some(controller) = self.controller.as_mut() {
                        controller.bind_role(chosen);
                        self.ui_state.role = Some(chosen);
                    }
                }
                return;
            }

            if let Some(text) = chat::chat_panel(ui, &mut self.ui_state, Self::now_ms()) {
                let sender = self
                    .controller
                    .as_ref()
                    .and_then(SessionController::sender);
                if let Some(sender) = sender {
                    self.dispatch_send(sender, text, ctx);
                }
            }
        });
    }
}
