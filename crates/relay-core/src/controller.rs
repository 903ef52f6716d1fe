//! Session controller — owns the session's identity, role binding, and
//! both live channel subscriptions.
//!
//! Constructed once when the session view opens and torn down on session
//! end; handlers receive it by reference instead of reaching for globals.

use std::rc::Rc;

use relay_types::event::{ChannelKind, RelayEvent};
use relay_types::message::Role;
use relay_types::session::SessionToken;
use relay_types::Result;

use crate::event_bus::EventBus;
use crate::ports::{RoleStorePort, StorePort, Subscription};
use crate::suggest::SuggestionGenerator;

pub struct SessionController {
    token: SessionToken,
    role: Option<Role>,
    store: Rc<dyn StorePort>,
    roles: Rc<dyn RoleStorePort>,
    generator: Rc<SuggestionGenerator>,
    bus: EventBus,
    message_sub: Option<Subscription>,
    suggestion_sub: Option<Subscription>,
}

impl SessionController {
    /// Open a session: restore any persisted role binding and, when bound,
    /// establish both channel subscriptions.
    pub fn open(
        token: SessionToken,
        store: Rc<dyn StorePort>,
        roles: Rc<dyn RoleStorePort>,
        generator: Rc<SuggestionGenerator>,
        bus: EventBus,
    ) -> Self {
        let role = roles.role(&token);
        let mut controller = Self {
            token,
            role,
            store,
            roles,
            generator,
            bus,
            message_sub: None,
            suggestion_sub: None,
        };
        if controller.role.is_some() {
            controller.resubscribe();
        }
        controller
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Persist a role binding and re-establish both subscriptions.
    /// Switching roles overwrites the stored binding.
    pub fn bind_role(&mut self, role: Role) {
        self.roles.set_role(&self.token, role);
        self.role = Some(role);
        self.resubscribe();
        log::info!("Role bound: session={} role={}", self.token, role.as_str());
    }

    /// Clear the local role binding and stop listening. The message log
    /// and any suggestions stay in the store.
    pub fn end_session(&mut self) {
        self.teardown_subscriptions();
        self.roles.clear_role(&self.token);
        self.role = None;
        log::info!("Session ended locally: session={}", self.token);
    }

    /// Cloneable async send context for fire-and-forget dispatch.
    /// None while no role is bound (appending with an unset role is a no-op).
    pub fn sender(&self) -> Option<MessageSender> {
        self.role.map(|role| MessageSender {
            token: self.token.clone(),
            role,
            store: Rc::clone(&self.store),
            generator: Rc::clone(&self.generator),
        })
    }

    pub fn has_active_subscriptions(&self) -> bool {
        self.message_sub.is_some() || self.suggestion_sub.is_some()
    }

    /// Tear down and recreate both channel subscriptions. Old handles are
    /// cancelled before new ones exist, so each channel has at most one
    /// active listener at any time.
    fn resubscribe(&mut self) {
        self.teardown_subscriptions();

        let bus = self.bus.clone();
        self.message_sub = Some(self.store.subscribe_messages(
            &self.token,
            Box::new(move |snapshot| match snapshot {
                Ok(messages) => bus.emit(RelayEvent::MessagesChanged { messages }),
                Err(e) => {
                    log::error!("Message listener failed: {}", e);
                    bus.emit(RelayEvent::SubscriptionError {
                        channel: ChannelKind::Messages,
                        message: e.to_string(),
                    });
                }
            }),
        ));

        let bus = self.bus.clone();
        self.suggestion_sub = Some(self.store.subscribe_suggestions(
            &self.token,
            Box::new(move |snapshot| match snapshot {
                Ok(suggestions) => bus.emit(RelayEvent::SuggestionsChanged { suggestions }),
                Err(e) => {
                    log::error!("Suggestion listener failed: {}", e);
                    bus.emit(RelayEvent::SubscriptionError {
                        channel: ChannelKind::Suggestions,
                        message: e.to_string(),
                    });
                }
            }),
        ));
    }

    fn teardown_subscriptions(&mut self) {
        if let Some(mut sub) = self.message_sub.take() {
            sub.unsubscribe();
        }
        if let Some(mut sub) = self.suggestion_sub.take() {
            sub.unsubscribe();
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.teardown_subscriptions();
    }
}

/// Everything one append needs, detached from the controller so the app
/// can `spawn_local` it without holding a controller borrow across awaits.
#[derive(Clone)]
pub struct MessageSender {
    token: SessionToken,
    role: Role,
    store: Rc<dyn StorePort>,
    generator: Rc<SuggestionGenerator>,
}

impl MessageSender {
    pub fn role(&self) -> Role {
        self.role
    }

    /// Append `text` as the bound role. Empty-after-trim input is a silent
    /// no-op (Ok(None)); otherwise returns the new message id.
    ///
    /// A worker append then clears the suggestion set; a manager append
    /// runs the suggestion generator. The caller treats the whole send as
    /// fire-and-forget: the composer was already cleared, and a failed
    /// write is only logged.
    pub async fn send(&self, text: &str) -> Result<Option<String>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let id = self
            .store
            .append_message(&self.token, self.role, trimmed)
            .await?;

        match self.role {
            Role::Worker => self.store.clear_suggestions(&self.token).await?,
            Role::Manager => self.generator.run(&self.token, &id, trimmed).await,
        }

        Ok(Some(id))
    }
}
