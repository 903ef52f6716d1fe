//! Role binding persisted in localStorage.
//!
//! One `relay:role:<token>` entry per session, surviving reloads of the
//! same URL but never shared across browser profiles or devices. When
//! localStorage is unavailable the binding degrades to an in-memory map
//! that lives for this page load only.

use std::cell::RefCell;
use std::collections::HashMap;

use relay_core::ports::RoleStorePort;
use relay_types::message::Role;
use relay_types::session::{role_storage_key, SessionToken};

pub struct LocalStorageRoleStore {
    fallback: RefCell<HashMap<String, Role>>,
}

impl LocalStorageRoleStore {
    pub fn new() -> Self {
        Self {
            fallback: RefCell::new(HashMap::new()),
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl Default for LocalStorageRoleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleStorePort for LocalStorageRoleStore {
    fn role(&self, token: &SessionToken) -> Option<Role> {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(raw)) = storage.get_item(&role_storage_key(token)) {
                return Role::parse(&raw);
            }
        }
        self.fallback.borrow().get(token.as_str()).copied()
    }

    fn set_role(&self, token: &SessionToken, role: Role) {
        if let Some(storage) = Self::storage() {
            if storage
                .set_item(&role_storage_key(token), role.as_str())
                .is_ok()
            {
                return;
            }
            log::warn!("localStorage write failed, keeping role in memory");
        }
        self.fallback
            .borrow_mut()
            .insert(token.as_str().to_string(), role);
    }

    fn clear_role(&self, token: &SessionToken) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&role_storage_key(token));
        }
        self.fallback.borrow_mut().remove(token.as_str());
    }
}
