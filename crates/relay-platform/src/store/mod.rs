pub mod memory;
pub mod firestore;

use std::rc::Rc;

use relay_core::ports::StorePort;
use relay_types::config::{StoreBackendType, StoreConfig};
use relay_types::Result;

pub use firestore::{poll_subscription, FirestoreStore};
pub use memory::MemoryStore;

/// Open the store backend selected by config.
/// Returns a trait object so callers are backend-agnostic; placeholder
/// credentials fail here and drive the config banner.
pub fn store_for_config(config: &StoreConfig) -> Result<Rc<dyn StorePort>> {
    config.validate()?;
    match config.backend {
        StoreBackendType::Memory => {
            log::info!("Store backend: memory (this page load only)");
            Ok(Rc::new(MemoryStore::new()))
        }
        StoreBackendType::Firestore => {
            log::info!("Store backend: Firestore project {}", config.project_id);
            Ok(Rc::new(FirestoreStore::new(config.clone())))
        }
    }
}
