use crate::interaction::Interaction;
use crate::notify::NotificationGate;
use crate::storage::ItemStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handler state. Handlers that need both the store and the
/// interaction lock the store first.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<ItemStore>>,
    pub interaction: Arc<Mutex<Interaction>>,
    pub notifications: Arc<Mutex<NotificationGate>>,
}

impl AppState {
    pub fn new(store: ItemStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            interaction: Arc::new(Mutex::new(Interaction::default())),
            notifications: Arc::new(Mutex::new(NotificationGate::default())),
        }
    }
}
