use crate::errors::StoreError;
use crate::models::Item;
use chrono::Utc;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{debug, info};

/// Key the whole item collection is stored under.
pub const STORAGE_KEY: &str = "food_expiry_items_v1";

/// A file-backed key/value area with string values, shaped like browser
/// local storage. Every write rewrites the whole file.
#[derive(Debug)]
pub struct StorageArea {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl StorageArea {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(StoreError::CorruptArea)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub async fn set_item(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value);
        self.commit(next).await
    }

    pub async fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.commit(next).await
    }

    /// Writes `next` to disk and only then adopts it, so the in-memory view
    /// never runs ahead of the file.
    async fn commit(&mut self, next: BTreeMap<String, String>) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(&next).map_err(StoreError::Serialize)?;
        fs::write(&self.path, payload).await?;
        self.entries = next;
        Ok(())
    }
}

/// Hands out strictly increasing ids. Seeded above every existing id and
/// at or above the current time in milliseconds.
#[derive(Debug)]
pub struct IdGenerator {
    next: i64,
}

impl IdGenerator {
    pub fn seeded(existing: &[Item], now_millis: i64) -> Self {
        let above_existing = existing
            .iter()
            .map(|item| item.id.saturating_add(1))
            .max()
            .unwrap_or(i64::MIN);
        Self {
            next: now_millis.max(above_existing),
        }
    }

    pub fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}

/// The item collection persisted as one JSON blob under [`STORAGE_KEY`].
#[derive(Debug)]
pub struct ItemStore {
    area: StorageArea,
    ids: IdGenerator,
}

impl ItemStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let area = StorageArea::open(path).await?;
        let existing = decode(area.get_item(STORAGE_KEY))?;
        let ids = IdGenerator::seeded(&existing, Utc::now().timestamp_millis());
        info!(
            path = %area.path().display(),
            items = existing.len(),
            "opened item store"
        );

        Ok(Self { area, ids })
    }

    pub fn load(&self) -> Result<Vec<Item>, StoreError> {
        decode(self.area.get_item(STORAGE_KEY))
    }

    pub async fn save(&mut self, items: &[Item]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(items).map_err(StoreError::Serialize)?;
        self.area.set_item(STORAGE_KEY, payload).await?;
        debug!(items = items.len(), "saved items");
        Ok(())
    }

    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.area.remove_item(STORAGE_KEY).await
    }

    pub fn next_id(&mut self) -> i64 {
        self.ids.next_id()
    }

    pub fn area_mut(&mut self) -> &mut StorageArea {
        &mut self.area
    }
}

fn decode(raw: Option<&str>) -> Result<Vec<Item>, StoreError> {
    match raw {
        Some(raw) => serde_json::from_str(raw).map_err(StoreError::CorruptData),
        None => Ok(Vec::new()),
    }
}
