use crate::errors::StoreError;
use crate::interaction::Interaction;
use crate::models::Item;
use crate::storage::ItemStore;
use chrono::NaiveDate;
use tracing::info;

/// Appends a new item. Returns `None` without touching the store when the
/// name is blank.
pub async fn add_item(
    store: &mut ItemStore,
    name: &str,
    expiry: NaiveDate,
) -> Result<Option<Item>, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    let mut items = store.load()?;
    let item = Item {
        id: store.next_id(),
        name: name.to_string(),
        expiry,
    };
    items.push(item.clone());
    store.save(&items).await?;

    info!(id = item.id, name = %item.name, %expiry, "item added");
    Ok(Some(item))
}

/// Renames an item. Blank names and unknown ids leave the store untouched.
pub async fn rename_item(
    store: &mut ItemStore,
    id: i64,
    name: &str,
) -> Result<Option<Item>, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    let mut items = store.load()?;
    let Some(item) = items.iter_mut().find(|item| item.id == id) else {
        return Ok(None);
    };
    item.name = name.to_string();
    let updated = item.clone();
    store.save(&items).await?;

    info!(id, name = %updated.name, "item renamed");
    Ok(Some(updated))
}

/// Removes the item with `id` and persists the rest in their original order.
pub async fn delete_item(store: &mut ItemStore, id: i64) -> Result<bool, StoreError> {
    let mut items = store.load()?;
    let before = items.len();
    items.retain(|item| item.id != id);
    let removed = items.len() != before;
    store.save(&items).await?;

    if removed {
        info!(id, "item deleted");
    }
    Ok(removed)
}

pub async fn clear_items(store: &mut ItemStore) -> Result<(), StoreError> {
    store.clear().await?;
    info!("all items cleared");
    Ok(())
}

/// Enters edit mode for `id`. Unknown ids are ignored.
pub fn begin_edit(
    store: &ItemStore,
    interaction: &mut Interaction,
    id: i64,
) -> Result<bool, StoreError> {
    let exists = store.load()?.iter().any(|item| item.id == id);
    if exists {
        interaction.begin_edit(id);
    }
    Ok(exists)
}

/// Applies the rename for the item being edited. A blank name aborts the
/// edit without mutation.
pub async fn confirm_edit(
    store: &mut ItemStore,
    interaction: &mut Interaction,
    name: &str,
) -> Result<Option<Item>, StoreError> {
    let Some(id) = interaction.editing_id() else {
        return Ok(None);
    };
    interaction.cancel();
    rename_item(store, id, name).await
}

pub async fn delete_and_forget(
    store: &mut ItemStore,
    interaction: &mut Interaction,
    id: i64,
) -> Result<bool, StoreError> {
    let removed = delete_item(store, id).await?;
    interaction.forget(id);
    Ok(removed)
}

/// Erases every item if a clear was requested. Returns whether it happened.
pub async fn confirm_clear(
    store: &mut ItemStore,
    interaction: &mut Interaction,
) -> Result<bool, StoreError> {
    if !interaction.is_confirming_clear() {
        return Ok(false);
    }
    interaction.cancel();
    clear_items(store).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::unique_path;
    use std::ops::{Deref, DerefMut};
    use std::path::PathBuf;

    fn date(offset: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 1 + offset).unwrap()
    }

    /// An item store on a temp file that is removed when the test ends.
    struct TempStore {
        store: ItemStore,
        path: PathBuf,
    }

    impl Deref for TempStore {
        type Target = ItemStore;

        fn deref(&self) -> &ItemStore {
            &self.store
        }
    }

    impl DerefMut for TempStore {
        fn deref_mut(&mut self) -> &mut ItemStore {
            &mut self.store
        }
    }

    impl Drop for TempStore {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    async fn seeded_store(tag: &str, names: &[&str]) -> TempStore {
        let path = unique_path(tag);
        let mut store = TempStore {
            store: ItemStore::open(&path).await.unwrap(),
            path,
        };
        for (offset, name) in names.iter().enumerate() {
            add_item(&mut store, name, date(offset as u32)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn add_appends_trimmed_item() {
        let mut store = seeded_store("add", &["Milk"]).await;
        let before = store.load().unwrap().len();

        let added = add_item(&mut store, "  Eggs ", date(5))
            .await
            .unwrap()
            .expect("item added");

        let items = store.load().unwrap();
        assert_eq!(items.len(), before + 1);
        let last = items.last().unwrap();
        assert_eq!(last, &added);
        assert_eq!(last.name, "Eggs");
        assert_eq!(last.expiry, date(5));
    }

    #[tokio::test]
    async fn add_ignores_blank_name() {
        let mut store = seeded_store("blank", &[]).await;
        assert!(add_item(&mut store, "   ", date(0)).await.unwrap().is_none());
        assert!(store.load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn consecutive_adds_get_distinct_ids() {
        let store = seeded_store("ids", &["A", "B", "C", "D"]).await;
        let ids: Vec<i64> = store.load().unwrap().iter().map(|item| item.id).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[tokio::test]
    async fn delete_keeps_others_in_order() {
        let mut store = seeded_store("delete", &["Milk", "Eggs", "Ham"]).await;
        let items = store.load().unwrap();
        let target = items[1].id;

        assert!(delete_item(&mut store, target).await.unwrap());
        let remaining = store.load().unwrap();
        assert!(remaining.iter().all(|item| item.id != target));
        assert_eq!(remaining, vec![items[0].clone(), items[2].clone()]);

        assert!(!delete_item(&mut store, target).await.unwrap());
        assert_eq!(store.load().unwrap(), remaining);
    }

    #[tokio::test]
    async fn clear_empties_collection() {
        let mut store = seeded_store("clear", &["Milk", "Eggs"]).await;
        clear_items(&mut store).await.unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn edit_flow_renames_on_confirm() {
        let mut store = seeded_store("edit", &["Milk", "Eggs"]).await;
        let id = store.load().unwrap()[0].id;
        let mut interaction = Interaction::Idle;

        assert!(begin_edit(&store, &mut interaction, id).unwrap());
        assert_eq!(interaction.editing_id(), Some(id));

        let renamed = confirm_edit(&mut store, &mut interaction, " Oat milk ")
            .await
            .unwrap()
            .expect("renamed");
        assert_eq!(renamed.name, "Oat milk");
        assert_eq!(interaction, Interaction::Idle);
        assert_eq!(store.load().unwrap()[0].name, "Oat milk");
        assert_eq!(store.load().unwrap()[1].name, "Eggs");
    }

    #[tokio::test]
    async fn edit_aborts_on_blank_name_or_unknown_id() {
        let mut store = seeded_store("abort", &["Milk"]).await;
        let before = store.load().unwrap();
        let mut interaction = Interaction::Idle;

        assert!(!begin_edit(&store, &mut interaction, -1).unwrap());
        assert_eq!(interaction, Interaction::Idle);

        begin_edit(&store, &mut interaction, before[0].id).unwrap();
        assert!(confirm_edit(&mut store, &mut interaction, "")
            .await
            .unwrap()
            .is_none());
        assert_eq!(interaction, Interaction::Idle);
        assert_eq!(store.load().unwrap(), before);

        assert!(confirm_edit(&mut store, &mut interaction, "Cream")
            .await
            .unwrap()
            .is_none());
        assert_eq!(store.load().unwrap(), before);
    }

    #[tokio::test]
    async fn deleting_edited_item_leaves_edit_mode() {
        let mut store = seeded_store("forget", &["Milk"]).await;
        let id = store.load().unwrap()[0].id;
        let mut interaction = Interaction::Editing { id };

        assert!(delete_and_forget(&mut store, &mut interaction, id).await.unwrap());
        assert_eq!(interaction, Interaction::Idle);
    }

    #[tokio::test]
    async fn clear_requires_confirmation_state() {
        let mut store = seeded_store("confirm", &["Milk"]).await;
        let mut interaction = Interaction::Idle;

        assert!(!confirm_clear(&mut store, &mut interaction).await.unwrap());
        assert_eq!(store.load().unwrap().len(), 1);

        interaction.request_clear();
        assert!(confirm_clear(&mut store, &mut interaction).await.unwrap());
        assert!(store.load().unwrap().is_empty());
        assert_eq!(interaction, Interaction::Idle);
    }
}
