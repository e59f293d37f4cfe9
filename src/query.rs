use crate::models::{Item, StatusFilter};
use crate::status::status_of;
use chrono::NaiveDateTime;

/// Items whose name contains `search` (ignoring case) and whose derived
/// status passes `filter`, in collection order.
pub fn query(items: &[Item], search: &str, filter: StatusFilter, now: NaiveDateTime) -> Vec<Item> {
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
        .filter(|item| filter.matches(status_of(item.expiry, now).category))
        .cloned()
        .collect()
}
