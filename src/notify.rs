use crate::models::Item;
use crate::status::days_until;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

/// Items with this many days left or fewer (and not expired) raise an alert.
pub const ALERT_WINDOW_DAYS: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    #[default]
    Default,
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub item_id: i64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct PermissionReport {
    pub permission: Permission,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PermissionResponse {
    pub granted: bool,
    pub message: Option<String>,
}

/// Tracks the page's notification permission and which alerts were already
/// delivered, so each near-expiry item is announced at most once per day.
#[derive(Debug, Default)]
pub struct NotificationGate {
    permission: Permission,
    delivered: HashSet<(i64, NaiveDate)>,
}

impl NotificationGate {
    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn record_permission(&mut self, permission: Permission) -> PermissionResponse {
        self.permission = permission;
        info!(?permission, "notification permission reported");

        let granted = permission == Permission::Granted;
        PermissionResponse {
            granted,
            message: granted.then(|| "Notifications enabled!".to_string()),
        }
    }

    pub fn check_and_notify(&mut self, items: &[Item], now: NaiveDateTime) -> Vec<Alert> {
        if self.permission != Permission::Granted {
            return Vec::new();
        }

        let today = now.date();
        let mut alerts = Vec::new();
        for item in items {
            let days = days_until(item.expiry, now);
            if !(0..=ALERT_WINDOW_DAYS).contains(&days) {
                continue;
            }
            if !self.delivered.insert((item.id, today)) {
                continue;
            }
            debug!(id = item.id, days, "emitting expiry alert");
            alerts.push(Alert {
                item_id: item.id,
                title: format!("Expiring soon: {}", item.name),
                body: format!("Until {}", item.expiry),
            });
        }

        self.delivered.retain(|(_, day)| *day == today);
        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 7, 14)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap())
    }

    fn item(id: i64, name: &str, offset: i64) -> Item {
        Item {
            id,
            name: name.to_string(),
            expiry: now().date() + Duration::days(offset),
        }
    }

    #[test]
    fn nothing_without_permission() {
        let mut gate = NotificationGate::default();
        assert!(gate.check_and_notify(&[item(1, "Milk", 1)], now()).is_empty());

        gate.record_permission(Permission::Denied);
        assert!(gate.check_and_notify(&[item(1, "Milk", 1)], now()).is_empty());
    }

    #[test]
    fn granted_permission_reports_confirmation() {
        let mut gate = NotificationGate::default();
        let denied = gate.record_permission(Permission::Denied);
        assert!(!denied.granted);
        assert!(denied.message.is_none());

        let granted = gate.record_permission(Permission::Granted);
        assert!(granted.granted);
        assert_eq!(granted.message.as_deref(), Some("Notifications enabled!"));
        assert_eq!(gate.permission(), Permission::Granted);
    }

    #[test]
    fn alerts_cover_zero_to_two_days() {
        let mut gate = NotificationGate::default();
        gate.record_permission(Permission::Granted);
        let items = vec![
            item(1, "Old bread", -1),
            item(2, "Milk", 0),
            item(3, "Yogurt", 2),
            item(4, "Cheese", 3),
        ];

        let alerts = gate.check_and_notify(&items, now());
        let ids: Vec<i64> = alerts.iter().map(|alert| alert.item_id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(alerts[0].title, "Expiring soon: Milk");
        assert_eq!(alerts[0].body, "Until 2026-07-14");
    }

    #[test]
    fn each_item_alerts_once_per_day() {
        let mut gate = NotificationGate::default();
        gate.record_permission(Permission::Granted);
        let items = vec![item(1, "Milk", 1)];

        assert_eq!(gate.check_and_notify(&items, now()).len(), 1);
        assert!(gate.check_and_notify(&items, now()).is_empty());

        let added = vec![item(1, "Milk", 1), item(2, "Cream", 2)];
        let alerts = gate.check_and_notify(&added, now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].item_id, 2);

        let tomorrow = now() + Duration::days(1);
        assert_eq!(gate.check_and_notify(&added, tomorrow).len(), 2);
    }
}
