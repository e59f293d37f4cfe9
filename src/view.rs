//! Declarative description of the item list, built without touching markup.
//!
//! [`render`] is a pure function of the filtered items, the current time and
//! the pending [`Interaction`]; [`ListView::to_html`] turns the result into
//! the fragment that replaces the list container wholesale. Form actions carry
//! the page's query string so a mutation lands back on the same search.

use crate::interaction::Interaction;
use crate::models::Item;
use crate::status::status_of;
use chrono::NaiveDateTime;
use std::fmt::Write;

pub const EMPTY_MESSAGE: &str = "No items";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty { message: &'static str },
    Rows(Vec<ItemRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: i64,
    pub name: String,
    pub expiry: String,
    pub tag: StatusTag,
    pub controls: RowControls,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTag {
    pub class: &'static str,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowControls {
    Actions { edit: Action, delete: Action },
    Renaming { confirm: Action, cancel: Action },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit(i64),
    Delete(i64),
    ConfirmEdit,
    CancelEdit,
}

impl Action {
    /// Form target with `query` (`?q=..&status=..` or empty) appended,
    /// escaped for use inside an attribute.
    pub fn target(&self, query: &str) -> String {
        escape_html(&format!("{}{query}", self.path()))
    }

    pub fn path(&self) -> String {
        match self {
            Self::Edit(id) => format!("/items/{id}/edit"),
            Self::Delete(id) => format!("/items/{id}/delete"),
            Self::ConfirmEdit => "/edit/confirm".to_string(),
            Self::CancelEdit => "/edit/cancel".to_string(),
        }
    }
}

pub fn render(items: &[Item], now: NaiveDateTime, interaction: &Interaction) -> ListView {
    if items.is_empty() {
        return ListView::Empty {
            message: EMPTY_MESSAGE,
        };
    }

    let editing = interaction.editing_id();
    let rows = items
        .iter()
        .map(|item| {
            let status = status_of(item.expiry, now);
            let controls = if editing == Some(item.id) {
                RowControls::Renaming {
                    confirm: Action::ConfirmEdit,
                    cancel: Action::CancelEdit,
                }
            } else {
                RowControls::Actions {
                    edit: Action::Edit(item.id),
                    delete: Action::Delete(item.id),
                }
            };

            ItemRow {
                id: item.id,
                name: item.name.clone(),
                expiry: item.expiry.to_string(),
                tag: StatusTag {
                    class: status.category.as_str(),
                    label: status.label,
                },
                controls,
            }
        })
        .collect();

    ListView::Rows(rows)
}

impl ListView {
    pub fn to_html(&self, query: &str) -> String {
        let rows = match self {
            Self::Empty { message } => {
                return format!(r#"<div class="empty">{}</div>"#, escape_html(message));
            }
            Self::Rows(rows) => rows,
        };

        let mut html = String::new();
        for row in rows {
            let _ = write!(
                html,
                r#"<div class="item" data-id="{id}"><div class="meta"><div class="name">{name}</div><div class="muted">{expiry}</div></div><div class="tag {class}">{label}</div>"#,
                id = row.id,
                name = escape_html(&row.name),
                expiry = escape_html(&row.expiry),
                class = row.tag.class,
                label = escape_html(&row.tag.label),
            );
            html.push_str(&row.controls.to_html(&row.name, query));
            html.push_str("</div>");
        }
        html
    }
}

impl RowControls {
    fn to_html(&self, current_name: &str, query: &str) -> String {
        match self {
            Self::Actions { edit, delete } => format!(
                r#"<div class="controls"><form method="post" action="{edit}"><button class="btn small" type="submit" title="Edit">✏️</button></form><form method="post" action="{delete}"><button class="btn small ghost" type="submit" title="Delete">🗑</button></form></div>"#,
                edit = edit.target(query),
                delete = delete.target(query),
            ),
            Self::Renaming { confirm, cancel } => format!(
                r#"<div class="controls renaming"><form method="post" action="{confirm}"><input name="name" value="{value}" aria-label="New name" autofocus /><button class="btn small" type="submit">Save</button></form><form method="post" action="{cancel}"><button class="btn small ghost" type="submit">Cancel</button></form></div>"#,
                confirm = confirm.target(query),
                cancel = cancel.target(query),
                value = escape_html(current_name),
            ),
        }
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 20)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap())
    }

    fn item(id: i64, name: &str, offset: i64) -> Item {
        Item {
            id,
            name: name.to_string(),
            expiry: now().date() + Duration::days(offset),
        }
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let view = render(&[], now(), &Interaction::Idle);
        assert_eq!(
            view,
            ListView::Empty {
                message: EMPTY_MESSAGE
            }
        );
        assert_eq!(view.to_html(""), r#"<div class="empty">No items</div>"#);
    }

    #[test]
    fn rows_carry_status_and_actions() {
        let items = vec![item(1, "Milk", 2), item(2, "Ham", -3)];
        let ListView::Rows(rows) = render(&items, now(), &Interaction::Idle) else {
            panic!("expected rows");
        };

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Milk");
        assert_eq!(rows[0].expiry, "2026-02-22");
        assert_eq!(rows[0].tag.class, "soon");
        assert_eq!(rows[0].tag.label, "2 day(s) left");
        assert_eq!(
            rows[0].controls,
            RowControls::Actions {
                edit: Action::Edit(1),
                delete: Action::Delete(1)
            }
        );
        assert_eq!(rows[1].tag.class, "expired");
        assert_eq!(rows[1].tag.label, "Expired");
    }

    #[test]
    fn editing_row_swaps_actions_for_rename_form() {
        let items = vec![item(1, "Milk", 5), item(2, "Eggs", 5)];
        let view = render(&items, now(), &Interaction::Editing { id: 2 });
        let ListView::Rows(rows) = &view else {
            panic!("expected rows");
        };

        assert!(matches!(rows[0].controls, RowControls::Actions { .. }));
        assert!(matches!(rows[1].controls, RowControls::Renaming { .. }));

        let html = view.to_html("");
        assert!(html.contains(r#"action="/items/1/edit""#));
        assert!(html.contains(r#"action="/edit/confirm""#));
        assert!(html.contains(r#"value="Eggs""#));
        assert!(!html.contains(r#"action="/items/2/edit""#));
    }

    #[test]
    fn html_escapes_item_names() {
        let items = vec![item(1, "<script>alert('x')</script>", 8)];
        let html = render(&items, now(), &Interaction::Idle).to_html("");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains(r#"<div class="tag ok">8 day(s)</div>"#));
    }

    #[test]
    fn form_targets_keep_the_page_query() {
        let items = vec![item(7, "Milk", 1)];
        let html = render(&items, now(), &Interaction::Idle).to_html("?q=milk&status=soon");
        assert!(html.contains(r#"action="/items/7/edit?q=milk&amp;status=soon""#));
        assert!(html.contains(r#"action="/items/7/delete?q=milk&amp;status=soon""#));
    }
}
