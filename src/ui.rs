use crate::interaction::Interaction;
use crate::models::{ListQuery, StatusFilter};
use crate::view::{escape_html, ListView};
use chrono::NaiveDate;

pub struct Page<'a> {
    pub list: &'a ListView,
    pub query: &'a ListQuery,
    pub interaction: Interaction,
    pub today: NaiveDate,
}

pub fn render_index(page: &Page<'_>) -> String {
    let query = page.query.query_string();
    fill(INDEX_HTML, |placeholder| match placeholder {
        "TODAY" => Some(page.today.to_string()),
        "SEARCH" => Some(escape_html(&page.query.q)),
        "FILTER_OPTIONS" => Some(filter_options(page.query.status)),
        "RETURN" => Some(escape_html(&query)),
        "CLEAR_BANNER" => Some(clear_banner(&page.interaction, &query)),
        "LIST" => Some(page.list.to_html(&query)),
        _ => None,
    })
}

/// Substitutes `{{NAME}}` placeholders in one left-to-right pass. Inserted
/// values are never rescanned, so user text that looks like a placeholder
/// stays literal.
fn fill(template: &str, value_of: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let substituted = after
            .find("}}")
            .and_then(|end| value_of(&after[..end]).map(|value| (end, value)));
        match substituted {
            Some((end, value)) => {
                out.push_str(&value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn filter_options(selected: StatusFilter) -> String {
    StatusFilter::OPTIONS
        .iter()
        .map(|option| {
            let label = match option {
                StatusFilter::All => "All",
                StatusFilter::Expired => "Expired",
                StatusFilter::Soon => "Expiring soon",
                StatusFilter::Ok => "Fresh",
            };
            let marker = if *option == selected { " selected" } else { "" };
            format!(r#"<option value="{option}"{marker}>{label}</option>"#)
        })
        .collect()
}

fn clear_banner(interaction: &Interaction, query: &str) -> String {
    if !interaction.is_confirming_clear() {
        return String::new();
    }
    let query = escape_html(query);
    format!(
        r#"<div class="confirm" role="alertdialog">
      <span>Delete all items?</span>
      <form method="post" action="/clear/confirm{query}"><button class="btn danger" type="submit">Delete all</button></form>
      <form method="post" action="/clear/cancel{query}"><button class="btn ghost" type="submit">Keep them</button></form>
    </div>"#
    )
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Food Expiry Tracker</title>
  <style>
    :root {
      --bg: #f4f7f2;
      --ink: #23302a;
      --muted: #6b776f;
      --accent: #3f8f5b;
      --card: #ffffff;
      --expired: #c63b2b;
      --soon: #d98a1f;
      --ok: #2d7a4b;
      --shadow: 0 18px 40px rgba(35, 48, 42, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
    }

    .topbar {
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 14px 22px;
      background: var(--card);
      box-shadow: var(--shadow);
    }

    .topbar h1 {
      margin: 0;
      font-size: 1.4rem;
    }

    #hamburger {
      display: none;
      font-size: 1.4rem;
      background: transparent;
      border: none;
      cursor: pointer;
    }

    #nav-menu {
      display: flex;
      gap: 10px;
    }

    main {
      width: min(760px, 100%);
      margin: 28px auto;
      padding: 0 18px;
      display: grid;
      gap: 20px;
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      padding: 20px;
      box-shadow: var(--shadow);
      display: grid;
      gap: 14px;
    }

    form.add,
    form.filters {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    input,
    select {
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid rgba(35, 48, 42, 0.18);
      font-size: 1rem;
      flex: 1 1 160px;
    }

    .btn {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    .btn.ghost {
      background: transparent;
      color: var(--ink);
      border: 1px solid rgba(35, 48, 42, 0.2);
    }

    .btn.danger {
      background: var(--expired);
    }

    .btn.small {
      padding: 6px 10px;
      font-size: 0.9rem;
    }

    .item {
      display: flex;
      align-items: center;
      gap: 12px;
      padding: 12px 0;
      border-bottom: 1px solid rgba(35, 48, 42, 0.08);
    }

    .item .meta {
      flex: 1;
    }

    .item .name {
      font-weight: 600;
    }

    .muted {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .controls {
      display: flex;
      gap: 6px;
    }

    .tag {
      padding: 4px 10px;
      border-radius: 999px;
      font-size: 0.85rem;
      color: white;
    }

    .tag.expired {
      background: var(--expired);
    }

    .tag.soon {
      background: var(--soon);
    }

    .tag.ok {
      background: var(--ok);
    }

    .empty {
      color: var(--muted);
      text-align: center;
      padding: 24px 0;
    }

    .confirm {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 10px;
      padding: 14px;
      border-radius: 14px;
      background: #fdecea;
    }

    @media (max-width: 640px) {
      #hamburger {
        display: block;
      }

      #nav-menu {
        display: none;
        position: absolute;
        top: 58px;
        right: 16px;
        flex-direction: column;
        padding: 12px;
        background: var(--card);
        border-radius: 14px;
        box-shadow: var(--shadow);
      }

      #nav-menu.active {
        display: flex;
      }
    }
  </style>
</head>
<body>
  <header class="topbar">
    <h1>Food Expiry Tracker</h1>
    <button id="hamburger" type="button" aria-label="Menu">&#9776;</button>
    <nav id="nav-menu">
      <form method="post" action="/clear{{RETURN}}"><button class="btn ghost" id="clear" type="submit">Clear all</button></form>
      <button class="btn" id="notify" type="button">Enable notifications</button>
    </nav>
  </header>

  <main>
    {{CLEAR_BANNER}}

    <section class="card">
      <form id="addForm" class="add" method="post" action="/items{{RETURN}}">
        <input id="name" name="name" placeholder="Product name" required />
        <input id="expiry" name="expiry" type="date" min="2000-01-01" value="{{TODAY}}" required />
        <button class="btn" type="submit">Add</button>
      </form>
    </section>

    <section class="card">
      <form id="filters" class="filters" method="get" action="/">
        <input id="search" name="q" placeholder="Search..." value="{{SEARCH}}" />
        <select id="filter" name="status">{{FILTER_OPTIONS}}</select>
      </form>
      <div id="list">{{LIST}}</div>
    </section>
  </main>

  <script>
    const filters = document.getElementById('filters');
    const search = document.getElementById('search');
    const filter = document.getElementById('filter');

    let searchTimer = null;
    search.addEventListener('input', () => {
      clearTimeout(searchTimer);
      searchTimer = setTimeout(() => filters.submit(), 300);
    });
    filter.addEventListener('change', () => filters.submit());

    const reportPermission = (permission) =>
      fetch('/api/notifications/permission', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ permission })
      }).then((res) => res.json());

    document.getElementById('notify').addEventListener('click', () => {
      if (!('Notification' in window)) {
        return;
      }
      Notification.requestPermission()
        .then(reportPermission)
        .then((res) => {
          if (res.granted && res.message) {
            alert(res.message);
          }
        });
    });

    const showNotifications = async () => {
      if (!('Notification' in window) || Notification.permission !== 'granted') {
        return;
      }
      await reportPermission(Notification.permission);
      const res = await fetch('/api/notifications');
      if (!res.ok) {
        return;
      }
      const alerts = await res.json();
      alerts.forEach((alert) => new Notification(alert.title, { body: alert.body }));
    };

    showNotifications().catch(() => {});

    const hamburger = document.getElementById('hamburger');
    const navMenu = document.getElementById('nav-menu');
    if (hamburger && navMenu) {
      hamburger.addEventListener('click', () => navMenu.classList.toggle('active'));
      navMenu.querySelectorAll('button').forEach((button) => {
        button.addEventListener('click', () => navMenu.classList.remove('active'));
      });
      window.addEventListener('resize', () => {
        if (window.innerWidth > 640) {
          navMenu.classList.remove('active');
        }
      });
    }
  </script>
</body>
</html>
"#;
