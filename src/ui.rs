use crate::dates::{format_display_date, parse_date};
use crate::heatmap::{css_class, LEGEND};
use crate::models::{Entry, Heatmap};
use chrono::NaiveDate;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub struct IndexPage {
    pub today: NaiveDate,
    pub today_entry: Option<Entry>,
    pub recent: Vec<Entry>,
    pub total: usize,
    pub heatmap: Heatmap,
}

pub fn render_index(page: &IndexPage) -> String {
    let (placeholder, button) = match &page.today_entry {
        Some(entry) => (format!("Today: \"{}\"", entry.word), "Update Today"),
        None => ("How's your day?".to_string(), "Log Word"),
    };

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "DayBit" }
                style { (PreEscaped(CSS)) }
            }
            body {
                main.app {
                    header {
                        h1 { "DayBit" }
                        p { "One word a day." }
                    }
                    section.top {
                        div.card {
                            form method="post" action="/entry" {
                                input name="word" type="text" maxlength="20" placeholder=(placeholder) autofocus required;
                                button type="submit" { (button) }
                            }
                            @if page.today_entry.is_some() {
                                p.hint { "You can update today's word anytime" }
                            }
                        }
                        div.card {
                            h2 { "Recent Words" }
                            (render_recent(page))
                        }
                    }
                    section.card {
                        h2 { "Your Year at a Glance" }
                        div.scroll { (render_heatmap(&page.heatmap)) }
                        div.legend { (render_legend()) }
                    }
                    footer {
                        p { strong { (page.total) " words logged" } }
                        form method="post" action="/api/session/reset" {
                            button type="submit" { "Start over" }
                        }
                    }
                }
            }
        }
    };
    markup.into_string()
}

fn render_recent(page: &IndexPage) -> Markup {
    html! {
        @if page.recent.is_empty() {
            div.empty {
                p { "No entries yet!" }
                p.hint { "Start by logging your first word above." }
            }
        } @else {
            ul.recent {
                @for (index, entry) in page.recent.iter().enumerate() {
                    @let date = parse_date(&entry.date)
                        .map(|date| format_display_date(date, page.today))
                        .unwrap_or_else(|| entry.date.clone());
                    li.recent-item.latest[index == 0] {
                        span.recent-date { (date) }
                        span.recent-word { (entry.word) }
                    }
                }
            }
            @if page.total > page.recent.len() {
                p.hint { "Showing last " (page.recent.len()) " entries • " (page.total) " total" }
            }
        }
    }
}

fn render_heatmap(heatmap: &Heatmap) -> Markup {
    let columns = format!("grid-template-columns: repeat({}, var(--cell));", heatmap.week_count);
    html! {
        div.months style=(columns) {
            @for label in &heatmap.month_labels {
                span style=(format!("grid-column: {};", label.week + 1)) { (label.month) }
            }
        }
        div.grid-wrap {
            div.weekdays {
                @for (row, name) in WEEKDAY_LABELS.iter().enumerate() {
                    span { @if row % 2 == 1 { (name) } }
                }
            }
            div.grid style=(columns) {
                @for cell in &heatmap.cells {
                    @let place = format!("grid-column: {}; grid-row: {};", cell.week + 1, cell.weekday + 1);
                    @if cell.in_window {
                        @let class = format!("day {}{}", cell.css_class(), if cell.is_today { " today" } else { "" });
                        span class=(class)
                            style=(place) data-date=(cell.date) title=(cell.tooltip()) {}
                    } @else {
                        span.day.outside style=(place) {}
                    }
                }
            }
        }
    }
}

fn render_legend() -> Markup {
    html! {
        span { "Less" }
        @for (level, label) in LEGEND {
            span class=(format!("day {}", css_class(level))) title=(label) {}
        }
        span { "More" }
    }
}

const CSS: &str = r#"
    :root {
      --bg: #f9fafb;
      --ink: #1f2937;
      --muted: #6b7280;
      --accent: #16a34a;
      --card: #ffffff;
      --shadow: 0 1px 3px rgba(15, 23, 42, 0.08);
      --cell: 12px;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
      padding: 32px 12px 48px;
    }

    .app {
      width: min(1100px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 28px;
    }

    header h1 {
      margin: 0;
      text-align: center;
      font-size: clamp(2rem, 4vw, 2.6rem);
    }

    header p {
      margin: 6px 0 0;
      text-align: center;
      color: var(--muted);
    }

    .top {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 24px;
    }

    .card {
      background: var(--card);
      border: 1px solid #e5e7eb;
      border-radius: 10px;
      box-shadow: var(--shadow);
      padding: 20px;
    }

    .card h2 {
      margin: 0 0 16px;
      text-align: center;
      font-size: 1.25rem;
    }

    form {
      display: grid;
      gap: 12px;
    }

    input {
      padding: 12px 16px;
      font-size: 1.1rem;
      text-align: center;
      border: 2px solid #e5e7eb;
      border-radius: 8px;
    }

    input:focus {
      outline: none;
      border-color: var(--accent);
    }

    button {
      padding: 12px;
      font-size: 1.1rem;
      font-weight: 600;
      color: white;
      background: var(--accent);
      border: none;
      border-radius: 8px;
      cursor: pointer;
    }

    .hint {
      margin: 8px 0 0;
      text-align: center;
      color: var(--muted);
      font-size: 0.875rem;
    }

    .empty {
      text-align: center;
      color: var(--muted);
    }

    .recent {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 10px;
    }

    .recent-item {
      display: flex;
      justify-content: space-between;
      padding: 10px 14px;
      background: #f9fafb;
      border-radius: 8px;
    }

    .recent-item.latest {
      background: #f0fdf4;
      border-left: 4px solid var(--accent);
    }

    .recent-date {
      color: var(--muted);
      font-size: 0.875rem;
    }

    .recent-word {
      font-weight: 600;
    }

    .scroll {
      overflow-x: auto;
      padding-bottom: 8px;
    }

    .months,
    .grid {
      display: grid;
      gap: 3px;
    }

    .months {
      margin-left: 36px;
      font-size: 11px;
      color: var(--muted);
      height: 16px;
    }

    .months span {
      white-space: nowrap;
    }

    .grid-wrap {
      display: flex;
      gap: 6px;
    }

    .weekdays {
      display: grid;
      grid-template-rows: repeat(7, var(--cell));
      gap: 3px;
      width: 30px;
      font-size: 10px;
      line-height: var(--cell);
      color: var(--muted);
    }

    .grid {
      grid-template-rows: repeat(7, var(--cell));
      grid-auto-flow: column;
    }

    .day {
      display: inline-block;
      width: var(--cell);
      height: var(--cell);
      border-radius: 2px;
    }

    .day.outside {
      visibility: hidden;
    }

    .day.today {
      outline: 2px solid var(--ink);
      outline-offset: -1px;
    }

    .color-empty { background: #ebedf0; }
    .color-scale-1 { background: #9be9a8; }
    .color-scale-2 { background: #40c463; }
    .color-scale-3 { background: #30a14e; }
    .color-scale-4 { background: #216e39; }

    .legend {
      display: flex;
      justify-content: flex-end;
      align-items: center;
      gap: 4px;
      margin-top: 12px;
      font-size: 0.8rem;
      color: var(--muted);
    }

    footer {
      text-align: center;
      color: var(--muted);
      font-size: 0.875rem;
    }

    footer strong {
      color: var(--accent);
    }
"#;
