//! Minimal HTML search page.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    response::Html,
};
use serde::Deserialize;
use trawler_core::{AggregateError, TorrentRecord};

use crate::metrics::record_search;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub keyword: Option<String>,
}

/// What the page shows below the form.
#[derive(Debug, PartialEq)]
pub enum PageBody<'a> {
    Blank,
    Message(String),
    Results(&'a [TorrentRecord]),
}

/// GET /
pub async fn index() -> Html<String> {
    Html(render_page("", &PageBody::Blank))
}

/// POST /
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Html<String> {
    let keyword = form.keyword.unwrap_or_default();

    match state.aggregator().aggregate(&keyword).await {
        Ok(result) if result.is_empty() => {
            record_search("empty");
            let message = format!(
                "No results found (took {:.2}s)",
                result.elapsed.as_secs_f64()
            );
            Html(render_page(&keyword, &PageBody::Message(message)))
        }
        Ok(result) => {
            record_search("found");
            Html(render_page(&keyword, &PageBody::Results(&result.records)))
        }
        // Nothing was searched; show the bare form again
        Err(AggregateError::EmptyKeyword) => {
            record_search("invalid");
            Html(render_page(&keyword, &PageBody::Blank))
        }
    }
}

/// Render the search page with the keyword echoed back into the form.
pub fn render_page(keyword: &str, body: &PageBody<'_>) -> String {
    let content = match body {
        PageBody::Blank => String::new(),
        PageBody::Message(message) => {
            format!(r#"<p class="message">{}</p>"#, html_escape(message))
        }
        PageBody::Results(records) => render_table(records),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>trawler</title>
<style>
body {{ font-family: sans-serif; margin: 24px; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border-bottom: 1px solid #ddd; padding: 6px; text-align: left; }}
.message {{ color: #888; }}
</style>
</head>
<body>
<form method="post" action="/">
    <input type="text" name="keyword" value="{keyword}" placeholder="Keyword" autofocus>
    <button type="submit">Search</button>
</form>
{content}
</body>
</html>"#,
        keyword = html_escape(keyword),
    )
}

fn render_table(records: &[TorrentRecord]) -> String {
    let mut rows = String::new();
    for record in records {
        rows.push_str(&format!(
            r#"<tr><td>{}</td><td><a href="{}">{}</a></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>
"#,
            html_escape(&record.engine),
            html_escape(&record.magnet),
            html_escape(&record.name),
            html_escape(&record.size),
            html_escape(&record.date),
            html_escape(&record.seeders.to_string()),
            html_escape(&record.leechers.to_string()),
        ));
    }

    format!(
        r#"<table>
<thead><tr><th>Engine</th><th>Name</th><th>Size</th><th>Date</th><th>Seeders</th><th>Leechers</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
