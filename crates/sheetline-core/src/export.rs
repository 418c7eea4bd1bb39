//! Standalone HTML export: one page that loads the TimelineJS renderer from its
//! CDN and feeds it the sanitized document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::sanitize::{sanitize_document, SanitizeError};
use crate::types::TimelineDocument;

pub const DEFAULT_CSS_URL: &str = "https://cdn.knightlab.com/libs/timeline3/latest/css/timeline.css";
pub const DEFAULT_JS_URL: &str = "https://cdn.knightlab.com/libs/timeline3/latest/js/timeline.js";
pub const DATA_ELEMENT_ID: &str = "timeline-data";

const FALLBACK_PAGE_TITLE: &str = "Timeline";
const DATA_OPEN_PREFIX: &str = "<script type=\"application/json\" id=\"";
const SCRIPT_CLOSE: &str = "</script>";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to sanitize document: {0}")]
    Sanitize(#[from] SanitizeError),

    #[error("failed to serialize document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub css_url: String,
    pub js_url: String,
    pub container_id: String,
    pub height: String,
    pub width: String,
    /// Used when the export target is a directory.
    pub file_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            css_url: DEFAULT_CSS_URL.to_string(),
            js_url: DEFAULT_JS_URL.to_string(),
            container_id: "timeline-embed".to_string(),
            height: "650".to_string(),
            width: "100%".to_string(),
            file_name: "timeline.html".to_string(),
        }
    }
}

/// Renders a self-contained page for `document`.
///
/// The sanitized document is embedded as pretty-printed JSON in a non-executable
/// script element and handed to the renderer by a short bootstrap script; the
/// renderer instance stays local to that script.
pub fn render_standalone_html(
    document: &TimelineDocument,
    options: &ExportOptions,
) -> Result<String, ExportError> {
    let data = sanitize_document(document)?;
    let data_json = escape_script_json(&serde_json::to_string_pretty(&data)?);

    let headline = document.title.text().headline.trim();
    let page_title = if headline.is_empty() {
        FALLBACK_PAGE_TITLE
    } else {
        headline
    };

    let bootstrap = format!(
        "(function () {{\n      var source = document.getElementById({data_id});\n      var data = JSON.parse(source.textContent);\n      var timeline = new TL.Timeline({container}, data, {{ height: {height}, width: {width} }});\n    }})();",
        data_id = js_string(DATA_ELEMENT_ID)?,
        container = js_string(&options.container_id)?,
        height = js_string(&options.height)?,
        width = js_string(&options.width)?,
    );

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{css_url}">
    <script src="{js_url}"></script>
    <style>
        html, body {{ margin: 0; padding: 0; }}
    </style>
</head>
<body>
    <div id="{container_id}" style="width: {width}; height: {height};"></div>
    <script type="application/json" id="{data_id}">
{data_json}
    </script>
    <script>
    {bootstrap}
    </script>
</body>
</html>
"#,
        title = escape_html(page_title),
        css_url = escape_html(&options.css_url),
        js_url = escape_html(&options.js_url),
        container_id = escape_html(&options.container_id),
        width = escape_html(&options.width),
        height = escape_html(&css_length(&options.height)),
        data_id = DATA_ELEMENT_ID,
        data_json = data_json,
        bootstrap = bootstrap,
    ))
}

/// Renders the page and writes it to `target`, joining `options.file_name` when
/// `target` is an existing directory. Returns the path written.
pub fn write_standalone_html(
    document: &TimelineDocument,
    options: &ExportOptions,
    target: &Path,
) -> Result<PathBuf, ExportError> {
    let html = render_standalone_html(document, options)?;
    let path = if target.is_dir() {
        target.join(&options.file_name)
    } else {
        target.to_path_buf()
    };
    fs::write(&path, html.as_bytes())?;
    info!(path = %path.display(), bytes = html.len(), "wrote standalone timeline page");
    Ok(path)
}

/// The JSON text embedded by [`render_standalone_html`], if `html` carries it.
pub fn extract_embedded_json(html: &str) -> Option<&str> {
    let open = format!("{DATA_OPEN_PREFIX}{DATA_ELEMENT_ID}\">");
    let start = html.find(&open)? + open.len();
    let len = html[start..].find(SCRIPT_CLOSE)?;
    Some(html[start..start + len].trim())
}

/// Makes serialized JSON safe inside a script element. The escapes are valid
/// JSON string escapes, so parsing the result yields the original value.
pub fn escape_script_json(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn js_string(value: &str) -> Result<String, serde_json::Error> {
    Ok(escape_script_json(&serde_json::to_string(value)?))
}

fn css_length(value: &str) -> String {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        format!("{trimmed}px")
    } else {
        trimmed.to_string()
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
