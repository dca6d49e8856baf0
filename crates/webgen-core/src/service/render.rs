//! Page selection for the presentation layer.
//!
//! A stored website may carry ready markup (`aiGeneratedHTML`, `html`) or only
//! a project map in `files`. [`render_page`] picks what to serve.

use serde_json::{Map, Value};
use webgen_types::page::inline_assets;
use webgen_types::website::GeneratedWebsite;

const INDEX_FILE: &str = "index.html";
const STYLES_FILE: &str = "styles.css";
const SCRIPT_FILE: &str = "script.js";

/// Markup to serve for `website`, or None if it has nothing renderable.
///
/// Priority: `aiGeneratedHTML`, then `html`, then `files["index.html"]` with
/// `styles.css` / `script.js` inlined.
pub fn render_page(website: &GeneratedWebsite) -> Option<String> {
    let content = &website.content;
    non_empty(content.ai_generated_html.as_deref())
        .or_else(|| non_empty(content.html.as_deref()))
        .map(str::to_string)
        .or_else(|| content.files.as_ref().and_then(page_from_files))
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

fn page_from_files(files: &Value) -> Option<String> {
    let files = files.as_object()?;
    let index = non_empty(Some(asset(files, INDEX_FILE)))?;
    Some(inline_assets(
        index,
        asset(files, STYLES_FILE),
        asset(files, SCRIPT_FILE),
    ))
}

fn asset<'a>(files: &'a Map<String, Value>, name: &str) -> &'a str {
    files.get(name).and_then(Value::as_str).unwrap_or_default()
}
