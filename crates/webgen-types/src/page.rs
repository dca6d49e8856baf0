//! Assembling a single HTML page from separate markup, style and script.

/// Inline `css` as a `<style>` block before `</head>` and `js` as a
/// `<script>` block before `</body>`.
///
/// Tags are matched case-insensitively against their last occurrence; a
/// fragment without the tag gets the block appended. Blank assets are skipped.
///
/// ```
/// use webgen_types::page::inline_assets;
///
/// let page = inline_assets("<head></head><body></body>", "h1{}", "");
/// assert_eq!(page, "<head><style>\nh1{}\n</style>\n</head><body></body>");
/// ```
pub fn inline_assets(html: &str, css: &str, js: &str) -> String {
    let mut page = html.to_string();
    if !css.trim().is_empty() {
        page = inject_before(&page, "</head>", &format!("<style>\n{css}\n</style>\n"));
    }
    if !js.trim().is_empty() {
        page = inject_before(&page, "</body>", &format!("<script>\n{js}\n</script>\n"));
    }
    page
}

fn inject_before(page: &str, closing_tag: &str, snippet: &str) -> String {
    match page.to_ascii_lowercase().rfind(closing_tag) {
        Some(idx) => format!("{}{snippet}{}", &page[..idx], &page[idx..]),
        None => format!("{page}{snippet}"),
    }
}
