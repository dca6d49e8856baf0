//! Website CLI commands: save, import, list, show, delete, clear, count, slug.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::{Confirm, Input};
use tokio::io::AsyncReadExt;

use webgen_types::generation::{GenerationOutput, GenerationRequest};
use webgen_types::website::{GeneratedWebsite, TechStack, WebsiteDraft};

use crate::state::AppState;

/// Flags for `webgen save`.
#[derive(Args)]
pub struct SaveArgs {
    /// Read the whole draft from a JSON file ("-" for stdin); other flags are ignored.
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Website title (prompted for when omitted).
    #[arg(long)]
    pub title: Option<String>,

    /// Prompt the site was generated from.
    #[arg(long, default_value = "")]
    pub prompt: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Free-form site type label.
    #[arg(long = "type", default_value = "website")]
    pub site_type: String,

    #[arg(long, default_value = "")]
    pub primary_color: String,

    #[arg(long, default_value = "")]
    pub secondary_color: String,

    /// Section label (repeatable).
    #[arg(long = "section")]
    pub sections: Vec<String>,

    /// Feature label (repeatable).
    #[arg(long = "feature")]
    pub features: Vec<String>,

    /// Component label (repeatable).
    #[arg(long = "component")]
    pub components: Vec<String>,

    #[arg(long, default_value = "html")]
    pub framework: String,

    #[arg(long, default_value = "css")]
    pub styling: String,

    #[arg(long, default_value = "none")]
    pub backend: String,

    /// HTML file stored as the site's markup.
    #[arg(long)]
    pub html_file: Option<PathBuf>,
}

impl SaveArgs {
    /// Build a draft from the individual flags (ignores `--file`/`--html-file`).
    pub fn draft_from_flags(&self) -> WebsiteDraft {
        WebsiteDraft {
            prompt: self.prompt.clone(),
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone(),
            site_type: self.site_type.clone(),
            primary_color: self.primary_color.clone(),
            secondary_color: self.secondary_color.clone(),
            sections: self.sections.clone(),
            features: self.features.clone(),
            components: self.components.clone(),
            tech_stack: TechStack {
                framework: self.framework.clone(),
                styling: self.styling.clone(),
                backend: self.backend.clone(),
            },
            files: None,
            html: None,
            ai_generated_html: None,
            extra: Default::default(),
        }
    }
}

/// Save a website from a draft file or from flags.
///
/// # Examples
///
/// ```bash
/// webgen save --title "Brew Haven Cafe" --prompt "coffee shop" --section hero
/// webgen save --file draft.json
/// ```
pub async fn save_website(state: &AppState, args: SaveArgs, json: bool) -> Result<()> {
    let draft = match &args.file {
        Some(path) => {
            let raw = read_input(path).await?;
            serde_json::from_str::<WebsiteDraft>(&raw)
                .with_context(|| format!("{} is not a valid website draft", path.display()))?
        }
        None => {
            let mut draft = args.draft_from_flags();
            if args.title.is_none() {
                draft.title = Input::<String>::new()
                    .with_prompt("Website title")
                    .interact_text()?;
            }
            if let Some(path) = &args.html_file {
                draft.html = Some(read_input(path).await?);
            }
            draft
        }
    };

    store_draft(state, draft, json)
}

/// Convert a generation service's output into a draft and save it.
pub async fn import_website(
    state: &AppState,
    prompt: String,
    site_type: Option<String>,
    file: &Path,
    json: bool,
) -> Result<()> {
    let raw = read_input(file).await?;
    let output: GenerationOutput = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid generation output", file.display()))?;

    let draft = WebsiteDraft::from_generation(GenerationRequest { prompt, site_type }, output);
    store_draft(state, draft, json)
}

fn store_draft(state: &AppState, draft: WebsiteDraft, json: bool) -> Result<()> {
    draft.validate()?;
    let title = draft.title.clone();
    let slug = state.website_store.save_website(draft)?;

    if json {
        println!("{}", serde_json::json!({"slug": slug, "title": title}));
        return Ok(());
    }

    println!();
    println!("  {} Website saved!", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("Title:").bold(), style(&title).cyan());
    println!("  {}   {}", style("Slug:").bold(), &slug);
    println!();
    println!(
        "  View it: {}",
        style(format!("webgen show {slug}")).yellow()
    );
    println!();

    Ok(())
}

/// List all websites in a table, most recent first.
pub fn list_websites(state: &AppState, json: bool) -> Result<()> {
    let websites = state.website_store.get_websites_list();

    if json {
        let result = serde_json::json!({
            "count": websites.len(),
            "websites": websites,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if websites.is_empty() {
        println!();
        println!(
            "  {} No websites stored. Save one with: {}",
            style("i").blue().bold(),
            style("webgen save --title \"My Site\"").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Title").fg(Color::White),
        Cell::new("Slug").fg(Color::White),
        Cell::new("Type").fg(Color::White),
        Cell::new("Prompt").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for website in &websites {
        table.add_row(vec![
            Cell::new(&website.content.title).fg(Color::Cyan),
            Cell::new(&website.slug).fg(Color::White),
            Cell::new(&website.content.site_type),
            Cell::new(truncate(&website.content.prompt, 40)),
            Cell::new(format_relative_time(&website.created_at)).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} website{}",
        style(websites.len()).bold(),
        if websites.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Show the full record for a website.
pub fn show_website(state: &AppState, slug: &str, json: bool) -> Result<()> {
    let Some(website) = state.website_store.get_website(slug) else {
        anyhow::bail!("Website '{slug}' not found");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&website)?);
        return Ok(());
    }

    print_website(&website);
    Ok(())
}

fn print_website(website: &GeneratedWebsite) {
    let content = &website.content;

    println!();
    println!("  {}", style(&content.title).cyan().bold());
    if !content.description.is_empty() {
        println!("  {}", style(&content.description).dim());
    }
    println!();

    println!("  {}", style("── Details ──").dim());
    println!("  {}       {}", style("Slug:").bold(), &website.slug);
    println!("  {}       {}", style("Type:").bold(), &content.site_type);
    println!("  {}     {}", style("Prompt:").bold(), &content.prompt);
    println!(
        "  {}     {} / {}",
        style("Colors:").bold(),
        display_or_dash(&content.primary_color),
        display_or_dash(&content.secondary_color)
    );
    println!(
        "  {} {} + {} + {}",
        style("Tech stack:").bold(),
        display_or_dash(&content.tech_stack.framework),
        display_or_dash(&content.tech_stack.styling),
        display_or_dash(&content.tech_stack.backend)
    );
    println!();

    println!("  {}", style("── Content ──").dim());
    print_labels("Sections:", &content.sections);
    print_labels("Features:", &content.features);
    print_labels("Components:", &content.components);

    let markup = content
        .ai_generated_html
        .as_deref()
        .or(content.html.as_deref())
        .map(|html| format!("{} bytes", html.len()))
        .unwrap_or_else(|| "none".to_string());
    println!("  {}     {}", style("Markup:").bold(), markup);
    println!(
        "  {}      {}",
        style("Files:").bold(),
        if content.files.is_some() { "yes" } else { "none" }
    );
    println!();

    println!("  {}", style("── Timestamps ──").dim());
    println!(
        "  {}    {}",
        style("Created:").bold(),
        website.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!();
}

/// Delete a website, asking for confirmation unless forced.
pub fn delete_website(state: &AppState, slug: &str, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        if let Some(website) = state.website_store.get_website(slug) {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Permanently delete website '{}'?",
                    style(&website.content.title).red().bold()
                ))
                .default(false)
                .interact()?;

            if !confirmed {
                println!("  Cancelled.");
                return Ok(());
            }
        }
    }

    let deleted = state.website_store.delete_website(slug)?;

    if json {
        println!("{}", serde_json::json!({"deleted": deleted, "slug": slug}));
    } else if deleted {
        println!("  {} Website '{}' deleted.", style("✓").red().bold(), slug);
    } else {
        println!(
            "  {} No website with slug '{}'.",
            style("i").blue().bold(),
            style(slug).cyan()
        );
    }

    Ok(())
}

/// Remove every stored website.
pub fn clear_websites(state: &AppState, force: bool, json: bool) -> Result<()> {
    let count = state.website_store.get_count();

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete all {} stored website{}?",
                style(count).red().bold(),
                if count == 1 { "" } else { "s" }
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.website_store.clear_all()?;

    if json {
        println!("{}", serde_json::json!({"cleared": count}));
    } else {
        println!(
            "  {} Cleared {} website{}.",
            style("✓").red().bold(),
            count,
            if count == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

/// Print the number of stored websites.
pub fn count_websites(state: &AppState, json: bool) -> Result<()> {
    let count = state.website_store.get_count();
    if json {
        println!("{}", serde_json::json!({"count": count}));
    } else {
        println!("{count}");
    }
    Ok(())
}

/// Print the slug a title would receive right now.
pub fn preview_slug(state: &AppState, title: &str, json: bool) -> Result<()> {
    let slug = state.website_store.generate_slug(title);
    if json {
        println!("{}", serde_json::json!({"title": title, "slug": slug}));
    } else {
        println!("{slug}");
    }
    Ok(())
}

/// Read a file, or stdin when `path` is "-".
async fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read stdin")?;
        return Ok(buf);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

// --- Formatting helpers ---

fn print_labels(label: &str, values: &[String]) {
    let joined = if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    };
    println!("  {:<11} {}", style(label).bold(), joined);
}

fn display_or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

fn format_relative_time(dt: &chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let diff = now - *dt;

    if diff.num_minutes() < 1 {
        "just now".to_string()
    } else if diff.num_hours() < 1 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_days() < 1 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 30 {
        format!("{}d ago", diff.num_days())
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("short", 40), "short");
        assert_eq!(truncate("ééééééééééé", 8), "ééééé...");
    }

    #[test]
    fn test_format_relative_time() {
        let now = chrono::Utc::now();
        assert_eq!(format_relative_time(&now), "just now");
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::hours(3))),
            "3h ago"
        );
        let old = now - chrono::Duration::days(90);
        assert_eq!(format_relative_time(&old), old.format("%Y-%m-%d").to_string());
    }
}
