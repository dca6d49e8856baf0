//! Shapes exchanged with the LLM-backed generation services.
//!
//! A generation service takes a [`GenerationRequest`] and answers with a
//! [`GenerationOutput`]. The store never talks to those services; it only
//! accepts their output once converted into a [`WebsiteDraft`].

use serde::{Deserialize, Serialize};

use crate::page::inline_assets;
use crate::website::{TechStack, WebsiteDraft};

/// Site type used when a request does not name one.
pub const DEFAULT_SITE_TYPE: &str = "website";

/// A prompt sent to a generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub site_type: Option<String>,
}

/// Code and metadata returned by a generation service.
///
/// Single-file providers fill `html`/`css`/`javascript`; multi-file providers
/// additionally return a `files` project map and a `framework` label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutput {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub javascript: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub sections: Vec<String>,
    #[serde(default)]
    pub primary_color: String,
    #[serde(default)]
    pub secondary_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
}

impl WebsiteDraft {
    /// Convert a generation result into a draft ready for the store.
    ///
    /// The bare generated markup is kept as `html`; `aiGeneratedHTML` holds the
    /// servable page with the generated CSS and JavaScript inlined. When the
    /// service returned no project map, one is assembled from the single-file
    /// output.
    pub fn from_generation(request: GenerationRequest, output: GenerationOutput) -> Self {
        let files = match output.files {
            Some(files) => files,
            None => serde_json::json!({
                "index.html": &output.html,
                "styles.css": &output.css,
                "script.js": &output.javascript,
            }),
        };

        let page = (!output.html.is_empty())
            .then(|| inline_assets(&output.html, &output.css, &output.javascript));
        let html = (!output.html.is_empty()).then_some(output.html);

        Self {
            prompt: request.prompt,
            title: output.title,
            description: output.description,
            site_type: request
                .site_type
                .unwrap_or_else(|| DEFAULT_SITE_TYPE.to_string()),
            primary_color: output.primary_color,
            secondary_color: output.secondary_color,
            sections: output.sections,
            features: output.features,
            components: Vec::new(),
            tech_stack: TechStack {
                framework: output.framework.unwrap_or_else(|| "html".to_string()),
                styling: "css".to_string(),
                backend: "none".to_string(),
            },
            files: Some(files),
            html,
            ai_generated_html: page,
            extra: serde_json::Map::new(),
        }
    }
}
