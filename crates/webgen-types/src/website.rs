use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::DraftError;

/// Number of trailing base-36 digits of the creation timestamp kept in a slug.
pub const SLUG_SUFFIX_LEN: usize = 6;

/// Keys owned by [`GeneratedWebsite`] itself; never carried in a draft.
pub const IDENTITY_FIELDS: [&str; 3] = ["id", "slug", "createdAt"];

/// Technology labels attached to a generated website.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TechStack {
    #[serde(default, deserialize_with = "null_as_default")]
    pub framework: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub styling: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub backend: String,
}

/// Website content as produced by a generation service, before the store
/// assigns it an identity.
///
/// Every field has a serde default and a JSON `null` reads as that default,
/// so records written by older or looser producers still load. Keys this
/// struct does not model (`css`, `javascript`, `framework`, ...) are kept in
/// `extra` and written back verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteDraft {
    /// Natural-language request the site was generated from.
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Free-form category label ("portfolio", "landing", ...).
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub site_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary_color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub secondary_color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tech_stack: TechStack,
    /// Opaque project payload. Stored and returned verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(
        rename = "aiGeneratedHTML",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ai_generated_html: Option<String>,
    /// Unmodelled keys, round-tripped as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WebsiteDraft {
    /// Check the draft before it is handed to the store.
    ///
    /// The store itself accepts any title; callers reject blank ones.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        Ok(())
    }
}

/// A persisted generated website.
///
/// `id` and `slug` always hold the same value: the identifier *is* the slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWebsite {
    pub id: String,
    pub slug: String,
    #[serde(flatten)]
    pub content: WebsiteDraft,
    /// Set by the store at save time; never taken from the caller.
    #[serde(serialize_with = "serialize_millis")]
    pub created_at: DateTime<Utc>,
}

impl GeneratedWebsite {
    /// Stamp a draft with its identity and creation instant.
    ///
    /// Identity keys a draft picked up in `extra` are discarded.
    pub fn from_draft(slug: String, mut content: WebsiteDraft, created_at: DateTime<Utc>) -> Self {
        for key in IDENTITY_FIELDS {
            content.extra.remove(key);
        }
        Self {
            id: slug.clone(),
            slug,
            content,
            created_at,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// `2023-11-14T22:13:20.000Z`: always three fractional digits.
fn serialize_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Reduce a title to its URL-safe slug stem.
///
/// Rules:
/// - Lowercase
/// - Every maximal run of characters outside `[a-z0-9]` becomes one hyphen
/// - Leading/trailing hyphens are trimmed
///
/// # Examples
///
/// ```
/// use webgen_types::website::slugify;
///
/// assert_eq!(slugify("Brew Haven Cafe"), "brew-haven-cafe");
/// assert_eq!(slugify("  Hello, World!  "), "hello-world");
/// assert_eq!(slugify("Café Olé"), "caf-ol");
/// ```
pub fn slugify(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut prev_was_hyphen = true; // treat start as hyphen to trim leading
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            result.push(c);
            prev_was_hyphen = false;
        } else if !prev_was_hyphen {
            result.push('-');
            prev_was_hyphen = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Build the slug for a website titled `title` created at `at`.
///
/// The stem from [`slugify`] is followed by a hyphen and the lowest
/// [`SLUG_SUFFIX_LEN`] base-36 digits of the epoch-millisecond timestamp.
/// Two saves of the same title within one millisecond (or exactly one
/// suffix wraparound apart) produce the same slug.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use webgen_types::website::generate_slug;
///
/// let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
/// assert_eq!(generate_slug("Brew Haven Cafe", at), "brew-haven-cafe-yw3v28");
/// ```
pub fn generate_slug(title: &str, at: DateTime<Utc>) -> String {
    let millis = u64::try_from(at.timestamp_millis()).unwrap_or(0);
    let digits = to_base36(millis);
    let suffix = &digits[digits.len().saturating_sub(SLUG_SUFFIX_LEN)..];
    format!("{}-{suffix}", slugify(title))
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(char::from_digit((n % 36) as u32, 36).unwrap_or('0'));
        n /= 36;
    }
    digits.iter().rev().collect()
}
