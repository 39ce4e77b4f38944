//! Domain DTOs for the posts API.
//!
//! # Design
//! Wire names are camelCase. `content` is a sequence of editor blocks the
//! core never looks inside: `Block` wraps a raw JSON value so a fetched
//! document goes back to the server byte-for-byte equivalent.
//!
//! The mock server defines its own copies of these shapes; the integration
//! tests catch schema drift between the two crates.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type PostId = i64;

/// Card color used when a post carries none.
pub const DEFAULT_CARD_COLOR: &str = "#FF5733";

fn default_card_color() -> String {
    DEFAULT_CARD_COLOR.to_string()
}

/// One opaque rich-text block, owned by the editor component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Block(pub serde_json::Value);

/// A full post as returned by `GET /posts/{id}`, `POST` and `PUT`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    #[serde(default)]
    pub content: Vec<Block>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub category2: Option<String>,
    #[serde(default)]
    pub category3: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default = "default_card_color")]
    pub card_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The subset of a post the list view keeps. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: PostId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /posts` and `PUT /posts/{id}`.
///
/// Optional fields serialize as explicit `null`. The secondary categories
/// are only present when the extended field set is active.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    pub title: String,
    pub content: Vec<Block>,
    pub author: Option<String>,
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra_categories: Option<ExtraCategories>,
    pub cover_image: Option<String>,
    pub card_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraCategories {
    pub category2: Option<String>,
    pub category3: Option<String>,
}

/// Which post fields the editing views expose.
///
/// `Minimal` is the short publishing form; `Extended` adds the secondary
/// categories and makes the main category mandatory when saving edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldSet {
    Minimal,
    #[default]
    Extended,
}

impl FieldSet {
    pub fn has_extra_categories(self) -> bool {
        matches!(self, FieldSet::Extended)
    }
}

impl FromStr for FieldSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(FieldSet::Minimal),
            "extended" => Ok(FieldSet::Extended),
            other => Err(format!("unknown field set `{other}`")),
        }
    }
}
