//! CQL search result resource

use serde::{Deserialize, Serialize};

use super::Content;

/// One hit from the CQL search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The matched content, when the hit is a content entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    /// Result title with highlight markup
    #[serde(default)]
    pub title: Option<String>,

    /// Snippet around the match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Web UI path of the result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
