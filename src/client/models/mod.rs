//! Typed response and request models for the Confluence REST API

use serde::{Deserialize, Serialize};

pub mod attachment;
pub mod content;
pub mod label;
pub mod search;
pub mod space;

pub use attachment::Attachment;
pub use content::{Content, ContentBody, CreateContentRequest, UpdateContentRequest, Version};
pub use label::{Label, NewLabel};
pub use search::SearchResult;
pub use space::Space;

/// The `_links` block most resources carry.
///
/// Only the links the client actually consumes are modeled; everything
/// else in the block is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Links {
    /// Canonical REST URL of the resource
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    /// Web UI path of the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webui: Option<String>,

    /// Download path (attachments only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<String>,
}
