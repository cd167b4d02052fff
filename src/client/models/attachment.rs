//! Attachment resource

use serde::{Deserialize, Serialize};

use super::Links;

/// A file attached to a piece of content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment ID, prefixed with `att` by the API
    pub id: String,

    /// Always `attachment`
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,

    /// File name
    #[serde(default)]
    pub title: Option<String>,

    /// Media type and size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<AttachmentExtensions>,

    /// Resource links; `download` is the site-relative fetch path
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// Attachment metadata block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentExtensions {
    #[serde(rename = "mediaType", default)]
    pub media_type: Option<String>,

    #[serde(rename = "fileSize", default)]
    pub file_size: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
