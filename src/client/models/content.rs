//! Content (page/blogpost) resource and its request builders

use serde::{Deserialize, Serialize};

use super::{Links, Space};

/// A piece of Confluence content: a page, blog post, or comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Content ID (numeric, but the API passes it as a string)
    pub id: String,

    /// Content type: `page`, `blogpost`, `comment`, `attachment`
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,

    /// Lifecycle status, normally `current`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Page title
    #[serde(default)]
    pub title: Option<String>,

    /// Owning space, present when expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<Space>,

    /// Version metadata, present when expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,

    /// Body renditions, present when expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<ContentBody>,

    /// Ancestor chain, root first, present when expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ancestors: Option<Vec<Content>>,

    /// Resource links
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// Content version metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    /// Monotonic version number; updates must send `current + 1`
    pub number: u32,
}

/// Body renditions of a piece of content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBody {
    /// Storage-format rendition (Confluence XHTML)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<Storage>,
}

/// One body rendition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storage {
    /// Markup value
    pub value: String,

    /// Rendition name, always `storage` for writes
    pub representation: String,
}

impl Storage {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            representation: "storage".to_string(),
        }
    }
}

/// Space reference used inside request bodies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceRef {
    pub key: String,
}

/// Ancestor reference used inside request bodies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AncestorRef {
    pub id: String,
}

/// Request body for creating a page.
#[derive(Debug, Clone, Serialize)]
pub struct CreateContentRequest {
    #[serde(rename = "type")]
    pub content_type: String,
    pub title: String,
    pub space: SpaceRef,
    pub body: ContentBody,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<AncestorRef>,
}

impl CreateContentRequest {
    /// A new top-level page in `space_key` with a storage-format body.
    pub fn page(
        space_key: impl Into<String>,
        title: impl Into<String>,
        storage_value: impl Into<String>,
    ) -> Self {
        Self {
            content_type: "page".to_string(),
            title: title.into(),
            space: SpaceRef {
                key: space_key.into(),
            },
            body: ContentBody {
                storage: Some(Storage::new(storage_value)),
            },
            ancestors: Vec::new(),
        }
    }

    /// Nest the new page under an existing parent.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.ancestors = vec![AncestorRef {
            id: parent_id.into(),
        }];
        self
    }
}

/// Request body for updating a page.
///
/// Confluence rejects updates whose version number is not exactly one
/// above the stored version; supplying that number is the caller's job.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateContentRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub title: String,
    pub space: SpaceRef,
    pub body: ContentBody,
    pub version: Version,
}

impl UpdateContentRequest {
    pub fn page(
        id: impl Into<String>,
        space_key: impl Into<String>,
        title: impl Into<String>,
        storage_value: impl Into<String>,
        version: u32,
    ) -> Self {
        Self {
            id: id.into(),
            content_type: "page".to_string(),
            title: title.into(),
            space: SpaceRef {
                key: space_key.into(),
            },
            body: ContentBody {
                storage: Some(Storage::new(storage_value)),
            },
            version: Version { number: version },
        }
    }
}
