//! Confluence API client

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

pub mod confluence;
mod export;
pub mod http;
pub mod models;
pub mod pagination;

pub use confluence::ConfluenceClient;
pub use http::{DecodeMode, ResponseBody};
pub use models::{
    Attachment, Content, CreateContentRequest, Label, NewLabel, SearchResult, Space,
    UpdateContentRequest,
};
pub use pagination::{DEFAULT_PAGE_SIZE, PageOf, collect_all};

/// Confluence API operations.
///
/// Implemented by [`ConfluenceClient`]; a trait seam so callers can
/// substitute fakes in tests.
#[async_trait]
pub trait ConfluenceApi: Send + Sync {
    // ========================================================================
    // Spaces
    // ========================================================================

    /// Get a space by key
    async fn get_space(&self, space_key: &str) -> Result<Space>;

    /// Get the home page of a space
    async fn get_space_home_page(&self, space_key: &str) -> Result<Content>;

    // ========================================================================
    // Content
    // ========================================================================

    /// Get content by ID with the standard expansions (body, version, space)
    async fn get_content_by_id(&self, content_id: &str) -> Result<Content>;

    /// Get content by ID with a caller-chosen expansion list
    async fn get_custom_content_by_id(
        &self,
        content_id: &str,
        expanders: &[&str],
    ) -> Result<Content>;

    /// List all pages in a space
    async fn get_content_by_space_key(&self, space_key: &str) -> Result<Vec<Content>>;

    /// Find a page by title within a space.
    ///
    /// Zero matches is an error here (`NotFound`), unlike the generic list
    /// operations which return an empty vector.
    async fn get_content_by_page_title(&self, space_key: &str, title: &str) -> Result<Content>;

    /// Create a page
    async fn create_content(&self, request: CreateContentRequest) -> Result<Content>;

    /// Update a page; the request must carry the next version number
    async fn update_content(&self, request: UpdateContentRequest) -> Result<Content>;

    /// Delete content by ID
    async fn delete_content(&self, content_id: &str) -> Result<()>;

    /// List direct children of a content item by child type
    /// (`page`, `comment`, `attachment`)
    async fn get_content_child_by_content_id(
        &self,
        content_id: &str,
        child_type: &str,
    ) -> Result<Vec<Content>>;

    // ========================================================================
    // Attachments
    // ========================================================================

    /// List attachments on a content item
    async fn get_attachments(&self, content_id: &str) -> Result<Vec<Attachment>>;

    /// Upload a local file as a new attachment
    async fn create_attachment(&self, content_id: &str, file_path: &Path) -> Result<Attachment>;

    /// Replace the binary data of an existing attachment
    async fn update_attachment_data(
        &self,
        content_id: &str,
        attachment_id: &str,
        file_path: &Path,
    ) -> Result<Attachment>;

    // ========================================================================
    // Labels
    // ========================================================================

    /// List labels on a content item
    async fn get_labels(&self, content_id: &str) -> Result<Vec<Label>>;

    /// Add labels to a content item; returns the full label list afterwards
    async fn post_labels(&self, content_id: &str, labels: &[NewLabel]) -> Result<Vec<Label>>;

    /// Remove a label from a content item by name
    async fn delete_label(&self, content_id: &str, label_name: &str) -> Result<()>;

    // ========================================================================
    // Search & export
    // ========================================================================

    /// Run a CQL query and collect every hit
    async fn search(&self, cql: &str) -> Result<Vec<SearchResult>>;

    /// Render a page to PDF via the asynchronous export job
    async fn export_page_as_pdf(&self, page_id: &str) -> Result<Vec<u8>>;
}
