//! Typed async client for the Confluence Server/Data Center REST API.
//!
//! Covers spaces, pages, attachments, labels, CQL search, and PDF export.
//! Every operation goes through one authenticated transport; list endpoints
//! are drained with a `start`/`limit` cursor, and PDF export drives the
//! server's asynchronous job protocol with bounded polling.
//!
//! # Example
//! ```ignore
//! use confluence_api::{ConfluenceApi, ConfluenceClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> confluence_api::Result<()> {
//!     let client = ConfluenceClient::new(
//!         "https://wiki.example.com",
//!         Credentials::new("alice", std::env::var("CONFLUENCE_TOKEN").unwrap()),
//!     )?;
//!
//!     let page = client.get_content_by_page_title("DEV", "Home").await?;
//!     let pdf = client.export_page_as_pdf(&page.id).await?;
//!     std::fs::write("home.pdf", pdf)?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::{
    Attachment, ConfluenceApi, ConfluenceClient, Content, CreateContentRequest, Label, NewLabel,
    PageOf, SearchResult, Space, UpdateContentRequest, collect_all,
};
pub use config::{ApiVersion, Credentials, EndpointConfig, PollConfig};
pub use error::{Error, RemoteError, Result};
