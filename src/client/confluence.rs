//! Confluence API client implementation

use std::path::Path;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use urlencoding::encode;

use super::ConfluenceApi;
use super::export::{self, ExportEndpoints};
use super::http::{DecodeMode, Transport};
use super::models::{
    Attachment, Content, CreateContentRequest, Label, NewLabel, SearchResult, Space,
    UpdateContentRequest,
};
use super::pagination::{DEFAULT_PAGE_SIZE, PageOf, collect_all};
use crate::config::{ApiVersion, Credentials, EndpointConfig, PollConfig};
use crate::error::{Error, Result};

/// Expansions requested by the standard content lookup
const CONTENT_EXPANSIONS: &str = "body.storage,version,space";

/// Typed client for one Confluence instance.
///
/// Configuration is fixed at construction, so independent call sites can
/// share or clone clients freely without synchronization.
pub struct ConfluenceClient {
    endpoints: EndpointConfig,
    poll: PollConfig,
    transport: Transport,
}

impl ConfluenceClient {
    /// Client for the current REST API with default poll timing.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Result<Self> {
        Self::with_options(
            base_url,
            credentials,
            ApiVersion::default(),
            PollConfig::default(),
        )
    }

    /// Client with an explicit API version and poll configuration.
    pub fn with_options(
        base_url: impl Into<String>,
        credentials: Credentials,
        version: ApiVersion,
        poll: PollConfig,
    ) -> Result<Self> {
        Ok(Self {
            endpoints: EndpointConfig::new(base_url, version),
            poll,
            transport: Transport::new(&credentials)?,
        })
    }

    /// Resolved endpoint layout for this client.
    pub fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    async fn get_typed<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let value = self
            .transport
            .request(Method::GET, &url, DecodeMode::Json, None)
            .await?
            .into_json()?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get_raw(&self, url: String) -> Result<Vec<u8>> {
        self.transport
            .request(Method::GET, &url, DecodeMode::Raw, None)
            .await?
            .into_bytes()
    }

    async fn send_typed<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: &Value,
    ) -> Result<T> {
        let value = self
            .transport
            .request(method, &url, DecodeMode::Json, Some(body))
            .await?
            .into_json()?;
        Ok(serde_json::from_value(value)?)
    }

    /// One cursor step of a paginated listing.
    async fn page_of<T: DeserializeOwned>(&self, url: String) -> Result<PageOf<T>> {
        self.get_typed(url).await
    }

    /// Drain a paginated resource. `base_query` must be pre-encoded and
    /// must not include `start`/`limit`; those belong to the cursor.
    async fn collect_list<T: DeserializeOwned>(
        &self,
        resource: String,
        base_query: String,
    ) -> Result<Vec<T>> {
        collect_all(move |start| {
            let query = if base_query.is_empty() {
                format!("start={start}&limit={DEFAULT_PAGE_SIZE}")
            } else {
                format!("{base_query}&start={start}&limit={DEFAULT_PAGE_SIZE}")
            };
            let url = self.endpoints.resource_url(&resource, &query);
            self.page_of(url)
        })
        .await
    }
}

#[async_trait]
impl ConfluenceApi for ConfluenceClient {
    async fn get_space(&self, space_key: &str) -> Result<Space> {
        let url = self
            .endpoints
            .resource_url(&format!("/space/{}", encode(space_key)), "");
        self.get_typed(url).await
    }

    async fn get_space_home_page(&self, space_key: &str) -> Result<Content> {
        let url = self
            .endpoints
            .resource_url(&format!("/space/{}", encode(space_key)), "expand=homepage");
        let space: Value = self.get_typed(url).await?;

        match space.get("homepage") {
            Some(homepage) if homepage.is_object() => {
                Ok(serde_json::from_value(homepage.clone())?)
            }
            _ => Err(Error::NotFound(format!(
                "home page for space {space_key}"
            ))),
        }
    }

    async fn get_content_by_id(&self, content_id: &str) -> Result<Content> {
        self.get_custom_content_by_id(content_id, &[CONTENT_EXPANSIONS])
            .await
    }

    async fn get_custom_content_by_id(
        &self,
        content_id: &str,
        expanders: &[&str],
    ) -> Result<Content> {
        let url = self.endpoints.resource_url(
            &format!("/content/{content_id}"),
            &format!("expand={}", expanders.join(",")),
        );
        self.get_typed(url).await
    }

    async fn get_content_by_space_key(&self, space_key: &str) -> Result<Vec<Content>> {
        self.collect_list(
            "/content".to_string(),
            format!("spaceKey={}&type=page&expand=version", encode(space_key)),
        )
        .await
    }

    async fn get_content_by_page_title(&self, space_key: &str, title: &str) -> Result<Content> {
        let matches: Vec<Content> = self
            .collect_list(
                "/content".to_string(),
                format!(
                    "spaceKey={}&title={}&expand={}",
                    encode(space_key),
                    encode(title),
                    CONTENT_EXPANSIONS
                ),
            )
            .await?;

        matches.into_iter().next().ok_or_else(|| {
            Error::NotFound(format!("page \"{title}\" in space {space_key}"))
        })
    }

    async fn create_content(&self, request: CreateContentRequest) -> Result<Content> {
        let url = self.endpoints.resource_url("/content", "");
        let body = serde_json::to_value(&request)?;
        self.send_typed(Method::POST, url, &body).await
    }

    async fn update_content(&self, request: UpdateContentRequest) -> Result<Content> {
        let url = self
            .endpoints
            .resource_url(&format!("/content/{}", request.id), "");
        let body = serde_json::to_value(&request)?;
        self.send_typed(Method::PUT, url, &body).await
    }

    async fn delete_content(&self, content_id: &str) -> Result<()> {
        let url = self
            .endpoints
            .resource_url(&format!("/content/{content_id}"), "");
        // Success is an empty 204; decode raw so there is no JSON to parse,
        // while error bodies still surface through the transport check.
        self.transport
            .request(Method::DELETE, &url, DecodeMode::Raw, None)
            .await?;
        Ok(())
    }

    async fn get_content_child_by_content_id(
        &self,
        content_id: &str,
        child_type: &str,
    ) -> Result<Vec<Content>> {
        self.collect_list(
            format!("/content/{content_id}/child/{child_type}"),
            String::new(),
        )
        .await
    }

    async fn get_attachments(&self, content_id: &str) -> Result<Vec<Attachment>> {
        self.collect_list(
            format!("/content/{content_id}/child/attachment"),
            String::new(),
        )
        .await
    }

    async fn create_attachment(&self, content_id: &str, file_path: &Path) -> Result<Attachment> {
        let url = self
            .endpoints
            .resource_url(&format!("/content/{content_id}/child/attachment"), "");
        let value = self.transport.upload(&url, file_path).await?.into_json()?;

        // The upload endpoint answers with a one-element listing.
        let page: PageOf<Attachment> = serde_json::from_value(value)?;
        page.results.into_iter().next().ok_or_else(|| {
            Error::NotFound(format!("uploaded attachment on content {content_id}"))
        })
    }

    async fn update_attachment_data(
        &self,
        content_id: &str,
        attachment_id: &str,
        file_path: &Path,
    ) -> Result<Attachment> {
        let url = self.endpoints.resource_url(
            &format!("/content/{content_id}/child/attachment/{attachment_id}/data"),
            "",
        );
        let value = self.transport.upload(&url, file_path).await?.into_json()?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get_labels(&self, content_id: &str) -> Result<Vec<Label>> {
        self.collect_list(format!("/content/{content_id}/label"), String::new())
            .await
    }

    async fn post_labels(&self, content_id: &str, labels: &[NewLabel]) -> Result<Vec<Label>> {
        let url = self
            .endpoints
            .resource_url(&format!("/content/{content_id}/label"), "");
        let body = serde_json::to_value(labels)?;
        let page: PageOf<Label> = self.send_typed(Method::POST, url, &body).await?;
        Ok(page.results)
    }

    async fn delete_label(&self, content_id: &str, label_name: &str) -> Result<()> {
        let url = self.endpoints.resource_url(
            &format!("/content/{content_id}/label"),
            &format!("name={}", encode(label_name)),
        );
        self.transport
            .request(Method::DELETE, &url, DecodeMode::Raw, None)
            .await?;
        Ok(())
    }

    async fn search(&self, cql: &str) -> Result<Vec<SearchResult>> {
        self.collect_list("/search".to_string(), format!("cql={}", encode(cql)))
            .await
    }

    async fn export_page_as_pdf(&self, page_id: &str) -> Result<Vec<u8>> {
        export::export_page_as_pdf(self, &self.poll, page_id).await
    }
}

#[async_trait]
impl ExportEndpoints for ConfluenceClient {
    async fn export_kickoff(&self, page_id: &str) -> Result<String> {
        let url = self.endpoints.site_url(&format!(
            "/spaces/flyingpdf/pdfpageexport.action?pageId={page_id}"
        ));
        let bytes = self.get_raw(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn task_progress(&self, task_id: &str) -> Result<String> {
        let url = self
            .endpoints
            .site_url(&format!("/runningtaskxml.action?taskId={task_id}"));
        let bytes = self.get_raw(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn download_artifact(&self, path: &str) -> Result<Vec<u8>> {
        self.get_raw(self.endpoints.site_url(path)).await
    }
}
