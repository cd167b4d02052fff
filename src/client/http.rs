//! Authenticated HTTP transport
//!
//! Every API operation funnels through [`Transport::request`]: one round
//! trip, Basic auth, and a caller-selected decode mode. There are no
//! retries here; polling loops higher up repeat status checks on purpose,
//! never failed requests.

use std::path::Path;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as HttpClient, Method, multipart};
use serde_json::Value;

use crate::config::Credentials;
use crate::error::{Error, RemoteError, Result};

/// Request timeout applied to every call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How the response body should be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Parse the body as JSON
    Json,
    /// Return the body verbatim (PDF bytes, rendered export pages)
    Raw,
}

/// Decoded response payload, tagged by the mode that produced it.
#[derive(Debug)]
pub enum ResponseBody {
    Json(Value),
    Bytes(Vec<u8>),
}

impl ResponseBody {
    pub fn into_json(self) -> Result<Value> {
        match self {
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Bytes(_) => Err(Error::UnexpectedBody { expected: "JSON" }),
        }
    }

    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            ResponseBody::Bytes(bytes) => Ok(bytes),
            ResponseBody::Json(_) => Err(Error::UnexpectedBody { expected: "binary" }),
        }
    }
}

/// HTTP transport with a precomputed Basic authorization header.
pub(crate) struct Transport {
    http: HttpClient,
    auth_header: String,
}

impl Transport {
    pub(crate) fn new(credentials: &Credentials) -> Result<Self> {
        let http = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            auth_header: basic_auth_header(credentials),
        })
    }

    /// Issue one authenticated request and decode the response.
    ///
    /// An optional JSON body is serialized into the request. After decoding,
    /// both modes inspect the body for an embedded `statusCode >= 400` and
    /// surface it as a [`RemoteError`]; the raw path does this best-effort,
    /// since a failed binary download comes back as a small JSON error
    /// document rather than payload bytes. Transport-level failures
    /// propagate as [`Error::Http`] untouched.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: &str,
        mode: DecodeMode,
        body: Option<&Value>,
    ) -> Result<ResponseBody> {
        log::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        match mode {
            DecodeMode::Json => {
                let value: Value = response.json().await?;
                if let Some(err) = RemoteError::from_body(&value) {
                    return Err(err.into());
                }
                Ok(ResponseBody::Json(value))
            }
            DecodeMode::Raw => {
                let bytes = response.bytes().await?;
                if let Ok(value) = serde_json::from_slice::<Value>(&bytes)
                    && let Some(err) = RemoteError::from_body(&value)
                {
                    return Err(err.into());
                }
                Ok(ResponseBody::Bytes(bytes.to_vec()))
            }
        }
    }

    /// Upload a local file as a multipart form.
    ///
    /// Overrides the JSON content type with multipart and adds the
    /// `X-Atlassian-Token` header Confluence requires for attachment
    /// endpoints. The file is read inside this call, so the handle is
    /// closed before the request goes out regardless of outcome.
    pub(crate) async fn upload(&self, url: &str, file_path: &Path) -> Result<ResponseBody> {
        log::debug!("POST {} (multipart {})", url, file_path.display());

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("attachment")
            .to_string();
        let bytes = tokio::fs::read(file_path).await?;

        let part = multipart::Part::bytes(bytes).file_name(file_name);
        let form = multipart::Form::new()
            .part("file", part)
            .text("minorEdit", "true");

        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, &self.auth_header)
            .header("X-Atlassian-Token", "nocheck")
            .multipart(form)
            .send()
            .await?;

        let value: Value = response.json().await?;
        if let Some(err) = RemoteError::from_body(&value) {
            return Err(err.into());
        }
        Ok(ResponseBody::Json(value))
    }
}

fn basic_auth_header(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.username, credentials.secret);
    format!("Basic {}", STANDARD.encode(pair))
}
