//! Asynchronous PDF export protocol
//!
//! Confluence has no webhook for export completion, so the client drives
//! the job itself: kick off the export, pull a task id out of the rendered
//! kickoff page, poll the task status on a fixed interval, then download
//! the finished artifact. The bounded attempt count guarantees the call
//! terminates instead of hanging on a stuck job.
//!
//! All three values come out of rendered HTML/XML fragments rather than a
//! structured API, so each marker lives behind its own extraction function;
//! when the server-side markup drifts, the fix is one regex.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::config::PollConfig;
use crate::error::{Error, Result};

/// The three HTTP exchanges the export protocol needs.
///
/// `ConfluenceClient` implements this over the authenticated transport;
/// tests implement it with canned response sequences.
#[async_trait]
pub(crate) trait ExportEndpoints: Sync {
    /// Fetch the export-kickoff page for a page id; returns rendered HTML
    /// embedding the task id.
    async fn export_kickoff(&self, page_id: &str) -> Result<String>;

    /// Fetch the status fragment for a running task.
    async fn task_progress(&self, task_id: &str) -> Result<String>;

    /// Download the finished artifact from its site-relative path.
    async fn download_artifact(&self, path: &str) -> Result<Vec<u8>>;
}

/// Run the export state machine for one page.
///
/// Terminal outcomes: artifact bytes, [`Error::Extraction`] when a marker
/// is missing, [`Error::ExportFailed`] when the job reports failure, or
/// [`Error::ExportTimeout`] once the attempt budget is spent. Polls are
/// strictly sequential with a non-blocking sleep between attempts.
pub(crate) async fn export_page_as_pdf<E>(
    endpoints: &E,
    config: &PollConfig,
    page_id: &str,
) -> Result<Vec<u8>>
where
    E: ExportEndpoints + ?Sized,
{
    let kickoff = endpoints.export_kickoff(page_id).await?;
    let task_id = extract_task_id(&kickoff)
        .ok_or(Error::Extraction("ajs-taskId"))?
        .to_string();

    log::debug!("export task {} started for page {}", task_id, page_id);

    for attempt in 1..=config.max_attempts {
        let status = endpoints.task_progress(&task_id).await?;

        if !extract_is_complete(&status).unwrap_or(false) {
            log::debug!(
                "export task {} still running (poll {}/{})",
                task_id,
                attempt,
                config.max_attempts
            );
            if attempt < config.max_attempts {
                tokio::time::sleep(config.interval).await;
            }
            continue;
        }

        // An absent success flag counts as failure; the job is done either
        // way, so there is nothing left to poll for.
        if !extract_is_successful(&status).unwrap_or(false) {
            log::warn!("export task {} completed unsuccessfully", task_id);
            return Err(Error::ExportFailed);
        }

        let path = extract_artifact_path(&status).ok_or(Error::Extraction("artifact href"))?;
        return endpoints.download_artifact(path).await;
    }

    Err(Error::ExportTimeout {
        attempts: config.max_attempts,
    })
}

/// Pull the export task id out of the rendered kickoff page.
fn extract_task_id(html: &str) -> Option<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#"name="ajs-taskId" content="([^"]+)">"#).unwrap());
    re.captures(html).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Completion flag from the task-status fragment; `None` when the marker
/// is missing, which callers treat the same as "still running".
fn extract_is_complete(status: &str) -> Option<bool> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"<isComplete>([^<]+)</isComplete>").unwrap());
    re.captures(status)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str() == "true")
}

/// Success flag from the task-status fragment.
fn extract_is_successful(status: &str) -> Option<bool> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"<isSuccessful>([^<]+)</isSuccessful>").unwrap());
    re.captures(status)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str() == "true")
}

/// Site-relative download path of the finished artifact, taken from the
/// first link in the completed status fragment.
fn extract_artifact_path(status: &str) -> Option<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#"href="([^"]+)""#).unwrap());
    re.captures(status).and_then(|c| c.get(1)).map(|m| m.as_str())
}
