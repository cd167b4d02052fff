//! HTTP-level tests against a mock Confluence server.

use std::io::Write;
use std::time::Duration;

use mockito::Matcher;
use serde_json::json;

use confluence_api::{
    ApiVersion, ConfluenceApi, ConfluenceClient, CreateContentRequest, Credentials, Error,
    NewLabel, PollConfig,
};

fn test_client(base_url: &str) -> ConfluenceClient {
    let _ = env_logger::builder().is_test(true).try_init();
    ConfluenceClient::with_options(
        base_url,
        Credentials::new("alice", "token"),
        ApiVersion::Latest,
        PollConfig {
            interval: Duration::from_millis(1),
            max_attempts: 5,
        },
    )
    .expect("client should build")
}

// base64("alice:token")
const BASIC_AUTH: &str = "Basic YWxpY2U6dG9rZW4=";

#[tokio::test]
async fn get_space_sends_basic_auth_and_decodes_body() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/rest/api/space/DEV")
        .match_header("authorization", BASIC_AUTH)
        .with_status(200)
        .with_body(r#"{ "id": 98306, "key": "DEV", "name": "Development" }"#)
        .create_async()
        .await;

    let space = test_client(&server.url()).get_space("DEV").await.unwrap();

    mock.assert_async().await;
    assert_eq!(space.key, "DEV");
    assert_eq!(space.name.as_deref(), Some("Development"));
}

#[tokio::test]
async fn space_without_homepage_maps_to_not_found() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/rest/api/space/DEV")
        .match_query(Matcher::UrlEncoded("expand".into(), "homepage".into()))
        .with_body(r#"{ "id": 98306, "key": "DEV", "name": "Development" }"#)
        .create_async()
        .await;

    let err = test_client(&server.url())
        .get_space_home_page("DEV")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(msg) if msg.contains("DEV")));
}

#[tokio::test]
async fn space_homepage_is_returned_when_expanded() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/rest/api/space/DEV")
        .match_query(Matcher::UrlEncoded("expand".into(), "homepage".into()))
        .with_body(
            r#"{
                "key": "DEV",
                "homepage": { "id": "1234", "type": "page", "title": "Home" }
            }"#,
        )
        .create_async()
        .await;

    let home = test_client(&server.url())
        .get_space_home_page("DEV")
        .await
        .unwrap();

    assert_eq!(home.id, "1234");
    assert_eq!(home.title.as_deref(), Some("Home"));
}

#[tokio::test]
async fn error_body_surfaces_as_remote_error() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/rest/api/content/999")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(
            r#"{
                "statusCode": 404,
                "message": "No content found with id: 999",
                "errors": [{ "message": "content not found" }],
                "authorized": false,
                "valid": true
            }"#,
        )
        .create_async()
        .await;

    let err = test_client(&server.url())
        .get_content_by_id("999")
        .await
        .unwrap_err();

    match err {
        Error::Api(remote) => {
            assert_eq!(remote.status_code, 404);
            assert_eq!(remote.message, "No content found with id: 999");
            assert_eq!(remote.error_messages, vec!["content not found".to_string()]);
            assert!(!remote.authorized);
            assert!(remote.valid);
        }
        other => panic!("expected Error::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn space_listing_follows_the_cursor() {
    let mut server = mockito::Server::new_async().await;

    let first = server
        .mock("GET", "/rest/api/content")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("spaceKey".into(), "DEV".into()),
            Matcher::UrlEncoded("start".into(), "0".into()),
            Matcher::UrlEncoded("limit".into(), "100".into()),
        ]))
        .with_body(
            json!({
                "results": [
                    { "id": "1", "type": "page", "title": "A" },
                    { "id": "2", "type": "page", "title": "B" }
                ],
                "start": 0,
                "limit": 2,
                "size": 2
            })
            .to_string(),
        )
        .create_async()
        .await;

    let second = server
        .mock("GET", "/rest/api/content")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("spaceKey".into(), "DEV".into()),
            Matcher::UrlEncoded("start".into(), "2".into()),
        ]))
        .with_body(
            json!({
                "results": [{ "id": "3", "type": "page", "title": "C" }],
                "start": 2,
                "limit": 2,
                "size": 1
            })
            .to_string(),
        )
        .create_async()
        .await;

    let pages = test_client(&server.url())
        .get_content_by_space_key("DEV")
        .await
        .unwrap();

    first.assert_async().await;
    second.assert_async().await;

    let ids: Vec<&str> = pages.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn missing_page_title_maps_to_not_found() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/rest/api/content")
        .match_query(Matcher::Any)
        .with_body(r#"{ "results": [], "start": 0, "limit": 100, "size": 0 }"#)
        .create_async()
        .await;

    let err = test_client(&server.url())
        .get_content_by_page_title("DEV", "Missing Page")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(msg) if msg.contains("Missing Page")));
}

#[tokio::test]
async fn create_content_posts_the_page_body() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/rest/api/content")
        .match_body(Matcher::PartialJson(json!({
            "type": "page",
            "title": "New Page",
            "space": { "key": "DEV" },
            "body": { "storage": { "value": "<p>hello</p>", "representation": "storage" } }
        })))
        .with_body(r#"{ "id": "42", "type": "page", "title": "New Page" }"#)
        .create_async()
        .await;

    let created = test_client(&server.url())
        .create_content(CreateContentRequest::page("DEV", "New Page", "<p>hello</p>"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(created.id, "42");
}

#[tokio::test]
async fn delete_content_tolerates_an_empty_body() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("DELETE", "/rest/api/content/42")
        .with_status(204)
        .create_async()
        .await;

    test_client(&server.url())
        .delete_content("42")
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn post_labels_returns_the_resulting_label_list() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/rest/api/content/42/label")
        .match_body(Matcher::Json(json!([{ "prefix": "global", "name": "docs" }])))
        .with_body(
            r#"{
                "results": [{ "prefix": "global", "name": "docs", "id": "7" }],
                "start": 0, "limit": 200, "size": 1
            }"#,
        )
        .create_async()
        .await;

    let labels = test_client(&server.url())
        .post_labels("42", &[NewLabel::global("docs")])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].name, "docs");
}

#[tokio::test]
async fn create_attachment_uploads_multipart_with_token_header() {
    let mut server = mockito::Server::new_async().await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"attachment payload").unwrap();

    let mock = server
        .mock("POST", "/rest/api/content/42/child/attachment")
        .match_header("x-atlassian-token", "nocheck")
        .match_header(
            "content-type",
            Matcher::Regex("multipart/form-data.*".to_string()),
        )
        .with_body(
            r#"{
                "results": [{ "id": "att1", "type": "attachment", "title": "report.txt" }],
                "start": 0, "limit": 1, "size": 1
            }"#,
        )
        .create_async()
        .await;

    let attachment = test_client(&server.url())
        .create_attachment("42", file.path())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(attachment.id, "att1");
}

#[tokio::test]
async fn pdf_export_runs_the_full_protocol() {
    let mut server = mockito::Server::new_async().await;

    let kickoff = server
        .mock("GET", "/spaces/flyingpdf/pdfpageexport.action")
        .match_query(Matcher::UrlEncoded("pageId".into(), "123".into()))
        .with_body(r#"<html><meta name="ajs-taskId" content="777"></html>"#)
        .create_async()
        .await;

    let status = server
        .mock("GET", "/runningtaskxml.action")
        .match_query(Matcher::UrlEncoded("taskId".into(), "777".into()))
        .with_body(concat!(
            "<isComplete>true</isComplete><isSuccessful>true</isSuccessful>",
            r#"<a href="/download/temp/export.pdf">ready</a>"#,
        ))
        .create_async()
        .await;

    let artifact = server
        .mock("GET", "/download/temp/export.pdf")
        .with_header("content-type", "application/pdf")
        .with_body(b"%PDF-1.4 payload".as_slice())
        .create_async()
        .await;

    let pdf = test_client(&server.url())
        .export_page_as_pdf("123")
        .await
        .unwrap();

    kickoff.assert_async().await;
    status.assert_async().await;
    artifact.assert_async().await;
    assert_eq!(pdf, b"%PDF-1.4 payload");
}

#[tokio::test]
async fn raw_download_still_detects_an_error_body() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/spaces/flyingpdf/pdfpageexport.action")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{ "statusCode": 403, "message": "Forbidden" }"#)
        .create_async()
        .await;

    let err = test_client(&server.url())
        .export_page_as_pdf("123")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api(remote) if remote.status_code == 403));
}
