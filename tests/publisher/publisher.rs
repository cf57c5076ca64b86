use autopost::drafts::{DraftStore, StorageConfig, StoredDraft};
use autopost::publisher::payload::{PostStatus, TRUNCATION_NOTICE};
use autopost::publisher::{preview, write_payload, PublishConfig, PublishError, Publisher};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn storage_in(root: &Path) -> StorageConfig {
    StorageConfig {
        keywords_path: None,
        posted_path: None,
        drafts_dir: Some(root.join("posts").to_string_lossy().to_string()),
        title_path: Some(root.join("title.txt").to_string_lossy().to_string()),
    }
}

fn draft(body: &str) -> StoredDraft {
    StoredDraft {
        path: PathBuf::from("posts/2024-01-01-test.md"),
        title: "Test Post".to_string(),
        body: body.to_string(),
    }
}

fn publisher(root: &Path, config: PublishConfig) -> Publisher {
    Publisher::new(DraftStore::new(&storage_in(root)), config)
}

#[test]
fn converts_markdown_to_html() {
    let dir = tempdir().expect("Failed to create tempdir");
    let publisher = publisher(dir.path(), PublishConfig::default());

    let payload = publisher.build_payload(&draft(
        "## Section\n\n- one\n- **two**\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n![alt](img.png)\n",
    ));

    assert_eq!(payload.title, "Test Post");
    assert_eq!(payload.status, PostStatus::Publish);
    assert!(payload.content.contains("<h2>Section</h2>"));
    assert!(payload.content.contains("<li><strong>two</strong></li>"));
    assert!(payload.content.contains("<table>"));
    assert!(payload.content.contains("<img src=\"img.png\" alt=\"alt\" />"));
    assert!(payload.meta.is_none());
}

#[test]
fn sanitizes_embedded_html() {
    let dir = tempdir().expect("Failed to create tempdir");
    let publisher = publisher(dir.path(), PublishConfig::default());

    let payload = publisher.build_payload(&draft(
        "Intro\n\n<script>alert(1)</script>\n\n<div onclick=\"x()\">box</div>\n",
    ));

    assert!(!payload.content.contains("script"));
    assert!(!payload.content.contains("onclick"));
    assert!(payload.content.contains("<div>box</div>"));
    assert!(payload.content.contains("<p>Intro</p>"));
}

#[test]
fn truncates_to_configured_maximum() {
    let dir = tempdir().expect("Failed to create tempdir");
    let publisher = publisher(
        dir.path(),
        PublishConfig {
            max_content_chars: Some(20),
            ..PublishConfig::default()
        },
    );

    let payload = publisher.build_payload(&draft(&"word ".repeat(100)));

    assert_eq!(
        payload.content.chars().count(),
        20 + TRUNCATION_NOTICE.chars().count()
    );
    assert!(payload.content.ends_with(TRUNCATION_NOTICE));
}

#[test]
fn adds_seo_meta_when_site_name_is_set() {
    let dir = tempdir().expect("Failed to create tempdir");
    let publisher = publisher(
        dir.path(),
        PublishConfig {
            site_name: Some("Example Blog".to_string()),
            ..PublishConfig::default()
        },
    );

    let payload = publisher.build_payload(&draft("# Test Post\n\nSome body text."));
    let meta = payload.meta.expect("Expected SEO meta");

    assert_eq!(meta.title, "Test Post | Example Blog");
    assert_eq!(meta.description, "Test Post Some body text.");
}

#[test]
fn prepare_uses_latest_draft() {
    let dir = tempdir().expect("Failed to create tempdir");
    let posts = dir.path().join("posts");
    fs::create_dir_all(&posts).unwrap();
    fs::write(posts.join("2024-01-01-foo.md"), "# Foo\n\nold").unwrap();
    fs::write(posts.join("2024-02-01-bar.md"), "# Bar\n\nnew").unwrap();

    let payload = publisher(dir.path(), PublishConfig::default())
        .prepare()
        .expect("Failed to prepare payload");

    assert_eq!(payload.title, "bar");
    assert!(payload.content.contains("<p>new</p>"));
}

#[test]
fn prepare_without_drafts_is_not_found() {
    let dir = tempdir().expect("Failed to create tempdir");

    let err = publisher(dir.path(), PublishConfig::default())
        .prepare()
        .expect_err("Expected not found");

    assert!(matches!(err, PublishError::Draft(_)));
    assert!(err.to_string().contains("No drafts found"));
}

#[test]
fn writes_payload_json_and_previews() {
    let dir = tempdir().expect("Failed to create tempdir");
    let publisher = publisher(dir.path(), PublishConfig::default());
    let payload = publisher.build_payload(&draft("Hello"));
    let path = dir.path().join("out/payload.json");

    write_payload(&payload, &path).expect("Failed to write payload");

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["title"], "Test Post");
    assert_eq!(value["status"], "publish");
    assert_eq!(value["content"], "<p>Hello</p>\n");

    let text = preview(&payload);
    assert!(text.starts_with("Title: Test Post\nStatus: publish\n"));
    assert!(text.contains("<p>Hello</p>"));
}
