#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{content_tree, folio_cmd};
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn show_json_includes_rendered_html() -> anyhow::Result<()> {
    let content = content_tree();
    let config = tempfile::tempdir()?;

    let out = folio_cmd(content.path(), config.path())
        .args(["show", "async-rust", "--lang", "en", "-f", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let post: Value = serde_json::from_slice(&out)?;
    assert_eq!(post["title"], "Async Rust");
    assert_eq!(post["date"], "2024-03-10");
    let html = post["content"].as_str().unwrap();
    assert!(html.contains("<h1>Intro</h1>"));
    assert!(html.contains("<p>Polling all the way down.</p>"));
    Ok(())
}

#[test]
fn show_text_with_html_body() -> anyhow::Result<()> {
    let content = content_tree();
    let config = tempfile::tempdir()?;

    folio_cmd(content.path(), config.path())
        .args(["show", "hello", "--lang", "en", "-f", "text", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello World"))
        .stdout(predicate::str::contains("November 2, 2023"))
        .stdout(predicate::str::contains("<p>Welcome!</p>"));
    Ok(())
}

#[test]
fn show_missing_post_fails() -> anyhow::Result<()> {
    let content = content_tree();
    let config = tempfile::tempdir()?;

    folio_cmd(content.path(), config.path())
        .args(["show", "gone", "--lang", "en", "-f", "json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be loaded"));

    folio_cmd(content.path(), config.path())
        .args(["show", "../secrets", "--lang", "en", "-f", "text"])
        .assert()
        .failure();
    Ok(())
}

#[test]
fn tags_are_sorted_and_unique() -> anyhow::Result<()> {
    let content = content_tree();
    let config = tempfile::tempdir()?;

    let out = folio_cmd(content.path(), config.path())
        .args(["tags", "--lang", "en", "-f", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let tags: Vec<String> = serde_json::from_slice(&out)?;
    assert_eq!(tags, vec!["async", "intro", "rust"]);

    folio_cmd(content.path(), config.path())
        .args(["tags", "--lang", "es", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::eq("intro\nsaludo\n"));
    Ok(())
}

#[test]
fn unsupported_language_is_rejected() -> anyhow::Result<()> {
    let content = content_tree();
    let config = tempfile::tempdir()?;

    folio_cmd(content.path(), config.path())
        .args(["tags", "--lang", "fr"])
        .assert()
        .failure();
    Ok(())
}

#[test]
fn explicit_config_file_is_used() -> anyhow::Result<()> {
    let content = content_tree();
    let config = tempfile::tempdir()?;
    let file = config.path().join("custom.toml");
    std::fs::write(
        &file,
        "[content]\ndefault_language = \"en\"\n\n[render]\nfallback_image_url = \"https://cdn.example/default.png\"\n",
    )?;

    folio_cmd(content.path(), config.path())
        .arg("--config")
        .arg(&file)
        .args(["show", "async-rust", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://cdn.example/default.png"));
    Ok(())
}
