#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{content_tree, folio_cmd};
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn list_json_is_sorted_and_skips_broken_posts() -> anyhow::Result<()> {
    let content = content_tree();
    let config = tempfile::tempdir()?;

    let out = folio_cmd(content.path(), config.path())
        .args(["list", "--lang", "en", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let posts: Vec<Value> = serde_json::from_slice(&out)?;
    let ids: Vec<&str> = posts.iter().filter_map(|p| p["id"].as_str()).collect();
    assert_eq!(ids, vec!["async-rust", "hello"]);
    assert_eq!(posts[0]["readingTime"], 1);
    assert_eq!(posts[0]["author"], "Sam");
    assert_eq!(posts[1]["imageUrl"], "https://img.example/hello.png");
    assert!(posts[0]["imageUrl"].as_str().unwrap().starts_with("https://images.unsplash.com/"));
    assert!(posts[0].get("content").is_none());
    Ok(())
}

#[test]
fn list_filters_by_search_and_tag() -> anyhow::Result<()> {
    let content = content_tree();
    let config = tempfile::tempdir()?;

    let out = folio_cmd(content.path(), config.path())
        .args(["list", "--lang", "en", "--search", "FUTURES", "-f", "jsonl"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let lines: Vec<Value> = String::from_utf8(out)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["id"], "async-rust");

    folio_cmd(content.path(), config.path())
        .args(["list", "--lang", "en", "--tag", "intro", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hello\""))
        .stdout(predicate::str::contains("async-rust").not());
    Ok(())
}

#[test]
fn list_text_uses_localized_dates() -> anyhow::Result<()> {
    let content = content_tree();
    let config = tempfile::tempdir()?;

    folio_cmd(content.path(), config.path())
        .args(["list", "--lang", "es", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hola Mundo"))
        .stdout(predicate::str::contains("1 de mayo de 2024"));

    folio_cmd(content.path(), config.path())
        .args(["list", "--lang", "en", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("March 10, 2024"));
    Ok(())
}

#[test]
fn language_falls_back_to_config_then_spanish() -> anyhow::Result<()> {
    let content = content_tree();
    let config = tempfile::tempdir()?;

    // No flag, no config, unsupported locale: Spanish.
    folio_cmd(content.path(), config.path())
        .args(["list", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hola"));

    std::fs::write(
        config.path().join("config.toml"),
        "[content]\ndefault_language = \"en\"\n",
    )?;
    folio_cmd(content.path(), config.path())
        .args(["list", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("async-rust"));

    folio_cmd(content.path(), config.path())
        .env("FOLIO_LANG", "es")
        .args(["list", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hola"));
    Ok(())
}

#[test]
fn missing_content_lists_nothing() -> anyhow::Result<()> {
    let empty = tempfile::tempdir()?;
    let config = tempfile::tempdir()?;

    folio_cmd(empty.path(), config.path())
        .args(["list", "--lang", "en", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));

    folio_cmd(empty.path(), config.path())
        .args(["list", "--lang", "en", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No posts available"));
    Ok(())
}

#[test]
fn piped_output_defaults_to_json() -> anyhow::Result<()> {
    let content = content_tree();
    let config = tempfile::tempdir()?;

    let out = folio_cmd(content.path(), config.path())
        .args(["list", "--lang", "en"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let parsed: Value = serde_json::from_slice(&out)?;
    assert!(parsed.is_array());
    Ok(())
}
