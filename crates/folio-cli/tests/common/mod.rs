#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// A `folio` command isolated from the host's config, locale and terminal.
pub fn folio_cmd(content_root: &Path, config_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("folio"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env_remove("FOLIO_CONFIG");
    cmd.env_remove("FOLIO_LANG");
    cmd.env_remove("FOLIO_OUTPUT_FORMAT");
    cmd.env("FOLIO_CONFIG_DIR", config_dir);
    cmd.env("FOLIO_CONTENT_SOURCE", content_root);
    cmd.env("LANG", "C");
    cmd.env_remove("LC_ALL");
    cmd.env_remove("LC_MESSAGES");
    cmd.env_remove("LANGUAGE");
    cmd.env("NO_COLOR", "1");
    cmd
}

fn write(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().expect("file has a parent")).unwrap();
    fs::write(path, body).unwrap();
}

/// Two English posts (one listed but missing) and one Spanish post.
pub fn content_tree() -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create content dir");
    let root = dir.path();
    write(
        &root.join("en/index.json"),
        r#"["async-rust", "hello", "gone"]"#,
    );
    write(
        &root.join("en/async-rust.md"),
        "---\ntitle: Async Rust\ndate: 2024-03-10\ndescription: Futures explained\ntags: [rust, async]\nauthor: Sam\n---\n# Intro\n\nPolling all the way down.\n",
    );
    write(
        &root.join("en/hello.md"),
        "---\ntitle: Hello World\ndate: 2023-11-02\ndescription: First post\ntags: [intro]\nimageUrl: https://img.example/hello.png\n---\nWelcome!\n",
    );
    write(&root.join("es/index.json"), r#"["hola"]"#);
    write(
        &root.join("es/hola.md"),
        "---\ntitle: Hola Mundo\ndate: 2024-05-01\ntags: [intro, saludo]\n---\nBienvenidos\n",
    );
    dir
}
