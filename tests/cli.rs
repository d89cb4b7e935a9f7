// 命令行集成测试

use std::fs;
use std::path::Path;

use assert_cmd::Command;

fn write_site(root: &Path) {
    fs::create_dir_all(root.join("i18n")).unwrap();
    fs::write(
        root.join("i18n/es.json"),
        r#"{"search": {"title": "Resultados", "no_results": "Sin resultados"}, "nav": {"home": "Inicio"}}"#,
    )
    .unwrap();
    fs::write(
        root.join("i18n/en.json"),
        r#"{"search": {"title": "Results", "no_results": "Nothing found"}, "nav": {"home": "Home"}}"#,
    )
    .unwrap();
    fs::write(
        root.join("index.html"),
        "<html><body><p>Me gusta el café con leche</p></body></html>",
    )
    .unwrap();
    fs::write(
        root.join("about.html"),
        "<html><body><p>Somos una cafetería</p></body></html>",
    )
    .unwrap();
}

fn site_lingo(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("site-lingo").unwrap();
    cmd.current_dir(dir)
        .env_remove("LC_ALL")
        .env_remove("LC_MESSAGES")
        .env("LANG", "C")
        .env_remove("SITE_LINGO_BASE_URL")
        .env_remove("SITE_LINGO_PAGES");
    cmd
}

#[test]
fn search_prints_text_results() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    let output = site_lingo(dir.path())
        .args(["--site-root", ".", "--pages", "index.html,about.html,gone.html"])
        .args(["search", "CAFÉ", "--format", "text"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "index.html\tMe gusta el <mark>café</mark> con leche\n");
}

#[test]
fn search_prints_results_region_as_html() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    let output = site_lingo(dir.path())
        .args(["--site-root", ".", "--pages", "index.html"])
        .args(["search", "pizza", "--lang", "en"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("<h2>Results</h2>"));
    assert!(stdout.contains(r#"<p class="search-message">Nothing found</p>"#));
}

#[test]
fn command_line_fixes_config_file_and_heading_tag_applies() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());
    fs::write(
        dir.path().join("site-lingo.toml"),
        "site_root = \".\"\npages = []\nresults_heading_tag = \"h3\"\n",
    )
    .unwrap();

    let output = site_lingo(dir.path())
        .args(["--pages", "index.html", "search", "café"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with(r#"<div id="search-results"><h3>Resultados</h3>"#));
    assert!(stdout.contains(r#"<a href="index.html">index.html</a>"#));
}

#[test]
fn translate_rewrites_marked_elements() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());
    fs::write(
        dir.path().join("page.html"),
        r#"<html><body><a data-i18n="nav.home">Inicio</a></body></html>"#,
    )
    .unwrap();

    let output = site_lingo(dir.path())
        .args(["--site-root", ".", "translate", "page.html", "--lang", "en"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)
        .unwrap()
        .contains(r#"<a data-i18n="nav.home">Home</a>"#));
}

#[test]
fn unsupported_language_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    site_lingo(dir.path())
        .args(["--site-root", ".", "search", "café", "--lang", "fr"])
        .assert()
        .failure();
}

#[test]
fn languages_marks_the_stored_preference() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("prefs.json"), r#"{"language": "en"}"#).unwrap();

    let output = site_lingo(dir.path())
        .args(["--preferences", "prefs.json", "languages"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "  es\n* en\n");
}

#[test]
fn missing_site_source_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();

    site_lingo(dir.path())
        .args(["search", "café"])
        .assert()
        .failure();
}
