use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn doclens_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("doclens");
    path
}

fn setup_test_env() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    fs::write(
        root.join("report.txt"),
        "The project was a great success with excellent results. However, there were some risks. \
         Revenue grew 12.5% to $1,250.00 on 03/14/2024.",
    )
    .unwrap();
    fs::write(
        root.join("notes.md"),
        "# Notes\n\nSome **bold** findings about deployment.\n\n- infrastructure\n- monitoring\n",
    )
    .unwrap();
    fs::write(root.join("figures.csv"), "segment,revenue\nNorth,100\nSouth,250\n").unwrap();
    fs::write(root.join("empty.txt"), "\u{0001}\u{0002}   ").unwrap();

    tmp
}

fn run(args: &[&str], dir: &TempDir) -> std::process::Output {
    Command::new(doclens_binary())
        .args(args)
        .current_dir(dir.path())
        .env_remove("DEEPSEEK_API_KEY")
        .env_remove("GEMINI_API_KEY")
        .output()
        .expect("failed to run doclens")
}

#[test]
fn templates_lists_builtin_catalog() {
    let tmp = setup_test_env();
    let out = run(&["templates"], &tmp);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("business-report"));
    assert!(stdout.contains("general-summary"));
    assert!(stdout.contains("financial-statement"));
}

#[test]
fn templates_category_filter() {
    let tmp = setup_test_env();
    let out = run(&["templates", "--category", "legal"], &tmp);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("legal-document"));
    assert!(!stdout.contains("business-report"));

    let bad = run(&["templates", "--category", "sports"], &tmp);
    assert!(!bad.status.success());
}

#[test]
fn inspect_reports_signals_offline() {
    let tmp = setup_test_env();
    let out = run(&["inspect", "report.txt", "--json"], &tmp);
    assert!(out.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("inspect --json must emit valid JSON");

    assert_eq!(json["sentiment"]["label"], "mixed");
    let entities = json["entities"].as_array().unwrap();
    let texts: Vec<&str> = entities
        .iter()
        .map(|e| e["text"].as_str().unwrap())
        .collect();
    assert!(texts.contains(&"12.5%"));
    assert!(texts.contains(&"$1,250.00"));
    assert!(texts.contains(&"03/14/2024"));

    let readability = json["readability"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&readability));
}

#[test]
fn inspect_handles_markdown_and_csv() {
    let tmp = setup_test_env();

    let md = run(&["inspect", "notes.md"], &tmp);
    assert!(md.status.success());
    let stdout = String::from_utf8_lossy(&md.stdout);
    assert!(stdout.contains("deployment"));
    assert!(!stdout.contains("**"));

    let csv = run(&["inspect", "figures.csv"], &tmp);
    assert!(csv.status.success());
}

#[test]
fn inspect_rejects_empty_document() {
    let tmp = setup_test_env();
    let out = run(&["inspect", "empty.txt"], &tmp);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no analyzable text"));
}

#[test]
fn inspect_rejects_unsupported_extension() {
    let tmp = setup_test_env();
    fs::write(tmp.path().join("binary.exe"), b"MZ").unwrap();
    let out = run(&["inspect", "binary.exe"], &tmp);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unsupported file extension"));
}

#[test]
fn analyze_without_api_key_fails_with_env_hint() {
    let tmp = setup_test_env();
    let out = run(&["analyze", "report.txt", "--progress", "off"], &tmp);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("DEEPSEEK_API_KEY"));
}

#[test]
fn config_file_is_honored() {
    let tmp = setup_test_env();
    fs::write(
        tmp.path().join("doclens.toml"),
        r#"
[provider]
name = "gemini"

[analysis]
default_template = "technical-manual"
"#,
    )
    .unwrap();
    // Provider now resolves to gemini, so the missing-key error names
    // the gemini variable.
    let out = run(&["analyze", "report.txt", "--progress", "off"], &tmp);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("GEMINI_API_KEY"));
}

#[test]
fn invalid_config_is_rejected() {
    let tmp = setup_test_env();
    fs::write(
        tmp.path().join("doclens.toml"),
        r#"
[provider]
name = "openai"
"#,
    )
    .unwrap();
    let out = run(&["templates"], &tmp);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Unknown provider"));
}
