use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_cmdline-rewrite");

/// Writes a MergeVcfs tool file into `dir`.
fn write_merge_vcfs(dir: &Path) -> PathBuf {
    let json = serde_json::json!({
        "tool": "MergeVcfs",
        "arguments": [
            { "long_name": "INPUT", "short_name": "I" },
            { "long_name": "OUTPUT", "short_name": "O" },
            { "long_name": "CREATE_INDEX", "is_flag": true }
        ]
    });
    let path = dir.join("MergeVcfs.json");
    fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).expect("failed to write tool");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(BIN).args(args).output().expect("failed to run binary")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

const LEGACY_DOC: &str =
    "<p>Usage</p>\n<pre>java -jar picard.jar MergeVcfs I=a.vcf O=b.vcf CREATE_INDEX=true</pre>\n";
const MODERN_DOC: &str = "<p>Usage</p>\n<pre>gatk MergeVcfs -I a.vcf -O b.vcf --CREATE_INDEX</pre>\n";

// ---------------------------------------------------------------------------
// rewrite
// ---------------------------------------------------------------------------

#[test]
fn rewrite_prints_rewritten_text() {
    let catalog = tempfile::tempdir().unwrap();
    write_merge_vcfs(catalog.path());
    let docs = tempfile::tempdir().unwrap();
    let doc = docs.path().join("MergeVcfs.html");
    fs::write(&doc, LEGACY_DOC).unwrap();

    let output = run(&["rewrite", path_str(&doc), "--catalog", path_str(catalog.path())]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), MODERN_DOC);
    assert_eq!(fs::read_to_string(&doc).unwrap(), LEGACY_DOC);
}

#[test]
fn rewrite_in_place_updates_files() {
    let catalog = tempfile::tempdir().unwrap();
    write_merge_vcfs(catalog.path());
    let docs = tempfile::tempdir().unwrap();
    let first = docs.path().join("a.html");
    let second = docs.path().join("b.html");
    fs::write(&first, LEGACY_DOC).unwrap();
    fs::write(&second, "<p>nothing to do</p>").unwrap();

    let output = run(&[
        "rewrite",
        path_str(&first),
        path_str(&second),
        "--catalog",
        path_str(catalog.path()),
        "--in-place",
        "--jobs",
        "2",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read_to_string(&first).unwrap(), MODERN_DOC);
    assert_eq!(fs::read_to_string(&second).unwrap(), "<p>nothing to do</p>");
    assert!(String::from_utf8_lossy(&output.stdout).contains("in 1 file(s)"));
}

#[test]
fn rewrite_output_dir_writes_copies() {
    let catalog = tempfile::tempdir().unwrap();
    write_merge_vcfs(catalog.path());
    let docs = tempfile::tempdir().unwrap();
    let doc = docs.path().join("MergeVcfs.html");
    fs::write(&doc, LEGACY_DOC).unwrap();
    let out = docs.path().join("out");

    let output = run(&[
        "rewrite",
        path_str(&doc),
        "--catalog",
        path_str(catalog.path()),
        "--output",
        path_str(&out),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read_to_string(out.join("MergeVcfs.html")).unwrap(), MODERN_DOC);
    assert_eq!(fs::read_to_string(&doc).unwrap(), LEGACY_DOC);
}

#[test]
fn rewrite_report_is_json() {
    let docs = tempfile::tempdir().unwrap();
    let doc = docs.path().join("SortSam.html");
    fs::write(&doc, "<pre>java -jar picard.jar SortSam I=a O=b</pre>").unwrap();

    let output = run(&["rewrite", path_str(&doc), "--report"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total"]["invocations"], 1);
    assert_eq!(report["total"]["arguments"], 2);
    assert_eq!(report["total"]["unknown_tools"][0], "SortSam");
    assert_eq!(report["files"].as_array().unwrap().len(), 1);
}

#[test]
fn rewrite_uses_project_config() {
    let dir = tempfile::tempdir().unwrap();
    let tools = dir.path().join("tools");
    fs::create_dir(&tools).unwrap();
    write_merge_vcfs(&tools);
    let config = dir.path().join("rewrite.yml");
    fs::write(
        &config,
        "version: \"1.0\"\ncatalogs:\n  - tools\nrewrite:\n  replacement_tool: newtool\n",
    )
    .unwrap();
    let doc = dir.path().join("doc.html");
    fs::write(&doc, "<pre>java -jar picard.jar MergeVcfs CREATE_INDEX=T</pre>").unwrap();

    let output = run(&["rewrite", path_str(&doc), "--config", path_str(&config)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "<pre>newtool MergeVcfs --CREATE_INDEX</pre>"
    );
}

#[test]
fn rewrite_fails_on_missing_file() {
    let output = run(&["rewrite", "/nonexistent/doc.html"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

#[test]
fn rewrite_fails_when_no_catalog_loads() {
    let docs = tempfile::tempdir().unwrap();
    let doc = docs.path().join("doc.html");
    fs::write(&doc, LEGACY_DOC).unwrap();

    let output = run(&["rewrite", path_str(&doc), "--catalog", "/nonexistent/tools"]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// rewrite-stdin
// ---------------------------------------------------------------------------

#[test]
fn rewrite_stdin_roundtrip() {
    let catalog = tempfile::tempdir().unwrap();
    write_merge_vcfs(catalog.path());

    let mut child = Command::new(BIN)
        .args(["rewrite-stdin", "--catalog", path_str(catalog.path())])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(LEGACY_DOC.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), MODERN_DOC);
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_reports_stale_files() {
    let docs = tempfile::tempdir().unwrap();
    let stale = docs.path().join("stale.html");
    let fresh = docs.path().join("fresh.html");
    fs::write(&stale, LEGACY_DOC).unwrap();
    fs::write(&fresh, MODERN_DOC).unwrap();

    let output = run(&["check", path_str(&stale), path_str(&fresh)]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("stale.html"));
    assert!(!stdout.contains("fresh.html"));

    let output = run(&["check", path_str(&fresh)]);
    assert!(output.status.success());
}

// ---------------------------------------------------------------------------
// validate / bundle
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_good_catalog() {
    let catalog = tempfile::tempdir().unwrap();
    write_merge_vcfs(catalog.path());

    let output = run(&["validate", path_str(catalog.path())]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 tool(s)"));
}

#[test]
fn validate_rejects_duplicate_spelling() {
    let catalog = tempfile::tempdir().unwrap();
    let json = serde_json::json!({
        "tool": "MergeVcfs",
        "arguments": [
            { "long_name": "INPUT", "short_name": "I" },
            { "long_name": "I" }
        ]
    });
    fs::write(catalog.path().join("bad.json"), json.to_string()).unwrap();

    let output = run(&["validate", path_str(catalog.path())]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error:"));
}

#[test]
fn validate_rejects_duplicate_tools_across_files() {
    let catalog = tempfile::tempdir().unwrap();
    write_merge_vcfs(catalog.path());
    fs::write(catalog.path().join("copy.json"), r#"{ "tool": "MergeVcfs" }"#).unwrap();

    let output = run(&["validate", path_str(catalog.path())]);
    assert!(!output.status.success());
}

#[test]
fn bundle_writes_catalog_usable_for_rewrite() {
    let catalog = tempfile::tempdir().unwrap();
    write_merge_vcfs(catalog.path());
    let out = tempfile::tempdir().unwrap();
    let bundle = out.path().join("nested").join("catalog.json");

    let output = run(&[
        "bundle",
        path_str(catalog.path()),
        "--output",
        path_str(&bundle),
        "--name",
        "picard",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&bundle).unwrap()).unwrap();
    assert_eq!(raw["name"], "picard");
    assert_eq!(raw["tools"][0]["tool"], "MergeVcfs");
    assert!(raw["bundle_hash"].is_string());

    let doc = out.path().join("doc.html");
    fs::write(&doc, LEGACY_DOC).unwrap();
    let output = run(&["rewrite", path_str(&doc), "--catalog", path_str(&bundle)]);
    assert_eq!(String::from_utf8_lossy(&output.stdout), MODERN_DOC);
}
